//! Platform abstraction layer
//!
//! The simulation talks to the outside world only through these seams:
//! - Input: pressed-key queries polled once per tick
//! - Surface: idempotent entity add/remove for the render layer

pub mod input;
pub mod surface;

pub use input::{InputProvider, Key, KeyState};
pub use surface::{EntityRegistry, RenderChange, RenderSurface};
