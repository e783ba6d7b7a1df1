//! Fish Catch - a falling-fish catching arcade game
//!
//! Core modules:
//! - `sim`: Frame-driven simulation (entities, spawning, collisions, rules)
//! - `platform`: Input and render-surface seams to the host
//! - `settings`: Data-driven game configuration
//! - `error`: Invariant-violation errors

pub mod error;
pub mod platform;
pub mod settings;
pub mod sim;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use error::{SettingsError, SimError};
pub use settings::Settings;
pub use sim::{Hud, Simulation};
