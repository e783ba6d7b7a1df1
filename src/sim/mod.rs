//! Simulation core
//!
//! All gameplay logic lives here. Nothing in this module renders or touches
//! the platform directly:
//! - Entities advance by an externally supplied `dt`
//! - Spawning draws from a seeded RNG
//! - Events fan out synchronously within the tick that raised them

pub mod atlas;
pub mod autopilot;
pub mod collision;
pub mod events;
pub mod fishery;
pub mod rules;
pub mod score;
pub mod state;
pub mod tick;

pub use atlas::{SpawnAtlas, SpawnPattern, Tier};
pub use autopilot::Autopilot;
pub use collision::{CollisionDetector, aabb_overlap};
pub use events::{ComponentId, Dispatch, Event, EventBus, NotificationReceiver, Payload};
pub use fishery::{DifficultyState, Fishery};
pub use rules::{GamePhase, GameRules, LossReason};
pub use score::ScoreTracker;
pub use state::{Aabb, Entity, EntityId, EntityKind, Fish, FishKind, Net, Updatable};
pub use tick::{Hud, NET_ID, Simulation};
