//! Scene model shared by gameplay behaviours: actors, their health, and the
//! engine capabilities behaviours are allowed to call.

pub mod capability;
pub mod health;
pub mod registry;
pub mod types;
mod validate;

pub use capability::{AnimationDriver, MotionController, NavigationAgent, SpatialQuery};
pub use health::{DamageOutcome, Health, HealthChange, ListenerId};
pub use registry::ActorRegistry;
pub use types::*;
