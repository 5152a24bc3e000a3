//! Gameplay behaviours driven frame by frame by a host loop.
//!
//! Every behaviour takes the frame's [`FrameTime`](gloam_core::FrameTime) and
//! the engine capabilities it needs as arguments. None of them own a timer or
//! reach for global state.

pub mod camera_rig;
pub mod combat;
pub mod config;
pub mod day_night;
pub mod debug_hotkeys;
pub mod health_bar;
pub mod input;
pub mod locomotion;
pub mod zombie;

pub use camera_rig::{CameraPose, CameraRig, OrbitRigConfig};
pub use combat::{CombatConfig, PlayerCombat};
pub use config::GameConfig;
pub use day_night::{
    AmbientLighting, AmbientMode, DayNightConfig, DayNightCycle, EaseCurve, EaseShape, LightingState,
    SunState,
};
pub use debug_hotkeys::{DebugHotkeys, HotkeyConfig};
pub use health_bar::HealthBar;
pub use input::{InputState, Key, MouseButton};
pub use locomotion::{
    BufferedJumpConfig, BufferedJumpLocomotion, GroundProbe, SpeedTier, TieredConfig, TieredFrame,
    TieredLocomotion,
};
pub use zombie::{ZombieAi, ZombieConfig, ZombieTick};
