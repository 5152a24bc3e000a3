pub mod error;
pub mod time;
pub mod tolerance;
pub mod traits;

pub use error::{GloamError, Result};
pub use time::{FrameTime, GameClock};
pub use tolerance::Tolerance;
