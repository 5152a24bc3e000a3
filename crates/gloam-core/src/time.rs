//! Host-driven frame timing.
//!
//! Components never read a global timer. The host's loop owns a [`GameClock`]
//! and hands each update the [`FrameTime`] for that step.

/// Time information for a single update step.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameTime {
    /// Seconds elapsed since the clock started, at the end of this step
    pub now: f64,
    /// Seconds covered by this step
    pub dt: f64,
}

impl FrameTime {
    pub fn new(now: f64, dt: f64) -> Self {
        Self { now, dt }
    }
}

/// Monotonic simulation clock advanced by the host loop.
#[derive(Debug, Clone, Default)]
pub struct GameClock {
    now: f64,
    frames: u64,
}

impl GameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance by `dt` seconds. Negative steps are treated as zero.
    pub fn advance(&mut self, dt: f64) -> FrameTime {
        let dt = dt.max(0.0);
        self.now += dt;
        self.frames += 1;
        FrameTime { now: self.now, dt }
    }

    pub fn now(&self) -> f64 {
        self.now
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}
