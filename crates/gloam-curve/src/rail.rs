//! Constant-speed travel along a curve.
//!
//! [`CurveRail`] owns the control handles and the length table derived from
//! them. [`DistanceAccumulator`] advances a travelled distance each tick, and
//! [`RailFollower`] turns that distance into a pose for whatever the host
//! moves along the rail (usually a camera).

use gloam_core::error::Result;
use gloam_core::Tolerance;
use gloam_math::pose::{look_rotation, slerp_clamped};
use gloam_math::{Point3, Pose, Vector3, UP};
use serde::{Deserialize, Serialize};

use crate::arclength::ArcLengthTable;
use crate::curve::{ControlHandles, CurveKind};

/// Fewest samples a rail will build its table with.
pub const MIN_RAIL_SAMPLES: usize = 16;
/// Most samples a rail will build its table with.
pub const MAX_RAIL_SAMPLES: usize = 2048;

/// Step applied by [`RailFollower::speed_up`] and [`RailFollower::slow_down`].
pub const SPEED_STEP: f64 = 2.0;
/// Floor for [`RailFollower::slow_down`].
pub const MIN_ADJUSTED_SPEED: f64 = 1.0;

/// Fraction of the remaining turn applied each tick when orienting.
const ORIENT_BLEND: f64 = 0.5;

/// What happens when the travelled distance passes either end of the rail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaybackMode {
    /// Wrap around to the other end.
    #[default]
    Loop,
    /// Stop at the ends.
    Clamp,
}

/// Distance travelled along a rail of known length.
#[derive(Debug, Clone, Default)]
pub struct DistanceAccumulator {
    distance: f64,
    pub mode: PlaybackMode,
}

impl DistanceAccumulator {
    /// Start at distance zero.
    pub fn new(mode: PlaybackMode) -> Self {
        Self {
            distance: 0.0,
            mode,
        }
    }

    /// Distance travelled from the start of the rail.
    pub fn distance(&self) -> f64 {
        self.distance
    }

    /// Return to the start of the rail.
    pub fn reset(&mut self) {
        self.distance = 0.0;
    }

    /// Move by `delta` along a rail of `total_length`.
    ///
    /// Returns the new distance, or `None` (leaving state untouched) when the
    /// rail has no length yet. Looping wraps into `[0, total_length)`;
    /// clamping keeps the distance in `[0, total_length]`. A non-finite
    /// `delta` is dropped and the distance stays where it was.
    pub fn advance(&mut self, delta: f64, total_length: f64) -> Option<f64> {
        if !(total_length > 0.0) {
            return None;
        }
        if !delta.is_finite() {
            tracing::warn!(delta, distance = self.distance, "ignoring non-finite rail step");
            return Some(self.distance);
        }
        let next = self.distance + delta;
        self.distance = match self.mode {
            PlaybackMode::Loop => {
                let mut d = next % total_length;
                if d < 0.0 {
                    d += total_length;
                }
                // A tiny negative remainder can round up to the full length.
                if d >= total_length {
                    d = 0.0;
                }
                d
            }
            PlaybackMode::Clamp => next.clamp(0.0, total_length),
        };
        Some(self.distance)
    }
}

/// Curve handles plus the length table built from them.
///
/// Every change rebuilds the table from scratch and swaps it in whole, so
/// readers never observe a half-built table.
#[derive(Debug, Clone)]
pub struct CurveRail {
    kind: CurveKind,
    handles: ControlHandles,
    sample_count: usize,
    table: ArcLengthTable,
}

impl CurveRail {
    /// Build a rail. `sample_count` is clamped to the supported range.
    pub fn new(kind: CurveKind, handles: ControlHandles, sample_count: usize) -> Result<Self> {
        let sample_count = sample_count.clamp(MIN_RAIL_SAMPLES, MAX_RAIL_SAMPLES);
        let table = ArcLengthTable::from_handles(kind, &handles, sample_count)?;
        Ok(Self {
            kind,
            handles,
            sample_count,
            table,
        })
    }

    /// Degree of the rail's curve.
    pub fn kind(&self) -> CurveKind {
        self.kind
    }

    /// Handles the current table was built from.
    pub fn handles(&self) -> &ControlHandles {
        &self.handles
    }

    /// Sample count after clamping.
    pub fn sample_count(&self) -> usize {
        self.sample_count
    }

    /// Current length table, empty while handles are missing.
    pub fn table(&self) -> &ArcLengthTable {
        &self.table
    }

    /// Length of the rail, zero while not ready.
    pub fn total_length(&self) -> f64 {
        self.table.total_length()
    }

    /// Replace the handles and rebuild the table.
    pub fn set_handles(&mut self, handles: ControlHandles) -> Result<()> {
        self.handles = handles;
        self.rebuild()
    }

    /// Switch between quadratic and cubic, then rebuild.
    pub fn set_kind(&mut self, kind: CurveKind) -> Result<()> {
        self.kind = kind;
        self.rebuild()
    }

    /// Rebuild with a new sample count, clamped like [`CurveRail::new`].
    pub fn set_sample_count(&mut self, sample_count: usize) -> Result<()> {
        self.sample_count = sample_count.clamp(MIN_RAIL_SAMPLES, MAX_RAIL_SAMPLES);
        self.rebuild()
    }

    fn rebuild(&mut self) -> Result<()> {
        self.table = ArcLengthTable::from_handles(self.kind, &self.handles, self.sample_count)?;
        Ok(())
    }
}

/// Settings for a [`RailFollower`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RailConfig {
    pub kind: CurveKind,
    pub handles: ControlHandles,
    pub samples: usize,
    /// Metres per second; negative runs backwards.
    pub speed: f64,
    pub mode: PlaybackMode,
    pub orient_along_tangent: bool,
    /// Metres ahead of the current point used to derive the facing.
    pub look_ahead: f64,
    pub play_on_start: bool,
}

impl Default for RailConfig {
    fn default() -> Self {
        Self {
            kind: CurveKind::Cubic,
            handles: ControlHandles::scene_default(CurveKind::Cubic),
            samples: 256,
            speed: 20.0,
            mode: PlaybackMode::Loop,
            orient_along_tangent: true,
            look_ahead: 1.0,
            play_on_start: true,
        }
    }
}

/// Moves a target pose along a [`CurveRail`] at constant speed.
#[derive(Debug, Clone)]
pub struct RailFollower {
    rail: CurveRail,
    accumulator: DistanceAccumulator,
    target: Pose,
    speed: f64,
    look_ahead: f64,
    pub orient_along_tangent: bool,
    playing: bool,
    tolerance: Tolerance,
}

impl RailFollower {
    /// A playing follower at distance zero with tangent facing on.
    pub fn new(rail: CurveRail, mode: PlaybackMode, speed: f64) -> Self {
        Self {
            rail,
            accumulator: DistanceAccumulator::new(mode),
            target: Pose::identity(),
            speed,
            look_ahead: 1.0,
            orient_along_tangent: true,
            playing: true,
            tolerance: Tolerance::default(),
        }
    }

    /// Build the rail and apply every setting in `config`.
    pub fn from_config(config: &RailConfig) -> Result<Self> {
        let rail = CurveRail::new(config.kind, config.handles, config.samples)?;
        let mut follower = Self::new(rail, config.mode, config.speed);
        follower.set_look_ahead(config.look_ahead);
        follower.orient_along_tangent = config.orient_along_tangent;
        follower.playing = config.play_on_start;
        Ok(follower)
    }

    /// Start from an existing pose so the first ticks blend from it.
    pub fn with_target(mut self, target: Pose) -> Self {
        self.target = target;
        self
    }

    /// The rail being followed.
    pub fn rail(&self) -> &CurveRail {
        &self.rail
    }

    /// Replace the handles and rebuild the table. Travelled distance is kept.
    pub fn set_handles(&mut self, handles: ControlHandles) -> Result<()> {
        self.rail.set_handles(handles)
    }

    pub fn set_sample_count(&mut self, sample_count: usize) -> Result<()> {
        self.rail.set_sample_count(sample_count)
    }

    /// Pose produced by the last tick.
    pub fn target(&self) -> Pose {
        self.target
    }

    /// Distance travelled along the rail.
    pub fn distance(&self) -> f64 {
        self.accumulator.distance()
    }

    pub fn mode(&self) -> PlaybackMode {
        self.accumulator.mode
    }

    pub fn set_mode(&mut self, mode: PlaybackMode) {
        self.accumulator.mode = mode;
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn set_speed(&mut self, speed: f64) {
        self.speed = speed;
    }

    /// Add [`SPEED_STEP`] to the speed.
    pub fn speed_up(&mut self) {
        self.speed += SPEED_STEP;
    }

    /// Subtract [`SPEED_STEP`], never going below [`MIN_ADJUSTED_SPEED`].
    pub fn slow_down(&mut self) {
        self.speed = (self.speed - SPEED_STEP).max(MIN_ADJUSTED_SPEED);
    }

    pub fn look_ahead(&self) -> f64 {
        self.look_ahead
    }

    /// Negative look-ahead is treated as zero.
    pub fn set_look_ahead(&mut self, look_ahead: f64) {
        self.look_ahead = look_ahead.max(0.0);
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn play(&mut self) {
        if !self.playing {
            tracing::info!(distance = self.distance(), "rail playback started");
        }
        self.playing = true;
    }

    pub fn pause(&mut self) {
        if self.playing {
            tracing::info!(distance = self.distance(), "rail playback paused");
        }
        self.playing = false;
    }

    /// Advance by `dt` seconds and return the updated target pose.
    ///
    /// Returns `None` while paused or while the rail has no length.
    pub fn tick(&mut self, dt: f64) -> Option<Pose> {
        if !self.playing {
            return None;
        }
        let table = self.rail.table();
        let total = table.total_length();
        let distance = self.accumulator.advance(self.speed * dt, total)?;

        let position = table.point_at_distance(distance);
        self.target.position = position;

        if self.orient_along_tangent {
            let ahead = table.point_at_distance((distance + self.look_ahead).min(total));
            let forward = self.facing_towards(position, ahead);
            let goal = look_rotation(forward, UP);
            self.target.rotation = slerp_clamped(self.target.rotation, goal, ORIENT_BLEND);
        }
        Some(self.target)
    }

    fn facing_towards(&self, from: Point3, to: Point3) -> Vector3 {
        let delta = to - from;
        if self.tolerance.is_degenerate_direction(delta.length_squared()) {
            self.target.forward()
        } else {
            delta.normalize()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use gloam_math::{dvec3, DVec3};

    fn straight_rail() -> CurveRail {
        // Straight 10 m rail along +X.
        CurveRail::new(
            CurveKind::Quadratic,
            ControlHandles::quadratic(
                dvec3(0.0, 0.0, 0.0),
                dvec3(5.0, 0.0, 0.0),
                dvec3(10.0, 0.0, 0.0),
            ),
            64,
        )
        .unwrap()
    }

    #[test]
    fn test_loop_wraps_forward_and_backward() {
        let mut acc = DistanceAccumulator::new(PlaybackMode::Loop);
        assert_abs_diff_eq!(acc.advance(12.0, 10.0).unwrap(), 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(acc.advance(-5.0, 10.0).unwrap(), 7.0, epsilon = 1e-12);
        let d = acc.advance(3.0, 10.0).unwrap();
        assert!((0.0..10.0).contains(&d), "d = {d}");
    }

    #[test]
    fn test_non_finite_step_keeps_distance() {
        for mode in [PlaybackMode::Loop, PlaybackMode::Clamp] {
            let mut acc = DistanceAccumulator::new(mode);
            acc.advance(4.0, 10.0);
            for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
                assert_eq!(acc.advance(bad, 10.0), Some(4.0));
            }
            assert_abs_diff_eq!(acc.advance(1.0, 10.0).unwrap(), 5.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_nan_speed_does_not_poison_follower() {
        let mut follower = RailFollower::new(straight_rail(), PlaybackMode::Loop, 2.0);
        follower.tick(1.0);
        follower.set_speed(f64::NAN);
        let pose = follower.tick(1.0).unwrap();
        assert!(pose.position.is_finite());
        follower.set_speed(2.0);
        follower.tick(1.0);
        assert_abs_diff_eq!(follower.distance(), 4.0, epsilon = 1e-9);
    }

    #[test]
    fn test_clamp_stops_at_ends() {
        let mut acc = DistanceAccumulator::new(PlaybackMode::Clamp);
        assert_eq!(acc.advance(25.0, 10.0), Some(10.0));
        assert_eq!(acc.advance(-30.0, 10.0), Some(0.0));
    }

    #[test]
    fn test_zero_length_is_inactive() {
        let mut acc = DistanceAccumulator::new(PlaybackMode::Loop);
        acc.advance(3.0, 10.0);
        assert_eq!(acc.advance(1.0, 0.0), None);
        assert_eq!(acc.distance(), 3.0);
    }

    #[test]
    fn test_rail_clamps_sample_count() {
        let mut rail = straight_rail();
        rail.set_sample_count(4).unwrap();
        assert_eq!(rail.sample_count(), MIN_RAIL_SAMPLES);
        assert_eq!(rail.table().len(), MIN_RAIL_SAMPLES);
        rail.set_sample_count(100_000).unwrap();
        assert_eq!(rail.sample_count(), MAX_RAIL_SAMPLES);
    }

    #[test]
    fn test_rail_rebuilds_on_handle_change() {
        let mut rail = straight_rail();
        assert_abs_diff_eq!(rail.total_length(), 10.0, epsilon = 1e-9);
        rail.set_handles(ControlHandles::quadratic(
            Point3::ZERO,
            dvec3(2.0, 0.0, 0.0),
            dvec3(4.0, 0.0, 0.0),
        ))
        .unwrap();
        assert_abs_diff_eq!(rail.total_length(), 4.0, epsilon = 1e-9);

        // Dropping a required handle leaves the rail not ready.
        let mut broken = *rail.handles();
        broken.p2 = None;
        rail.set_handles(broken).unwrap();
        assert!(!rail.table().is_ready());
    }

    #[test]
    fn test_follower_moves_at_speed() {
        let mut f = RailFollower::new(straight_rail(), PlaybackMode::Clamp, 2.0);
        let pose = f.tick(1.5).unwrap();
        assert!((pose.position - dvec3(3.0, 0.0, 0.0)).length() < 1e-9);
        // Facing blends halfway toward +X from the initial +Z each tick.
        for _ in 0..20 {
            f.tick(0.01);
        }
        assert!((f.target().forward() - DVec3::X).length() < 1e-4);
    }

    #[test]
    fn test_follower_keeps_facing_at_clamped_end() {
        let start = Pose::new(Point3::ZERO, gloam_math::pose::yaw_rotation(-90.0));
        let mut f =
            RailFollower::new(straight_rail(), PlaybackMode::Clamp, 100.0).with_target(start);
        let pose = f.tick(1.0).unwrap();
        assert!((pose.position - dvec3(10.0, 0.0, 0.0)).length() < 1e-9);
        // Look-ahead coincides with the end point, so the rotation target is the
        // current facing and nothing changes.
        assert!((pose.forward() - start.forward()).length() < 1e-9);
    }

    #[test]
    fn test_paused_follower_does_not_move() {
        let mut f = RailFollower::new(straight_rail(), PlaybackMode::Loop, 5.0);
        f.pause();
        assert!(f.tick(1.0).is_none());
        assert_eq!(f.distance(), 0.0);
        f.play();
        assert!(f.tick(1.0).is_some());
        assert_abs_diff_eq!(f.distance(), 5.0, epsilon = 1e-12);
    }

    #[test]
    fn test_not_ready_rail_is_inactive() {
        let rail = CurveRail::new(CurveKind::Cubic, ControlHandles::default(), 256).unwrap();
        let mut f = RailFollower::new(rail, PlaybackMode::Loop, 5.0);
        assert!(f.tick(1.0).is_none());
        assert_eq!(f.target(), Pose::identity());
    }

    #[test]
    fn test_speed_hotkeys() {
        let mut f = RailFollower::new(straight_rail(), PlaybackMode::Loop, 2.0);
        f.speed_up();
        assert_eq!(f.speed(), 4.0);
        f.slow_down();
        f.slow_down();
        assert_eq!(f.speed(), MIN_ADJUSTED_SPEED);
    }

    #[test]
    fn test_from_config_defaults() {
        let f = RailFollower::from_config(&RailConfig::default()).unwrap();
        assert!(f.is_playing());
        assert_eq!(f.rail().sample_count(), 256);
        assert_eq!(f.speed(), 20.0);
        assert!(f.rail().table().is_ready());
    }

    #[test]
    fn test_config_from_toml() {
        let cfg: RailConfig = toml::from_str(
            r#"
            kind = "quadratic"
            samples = 4000
            speed = 3.5
            mode = "clamp"
            look_ahead = -2.0

            [handles]
            p0 = [0.0, 0.0, 0.0]
            p1 = [1.0, 0.0, 0.0]
            p2 = [2.0, 0.0, 0.0]
            "#,
        )
        .unwrap();
        assert_eq!(cfg.kind, CurveKind::Quadratic);
        assert_eq!(cfg.mode, PlaybackMode::Clamp);
        assert!(cfg.play_on_start);
        let f = RailFollower::from_config(&cfg).unwrap();
        assert_eq!(f.rail().sample_count(), MAX_RAIL_SAMPLES);
        assert_eq!(f.look_ahead(), 0.0);
        assert_abs_diff_eq!(f.rail().total_length(), 2.0, epsilon = 1e-9);
    }
}
