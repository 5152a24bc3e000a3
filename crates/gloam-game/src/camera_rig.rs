use gloam_math::pose::{euler_deg, slerp_clamped, yaw_rotation};
use gloam_math::smoothing::{normalize_angle, smooth_damp};
use gloam_math::{DQuat, Point3, Pose, Vector3, UP};
use serde::{Deserialize, Serialize};

use crate::input::{InputState, MouseButton};

/// Scroll magnitudes at or below this are ignored.
const SCROLL_DEADZONE: f64 = 1e-4;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbitRigConfig {
    pub target_height: f64,     // orbit point above the target's feet
    pub follow_smooth_time: f64,
    pub yaw_speed: f64,         // degrees per axis unit per second
    pub pitch_speed: f64,
    pub min_pitch: f64,         // degrees
    pub max_pitch: f64,
    pub distance: f64,
    pub min_distance: f64,
    pub max_distance: f64,
    pub zoom_speed: f64,
    pub player_turn_speed: f64,
}

impl Default for OrbitRigConfig {
    fn default() -> Self {
        Self {
            target_height: 1.6,
            follow_smooth_time: 0.08,
            yaw_speed: 220.0,
            pitch_speed: 180.0,
            min_pitch: -10.0,
            max_pitch: 70.0,
            distance: 6.0,
            min_distance: 2.5,
            max_distance: 12.0,
            zoom_speed: 4.0,
            player_turn_speed: 12.0,
        }
    }
}

/// Placement of the rig's three nested transforms after a late update.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    pub rig: Pose,               // world pose of the rig root (yaw only)
    pub pivot_local: DQuat,      // pitch, relative to the rig
    pub camera_local_z: f64,     // camera offset along the pivot's local Z
    pub camera: Pose,            // resulting world pose of the camera
}

/// Third-person orbit camera: a yawing rig that follows the target, a
/// pitching pivot, and a camera pulled back along the pivot's -Z.
#[derive(Debug, Clone)]
pub struct CameraRig {
    config: OrbitRigConfig,
    position: Point3,
    yaw: f64,
    pitch: f64,
    distance: f64,
    follow_velocity: Vector3,
}

impl CameraRig {
    /// Start from the rig's current position and Euler angles.
    ///
    /// `pitch_deg` may be in `[0, 360)` as an engine reports it; it is
    /// normalized to `(-180, 180]` and clamped.
    pub fn new(config: OrbitRigConfig, position: Point3, yaw_deg: f64, pitch_deg: f64) -> Self {
        let pitch = normalize_angle(pitch_deg).clamp(config.min_pitch, config.max_pitch);
        let distance = config.distance.clamp(config.min_distance, config.max_distance);
        Self {
            config,
            position,
            yaw: yaw_deg,
            pitch,
            distance,
            follow_velocity: Vector3::ZERO,
        }
    }

    pub fn config(&self) -> &OrbitRigConfig {
        &self.config
    }

    pub fn yaw(&self) -> f64 {
        self.yaw
    }

    pub fn pitch(&self) -> f64 {
        self.pitch
    }

    pub fn distance(&self) -> f64 {
        self.distance
    }

    /// Apply zoom and orbit input.
    ///
    /// While the right button is held, returns the rotation the player
    /// should take this frame: `player_rotation` turned toward the rig's yaw.
    pub fn update(&mut self, input: &InputState, dt: f64, player_rotation: Option<DQuat>) -> Option<DQuat> {
        let cfg = &self.config;

        if input.scroll.abs() > SCROLL_DEADZONE {
            self.distance = (self.distance - input.scroll * cfg.zoom_speed)
                .clamp(cfg.min_distance, cfg.max_distance);
        }

        let rmb = input.is_button_held(MouseButton::Right);
        let lmb = input.is_button_held(MouseButton::Left);
        if rmb || lmb {
            self.yaw += input.mouse_delta.x * cfg.yaw_speed * dt;
            self.pitch -= input.mouse_delta.y * cfg.pitch_speed * dt;
            self.pitch = self.pitch.clamp(cfg.min_pitch, cfg.max_pitch);
        }

        if !rmb {
            return None;
        }
        let current = player_rotation?;
        Some(slerp_clamped(
            current,
            yaw_rotation(self.yaw),
            cfg.player_turn_speed * dt,
        ))
    }

    /// Follow `target` and lay out the rig for this frame.
    pub fn late_update(&mut self, target: Point3, dt: f64) -> CameraPose {
        let goal = target + UP * self.config.target_height;
        self.position = smooth_damp(
            self.position,
            goal,
            &mut self.follow_velocity,
            self.config.follow_smooth_time,
            dt,
        );
        self.pose()
    }

    /// Current layout without advancing the follow.
    pub fn pose(&self) -> CameraPose {
        let rig = Pose::new(self.position, euler_deg(0.0, self.yaw, 0.0));
        let pivot_local = euler_deg(self.pitch, 0.0, 0.0);
        let camera_local_z = -self.distance;

        let rotation = rig.rotation * pivot_local;
        let camera = Pose::new(
            rig.position + rotation * Vector3::new(0.0, 0.0, camera_local_z),
            rotation,
        );
        CameraPose {
            rig,
            pivot_local,
            camera_local_z,
            camera,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use gloam_math::{dvec3, DVec2};

    fn rig() -> CameraRig {
        CameraRig::new(OrbitRigConfig::default(), Point3::ZERO, 0.0, 0.0)
    }

    #[test]
    fn test_initial_pitch_normalized_and_clamped() {
        let cfg = OrbitRigConfig::default();
        // 350 degrees is -10 after normalization, inside the range.
        let r = CameraRig::new(cfg.clone(), Point3::ZERO, 0.0, 350.0);
        assert_abs_diff_eq!(r.pitch(), -10.0, epsilon = 1e-9);
        // 300 degrees is -60, clamped to the minimum.
        let r = CameraRig::new(cfg, Point3::ZERO, 0.0, 300.0);
        assert_abs_diff_eq!(r.pitch(), -10.0, epsilon = 1e-9);
    }

    #[test]
    fn test_zoom_clamped() {
        let mut r = rig();
        let mut input = InputState::new();
        input.scroll = 10.0;
        r.update(&input, 0.016, None);
        assert_eq!(r.distance(), 2.5);
        input.scroll = -100.0;
        r.update(&input, 0.016, None);
        assert_eq!(r.distance(), 12.0);
    }

    #[test]
    fn test_tiny_scroll_ignored() {
        let mut r = rig();
        let mut input = InputState::new();
        input.scroll = 5e-5;
        r.update(&input, 0.016, None);
        assert_eq!(r.distance(), 6.0);
    }

    #[test]
    fn test_orbit_requires_button() {
        let mut r = rig();
        let mut input = InputState::new();
        input.mouse_delta = DVec2::new(1.0, 1.0);
        r.update(&input, 0.1, None);
        assert_eq!(r.yaw(), 0.0);

        input.set_button(MouseButton::Left, true);
        r.update(&input, 0.1, None);
        assert_abs_diff_eq!(r.yaw(), 22.0, epsilon = 1e-9);
        // Pitch goes down by 18 and clamps at -10.
        assert_eq!(r.pitch(), -10.0);
    }

    #[test]
    fn test_right_button_turns_player() {
        let mut r = CameraRig::new(OrbitRigConfig::default(), Point3::ZERO, 90.0, 0.0);
        let mut input = InputState::new();
        assert!(r.update(&input, 0.016, Some(DQuat::IDENTITY)).is_none());

        input.set_button(MouseButton::Right, true);
        // turn speed 12 * dt 0.1 > 1, so the slerp reaches the yaw.
        let q = r.update(&input, 0.1, Some(DQuat::IDENTITY)).unwrap();
        let fwd = q * Vector3::Z;
        assert!((fwd - dvec3(1.0, 0.0, 0.0)).length() < 1e-9);
    }

    #[test]
    fn test_camera_sits_behind_target() {
        let mut r = rig();
        let mut pose = r.late_update(Point3::ZERO, 0.016);
        for _ in 0..300 {
            pose = r.late_update(Point3::ZERO, 0.016);
        }
        assert!((pose.rig.position - dvec3(0.0, 1.6, 0.0)).length() < 1e-6);
        assert!((pose.camera.position - dvec3(0.0, 1.6, -6.0)).length() < 1e-6);
        assert_eq!(pose.camera_local_z, -6.0);
    }

    #[test]
    fn test_follow_never_overshoots() {
        let mut r = rig();
        let goal = dvec3(0.0, 1.6, 10.0);
        for _ in 0..200 {
            let pose = r.late_update(dvec3(0.0, 0.0, 10.0), 0.05);
            assert!(pose.rig.position.z <= goal.z + 1e-9);
        }
    }
}
