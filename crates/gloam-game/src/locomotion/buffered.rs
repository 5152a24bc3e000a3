use gloam_core::FrameTime;
use gloam_math::smoothing::move_towards;
use gloam_math::{Pose, Vector3};
use gloam_scene::{layers, LayerMask, MotionController, SpatialQuery};
use serde::{Deserialize, Serialize};

use super::{camera_basis, horizontal, with_horizontal, GroundProbe};
use crate::input::{InputState, Key};

/// Timestamp meaning "long ago".
const NEVER: f64 = -999.0;

/// Ray length used when no ground probe is configured.
pub const FALLBACK_RAY_LENGTH: f64 = 1.1;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BufferedJumpConfig {
    pub move_speed: f64,
    pub acceleration: f64,
    /// Fraction of `acceleration` available while airborne, in `[0, 1]`.
    pub air_control: f64,
    pub jump_velocity: f64,
    /// Grace period after leaving the ground during which a jump still works.
    pub coyote_time: f64,
    /// How long a jump press is remembered before landing.
    pub jump_buffer: f64,
    pub ground_probe: Option<GroundProbe>,
    pub ground_mask: LayerMask,
}

impl Default for BufferedJumpConfig {
    fn default() -> Self {
        Self {
            move_speed: 6.0,
            acceleration: 20.0,
            air_control: 0.5,
            jump_velocity: 7.0,
            coyote_time: 0.1,
            jump_buffer: 0.1,
            ground_probe: None,
            ground_mask: layers::GROUND,
        }
    }
}

/// Single-speed movement with coyote time and a jump buffer.
#[derive(Debug, Clone)]
pub struct BufferedJumpLocomotion {
    config: BufferedJumpConfig,
    target_horizontal: Vector3,
    grounded: bool,
    last_grounded_time: f64,
    last_jump_pressed_time: f64,
}

impl BufferedJumpLocomotion {
    pub fn new(mut config: BufferedJumpConfig) -> Self {
        config.air_control = config.air_control.clamp(0.0, 1.0);
        Self {
            config,
            target_horizontal: Vector3::ZERO,
            grounded: false,
            last_grounded_time: NEVER,
            last_jump_pressed_time: NEVER,
        }
    }

    pub fn config(&self) -> &BufferedJumpConfig {
        &self.config
    }

    pub fn is_grounded(&self) -> bool {
        self.grounded
    }

    pub fn target_horizontal(&self) -> Vector3 {
        self.target_horizontal
    }

    /// Read movement input and remember jump presses.
    pub fn update(&mut self, input: &InputState, frame: FrameTime, camera: Option<&Pose>) {
        let axis = input.move_axis();
        let (forward, right) = camera_basis(camera);
        let mut dir = forward * axis.y + right * axis.x;
        if dir.length_squared() > 1.0 {
            dir = dir.normalize();
        }
        self.target_horizontal = dir * self.config.move_speed;

        if input.was_pressed(Key::Space) {
            self.last_jump_pressed_time = frame.now;
        }
    }

    /// Physics step. Returns `true` when a jump was taken this step.
    pub fn fixed_update(
        &mut self,
        frame: FrameTime,
        body: &mut dyn MotionController,
        spatial: &dyn SpatialQuery,
    ) -> bool {
        let probe = self
            .config
            .ground_probe
            .unwrap_or(GroundProbe::Ray { length: FALLBACK_RAY_LENGTH });
        self.grounded = probe.is_grounded(body.position(), spatial, self.config.ground_mask);
        if self.grounded {
            self.last_grounded_time = frame.now;
        }

        let mut v = body.velocity();
        let accel = if self.grounded {
            self.config.acceleration
        } else {
            self.config.acceleration * self.config.air_control
        };
        let h = move_towards(horizontal(v), self.target_horizontal, accel * frame.dt);
        v = with_horizontal(v, h);

        let can_jump = frame.now - self.last_grounded_time <= self.config.coyote_time;
        let pressed_recently = frame.now - self.last_jump_pressed_time <= self.config.jump_buffer;
        let jumped = can_jump && pressed_recently;
        if jumped {
            v.y = self.config.jump_velocity;
            self.last_jump_pressed_time = NEVER;
        }

        body.set_velocity(v);
        jumped
    }
}
