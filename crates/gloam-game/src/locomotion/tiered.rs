use gloam_core::FrameTime;
use gloam_math::smoothing::move_towards;
use gloam_math::{Pose, Vector3, UP};
use gloam_scene::{layers, AnimationDriver, LayerMask, MotionController, SpatialQuery};
use serde::{Deserialize, Serialize};

use super::{camera_basis, horizontal, with_horizontal, GroundProbe};
use crate::input::{InputState, Key};

const MOVE_DAMP: f64 = 0.1;
const TIER_DAMP: f64 = 0.05;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TieredConfig {
    pub walk_speed: f64,
    pub run_speed: f64,
    pub sprint_speed: f64,
    pub acceleration: f64,
    pub jump_force: f64,
    /// Without a probe the controller never becomes grounded.
    pub ground_probe: Option<GroundProbe>,
    pub ground_mask: LayerMask,
    pub attack_trigger: String,
    pub attack_cooldown: f64,
}

impl Default for TieredConfig {
    fn default() -> Self {
        Self {
            walk_speed: 2.5,
            run_speed: 5.0,
            sprint_speed: 7.5,
            acceleration: 22.0,
            jump_force: 8.5,
            ground_probe: Some(GroundProbe::Sphere {
                offset: Vector3::ZERO,
                radius: 0.25,
            }),
            ground_mask: layers::GROUND,
            attack_trigger: "Attack".to_string(),
            attack_cooldown: 0.6,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeedTier {
    Walk,
    Run,
    Sprint,
}

impl SpeedTier {
    /// Ctrl walks, shift sprints, ctrl wins when both are held.
    pub fn from_input(input: &InputState) -> Self {
        if input.ctrl() {
            SpeedTier::Walk
        } else if input.shift() {
            SpeedTier::Sprint
        } else {
            SpeedTier::Run
        }
    }

    /// Value fed to the `SpeedTier` animation parameter.
    pub fn value(self) -> f64 {
        match self {
            SpeedTier::Walk => 0.0,
            SpeedTier::Run => 1.0,
            SpeedTier::Sprint => 2.0,
        }
    }

    pub fn speed(self, config: &TieredConfig) -> f64 {
        match self {
            SpeedTier::Walk => config.walk_speed,
            SpeedTier::Run => config.run_speed,
            SpeedTier::Sprint => config.sprint_speed,
        }
    }
}

/// What happened during one [`TieredLocomotion::update`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TieredFrame {
    pub tier: SpeedTier,
    pub jumped: bool,
    pub attacked: bool,
}

/// Camera-relative WASD movement with three speed tiers.
#[derive(Debug, Clone)]
pub struct TieredLocomotion {
    config: TieredConfig,
    target_velocity: Vector3,
    grounded: bool,
    next_attack_time: f64,
}

impl TieredLocomotion {
    pub fn new(config: TieredConfig) -> Self {
        Self {
            config,
            target_velocity: Vector3::ZERO,
            grounded: false,
            next_attack_time: 0.0,
        }
    }

    pub fn config(&self) -> &TieredConfig {
        &self.config
    }

    pub fn is_grounded(&self) -> bool {
        self.grounded
    }

    pub fn target_velocity(&self) -> Vector3 {
        self.target_velocity
    }

    /// Per-frame input handling: target velocity, jump, attack and animation
    /// parameters.
    pub fn update(
        &mut self,
        input: &InputState,
        frame: FrameTime,
        camera: Option<&Pose>,
        body: &mut dyn MotionController,
        spatial: &dyn SpatialQuery,
        mut animator: Option<&mut dyn AnimationDriver>,
    ) -> TieredFrame {
        let mut raw = input.move_axis();
        if raw.length_squared() > 1.0 {
            raw = raw.normalize();
        }
        let move_amount = raw.length();

        let (forward, right) = camera_basis(camera);
        let move_dir = forward * raw.y + right * raw.x;

        let tier = SpeedTier::from_input(input);
        self.target_velocity = move_dir.normalize_or_zero() * (tier.speed(&self.config) * move_amount);

        if let Some(probe) = self.config.ground_probe {
            self.grounded = probe.is_grounded(body.position(), spatial, self.config.ground_mask);
        }

        let jumped = input.was_pressed(Key::Space) && self.grounded;
        if jumped {
            if let Some(anim) = animator.as_deref_mut() {
                anim.set_trigger("Jump");
            }
            let v = body.velocity();
            body.set_velocity(horizontal(v));
            body.add_impulse(UP * self.config.jump_force);
        }

        let mut attacked = false;
        if let Some(anim) = animator.as_deref_mut() {
            if input.was_pressed(Key::E) && frame.now >= self.next_attack_time {
                anim.reset_trigger("Jump");
                anim.set_trigger(&self.config.attack_trigger);
                self.next_attack_time = frame.now + self.config.attack_cooldown;
                attacked = true;
            }

            anim.set_float("MoveX", raw.x, MOVE_DAMP, frame.dt);
            anim.set_float("MoveY", raw.y, MOVE_DAMP, frame.dt);
            anim.set_float("MoveAmount", move_amount, MOVE_DAMP, frame.dt);
            anim.set_float("SpeedTier", tier.value(), TIER_DAMP, frame.dt);
            anim.set_bool("Grounded", self.grounded);
        }

        TieredFrame {
            tier,
            jumped,
            attacked,
        }
    }

    /// Physics step: move horizontal velocity toward the target.
    pub fn fixed_update(&self, body: &mut dyn MotionController, fixed_dt: f64) {
        let v = body.velocity();
        let h = move_towards(horizontal(v), self.target_velocity, self.config.acceleration * fixed_dt);
        body.set_velocity(with_horizontal(v, h));
    }
}
