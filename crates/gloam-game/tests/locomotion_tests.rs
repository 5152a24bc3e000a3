mod common;

use approx::assert_abs_diff_eq;
use common::{Body, RecordingAnimator};
use gloam_core::FrameTime;
use gloam_game::{
    BufferedJumpConfig, BufferedJumpLocomotion, InputState, Key, SpeedTier, TieredConfig,
    TieredLocomotion,
};
use gloam_math::pose::yaw_rotation;
use gloam_math::{dvec3, Point3, Pose};
use gloam_scene::ActorRegistry;

fn frame(now: f64) -> FrameTime {
    FrameTime::new(now, 0.02)
}

fn held(keys: &[Key]) -> InputState {
    let mut input = InputState::new();
    for &k in keys {
        input.press(k);
    }
    input
}

// ---- tiered ----

#[test]
fn ctrl_wins_over_shift() {
    let world = ActorRegistry::with_ground();
    let mut body = Body::at(Point3::ZERO);
    let mut loco = TieredLocomotion::new(TieredConfig::default());

    let input = held(&[Key::W, Key::LeftShift, Key::RightCtrl]);
    let out = loco.update(&input, frame(0.0), None, &mut body, &world, None);
    assert_eq!(out.tier, SpeedTier::Walk);
    assert_eq!(loco.target_velocity(), dvec3(0.0, 0.0, 2.5));

    let input = held(&[Key::W, Key::LeftShift]);
    let out = loco.update(&input, frame(0.0), None, &mut body, &world, None);
    assert_eq!(out.tier, SpeedTier::Sprint);
    assert_eq!(loco.target_velocity(), dvec3(0.0, 0.0, 7.5));
}

#[test]
fn diagonal_input_is_normalized_and_camera_relative() {
    let world = ActorRegistry::with_ground();
    let mut body = Body::at(Point3::ZERO);
    let mut anim = RecordingAnimator::default();
    let mut loco = TieredLocomotion::new(TieredConfig::default());
    let camera = Pose::new(Point3::ZERO, yaw_rotation(90.0));

    let input = held(&[Key::W]);
    loco.update(&input, frame(0.0), Some(&camera), &mut body, &world, Some(&mut anim));
    assert!((loco.target_velocity() - dvec3(5.0, 0.0, 0.0)).length() < 1e-9);

    let input = held(&[Key::W, Key::D]);
    loco.update(&input, frame(0.0), None, &mut body, &world, Some(&mut anim));
    let v = loco.target_velocity();
    assert_abs_diff_eq!(v.length(), 5.0, epsilon = 1e-9);
    assert_abs_diff_eq!(v.x, v.z, epsilon = 1e-12);
    assert_abs_diff_eq!(anim.floats["MoveAmount"], 1.0, epsilon = 1e-12);
    assert_eq!(anim.floats["SpeedTier"], 1.0);
    assert_eq!(anim.bool("Grounded"), Some(true));
}

#[test]
fn jump_requires_ground_and_zeroes_vertical_velocity() {
    let world = ActorRegistry::with_ground();
    let mut anim = RecordingAnimator::default();
    let mut loco = TieredLocomotion::new(TieredConfig::default());

    let mut airborne = Body::at(dvec3(0.0, 3.0, 0.0));
    let input = held(&[Key::Space]);
    let out = loco.update(&input, frame(0.0), None, &mut airborne, &world, Some(&mut anim));
    assert!(!out.jumped);
    assert_eq!(anim.bool("Grounded"), Some(false));

    let mut body = Body::at(Point3::ZERO);
    body.velocity = dvec3(1.0, -3.0, 2.0);
    let out = loco.update(&input, frame(0.0), None, &mut body, &world, Some(&mut anim));
    assert!(out.jumped);
    assert_eq!(body.velocity, dvec3(1.0, 8.5, 2.0));
    assert_eq!(anim.trigger_count("Jump"), 1);
}

#[test]
fn attack_respects_cooldown() {
    let world = ActorRegistry::with_ground();
    let mut body = Body::at(Point3::ZERO);
    let mut anim = RecordingAnimator::default();
    let mut loco = TieredLocomotion::new(TieredConfig::default());

    let mut attack_at = |now: f64, anim: &mut RecordingAnimator| {
        let input = held(&[Key::E]);
        loco.update(&input, frame(now), None, &mut body, &world, Some(anim))
            .attacked
    };
    assert!(attack_at(1.0, &mut anim));
    assert!(!attack_at(1.3, &mut anim));
    assert!(attack_at(1.7, &mut anim));
    assert_eq!(anim.trigger_count("Attack"), 2);
    assert_eq!(anim.resets, vec!["Jump".to_string(), "Jump".to_string()]);
}

#[test]
fn attack_needs_an_animator() {
    let world = ActorRegistry::with_ground();
    let mut body = Body::at(Point3::ZERO);
    let mut loco = TieredLocomotion::new(TieredConfig::default());
    let out = loco.update(&held(&[Key::E]), frame(5.0), None, &mut body, &world, None);
    assert!(!out.attacked);
}

#[test]
fn fixed_update_accelerates_horizontally_only() {
    let world = ActorRegistry::with_ground();
    let mut body = Body::at(Point3::ZERO);
    body.velocity = dvec3(0.0, -2.0, 0.0);
    let mut loco = TieredLocomotion::new(TieredConfig::default());
    loco.update(&held(&[Key::W]), frame(0.0), None, &mut body, &world, None);

    loco.fixed_update(&mut body, 0.1);
    assert!((body.velocity - dvec3(0.0, -2.0, 2.2)).length() < 1e-9);
    for _ in 0..10 {
        loco.fixed_update(&mut body, 0.1);
    }
    assert!((body.velocity - dvec3(0.0, -2.0, 5.0)).length() < 1e-9);
}

// ---- buffered jump ----

#[test]
fn coyote_time_allows_late_jump() {
    let world = ActorRegistry::with_ground();
    let mut loco = BufferedJumpLocomotion::new(BufferedJumpConfig::default());
    let mut body = Body::at(dvec3(0.0, 0.5, 0.0));

    assert!(!loco.fixed_update(frame(0.0), &mut body, &world));
    assert!(loco.is_grounded());

    // Walked off a ledge.
    body.position.y = 5.0;
    loco.update(&held(&[Key::Space]), frame(0.06), None);
    assert!(loco.fixed_update(frame(0.08), &mut body, &world));
    assert!(!loco.is_grounded());
    assert_eq!(body.velocity.y, 7.0);
}

#[test]
fn coyote_time_expires() {
    let world = ActorRegistry::with_ground();
    let mut loco = BufferedJumpLocomotion::new(BufferedJumpConfig::default());
    let mut body = Body::at(dvec3(0.0, 0.5, 0.0));
    loco.fixed_update(frame(0.0), &mut body, &world);

    body.position.y = 5.0;
    loco.update(&held(&[Key::Space]), frame(0.25), None);
    assert!(!loco.fixed_update(frame(0.25), &mut body, &world));
}

#[test]
fn buffered_press_jumps_on_landing_once() {
    let world = ActorRegistry::with_ground();
    let mut loco = BufferedJumpLocomotion::new(BufferedJumpConfig::default());
    let mut body = Body::at(dvec3(0.0, 3.0, 0.0));

    loco.update(&held(&[Key::Space]), frame(1.0), None);
    assert!(!loco.fixed_update(frame(1.0), &mut body, &world));

    body.position.y = 0.5;
    assert!(loco.fixed_update(frame(1.05), &mut body, &world));
    // Buffer consumed.
    assert!(!loco.fixed_update(frame(1.07), &mut body, &world));
}

#[test]
fn stale_press_is_dropped() {
    let world = ActorRegistry::with_ground();
    let mut loco = BufferedJumpLocomotion::new(BufferedJumpConfig::default());
    let mut body = Body::at(dvec3(0.0, 3.0, 0.0));

    loco.update(&held(&[Key::Space]), frame(1.0), None);
    body.position.y = 0.5;
    assert!(!loco.fixed_update(frame(1.2), &mut body, &world));
}

#[test]
fn air_control_scales_acceleration() {
    let world = ActorRegistry::with_ground();
    let mut loco = BufferedJumpLocomotion::new(BufferedJumpConfig::default());
    let mut airborne = Body::at(dvec3(0.0, 10.0, 0.0));
    loco.update(&held(&[Key::W]), frame(0.0), None);
    assert_eq!(loco.target_horizontal(), dvec3(0.0, 0.0, 6.0));

    loco.fixed_update(FrameTime::new(0.0, 0.1), &mut airborne, &world);
    assert!((airborne.velocity - dvec3(0.0, 0.0, 1.0)).length() < 1e-9);

    let mut grounded = Body::at(dvec3(0.0, 0.5, 0.0));
    loco.fixed_update(FrameTime::new(0.0, 0.1), &mut grounded, &world);
    assert!((grounded.velocity - dvec3(0.0, 0.0, 2.0)).length() < 1e-9);
}
