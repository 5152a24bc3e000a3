//! Scalar and vector easing helpers used by per-frame controllers.

use crate::Vector3;

pub fn clamp01(v: f64) -> f64 {
    v.clamp(0.0, 1.0)
}

pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Wrap `t` into `[0, length)`.
pub fn repeat(t: f64, length: f64) -> f64 {
    (t - (t / length).floor() * length).clamp(0.0, length)
}

/// Wrap an angle in degrees into `(-180, 180]`.
pub fn normalize_angle(deg: f64) -> f64 {
    let a = repeat(deg, 360.0);
    if a > 180.0 {
        a - 360.0
    } else {
        a
    }
}

/// Step `current` toward `target` by at most `max_delta`.
pub fn move_towards(current: Vector3, target: Vector3, max_delta: f64) -> Vector3 {
    let diff = target - current;
    let dist = diff.length();
    if dist <= max_delta || dist == 0.0 {
        return target;
    }
    current + diff / dist * max_delta
}

/// Critically damped spring toward `target`.
///
/// `velocity` carries state between calls. The result never overshoots the
/// target.
pub fn smooth_damp(
    current: Vector3,
    target: Vector3,
    velocity: &mut Vector3,
    smooth_time: f64,
    dt: f64,
) -> Vector3 {
    let smooth_time = smooth_time.max(1e-4);
    let omega = 2.0 / smooth_time;
    let x = omega * dt;
    let decay = 1.0 / (1.0 + x + 0.48 * x * x + 0.235 * x * x * x);

    let change = current - target;
    let temp = (*velocity + omega * change) * dt;
    *velocity = (*velocity - omega * temp) * decay;
    let mut output = target + (change + temp) * decay;

    if (target - current).dot(output - target) > 0.0 {
        output = target;
        *velocity = Vector3::ZERO;
    }
    output
}
