use crate::{DQuat, DVec3, EulerRot, Point3, Vector3, UP};
use glam::DMat3;
use serde::{Deserialize, Serialize};

/// Position and orientation of a scene object.
///
/// Axis convention: +Z forward, +X right, +Y up.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub position: Point3,
    pub rotation: DQuat,
}

impl Pose {
    pub fn new(position: Point3, rotation: DQuat) -> Self {
        Self { position, rotation }
    }

    pub fn identity() -> Self {
        Self::from_position(Point3::ZERO)
    }

    pub fn from_position(position: Point3) -> Self {
        Self {
            position,
            rotation: DQuat::IDENTITY,
        }
    }

    pub fn forward(&self) -> Vector3 {
        self.rotation * DVec3::Z
    }

    pub fn right(&self) -> Vector3 {
        self.rotation * DVec3::X
    }

    pub fn up(&self) -> Vector3 {
        self.rotation * DVec3::Y
    }

    /// Map a point from this pose's local space into world space.
    pub fn transform_point(&self, local: Point3) -> Point3 {
        self.position + self.rotation * local
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::identity()
    }
}

/// Rotation from Euler angles in degrees, applied Z then X then Y.
pub fn euler_deg(pitch: f64, yaw: f64, roll: f64) -> DQuat {
    DQuat::from_euler(
        EulerRot::YXZ,
        yaw.to_radians(),
        pitch.to_radians(),
        roll.to_radians(),
    )
}

/// Rotation whose forward axis points along `forward` with its up axis as
/// close to `up` as possible.
///
/// Returns the identity for a zero `forward`.
pub fn look_rotation(forward: Vector3, up: Vector3) -> DQuat {
    let f = forward.normalize_or_zero();
    if f == DVec3::ZERO {
        return DQuat::IDENTITY;
    }
    let right = up.cross(f);
    if right.length_squared() < 1e-12 {
        // forward is parallel to up
        return DQuat::from_rotation_arc(DVec3::Z, f);
    }
    let right = right.normalize();
    let true_up = f.cross(right);
    DQuat::from_mat3(&DMat3::from_cols(right, true_up, f)).normalize()
}

/// Spherical interpolation with `t` clamped to `[0, 1]`.
pub fn slerp_clamped(from: DQuat, to: DQuat, t: f64) -> DQuat {
    from.slerp(to, t.clamp(0.0, 1.0))
}

/// Yaw-only rotation about world up, in degrees.
pub fn yaw_rotation(yaw_deg: f64) -> DQuat {
    DQuat::from_axis_angle(UP, yaw_deg.to_radians())
}
