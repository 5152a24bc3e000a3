pub mod aabb;
pub mod color;
pub mod plane;
pub mod pose;
pub mod ray;
pub mod smoothing;

pub use aabb::Aabb3;
pub use color::{Color, Gradient, GradientKey};
pub use glam::{dvec3, DQuat, DVec2, DVec3, EulerRot};
pub use plane::Plane;
pub use pose::Pose;
pub use ray::{Ray, RayHit};

pub type Point2 = DVec2;
pub type Point3 = DVec3;
pub type Vector2 = DVec2;
pub type Vector3 = DVec3;

/// World up axis.
pub const UP: Vector3 = DVec3::Y;
