use crate::{Point3, Vector3};
use serde::{Deserialize, Serialize};

/// A bounded ray cast used for ground probes and line-of-sight checks.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Ray {
    pub origin: Point3,
    pub direction: Vector3,
    pub max_distance: f64,
}

impl Ray {
    pub fn new(origin: Point3, direction: Vector3, max_distance: f64) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
            max_distance: max_distance.max(0.0),
        }
    }

    /// A straight-down probe of the given length.
    pub fn down(origin: Point3, max_distance: f64) -> Self {
        Self::new(origin, -Vector3::Y, max_distance)
    }

    /// Point at distance `t` along the ray.
    pub fn at(&self, t: f64) -> Point3 {
        self.origin + self.direction * t
    }

    /// Farthest point the ray reaches.
    pub fn end(&self) -> Point3 {
        self.at(self.max_distance)
    }
}

/// Result of a successful ray cast.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RayHit {
    pub point: Point3,
    pub normal: Vector3,
    pub distance: f64,
}
