use crate::{Point3, Vector3};
use serde::{Deserialize, Serialize};

/// A plane in 3D space defined by a point and unit normal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Plane {
    pub origin: Point3,
    pub normal: Vector3,
}

impl Plane {
    pub fn new(origin: Point3, normal: Vector3) -> Self {
        Self {
            origin,
            normal: normal.normalize(),
        }
    }

    /// The horizontal ground plane through the origin.
    pub fn ground() -> Self {
        Self::new(Point3::ZERO, Vector3::Y)
    }

    /// Signed distance from a point to this plane.
    pub fn signed_distance(&self, point: Point3) -> f64 {
        (point - self.origin).dot(self.normal)
    }

    /// Project a point onto this plane.
    pub fn project_point(&self, point: Point3) -> Point3 {
        point - self.normal * self.signed_distance(point)
    }

    /// Remove the component of a direction along the plane normal.
    pub fn project_vector(&self, v: Vector3) -> Vector3 {
        v - self.normal * v.dot(self.normal)
    }

    /// Project a direction onto the plane and normalize it.
    ///
    /// Returns zero when the direction is parallel to the normal.
    pub fn flatten_direction(&self, v: Vector3) -> Vector3 {
        self.project_vector(v).normalize_or_zero()
    }
}
