//! Player locomotion. Two independent controllers are provided:
//! [`TieredLocomotion`] (walk/run/sprint tiers, impulse jump, attack key) and
//! [`BufferedJumpLocomotion`] (single speed, coyote time and jump buffering).

mod buffered;
mod tiered;

pub use buffered::{BufferedJumpConfig, BufferedJumpLocomotion};
pub use tiered::{SpeedTier, TieredConfig, TieredFrame, TieredLocomotion};

use gloam_math::{Plane, Point3, Pose, Ray, Vector3};
use gloam_scene::{LayerMask, SpatialQuery};
use serde::{Deserialize, Serialize};

/// How a controller decides it is standing on something.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GroundProbe {
    /// Overlap test with a sphere placed at `offset` from the body.
    Sphere { offset: Vector3, radius: f64 },
    /// Straight-down ray of `length` from the body.
    Ray { length: f64 },
}

impl GroundProbe {
    pub fn is_grounded(&self, body: Point3, spatial: &dyn SpatialQuery, mask: LayerMask) -> bool {
        match *self {
            GroundProbe::Sphere { offset, radius } => spatial.check_sphere(body + offset, radius, mask),
            GroundProbe::Ray { length } => spatial.raycast(&Ray::down(body, length), mask).is_some(),
        }
    }
}

/// Horizontal forward and right axes of the camera, or world Z and X
/// without one.
pub fn camera_basis(camera: Option<&Pose>) -> (Vector3, Vector3) {
    match camera {
        Some(cam) => {
            let ground = Plane::ground();
            (
                ground.flatten_direction(cam.forward()),
                ground.flatten_direction(cam.right()),
            )
        }
        None => (Vector3::Z, Vector3::X),
    }
}

/// Replace the horizontal part of `velocity`, keeping its vertical part.
fn with_horizontal(velocity: Vector3, horizontal: Vector3) -> Vector3 {
    Vector3::new(horizontal.x, velocity.y, horizontal.z)
}

fn horizontal(velocity: Vector3) -> Vector3 {
    Vector3::new(velocity.x, 0.0, velocity.z)
}
