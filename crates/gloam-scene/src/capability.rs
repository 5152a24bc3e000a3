//! Engine services a behaviour may call, expressed as traits so the host
//! engine (or a test double) supplies them.

use gloam_math::{Point3, Ray, RayHit, Vector3};

use crate::types::{ActorId, LayerMask};

/// A physics body driven by velocity.
pub trait MotionController {
    fn position(&self) -> Point3;
    fn velocity(&self) -> Vector3;
    fn set_velocity(&mut self, velocity: Vector3);
    /// Instantaneous velocity change, as a mass-independent impulse.
    fn add_impulse(&mut self, impulse: Vector3) {
        let v = self.velocity();
        self.set_velocity(v + impulse);
    }
}

/// Overlap and ray queries against the physics world.
pub trait SpatialQuery {
    /// Whether any collider in `mask` overlaps the sphere.
    fn check_sphere(&self, center: Point3, radius: f64, mask: LayerMask) -> bool;
    /// Nearest hit within `ray.max_distance`.
    fn raycast(&self, ray: &Ray, mask: LayerMask) -> Option<RayHit>;
    /// Every actor in `mask` whose collider overlaps the sphere.
    fn overlap_sphere(&self, center: Point3, radius: f64, mask: LayerMask) -> Vec<ActorId>;
}

/// Parameters of an animation state machine.
pub trait AnimationDriver {
    /// Move a float parameter towards `value`, damped over `damp_time`.
    fn set_float(&mut self, name: &str, value: f64, damp_time: f64, dt: f64);
    fn set_bool(&mut self, name: &str, value: bool);
    fn set_trigger(&mut self, name: &str);
    fn reset_trigger(&mut self, name: &str);
}

/// A path-finding agent on a navigation mesh.
pub trait NavigationAgent {
    fn is_enabled(&self) -> bool;
    fn set_enabled(&mut self, enabled: bool);
    fn is_on_nav_mesh(&self) -> bool;
    /// Nearest navigable point within `max_distance` of `near`.
    fn sample_position(&self, near: Point3, max_distance: f64) -> Option<Point3>;
    fn warp(&mut self, position: Point3);
    fn set_destination(&mut self, destination: Point3);
    fn set_stopping_distance(&mut self, distance: f64);
    fn set_stopped(&mut self, stopped: bool);
    fn reset_path(&mut self);
    fn velocity(&self) -> Vector3;
}
