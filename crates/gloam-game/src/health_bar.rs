//! World-space health bar that floats above an actor and faces the camera.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use gloam_math::pose::look_rotation;
use gloam_math::{Point3, Pose, Vector3, UP};
use gloam_scene::{Health, ListenerId};

/// A clone starts with the same fill but owns its own cell, so it only
/// follows the health it is bound to afterwards.
#[derive(Debug)]
pub struct HealthBar {
    pub offset: Vector3,
    /// Fill amount in `[0, 1]`, stored as `f64` bits so listeners can write it.
    fill: Arc<AtomicU64>,
    pose: Pose,
}

impl Clone for HealthBar {
    fn clone(&self) -> Self {
        Self {
            offset: self.offset,
            fill: Arc::new(AtomicU64::new(self.fill.load(Ordering::Relaxed))),
            pose: self.pose,
        }
    }
}

impl Default for HealthBar {
    fn default() -> Self {
        Self::new(Vector3::new(0.0, 2.0, 0.0))
    }
}

impl HealthBar {
    pub fn new(offset: Vector3) -> Self {
        Self {
            offset,
            fill: Arc::new(AtomicU64::new(1.0_f64.to_bits())),
            pose: Pose::identity(),
        }
    }

    pub fn fill(&self) -> f64 {
        f64::from_bits(self.fill.load(Ordering::Relaxed))
    }

    pub fn pose(&self) -> Pose {
        self.pose
    }

    /// Show `health` now and on every later change.
    pub fn bind(&self, health: &mut Health) -> ListenerId {
        store(&self.fill, health.current_change().fraction());
        let fill = Arc::clone(&self.fill);
        health.on_changed(move |change| store(&fill, change.fraction()))
    }

    /// Place the bar above `follow`, or above `target` without one, and turn
    /// it to face along `camera_forward`.
    pub fn late_update(
        &mut self,
        follow: Option<Point3>,
        target: Option<Point3>,
        camera_forward: Option<Vector3>,
    ) -> Pose {
        if let Some(anchor) = follow.or(target) {
            self.pose.position = anchor + self.offset;
        }
        if let Some(forward) = camera_forward {
            self.pose.rotation = look_rotation(forward, UP);
        }
        self.pose
    }
}

fn store(cell: &AtomicU64, value: f64) {
    cell.store(value.to_bits(), Ordering::Relaxed);
}
