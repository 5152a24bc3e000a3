#![allow(dead_code)]

use std::collections::HashMap;

use gloam_math::{Point3, Vector3};
use gloam_scene::{AnimationDriver, MotionController, NavigationAgent};

#[derive(Debug, Default)]
pub struct Body {
    pub position: Point3,
    pub velocity: Vector3,
}

impl Body {
    pub fn at(position: Point3) -> Self {
        Self {
            position,
            velocity: Vector3::ZERO,
        }
    }
}

impl MotionController for Body {
    fn position(&self) -> Point3 {
        self.position
    }

    fn velocity(&self) -> Vector3 {
        self.velocity
    }

    fn set_velocity(&mut self, velocity: Vector3) {
        self.velocity = velocity;
    }
}

/// Records parameter writes. Damping is ignored; floats hold the last target.
#[derive(Debug, Default)]
pub struct RecordingAnimator {
    pub floats: HashMap<String, f64>,
    pub bools: HashMap<String, bool>,
    pub triggers: Vec<String>,
    pub resets: Vec<String>,
    pub bool_writes: Vec<(String, bool)>,
}

impl RecordingAnimator {
    pub fn trigger_count(&self, name: &str) -> usize {
        self.triggers.iter().filter(|t| *t == name).count()
    }

    pub fn bool(&self, name: &str) -> Option<bool> {
        self.bools.get(name).copied()
    }
}

impl AnimationDriver for RecordingAnimator {
    fn set_float(&mut self, name: &str, value: f64, _damp_time: f64, _dt: f64) {
        self.floats.insert(name.to_string(), value);
    }

    fn set_bool(&mut self, name: &str, value: bool) {
        self.bools.insert(name.to_string(), value);
        self.bool_writes.push((name.to_string(), value));
    }

    fn set_trigger(&mut self, name: &str) {
        self.triggers.push(name.to_string());
    }

    fn reset_trigger(&mut self, name: &str) {
        self.resets.push(name.to_string());
    }
}

#[derive(Debug)]
pub struct MockAgent {
    pub enabled: bool,
    pub on_mesh: bool,
    /// Point returned by `sample_position`, if any.
    pub snap: Option<Point3>,
    pub warped_to: Option<Point3>,
    pub destination: Option<Point3>,
    pub stopping_distance: f64,
    pub stopped: bool,
    pub path_resets: usize,
    pub velocity: Vector3,
}

impl Default for MockAgent {
    fn default() -> Self {
        Self {
            enabled: true,
            on_mesh: true,
            snap: None,
            warped_to: None,
            destination: None,
            stopping_distance: 0.0,
            stopped: false,
            path_resets: 0,
            velocity: Vector3::ZERO,
        }
    }
}

impl NavigationAgent for MockAgent {
    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    fn is_on_nav_mesh(&self) -> bool {
        self.on_mesh
    }

    fn sample_position(&self, _near: Point3, _max_distance: f64) -> Option<Point3> {
        self.snap
    }

    fn warp(&mut self, position: Point3) {
        self.warped_to = Some(position);
        self.on_mesh = true;
    }

    fn set_destination(&mut self, destination: Point3) {
        self.destination = Some(destination);
    }

    fn set_stopping_distance(&mut self, distance: f64) {
        self.stopping_distance = distance;
    }

    fn set_stopped(&mut self, stopped: bool) {
        self.stopped = stopped;
    }

    fn reset_path(&mut self) {
        self.path_resets += 1;
        self.destination = None;
    }

    fn velocity(&self) -> Vector3 {
        self.velocity
    }
}
