use gloam_math::{Point3, Pose};
use serde::{Deserialize, Serialize};
use slotmap::new_key_type;

use crate::health::Health;

new_key_type! {
    pub struct ActorId;
}

/// Gameplay role used by trigger volumes and targeting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActorTag {
    Player,
    Enemy,
    Neutral,
}

/// Bit set of collision layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct LayerMask(pub u32);

impl LayerMask {
    pub const NONE: LayerMask = LayerMask(0);
    pub const ALL: LayerMask = LayerMask(u32::MAX);

    /// Mask holding only layer `index` (0..32).
    pub const fn layer(index: u32) -> Self {
        LayerMask(1 << index)
    }

    pub fn intersects(self, other: LayerMask) -> bool {
        self.0 & other.0 != 0
    }

    pub fn union(self, other: LayerMask) -> Self {
        LayerMask(self.0 | other.0)
    }
}

/// Conventional layer assignments.
pub mod layers {
    use super::LayerMask;

    pub const DEFAULT: LayerMask = LayerMask::layer(0);
    pub const GROUND: LayerMask = LayerMask::layer(3);
    pub const PLAYER: LayerMask = LayerMask::layer(6);
    pub const ENEMY: LayerMask = LayerMask::layer(7);
}

/// A scene object with an optional health component.
///
/// Actors are treated as spheres of `radius` around `pose.position` for
/// overlap and ray queries.
#[derive(Debug)]
pub struct Actor {
    pub name: String,
    pub tag: ActorTag,
    pub pose: Pose,
    pub radius: f64,
    pub layers: LayerMask,
    pub health: Option<Health>,
}

impl Actor {
    pub fn new(name: impl Into<String>, tag: ActorTag, position: Point3) -> Self {
        Self {
            name: name.into(),
            tag,
            pose: Pose::from_position(position),
            radius: 0.5,
            layers: LayerMask::layer(0),
            health: None,
        }
    }

    pub fn with_health(mut self, max_hp: f64) -> Self {
        self.health = Some(Health::new(max_hp));
        self
    }

    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }

    pub fn with_layers(mut self, layers: LayerMask) -> Self {
        self.layers = layers;
        self
    }

    pub fn position(&self) -> Point3 {
        self.pose.position
    }

    pub fn is_dead(&self) -> bool {
        self.health.as_ref().is_some_and(Health::is_dead)
    }
}
