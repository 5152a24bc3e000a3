use gloam_core::{GloamError, Result};
use gloam_math::{Plane, Point3, Pose, Ray, RayHit};
use slotmap::SlotMap;
use tracing::info;

use crate::capability::SpatialQuery;
use crate::health::DamageOutcome;
use crate::types::{layers, Actor, ActorId, ActorTag, LayerMask};

/// Owns every actor in the scene.
///
/// Also serves as a minimal physics world: actors are spheres, and an
/// optional ground plane sits on [`layers::GROUND`].
#[derive(Debug, Default)]
pub struct ActorRegistry {
    pub(crate) actors: SlotMap<ActorId, Actor>,
    ground: Option<Plane>,
}

impl ActorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the horizontal plane `y = 0` as ground.
    pub fn with_ground() -> Self {
        Self {
            actors: SlotMap::with_key(),
            ground: Some(Plane::ground()),
        }
    }

    pub fn set_ground(&mut self, ground: Option<Plane>) {
        self.ground = ground;
    }

    pub fn spawn(&mut self, actor: Actor) -> ActorId {
        self.actors.insert(actor)
    }

    pub fn despawn(&mut self, id: ActorId) -> Option<Actor> {
        self.actors.remove(id)
    }

    pub fn get(&self, id: ActorId) -> Option<&Actor> {
        self.actors.get(id)
    }

    pub fn get_mut(&mut self, id: ActorId) -> Option<&mut Actor> {
        self.actors.get_mut(id)
    }

    pub fn contains(&self, id: ActorId) -> bool {
        self.actors.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.actors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ActorId, &Actor)> {
        self.actors.iter()
    }

    pub fn pose(&self, id: ActorId) -> Result<Pose> {
        Ok(self.require(id)?.pose)
    }

    pub fn set_pose(&mut self, id: ActorId, pose: Pose) -> Result<()> {
        self.require_mut(id)?.pose = pose;
        Ok(())
    }

    /// Deal damage to an actor's health component.
    ///
    /// Actors without health ignore damage.
    pub fn apply_damage(&mut self, id: ActorId, amount: f64) -> Result<DamageOutcome> {
        let actor = self.require_mut(id)?;
        let Some(health) = actor.health.as_mut() else {
            return Ok(DamageOutcome::Ignored);
        };
        let outcome = health.take_damage(amount);
        if outcome == DamageOutcome::Killed {
            info!(actor = %actor.name, "actor died");
        }
        Ok(outcome)
    }

    /// Actors on `mask` whose sphere overlaps the query sphere.
    pub fn actors_in_sphere(&self, center: Point3, radius: f64, mask: LayerMask) -> Vec<ActorId> {
        self.actors
            .iter()
            .filter(|(_, a)| a.layers.intersects(mask))
            .filter(|(_, a)| a.position().distance(center) <= radius + a.radius)
            .map(|(id, _)| id)
            .collect()
    }

    pub fn find_by_tag(&self, tag: ActorTag) -> impl Iterator<Item = ActorId> + '_ {
        self.actors
            .iter()
            .filter(move |(_, a)| a.tag == tag)
            .map(|(id, _)| id)
    }

    pub fn first_with_tag(&self, tag: ActorTag) -> Option<ActorId> {
        self.find_by_tag(tag).next()
    }

    fn require(&self, id: ActorId) -> Result<&Actor> {
        self.actors
            .get(id)
            .ok_or_else(|| GloamError::NotFound(format!("Actor {:?}", id)))
    }

    fn require_mut(&mut self, id: ActorId) -> Result<&mut Actor> {
        self.actors
            .get_mut(id)
            .ok_or_else(|| GloamError::NotFound(format!("Actor {:?}", id)))
    }
}

/// Entry distance of `ray` into a sphere. Spheres containing the origin
/// are not hit.
fn ray_sphere(ray: &Ray, center: Point3, radius: f64) -> Option<f64> {
    let oc = ray.origin - center;
    let c = oc.length_squared() - radius * radius;
    if c <= 0.0 {
        return None;
    }
    let b = oc.dot(ray.direction);
    let disc = b * b - c;
    if disc < 0.0 {
        return None;
    }
    let t = -b - disc.sqrt();
    (t >= 0.0 && t <= ray.max_distance).then_some(t)
}

impl SpatialQuery for ActorRegistry {
    fn check_sphere(&self, center: Point3, radius: f64, mask: LayerMask) -> bool {
        if let Some(ground) = self.ground {
            if mask.intersects(layers::GROUND) && ground.signed_distance(center) <= radius {
                return true;
            }
        }
        !self.actors_in_sphere(center, radius, mask).is_empty()
    }

    fn raycast(&self, ray: &Ray, mask: LayerMask) -> Option<RayHit> {
        let mut best: Option<RayHit> = None;
        let mut consider = |hit: RayHit| {
            if best.map_or(true, |b| hit.distance < b.distance) {
                best = Some(hit);
            }
        };

        if let Some(ground) = self.ground {
            let height = ground.signed_distance(ray.origin);
            let along = ray.direction.dot(ground.normal);
            if mask.intersects(layers::GROUND) && height >= 0.0 && along < 0.0 {
                let t = height / -along;
                if t <= ray.max_distance {
                    consider(RayHit {
                        point: ray.at(t),
                        normal: ground.normal,
                        distance: t,
                    });
                }
            }
        }

        for (_, actor) in self.actors.iter().filter(|(_, a)| a.layers.intersects(mask)) {
            if let Some(t) = ray_sphere(ray, actor.position(), actor.radius) {
                let point = ray.at(t);
                consider(RayHit {
                    point,
                    normal: (point - actor.position()).normalize_or_zero(),
                    distance: t,
                });
            }
        }
        best
    }

    fn overlap_sphere(&self, center: Point3, radius: f64, mask: LayerMask) -> Vec<ActorId> {
        self.actors_in_sphere(center, radius, mask)
    }
}
