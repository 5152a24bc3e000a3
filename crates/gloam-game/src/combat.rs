use gloam_core::Result;
use gloam_math::{Point3, Pose, UP};
use gloam_scene::{layers, ActorId, ActorRegistry, DamageOutcome, LayerMask, SpatialQuery};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Default attack origin: in front of the attacker at chest height.
const ORIGIN_FORWARD: f64 = 0.8;
const ORIGIN_UP: f64 = 1.0;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatConfig {
    pub attack_range: f64,
    pub attack_damage: f64,
    /// Attack origin in the attacker's local space. Falls back to the
    /// default chest point when unset.
    pub attack_origin: Option<Point3>,
    pub enemy_mask: LayerMask,
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self {
            attack_range: 1.7,
            attack_damage: 20.0,
            attack_origin: None,
            enemy_mask: layers::ENEMY,
        }
    }
}

/// Melee hit resolution for the player's attack animation.
#[derive(Debug, Clone, Default)]
pub struct PlayerCombat {
    pub config: CombatConfig,
}

impl PlayerCombat {
    pub fn new(config: CombatConfig) -> Self {
        Self { config }
    }

    pub fn attack_origin(&self, attacker: &Pose) -> Point3 {
        match self.config.attack_origin {
            Some(local) => attacker.transform_point(local),
            None => attacker.position + attacker.forward() * ORIGIN_FORWARD + UP * ORIGIN_UP,
        }
    }

    /// Actors the attack would hit, each listed once.
    pub fn targets(&self, attacker: &Pose, spatial: &dyn SpatialQuery) -> Vec<ActorId> {
        let mut ids = spatial.overlap_sphere(
            self.attack_origin(attacker),
            self.config.attack_range,
            self.config.enemy_mask,
        );
        ids.sort();
        ids.dedup();
        ids
    }

    /// Damage every target once.
    pub fn apply_hits(
        &self,
        targets: &[ActorId],
        actors: &mut ActorRegistry,
    ) -> Result<Vec<(ActorId, DamageOutcome)>> {
        targets
            .iter()
            .map(|&id| {
                let outcome = actors.apply_damage(id, self.config.attack_damage)?;
                debug!(target_actor = ?id, ?outcome, "player attack hit");
                Ok((id, outcome))
            })
            .collect()
    }

    /// Called on the hit frame of the attack animation.
    pub fn animation_attack_hit(
        &self,
        attacker: &Pose,
        spatial: &dyn SpatialQuery,
        actors: &mut ActorRegistry,
    ) -> Result<Vec<(ActorId, DamageOutcome)>> {
        let targets = self.targets(attacker, spatial);
        self.apply_hits(&targets, actors)
    }
}
