use gloam_core::{FrameTime, GloamError, Result};
use gloam_math::Point3;
use gloam_scene::{ActorId, ActorRegistry, ActorTag, AnimationDriver, DamageOutcome, NavigationAgent};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Agent speed² above which the zombie counts as moving.
const MOVING_SPEED_SQ: f64 = 0.05;
/// Extra reach granted when the attack animation lands.
const HIT_TOLERANCE: f64 = 0.2;
/// Stopping distance as a fraction of the attack range.
const STOPPING_FRACTION: f64 = 0.9;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ZombieConfig {
    pub attack_range: f64,
    pub attack_damage: f64,
    pub attack_cooldown: f64,
    /// Search radius when snapping onto the navigation mesh.
    pub nav_snap_radius: f64,
}

impl Default for ZombieConfig {
    fn default() -> Self {
        Self {
            attack_range: 1.6,
            attack_damage: 12.0,
            attack_cooldown: 1.2,
            nav_snap_radius: 2.0,
        }
    }
}

/// Result of one [`ZombieAi::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZombieTick {
    /// The behaviour was switched off after death.
    Disabled,
    /// Died this tick; death handling ran.
    Died,
    /// No player in the detection zone.
    Idle,
    /// Off the navigation mesh and no snap point nearby.
    Unreachable,
    Chasing { attacked: bool },
}

/// Chases the player inside its detection trigger and attacks in range.
#[derive(Debug, Clone)]
pub struct ZombieAi {
    config: ZombieConfig,
    player: Option<ActorId>,
    player_in_zone: bool,
    next_attack_time: f64,
    enabled: bool,
}

impl ZombieAi {
    pub fn new(config: ZombieConfig) -> Self {
        Self {
            config,
            player: None,
            player_in_zone: false,
            next_attack_time: 0.0,
            enabled: true,
        }
    }

    pub fn config(&self) -> &ZombieConfig {
        &self.config
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn player(&self) -> Option<ActorId> {
        self.player
    }

    /// Snap onto the navigation mesh before the first tick.
    pub fn start(&mut self, position: Point3, agent: &mut dyn NavigationAgent) -> bool {
        self.ensure_on_nav_mesh(position, agent)
    }

    pub fn on_trigger_enter(&mut self, other: ActorId, tag: ActorTag) {
        if tag == ActorTag::Player {
            self.player = Some(other);
            self.player_in_zone = true;
        }
    }

    pub fn on_trigger_exit(
        &mut self,
        tag: ActorTag,
        agent: &mut dyn NavigationAgent,
        animator: &mut dyn AnimationDriver,
    ) {
        if tag != ActorTag::Player {
            return;
        }
        self.player = None;
        self.player_in_zone = false;
        if agent.is_on_nav_mesh() {
            agent.reset_path();
        }
        animator.set_bool("IsMoving", false);
    }

    pub fn tick(
        &mut self,
        frame: FrameTime,
        me: ActorId,
        actors: &ActorRegistry,
        agent: &mut dyn NavigationAgent,
        animator: &mut dyn AnimationDriver,
    ) -> Result<ZombieTick> {
        if !self.enabled {
            return Ok(ZombieTick::Disabled);
        }
        let actor = actors
            .get(me)
            .ok_or_else(|| GloamError::NotFound(format!("Zombie actor {:?}", me)))?;

        if actor.is_dead() {
            animator.set_bool("Dead", true);
            agent.set_stopped(true);
            self.enabled = false;
            info!(actor = %actor.name, "zombie died, behaviour disabled");
            return Ok(ZombieTick::Died);
        }

        let player_pos = self
            .player
            .filter(|_| self.player_in_zone)
            .and_then(|id| actors.get(id))
            .map(|p| p.position());
        let Some(player_pos) = player_pos else {
            animator.set_bool("IsMoving", false);
            return Ok(ZombieTick::Idle);
        };

        let position = actor.position();
        if (!agent.is_enabled() || !agent.is_on_nav_mesh())
            && !self.ensure_on_nav_mesh(position, agent)
        {
            return Ok(ZombieTick::Unreachable);
        }

        agent.set_stopping_distance(self.config.attack_range * STOPPING_FRACTION);
        agent.set_destination(player_pos);
        animator.set_bool("IsMoving", agent.velocity().length_squared() > MOVING_SPEED_SQ);

        let mut attacked = false;
        if position.distance(player_pos) <= self.config.attack_range
            && frame.now >= self.next_attack_time
        {
            self.next_attack_time = frame.now + self.config.attack_cooldown;
            animator.set_trigger("Attack");
            attacked = true;
        }
        Ok(ZombieTick::Chasing { attacked })
    }

    /// Called on the hit frame of the attack animation. Damages the tracked
    /// player when still within reach.
    pub fn animation_attack_hit(
        &self,
        me: ActorId,
        actors: &mut ActorRegistry,
    ) -> Result<Option<DamageOutcome>> {
        let Some(player) = self.player else {
            return Ok(None);
        };
        let Some(player_pos) = actors.get(player).map(|p| p.position()) else {
            return Ok(None);
        };
        let position = actors.pose(me)?.position;
        if position.distance(player_pos) > self.config.attack_range + HIT_TOLERANCE {
            return Ok(None);
        }
        actors
            .apply_damage(player, self.config.attack_damage)
            .map(Some)
    }

    fn ensure_on_nav_mesh(&self, position: Point3, agent: &mut dyn NavigationAgent) -> bool {
        if agent.is_on_nav_mesh() {
            return true;
        }
        match agent.sample_position(position, self.config.nav_snap_radius) {
            Some(snap) => {
                agent.warp(snap);
                true
            }
            None => {
                warn!(?position, radius = self.config.nav_snap_radius, "no navigation mesh near zombie");
                false
            }
        }
    }
}
