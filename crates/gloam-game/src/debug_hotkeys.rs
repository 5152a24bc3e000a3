use gloam_core::Result;
use gloam_scene::{ActorId, ActorRegistry, DamageOutcome};
use serde::{Deserialize, Serialize};

use crate::input::{InputState, Key};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HotkeyConfig {
    pub amount: f64,
}

impl Default for HotkeyConfig {
    fn default() -> Self {
        Self { amount: 10.0 }
    }
}

/// Testing aid: `K` hurts the zombie, `L` hurts the player.
#[derive(Debug, Clone, Default)]
pub struct DebugHotkeys {
    pub config: HotkeyConfig,
    pub player: Option<ActorId>,
    pub zombie: Option<ActorId>,
}

impl DebugHotkeys {
    pub fn new(config: HotkeyConfig, player: Option<ActorId>, zombie: Option<ActorId>) -> Self {
        Self {
            config,
            player,
            zombie,
        }
    }

    /// Returns the damage dealt this frame, zombie first.
    pub fn update(
        &self,
        input: &InputState,
        actors: &mut ActorRegistry,
    ) -> Result<Vec<(ActorId, DamageOutcome)>> {
        let mut dealt = Vec::new();
        for (key, target) in [(Key::K, self.zombie), (Key::L, self.player)] {
            if let (true, Some(id)) = (input.was_pressed(key), target) {
                dealt.push((id, actors.apply_damage(id, self.config.amount)?));
            }
        }
        Ok(dealt)
    }
}
