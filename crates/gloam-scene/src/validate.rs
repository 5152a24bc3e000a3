use gloam_core::traits::Validate;
use gloam_core::{GloamError, Result};

use crate::registry::ActorRegistry;

impl Validate for ActorRegistry {
    fn validate(&self) -> Result<()> {
        for (id, actor) in &self.actors {
            if !actor.pose.position.is_finite() {
                return Err(GloamError::InvalidOperation(format!(
                    "Actor {:?} ({}) has non-finite position {:?}",
                    id, actor.name, actor.pose.position
                )));
            }

            if !actor.pose.rotation.is_normalized() {
                return Err(GloamError::InvalidOperation(format!(
                    "Actor {:?} ({}) has non-unit rotation",
                    id, actor.name
                )));
            }

            if !(actor.radius >= 0.0) {
                return Err(GloamError::InvalidOperation(format!(
                    "Actor {:?} ({}) has invalid radius {}",
                    id, actor.name, actor.radius
                )));
            }

            if let Some(health) = &actor.health {
                let (cur, max) = (health.current_hp(), health.max_hp());
                if !(0.0..=max).contains(&cur) {
                    return Err(GloamError::InvalidOperation(format!(
                        "Actor {:?} ({}) has health {} outside [0, {}]",
                        id, actor.name, cur, max
                    )));
                }
            }
        }
        Ok(())
    }
}
