//! Game settings loaded from TOML, with environment overrides for the rail.

use std::path::Path;

use gloam_core::{GloamError, Result};
use gloam_curve::{RailConfig, RendererConfig};
use serde::{Deserialize, Serialize};

use crate::camera_rig::OrbitRigConfig;
use crate::combat::CombatConfig;
use crate::day_night::DayNightConfig;
use crate::debug_hotkeys::HotkeyConfig;
use crate::locomotion::{BufferedJumpConfig, TieredConfig};
use crate::zombie::ZombieConfig;

pub const ENV_RAIL_SPEED: &str = "GLOAM_RAIL_SPEED";
pub const ENV_RAIL_SAMPLES: &str = "GLOAM_RAIL_SAMPLES";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub rail: RailConfig,
    pub renderer: RendererConfig,
    pub camera: OrbitRigConfig,
    pub tiered: TieredConfig,
    pub buffered: BufferedJumpConfig,
    pub combat: CombatConfig,
    pub zombie: ZombieConfig,
    pub day_night: DayNightConfig,
    pub hotkeys: HotkeyConfig,
}

impl GameConfig {
    /// Parse a TOML document. Missing sections and fields keep their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| GloamError::Config(format!("invalid game config: {e}")))
    }

    /// Read `path` and apply environment overrides.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Self::load_with(path, |key| std::env::var(key).ok())
    }

    /// Read `path` and apply overrides from `lookup`.
    pub fn load_with(
        path: impl AsRef<Path>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let mut config = Self::from_toml_str(&text)?;
        config.apply_overrides(lookup)?;
        tracing::debug!(path = %path.display(), "loaded game config");
        Ok(config)
    }

    /// Like [`GameConfig::load`], but a missing file yields the defaults.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        Self::load_or_default_with(path, |key| std::env::var(key).ok())
    }

    /// Like [`GameConfig::load_with`], but a missing file yields the defaults.
    pub fn load_or_default_with(
        path: impl AsRef<Path>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let path = path.as_ref();
        if path.is_file() {
            return Self::load_with(path, lookup);
        }
        tracing::debug!(path = %path.display(), "no game config, using defaults");
        let mut config = Self::default();
        config.apply_overrides(lookup)?;
        Ok(config)
    }

    /// Override rail settings from `lookup` (normally the environment).
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(v) = lookup(ENV_RAIL_SPEED) {
            self.rail.speed = parse_override(ENV_RAIL_SPEED, &v)?;
        }
        if let Some(v) = lookup(ENV_RAIL_SAMPLES) {
            self.rail.samples = parse_override(ENV_RAIL_SAMPLES, &v)?;
        }
        Ok(())
    }
}

fn parse_override<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| GloamError::Config(format!("{key}: cannot parse {value:?}")))
}
