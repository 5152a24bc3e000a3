//! Sun and ambient lighting over a repeating virtual day.
//!
//! `t_day` runs over `[0, 1)`: 0 is midnight, 0.25 is 06:00, 0.5 is noon.
//! The sun's altitude is `t_day * 360 - 90` degrees, so it is straight down
//! at midnight and at the zenith at noon.

use gloam_math::pose::euler_deg;
use gloam_math::smoothing::{clamp01, lerp, repeat};
use gloam_math::{Color, DQuat, Gradient, GradientKey, Vector3, UP};
use serde::{Deserialize, Serialize};

const HOURS_PER_DAY: f64 = 24.0;
const MIN_CYCLE_SECONDS: f64 = 1.0;
/// Sun intensity at or below this switches the light off.
const LIGHT_ON_THRESHOLD: f64 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EaseShape {
    #[default]
    EaseInOut,
    Linear,
}

/// Two-key curve mapping sun height to an intensity factor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EaseCurve {
    pub start: (f64, f64), // (time, value)
    pub end: (f64, f64),
    pub shape: EaseShape,
}

impl Default for EaseCurve {
    fn default() -> Self {
        Self {
            start: (0.0, 0.0),
            end: (1.0, 1.0),
            shape: EaseShape::EaseInOut,
        }
    }
}

impl EaseCurve {
    /// Value at `x`, held constant outside the key range.
    pub fn evaluate(&self, x: f64) -> f64 {
        let (t0, v0) = self.start;
        let (t1, v1) = self.end;
        let span = t1 - t0;
        if span <= 0.0 {
            return if x < t0 { v0 } else { v1 };
        }
        let u = clamp01((x - t0) / span);
        let s = match self.shape {
            EaseShape::EaseInOut => u * u * (3.0 - 2.0 * u),
            EaseShape::Linear => u,
        };
        lerp(v0, v1, s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AmbientMode {
    #[default]
    Flat,
    Trilight,
    Skybox,
}

/// Ambient lighting to hand to the renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AmbientLighting {
    Flat { color: Color },
    Trilight { sky: Color, equator: Color, ground: Color },
    Skybox { intensity: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SunState {
    pub rotation: DQuat,
    /// `clamp01(-forward · up)`: 0 at or below the horizon, 1 at the zenith.
    pub height: f64,
    pub intensity: f64,
    pub color: Color,
    pub enabled: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightingState {
    pub hour: f64,
    pub sun: SunState,
    pub ambient: AmbientLighting,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DayNightConfig {
    /// Real seconds per virtual day.
    pub cycle_duration_seconds: f64,
    pub start_hour: f64,
    pub time_scale: f64,
    /// Sun heading in degrees: 0 faces +Z, 90 faces +X.
    pub azimuth: f64,
    pub max_sun_intensity: f64,
    pub sun_intensity_curve: EaseCurve,
    pub sun_color: Gradient,
    pub ambient_mode: AmbientMode,
    pub ambient_color: Gradient,
    /// Multiplier on the ambient colour, in `[0, 2]`.
    pub ambient_intensity: f64,
}

impl Default for DayNightConfig {
    fn default() -> Self {
        Self {
            cycle_duration_seconds: 120.0,
            start_hour: 9.0,
            time_scale: 1.0,
            azimuth: 0.0,
            max_sun_intensity: 1.2,
            sun_intensity_curve: EaseCurve::default(),
            sun_color: day_gradient(
                Color::rgb(0.15, 0.2, 0.35),
                Color::rgb(1.0, 0.55, 0.25),
                Color::rgb(1.0, 0.95, 0.9),
            ),
            ambient_mode: AmbientMode::Flat,
            ambient_color: day_gradient(
                Color::rgb(0.05, 0.07, 0.12),
                Color::rgb(0.4, 0.35, 0.3),
                Color::rgb(0.75, 0.8, 0.85),
            ),
            ambient_intensity: 1.0,
        }
    }
}

/// Night, dawn, noon, dusk, night.
fn day_gradient(night: Color, twilight: Color, noon: Color) -> Gradient {
    Gradient::new(vec![
        GradientKey::new(night, 0.0),
        GradientKey::new(twilight, 0.23),
        GradientKey::new(noon, 0.5),
        GradientKey::new(twilight, 0.77),
        GradientKey::new(night, 1.0),
    ])
}

#[derive(Debug, Clone)]
pub struct DayNightCycle {
    config: DayNightConfig,
    t_day: f64,
}

impl DayNightCycle {
    pub fn new(mut config: DayNightConfig) -> Self {
        config.ambient_intensity = config.ambient_intensity.clamp(0.0, 2.0);
        let start = config.start_hour.clamp(0.0, HOURS_PER_DAY);
        Self {
            config,
            t_day: repeat(start / HOURS_PER_DAY, 1.0),
        }
    }

    pub fn config(&self) -> &DayNightConfig {
        &self.config
    }

    /// Fraction of the day elapsed, in `[0, 1)`.
    pub fn t_day(&self) -> f64 {
        self.t_day
    }

    pub fn current_hour(&self) -> f64 {
        self.t_day * HOURS_PER_DAY
    }

    /// Advance by `dt` real seconds.
    pub fn tick(&mut self, dt: f64) -> LightingState {
        let seconds_per_cycle = self.config.cycle_duration_seconds.max(MIN_CYCLE_SECONDS);
        let step = dt * self.config.time_scale / seconds_per_cycle;
        self.t_day = repeat(self.t_day + step, 1.0);
        self.lighting()
    }

    /// Jump to `hour`, wrapped into `[0, 24)`. Negative hours count as 0.
    pub fn set_hour(&mut self, hour: f64) -> LightingState {
        let hour = repeat(hour.max(0.0), HOURS_PER_DAY);
        self.t_day = hour / HOURS_PER_DAY;
        self.lighting()
    }

    pub fn sun_rotation(&self) -> DQuat {
        let altitude = self.t_day * 360.0 - 90.0;
        euler_deg(altitude, self.config.azimuth, 0.0)
    }

    pub fn lighting(&self) -> LightingState {
        let cfg = &self.config;
        let rotation = self.sun_rotation();
        let forward = rotation * Vector3::Z;
        let height = clamp01(-forward.dot(UP));

        let intensity = (cfg.sun_intensity_curve.evaluate(height) * cfg.max_sun_intensity).max(0.0);
        let sun = SunState {
            rotation,
            height,
            intensity,
            color: cfg.sun_color.evaluate(self.t_day as f32),
            enabled: intensity > LIGHT_ON_THRESHOLD,
        };

        let amb = cfg
            .ambient_color
            .evaluate(self.t_day as f32)
            .scale(cfg.ambient_intensity as f32);
        let ambient = match cfg.ambient_mode {
            AmbientMode::Flat => AmbientLighting::Flat { color: amb },
            AmbientMode::Trilight => AmbientLighting::Trilight {
                sky: amb,
                equator: amb.scale(0.8).lerp(amb, 0.5),
                ground: amb.scale(0.6),
            },
            AmbientMode::Skybox => AmbientLighting::Skybox {
                intensity: lerp(0.1, 1.0, height),
            },
        };

        LightingState {
            hour: self.current_hour(),
            sun,
            ambient,
        }
    }
}
