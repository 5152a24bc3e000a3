//! Linear RGBA colours and multi-key gradients.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const CYAN: Color = Color::rgb(0.0, 1.0, 1.0);
    pub const MAGENTA: Color = Color::rgb(1.0, 0.0, 1.0);
    pub const YELLOW: Color = Color::rgb(1.0, 0.92, 0.016);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Scale every channel, alpha included.
    pub fn scale(self, k: f32) -> Self {
        Self::rgba(self.r * k, self.g * k, self.b * k, self.a * k)
    }

    /// Unclamped per-channel linear interpolation.
    pub fn lerp(self, other: Color, t: f32) -> Self {
        Self::rgba(
            self.r + (other.r - self.r) * t,
            self.g + (other.g - self.g) * t,
            self.b + (other.b - self.b) * t,
            self.a + (other.a - self.a) * t,
        )
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

/// A colour stop at normalized `time` in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GradientKey {
    pub color: Color,
    pub time: f32,
}

impl GradientKey {
    pub fn new(color: Color, time: f32) -> Self {
        Self { color, time }
    }
}

/// Piecewise-linear colour ramp.
///
/// Keys are kept sorted by time. Evaluation before the first key or after the
/// last key returns that key's colour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gradient {
    keys: Vec<GradientKey>,
}

impl Gradient {
    pub fn new(mut keys: Vec<GradientKey>) -> Self {
        keys.sort_by(|a, b| a.time.total_cmp(&b.time));
        Self { keys }
    }

    pub fn keys(&self) -> &[GradientKey] {
        &self.keys
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn evaluate(&self, time: f32) -> Color {
        let (first, last) = match (self.keys.first(), self.keys.last()) {
            (Some(f), Some(l)) => (f, l),
            _ => return Color::WHITE,
        };
        if time <= first.time {
            return first.color;
        }
        if time >= last.time {
            return last.color;
        }
        // First key strictly after `time`; guaranteed in 1..len by the checks above.
        let hi = self.keys.partition_point(|k| k.time <= time);
        let a = &self.keys[hi - 1];
        let b = &self.keys[hi];
        let span = b.time - a.time;
        let f = if span > 0.0 { (time - a.time) / span } else { 0.0 };
        a.color.lerp(b.color, f)
    }
}
