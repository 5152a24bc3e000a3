/// Thresholds used when comparing distances along curves and between poses.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Tolerance {
    /// Shortest segment length that still yields a meaningful interpolation fraction
    pub segment: f64,
    /// Squared separation below which two positions give no usable direction
    pub direction_sq: f64,
}

impl Tolerance {
    pub const DEFAULT_SEGMENT: f64 = 1e-6;
    pub const DEFAULT_DIRECTION_SQ: f64 = 1e-6;

    pub fn new(segment: f64, direction_sq: f64) -> Self {
        Self {
            segment,
            direction_sq,
        }
    }

    pub fn default_precision() -> Self {
        Self {
            segment: Self::DEFAULT_SEGMENT,
            direction_sq: Self::DEFAULT_DIRECTION_SQ,
        }
    }

    /// Whether a segment is too short to divide by.
    pub fn is_degenerate_segment(self, length: f64) -> bool {
        length <= self.segment
    }

    /// Whether a squared separation is too small to normalize.
    pub fn is_degenerate_direction(self, length_sq: f64) -> bool {
        length_sq <= self.direction_sq
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::default_precision()
    }
}
