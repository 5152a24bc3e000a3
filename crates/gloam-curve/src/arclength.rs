//! Arc-length parameterization of Bezier curves.
//!
//! A curve is sampled at uniformly spaced parameters and the cumulative chord
//! length is recorded at each sample. Distance queries binary-search that
//! table and interpolate linearly between the two bounding samples, which
//! moves a follower at constant speed even though `t` itself is not
//! distance-uniform.

use gloam_core::error::{GloamError, Result};
use gloam_core::Tolerance;
use gloam_math::Point3;
use serde::{Deserialize, Serialize};

use crate::curve::{evaluate, ControlHandles, CurveKind};

/// One entry of the length table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Curve parameter in `[0, 1]`
    pub t: f64,
    pub position: Point3,
    /// Polyline length from the first sample up to this one
    pub cumulative_length: f64,
}

/// Piecewise-linear approximation of a curve indexed by distance.
///
/// An empty table (no samples, zero length) is the "not ready" state used
/// while control handles are missing. Deserialized tables are checked the
/// same way [`build`](Self::build) shapes them.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "ArcLengthTableRepr", into = "ArcLengthTableRepr")]
pub struct ArcLengthTable {
    samples: Vec<Sample>,
    total_length: f64,
    tolerance: Tolerance,
}

#[derive(Serialize, Deserialize)]
struct ArcLengthTableRepr {
    samples: Vec<Sample>,
    total_length: f64,
    #[serde(default)]
    tolerance: Tolerance,
}

impl TryFrom<ArcLengthTableRepr> for ArcLengthTable {
    type Error = GloamError;

    fn try_from(repr: ArcLengthTableRepr) -> Result<Self> {
        let ArcLengthTableRepr {
            samples,
            total_length,
            tolerance,
        } = repr;
        if samples.is_empty() {
            if total_length != 0.0 {
                return Err(GloamError::Config(format!(
                    "empty arc-length table cannot have length {}",
                    total_length
                )));
            }
            return Ok(Self {
                samples,
                total_length,
                tolerance,
            });
        }
        if samples.len() < 2 {
            return Err(GloamError::Config(format!(
                "arc-length table needs at least 2 samples, got {}",
                samples.len()
            )));
        }
        if samples[0].cumulative_length != 0.0 {
            return Err(GloamError::Config(
                "arc-length table must start at length 0".to_string(),
            ));
        }
        let monotonic = samples.windows(2).all(|w| {
            w[0].cumulative_length <= w[1].cumulative_length && w[1].cumulative_length.is_finite()
        });
        if !monotonic {
            return Err(GloamError::Config(
                "arc-length table lengths must be finite and non-decreasing".to_string(),
            ));
        }
        let last = samples[samples.len() - 1].cumulative_length;
        if total_length != last {
            return Err(GloamError::Config(format!(
                "arc-length table total {} does not match last sample {}",
                total_length, last
            )));
        }
        Ok(Self {
            samples,
            total_length,
            tolerance,
        })
    }
}

impl From<ArcLengthTable> for ArcLengthTableRepr {
    fn from(table: ArcLengthTable) -> Self {
        Self {
            samples: table.samples,
            total_length: table.total_length,
            tolerance: table.tolerance,
        }
    }
}

impl ArcLengthTable {
    /// The not-ready table.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Sample `points` at `sample_count` uniform parameters, both endpoints included.
    ///
    /// # Errors
    /// `GloamError::Config` when `sample_count < 2` or `points` does not hold
    /// exactly the number of control points `kind` requires.
    pub fn build(kind: CurveKind, points: &[Point3], sample_count: usize) -> Result<Self> {
        if sample_count < 2 {
            return Err(GloamError::Config(format!(
                "arc-length table needs at least 2 samples, got {}",
                sample_count
            )));
        }
        if points.len() != kind.control_point_count() {
            return Err(GloamError::Config(format!(
                "{:?} curve needs {} control points, got {}",
                kind,
                kind.control_point_count(),
                points.len()
            )));
        }

        let mut samples = Vec::with_capacity(sample_count);
        let mut prev = evaluate(kind, points, 0.0);
        samples.push(Sample {
            t: 0.0,
            position: prev,
            cumulative_length: 0.0,
        });

        let denom = (sample_count - 1) as f64;
        let mut total = 0.0;
        for i in 1..sample_count {
            let t = i as f64 / denom;
            let p = evaluate(kind, points, t);
            total += prev.distance(p);
            samples.push(Sample {
                t,
                position: p,
                cumulative_length: total,
            });
            prev = p;
        }

        tracing::debug!(
            ?kind,
            samples = sample_count,
            total_length = total,
            "built arc-length table"
        );

        Ok(Self {
            samples,
            total_length: total,
            tolerance: Tolerance::default(),
        })
    }

    /// Build from scene handles. Missing handles give the empty table.
    pub fn from_handles(
        kind: CurveKind,
        handles: &ControlHandles,
        sample_count: usize,
    ) -> Result<Self> {
        match handles.resolve_points(kind) {
            Some(points) => Self::build(kind, &points, sample_count),
            None => {
                tracing::debug!(?kind, "control handles missing, arc-length table left empty");
                Ok(Self::empty())
            }
        }
    }

    /// Replace the segment-length guard used during interpolation.
    pub fn with_tolerance(mut self, tolerance: Tolerance) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Samples in parameter order.
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Sample positions in order, for drawing as a connected polyline.
    pub fn positions(&self) -> impl Iterator<Item = Point3> + '_ {
        self.samples.iter().map(|s| s.position)
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Polyline length from first to last sample.
    pub fn total_length(&self) -> f64 {
        self.total_length
    }

    /// Whether distance queries can move anything.
    pub fn is_ready(&self) -> bool {
        self.total_length > 0.0
    }

    /// Position at arc-length distance `s` from the start.
    ///
    /// Distances are clamped to `[0, total_length]`. The empty table answers
    /// with the origin; callers check [`is_ready`](Self::is_ready) first.
    pub fn point_at_distance(&self, s: f64) -> Point3 {
        match self.locate(s) {
            Located::Empty => Point3::ZERO,
            Located::Sample(i) => self.samples[i].position,
            Located::Segment(i, f) => self.samples[i - 1]
                .position
                .lerp(self.samples[i].position, f),
        }
    }

    /// Curve parameter at arc-length distance `s`, with the same clamping.
    ///
    /// The empty table answers 0.
    pub fn t_at_distance(&self, s: f64) -> f64 {
        match self.locate(s) {
            Located::Empty => 0.0,
            Located::Sample(i) => self.samples[i].t,
            Located::Segment(i, f) => {
                let (a, b) = (self.samples[i - 1].t, self.samples[i].t);
                a + (b - a) * f
            }
        }
    }

    fn locate(&self, s: f64) -> Located {
        if self.samples.is_empty() {
            return Located::Empty;
        }
        // NaN lands here too.
        if !(s > 0.0) {
            return Located::Sample(0);
        }
        if s >= self.total_length || self.samples.len() < 2 {
            return Located::Sample(self.samples.len() - 1);
        }

        let i = self.lower_bound(s).max(1);
        let lo = self.samples[i - 1].cumulative_length;
        let seg = self.samples[i].cumulative_length - lo;
        let f = if self.tolerance.is_degenerate_segment(seg) {
            0.0
        } else {
            (s - lo) / seg
        };
        Located::Segment(i, f)
    }

    /// Smallest index whose cumulative length is `>= s`.
    ///
    /// Equal lengths from zero-length segments resolve to the first of them.
    fn lower_bound(&self, s: f64) -> usize {
        let mut lo = 0;
        let mut hi = self.samples.len() - 1;
        while lo < hi {
            let mid = (lo + hi) / 2;
            if self.samples[mid].cumulative_length < s {
                lo = mid + 1;
            } else {
                hi = mid;
            }
        }
        lo
    }
}

enum Located {
    Empty,
    Sample(usize),
    /// Interpolate from `i - 1` toward `i` by the fraction.
    Segment(usize, f64),
}
