//! Polyline and gizmo data for drawing a curve.
//!
//! The renderer only produces geometry. Uploading it to a line renderer and
//! drawing the gizmos stays with the host.

use gloam_core::traits::BoundingBox;
use gloam_math::{Aabb3, Color, Point3};
use serde::{Deserialize, Serialize};

use crate::curve::{ControlHandles, CurveKind};
use crate::tessellate::sample_polyline;

pub const MIN_RESOLUTION: usize = 2;
pub const MAX_RESOLUTION: usize = 512;

/// Radius of the sphere drawn at each placed handle.
pub const HANDLE_MARKER_RADIUS: f64 = 0.2;
pub const CONTROL_POLYGON_COLOR: Color = Color::YELLOW;
pub const HANDLE_MARKER_COLOR: Color = Color::MAGENTA;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RendererConfig {
    pub kind: CurveKind,
    pub handles: ControlHandles,
    pub resolution: usize,
    pub color: Color,
    pub width: f64,
    /// Place default handles for any slot the curve needs but lacks.
    pub create_missing_handles: bool,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            kind: CurveKind::Cubic,
            handles: ControlHandles::default(),
            resolution: 128,
            color: Color::CYAN,
            width: 0.05,
            create_missing_handles: true,
        }
    }
}

/// Turns control handles into a polyline of `resolution` points.
#[derive(Debug, Clone)]
pub struct CurveRenderer {
    kind: CurveKind,
    handles: ControlHandles,
    resolution: usize,
    pub color: Color,
    pub width: f64,
    positions: Vec<Point3>,
}

impl CurveRenderer {
    pub fn new(config: &RendererConfig) -> Self {
        let mut handles = config.handles;
        if config.create_missing_handles {
            handles.fill_missing(config.kind);
        }
        let mut renderer = Self {
            kind: config.kind,
            handles,
            resolution: config.resolution.clamp(MIN_RESOLUTION, MAX_RESOLUTION),
            color: config.color,
            width: config.width,
            positions: Vec::new(),
        };
        renderer.update_curve();
        renderer
    }

    pub fn kind(&self) -> CurveKind {
        self.kind
    }

    pub fn handles(&self) -> &ControlHandles {
        &self.handles
    }

    pub fn resolution(&self) -> usize {
        self.resolution
    }

    /// Current polyline. Empty until the handles have been complete once.
    pub fn positions(&self) -> &[Point3] {
        &self.positions
    }

    pub fn set_kind(&mut self, kind: CurveKind) {
        self.kind = kind;
    }

    pub fn set_handles(&mut self, handles: ControlHandles) {
        self.handles = handles;
    }

    pub fn set_resolution(&mut self, resolution: usize) {
        self.resolution = resolution.clamp(MIN_RESOLUTION, MAX_RESOLUTION);
    }

    /// Regenerate the polyline from the current handles.
    ///
    /// Returns `false` and keeps the previous polyline when a required handle
    /// is missing.
    pub fn update_curve(&mut self) -> bool {
        match self.handles.resolve(self.kind) {
            Some(curve) => {
                self.positions = sample_polyline(&curve, self.resolution);
                true
            }
            None => {
                tracing::debug!(kind = ?self.kind, "curve handles incomplete, keeping previous polyline");
                false
            }
        }
    }

    /// Lines of the control polygon between consecutive placed handles.
    pub fn gizmo_segments(&self) -> Vec<(Point3, Point3)> {
        let h = &self.handles;
        let mut segments = Vec::with_capacity(3);
        if let (Some(a), Some(b)) = (h.p0, h.p1) {
            segments.push((a, b));
        }
        if let (Some(a), Some(b)) = (h.p1, h.p2) {
            segments.push((a, b));
        }
        if self.kind == CurveKind::Cubic {
            if let (Some(a), Some(b)) = (h.p2, h.p3) {
                segments.push((a, b));
            }
        }
        segments
    }

    /// Positions of the placed handles the curve kind uses.
    pub fn handle_markers(&self) -> Vec<Point3> {
        self.handles
            .slots()
            .into_iter()
            .take(self.kind.control_point_count())
            .flatten()
            .collect()
    }

    /// Bounds of the control polygon, when the curve is complete.
    pub fn bounds(&self) -> Option<Aabb3> {
        let (min, max) = self.handles.resolve(self.kind)?.bounding_box();
        Some(Aabb3::new(min, max))
    }
}
