//! Gloam curves: Bezier evaluation, arc-length parameterization, and the
//! rail follower and polyline renderer built on top of them.

pub mod arclength;
pub mod curve;
pub mod rail;
pub mod renderer;
pub mod tessellate;

pub use arclength::{ArcLengthTable, Sample};
pub use curve::{BezierCurve, ControlHandles, Curve, CurveKind};
pub use rail::{CurveRail, DistanceAccumulator, PlaybackMode, RailConfig, RailFollower};
pub use renderer::{CurveRenderer, RendererConfig};
