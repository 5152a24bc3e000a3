//! Quadratic and cubic Bezier curves.

use gloam_core::error::{GloamError, Result};
use gloam_core::traits::BoundingBox;
use gloam_math::{dvec3, Aabb3, Point3, Vector3};
use serde::{Deserialize, Serialize};

use super::Curve;

/// Polynomial degree of a Bezier curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CurveKind {
    /// Three control points.
    Quadratic,
    /// Four control points.
    #[default]
    Cubic,
}

impl CurveKind {
    /// Number of control points a curve of this degree takes.
    pub fn control_point_count(self) -> usize {
        match self {
            CurveKind::Quadratic => 3,
            CurveKind::Cubic => 4,
        }
    }
}

/// `(1-t)^2 P0 + 2(1-t)t P1 + t^2 P2`
pub fn quadratic(p0: Point3, p1: Point3, p2: Point3, t: f64) -> Point3 {
    let u = 1.0 - t;
    u * u * p0 + 2.0 * u * t * p1 + t * t * p2
}

/// `(1-t)^3 P0 + 3(1-t)^2 t P1 + 3(1-t) t^2 P2 + t^3 P3`
pub fn cubic(p0: Point3, p1: Point3, p2: Point3, p3: Point3, t: f64) -> Point3 {
    let u = 1.0 - t;
    let uu = u * u;
    let tt = t * t;
    (uu * u) * p0 + (3.0 * uu * t) * p1 + (3.0 * u * tt) * p2 + (tt * t) * p3
}

/// Evaluate a Bezier curve of the given kind at `t`.
///
/// Values of `t` outside `[0, 1]` extrapolate the same polynomial.
///
/// # Panics
/// When `points` holds fewer control points than `kind` requires. Callers
/// validate the count first (see [`BezierCurve::new`]).
pub fn evaluate(kind: CurveKind, points: &[Point3], t: f64) -> Point3 {
    debug_assert!(
        points.len() >= kind.control_point_count(),
        "{:?} curve needs {} control points, got {}",
        kind,
        kind.control_point_count(),
        points.len()
    );
    match kind {
        CurveKind::Quadratic => quadratic(points[0], points[1], points[2], t),
        CurveKind::Cubic => cubic(points[0], points[1], points[2], points[3], t),
    }
}

/// First derivative `dP/dt` of a Bezier curve at `t`.
pub fn tangent(kind: CurveKind, points: &[Point3], t: f64) -> Vector3 {
    debug_assert!(points.len() >= kind.control_point_count());
    let u = 1.0 - t;
    match kind {
        CurveKind::Quadratic => {
            2.0 * u * (points[1] - points[0]) + 2.0 * t * (points[2] - points[1])
        }
        CurveKind::Cubic => {
            3.0 * u * u * (points[1] - points[0])
                + 6.0 * u * t * (points[2] - points[1])
                + 3.0 * t * t * (points[3] - points[2])
        }
    }
}

/// A Bezier curve with a validated control-point count.
///
/// Deserialization goes through [`BezierCurve::new`], so a serialized curve
/// with the wrong number of points is rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BezierCurveRepr", into = "BezierCurveRepr")]
pub struct BezierCurve {
    kind: CurveKind,
    points: Vec<Point3>,
}

#[derive(Serialize, Deserialize)]
struct BezierCurveRepr {
    kind: CurveKind,
    points: Vec<Point3>,
}

impl TryFrom<BezierCurveRepr> for BezierCurve {
    type Error = GloamError;

    fn try_from(repr: BezierCurveRepr) -> Result<Self> {
        Self::new(repr.kind, repr.points)
    }
}

impl From<BezierCurve> for BezierCurveRepr {
    fn from(curve: BezierCurve) -> Self {
        Self {
            kind: curve.kind,
            points: curve.points,
        }
    }
}

impl BezierCurve {
    /// Build a curve of `kind` from its control points.
    ///
    /// # Errors
    /// `GloamError::Config` when `points` does not hold exactly
    /// `kind.control_point_count()` points.
    pub fn new(kind: CurveKind, points: Vec<Point3>) -> Result<Self> {
        if points.len() != kind.control_point_count() {
            return Err(GloamError::Config(format!(
                "{:?} curve needs {} control points, got {}",
                kind,
                kind.control_point_count(),
                points.len()
            )));
        }
        Ok(Self { kind, points })
    }

    /// Quadratic curve through `p0` and `p2`, pulled toward `p1`.
    pub fn quadratic(p0: Point3, p1: Point3, p2: Point3) -> Self {
        Self {
            kind: CurveKind::Quadratic,
            points: vec![p0, p1, p2],
        }
    }

    /// Cubic curve through `p0` and `p3`.
    pub fn cubic(p0: Point3, p1: Point3, p2: Point3, p3: Point3) -> Self {
        Self {
            kind: CurveKind::Cubic,
            points: vec![p0, p1, p2, p3],
        }
    }

    /// Degree of the curve.
    pub fn kind(&self) -> CurveKind {
        self.kind
    }

    /// Control points in order, exactly `kind().control_point_count()` of them.
    pub fn control_points(&self) -> &[Point3] {
        &self.points
    }
}

impl Curve for BezierCurve {
    fn point_at(&self, t: f64) -> Point3 {
        evaluate(self.kind, &self.points, t)
    }

    fn tangent_at(&self, t: f64) -> Vector3 {
        tangent(self.kind, &self.points, t)
    }

    fn domain(&self) -> (f64, f64) {
        (0.0, 1.0)
    }
}

/// Bounds of the control polygon, which always contains the curve.
impl BoundingBox for BezierCurve {
    type Point = Point3;

    fn bounding_box(&self) -> (Point3, Point3) {
        // Every constructor and deserialization path checks the point count.
        let aabb = Aabb3::from_points(&self.points)
            .unwrap_or_else(|| Aabb3::new(Point3::ZERO, Point3::ZERO));
        (aabb.min, aabb.max)
    }
}

/// Control point slots as a scene supplies them.
///
/// A `None` slot is a handle that has not been placed yet. Curves built from
/// incomplete handles are "not ready" rather than invalid.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlHandles {
    pub p0: Option<Point3>,
    pub p1: Option<Point3>,
    pub p2: Option<Point3>,
    pub p3: Option<Point3>,
}

impl ControlHandles {
    /// Handles for a quadratic curve, `p3` unset.
    pub fn quadratic(p0: Point3, p1: Point3, p2: Point3) -> Self {
        Self {
            p0: Some(p0),
            p1: Some(p1),
            p2: Some(p2),
            p3: None,
        }
    }

    /// All four handles placed.
    pub fn cubic(p0: Point3, p1: Point3, p2: Point3, p3: Point3) -> Self {
        Self {
            p0: Some(p0),
            p1: Some(p1),
            p2: Some(p2),
            p3: Some(p3),
        }
    }

    /// Default handle layout for a freshly placed curve.
    pub fn scene_default(kind: CurveKind) -> Self {
        let mut handles = Self::default();
        handles.fill_missing(kind);
        handles
    }

    /// Place every unset handle that `kind` needs at its default position.
    pub fn fill_missing(&mut self, kind: CurveKind) {
        self.p0.get_or_insert(dvec3(0.0, 5.0, 0.0));
        self.p1.get_or_insert(dvec3(60.0, 15.0, 40.0));
        self.p2.get_or_insert(dvec3(120.0, 10.0, 60.0));
        if kind == CurveKind::Cubic {
            self.p3.get_or_insert(dvec3(180.0, 5.0, 0.0));
        }
    }

    /// All four slots in order.
    pub fn slots(&self) -> [Option<Point3>; 4] {
        [self.p0, self.p1, self.p2, self.p3]
    }

    /// Control points for `kind`, or `None` if a required handle is unset.
    pub fn resolve_points(&self, kind: CurveKind) -> Option<Vec<Point3>> {
        self.slots()
            .into_iter()
            .take(kind.control_point_count())
            .collect()
    }

    /// Build the curve for `kind`, or `None` if a required handle is unset.
    pub fn resolve(&self, kind: CurveKind) -> Option<BezierCurve> {
        self.resolve_points(kind)
            .map(|points| BezierCurve { kind, points })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_cubic() -> BezierCurve {
        BezierCurve::cubic(
            dvec3(0.0, 0.0, 0.0),
            dvec3(1.0, 2.0, 0.0),
            dvec3(2.0, 2.0, 0.0),
            dvec3(3.0, 0.0, 0.0),
        )
    }

    #[test]
    fn test_cubic_endpoints_exact() {
        let curve = sample_cubic();
        assert_eq!(curve.point_at(0.0), dvec3(0.0, 0.0, 0.0));
        assert_eq!(curve.point_at(1.0), dvec3(3.0, 0.0, 0.0));
    }

    #[test]
    fn test_cubic_symmetric_midpoint() {
        let p = sample_cubic().point_at(0.5);
        assert!((p - dvec3(1.5, 1.5, 0.0)).length() < 1e-12);
    }

    #[test]
    fn test_quadratic_endpoints_and_midpoint() {
        let p0 = dvec3(-1.0, 4.0, 2.5);
        let p1 = dvec3(0.5, 1.0, 0.0);
        let p2 = dvec3(7.0, -3.0, 1.0);
        assert_eq!(quadratic(p0, p1, p2, 0.0), p0);
        assert_eq!(quadratic(p0, p1, p2, 1.0), p2);
        // 0.25 P0 + 0.5 P1 + 0.25 P2
        let mid = quadratic(p0, p1, p2, 0.5);
        let expected = 0.25 * p0 + 0.5 * p1 + 0.25 * p2;
        assert!((mid - expected).length() < 1e-12);
    }

    #[test]
    fn test_extrapolation_follows_polynomial() {
        let p0 = dvec3(0.0, 0.0, 0.0);
        let p1 = dvec3(5.0, 0.0, 0.0);
        let p2 = dvec3(10.0, 0.0, 0.0);
        // Evenly spaced collinear points give P(t) = 10t for every t.
        let p = quadratic(p0, p1, p2, 1.5);
        assert!((p - dvec3(15.0, 0.0, 0.0)).length() < 1e-12);
        let q = quadratic(p0, p1, p2, -0.5);
        assert!((q - dvec3(-5.0, 0.0, 0.0)).length() < 1e-12);
    }

    #[test]
    fn test_tangent_matches_finite_difference() {
        let curve = sample_cubic();
        let h = 1e-6;
        for &t in &[0.1, 0.4, 0.75] {
            let fd = (curve.point_at(t + h) - curve.point_at(t - h)) / (2.0 * h);
            let an = curve.tangent_at(t);
            assert!((fd - an).length() < 1e-5, "t={t}: {fd:?} vs {an:?}");
        }
        let quad = BezierCurve::quadratic(Point3::ZERO, dvec3(1.0, 1.0, 0.0), dvec3(2.0, 0.0, 0.0));
        let fd = (quad.point_at(0.3 + h) - quad.point_at(0.3 - h)) / (2.0 * h);
        assert!((fd - quad.tangent_at(0.3)).length() < 1e-5);
    }

    #[test]
    fn test_new_rejects_wrong_count() {
        let err = BezierCurve::new(CurveKind::Cubic, vec![Point3::ZERO; 3]).unwrap_err();
        assert!(matches!(err, GloamError::Config(_)));
        assert!(BezierCurve::new(CurveKind::Quadratic, vec![Point3::ZERO; 4]).is_err());
        assert!(BezierCurve::new(CurveKind::Quadratic, vec![Point3::ZERO; 3]).is_ok());
    }

    #[test]
    fn test_deserialize_rejects_wrong_count() {
        let err = toml::from_str::<BezierCurve>("kind = \"cubic\"\npoints = [[0.0, 0.0, 0.0]]")
            .unwrap_err();
        assert!(err.to_string().contains("control points"), "{err}");

        let ok: BezierCurve = toml::from_str(
            "kind = \"quadratic\"\npoints = [[0.0, 0.0, 0.0], [1.0, 1.0, 0.0], [2.0, 0.0, 0.0]]",
        )
        .unwrap();
        assert_eq!(ok.kind(), CurveKind::Quadratic);
        assert_eq!(ok.point_at(1.0), dvec3(2.0, 0.0, 0.0));
    }

    #[test]
    fn test_serialized_curve_reads_back() {
        let text = toml::to_string(&sample_cubic()).unwrap();
        let back: BezierCurve = toml::from_str(&text).unwrap();
        assert_eq!(back, sample_cubic());
    }

    #[test]
    fn test_bounding_box_is_control_polygon() {
        let (min, max) = sample_cubic().bounding_box();
        assert_eq!(min, dvec3(0.0, 0.0, 0.0));
        assert_eq!(max, dvec3(3.0, 2.0, 0.0));
    }

    #[test]
    fn test_handles_resolve_requires_kind_slots() {
        let quad = ControlHandles::quadratic(Point3::ZERO, Point3::X, Point3::Y);
        assert!(quad.resolve(CurveKind::Quadratic).is_some());
        assert!(quad.resolve(CurveKind::Cubic).is_none());

        let mut partial = ControlHandles::default();
        partial.p0 = Some(Point3::ZERO);
        assert!(partial.resolve(CurveKind::Quadratic).is_none());
    }

    #[test]
    fn test_scene_default_quadratic_leaves_p3_unset() {
        let h = ControlHandles::scene_default(CurveKind::Quadratic);
        assert_eq!(h.p0, Some(dvec3(0.0, 5.0, 0.0)));
        assert!(h.p3.is_none());
        let c = ControlHandles::scene_default(CurveKind::Cubic);
        assert_eq!(c.p3, Some(dvec3(180.0, 5.0, 0.0)));
    }

    #[test]
    fn test_fill_missing_keeps_placed_handles() {
        let mut h = ControlHandles::default();
        h.p1 = Some(dvec3(1.0, 1.0, 1.0));
        h.fill_missing(CurveKind::Cubic);
        assert_eq!(h.p1, Some(dvec3(1.0, 1.0, 1.0)));
        assert!(h.resolve(CurveKind::Cubic).is_some());
    }
}
