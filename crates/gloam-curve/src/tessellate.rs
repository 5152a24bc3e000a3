//! Polyline generation for drawing curves.

use gloam_math::Point3;

use crate::curve::Curve;

/// Sample `curve` at `resolution` uniformly spaced parameters over its domain.
///
/// Both domain ends are included when `resolution >= 2`. A resolution of 1
/// yields just the start point, and 0 yields nothing.
pub fn sample_polyline(curve: &dyn Curve, resolution: usize) -> Vec<Point3> {
    let (t_min, t_max) = curve.domain();
    match resolution {
        0 => Vec::new(),
        1 => vec![curve.point_at(t_min)],
        n => {
            let denom = (n - 1) as f64;
            (0..n)
                .map(|i| curve.point_at(t_min + (t_max - t_min) * i as f64 / denom))
                .collect()
        }
    }
}

/// Total length of a polyline.
pub fn polyline_length(points: &[Point3]) -> f64 {
    points.windows(2).map(|w| w[0].distance(w[1])).sum()
}
