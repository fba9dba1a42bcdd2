//! Bezier segments over `lyon_geom`, with conversions to the kernel's points.

use lyon_geom::{Box2D, CubicBezierSegment, QuadraticBezierSegment};

use super::distance_2d::point_to_segment_dist;
use super::Point2;

pub type QuadBezier = QuadraticBezierSegment<f64>;
pub type CubicBezier = CubicBezierSegment<f64>;

#[must_use]
pub fn to_lyon(p: &Point2) -> lyon_geom::Point<f64> {
    lyon_geom::point(p.x, p.y)
}

#[must_use]
pub fn from_lyon(p: lyon_geom::Point<f64>) -> Point2 {
    Point2::new(p.x, p.y)
}

#[must_use]
pub fn quad(p0: Point2, ctrl: Point2, p1: Point2) -> QuadBezier {
    QuadraticBezierSegment {
        from: to_lyon(&p0),
        ctrl: to_lyon(&ctrl),
        to: to_lyon(&p1),
    }
}

#[must_use]
pub fn cubic(p0: Point2, ctrl1: Point2, ctrl2: Point2, p1: Point2) -> CubicBezier {
    CubicBezierSegment {
        from: to_lyon(&p0),
        ctrl1: to_lyon(&ctrl1),
        ctrl2: to_lyon(&ctrl2),
        to: to_lyon(&p1),
    }
}

/// Distance of the control point from the chord.
#[must_use]
pub fn quad_flatness(curve: &QuadBezier) -> f64 {
    let (from, to) = (from_lyon(curve.from), from_lyon(curve.to));
    point_to_segment_dist(&from_lyon(curve.ctrl), &from, &to)
}

/// Largest distance of either control point from the chord.
#[must_use]
pub fn cubic_flatness(curve: &CubicBezier) -> f64 {
    let (from, to) = (from_lyon(curve.from), from_lyon(curve.to));
    point_to_segment_dist(&from_lyon(curve.ctrl1), &from, &to)
        .max(point_to_segment_dist(&from_lyon(curve.ctrl2), &from, &to))
}

/// Larger side of a control hull box.
#[must_use]
pub fn hull_size(hull: &Box2D<f64>) -> f64 {
    hull.width().max(hull.height())
}

/// Appends a chord approximation of `curve` to `out`, excluding its start.
pub fn flatten_quad_into(curve: &QuadBezier, tolerance: f64, out: &mut Vec<Point2>) {
    curve.for_each_flattened(tolerance, &mut |chord| out.push(from_lyon(chord.to)));
}

/// Appends a chord approximation of `curve` to `out`, excluding its start.
pub fn flatten_cubic_into(curve: &CubicBezier, tolerance: f64, out: &mut Vec<Point2>) {
    curve.for_each_flattened(tolerance, &mut |chord| out.push(from_lyon(chord.to)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    #[test]
    fn colinear_cubic_is_flat() {
        let c = cubic(p(0.0, 0.0), p(1.0, 1.0), p(2.0, 2.0), p(3.0, 3.0));
        assert_abs_diff_eq!(cubic_flatness(&c), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn cubic_flatness_uses_farthest_control() {
        let c = cubic(p(0.0, 0.0), p(1.0, 2.0), p(3.0, -5.0), p(4.0, 0.0));
        assert_abs_diff_eq!(cubic_flatness(&c), 5.0, epsilon = 1e-12);
    }

    #[test]
    fn hull_size_takes_the_control_point() {
        let q = quad(p(0.0, 0.0), p(5.0, -40.0), p(10.0, 0.0));
        assert_abs_diff_eq!(hull_size(&q.fast_bounding_box()), 40.0);
        assert_abs_diff_eq!(quad_flatness(&q), 40.0, epsilon = 1e-12);
    }

    #[test]
    fn flattening_ends_on_the_endpoint() {
        let q = quad(p(0.0, 0.0), p(5.0, 10.0), p(10.0, 0.0));
        let mut pts = Vec::new();
        flatten_quad_into(&q, 0.01, &mut pts);
        assert!(pts.len() > 4);
        let last = pts[pts.len() - 1];
        assert_abs_diff_eq!(last.x, 10.0);
        assert_abs_diff_eq!(last.y, 0.0);
        for pt in &pts {
            assert!(pt.y >= -1e-12 && pt.y <= 5.0 + 1e-12, "y={}", pt.y);
        }
    }

    #[test]
    fn flattened_cubic_stays_within_tolerance() {
        let c = cubic(p(0.0, 0.0), p(0.0, 10.0), p(10.0, 10.0), p(10.0, 0.0));
        let mut pts = vec![p(0.0, 0.0)];
        flatten_cubic_into(&c, 0.05, &mut pts);
        let last = pts[pts.len() - 1];
        assert_abs_diff_eq!(last.x, 10.0);
        // a chord over the peak sags by no more than the tolerance
        let peak = from_lyon(c.sample(0.5));
        let highest = pts.iter().map(|q| q.y).fold(f64::MIN, f64::max);
        assert!((highest - peak.y).abs() < 0.1, "highest {highest}, peak {}", peak.y);
    }
}
