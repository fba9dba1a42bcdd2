//! Crossings of straight lines and segments.

use super::{Point2, Vector2, TOLERANCE};

/// Z component of the 3D cross product of two plane vectors.
fn cross(a: &Vector2, b: &Vector2) -> f64 {
    a.x * b.y - a.y * b.x
}

fn within_unit(t: f64) -> bool {
    (-TOLERANCE..=1.0 + TOLERANCE).contains(&t)
}

/// Parameters `(t, u)` at which `p1 + t·d1` meets `p2 + u·d2`, or `None` for
/// parallel lines.
#[must_use]
pub fn line_line_intersect_2d(p1: &Point2, d1: &Vector2, p2: &Point2, d2: &Vector2) -> Option<(f64, f64)> {
    let denom = cross(d1, d2);
    if denom.abs() < TOLERANCE {
        return None;
    }
    let w = p2 - p1;
    Some((cross(&w, d2) / denom, cross(&w, d1) / denom))
}

/// Where the segments `a0 → a1` and `b0 → b1` cross, with the parameter on
/// each. Touching ends count as a crossing.
#[must_use]
pub fn segment_segment_intersect_2d(
    a0: &Point2,
    a1: &Point2,
    b0: &Point2,
    b1: &Point2,
) -> Option<(Point2, f64, f64)> {
    let da = a1 - a0;
    let (t, u) = line_line_intersect_2d(a0, &da, b0, &(b1 - b0))?;
    if !(within_unit(t) && within_unit(u)) {
        return None;
    }
    let t = t.clamp(0.0, 1.0);
    Some((point_at(a0, &da, t), t, u.clamp(0.0, 1.0)))
}

/// `origin + t·dir`.
#[must_use]
pub fn point_at(origin: &Point2, dir: &Vector2, t: f64) -> Point2 {
    origin + dir * t
}
