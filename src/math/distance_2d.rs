use super::{Point2, Vector2, TOLERANCE};

/// Distance from `p` to the closest point of the segment `a → b`.
///
/// This is the measure behind Bezier flatness: how far a control point
/// strays from the chord.
#[must_use]
pub fn point_to_segment_dist(p: &Point2, a: &Point2, b: &Point2) -> f64 {
    let chord = b - a;
    let len_sq = chord.norm_squared();
    if len_sq < TOLERANCE * TOLERANCE {
        return (p - a).norm();
    }
    let t = ((p - a).dot(&chord) / len_sq).clamp(0.0, 1.0);
    (p - (a + chord * t)).norm()
}

/// Distance from `p` to the unbounded line through `origin` along `dir`.
///
/// A zero direction degenerates to the point distance to `origin`.
#[must_use]
pub fn point_to_line_dist(p: &Point2, origin: &Point2, dir: &Vector2) -> f64 {
    let len = dir.norm();
    if len < TOLERANCE {
        return (p - origin).norm();
    }
    let w = p - origin;
    (dir.x * w.y - dir.y * w.x).abs() / len
}
