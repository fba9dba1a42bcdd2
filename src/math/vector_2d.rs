//! Direction helpers shared by the fitting, normalizing and clipping code.
//!
//! Normals follow the screen convention: the normal of `(x, y)` is `(y, -x)`,
//! so a rightward direction has an upward normal on a Y-down screen.

use super::intersect_2d::{line_line_intersect_2d, point_at};
use super::{Point2, Vector2, TOLERANCE};
use crate::error::{GeometryError, Result};

/// Perpendicular of `v`, same length.
#[must_use]
pub fn normal(v: &Vector2) -> Vector2 {
    Vector2::new(v.y, -v.x)
}

/// Unit-length perpendicular of `v`.
///
/// # Errors
///
/// Returns `GeometryError::ZeroVector` if `v` has no length.
pub fn unit_normal(v: &Vector2) -> Result<Vector2> {
    normalize(&normal(v))
}

/// Unit vector along `v`.
///
/// # Errors
///
/// Returns `GeometryError::ZeroVector` if `v` has no length.
pub fn normalize(v: &Vector2) -> Result<Vector2> {
    let len = v.norm();
    if len < TOLERANCE {
        return Err(GeometryError::ZeroVector.into());
    }
    Ok(v / len)
}

/// Angle of `v` in radians, `atan2(y, x)`.
#[must_use]
pub fn angle(v: &Vector2) -> f64 {
    v.y.atan2(v.x)
}

/// Moves `p` by `distance` along the direction of `dir`.
///
/// # Errors
///
/// Returns `GeometryError::ZeroVector` if `dir` has no length.
pub fn translate(p: &Point2, dir: &Vector2, distance: f64) -> Result<Point2> {
    Ok(p + normalize(dir)? * distance)
}

/// Intersection of the line through `p1` along `d1` with the line through
/// `p2` along `d2`, or `None` when they are parallel.
#[must_use]
pub fn line_intersection(p1: &Point2, d1: &Vector2, p2: &Point2, d2: &Vector2) -> Option<Point2> {
    let (t, _) = line_line_intersect_2d(p1, d1, p2, d2)?;
    Some(point_at(p1, d1, t))
}

/// Orthogonal projection of `p` onto the line through `origin` along `dir`.
///
/// A zero direction carries no line, so `p` is returned as is.
#[must_use]
pub fn normal_projection(origin: &Point2, dir: &Vector2, p: &Point2) -> Point2 {
    let len_sq = dir.norm_squared();
    if len_sq < TOLERANCE * TOLERANCE {
        return *p;
    }
    let t = (p - origin).dot(dir) / len_sq;
    point_at(origin, dir, t)
}

/// True if the segment `a → b` lies on the line through `origin` along `dir`.
#[must_use]
pub fn is_colinear(origin: &Point2, dir: &Vector2, a: &Point2, b: &Point2, tolerance: f64) -> bool {
    use super::distance_2d::point_to_line_dist;

    point_to_line_dist(a, origin, dir) < tolerance && point_to_line_dist(b, origin, dir) < tolerance
}
