//! Circular arc math in screen convention.
//!
//! Angles are degrees, counter-clockwise as seen on a Y-down screen: the point
//! at angle `a` on a circle of radius `r` around `c` is
//! `(c.x + r·cos a, c.y − r·sin a)`.

use std::f64::consts::PI;

use lyon_geom::Angle;

use super::bezier::{to_lyon, CubicBezier};
use super::Point2;

/// Standard cubic control-arm length for a quarter circle of unit radius.
pub const KAPPA: f64 = 0.552_284_749_830_793_3;

/// Screen angle, in degrees, of `p` as seen from `center`.
#[must_use]
pub fn screen_angle_deg(center: &Point2, p: &Point2) -> f64 {
    -(p.y - center.y).atan2(p.x - center.x) * 180.0 / PI
}

/// Point at screen angle `angle_deg` on the circle `(center, radius)`.
#[must_use]
pub fn arc_point(center: &Point2, radius: f64, angle_deg: f64) -> Point2 {
    let a = angle_deg.to_radians();
    Point2::new(center.x + radius * a.cos(), center.y - radius * a.sin())
}

/// IEEE 754 remainder: `x − y·n` with `n` the nearest integer to `x / y`,
/// ties to even.
#[must_use]
pub fn ieee_remainder(x: f64, y: f64) -> f64 {
    x - y * (x / y).round_ties_even()
}

/// Rounds an angle in degrees to the nearest multiple of 5, folded into
/// `[-180, 180]`.
#[must_use]
pub fn snap_to_five_degrees(angle_deg: f64) -> f64 {
    ieee_remainder(5.0 * (angle_deg / 5.0).round_ties_even(), 360.0)
}

/// Number of chords needed so that none deviates more than `tolerance` from
/// an arc of `radius` sweeping `abs_sweep` radians.
#[must_use]
pub fn arc_subdivision_count(radius: f64, abs_sweep: f64, tolerance: f64) -> u32 {
    if radius < 1e-12 || abs_sweep < 1e-12 || tolerance <= 0.0 {
        return 1;
    }
    // From the sagitta formula: sagitta = r * (1 - cos(θ/2))
    // For a given tolerance: θ = 2 * acos(1 - tolerance/r)
    let max_angle = if tolerance >= radius {
        PI
    } else {
        2.0 * (1.0 - tolerance / radius).acos()
    };
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let n = (abs_sweep / max_angle).ceil().min(f64::from(u16::MAX)) as u32;
    n.max(1)
}

/// Samples an arc into a point chain within `tolerance`, both endpoints included.
#[must_use]
pub fn sample_arc(
    center: &Point2,
    radius: f64,
    start_deg: f64,
    extent_deg: f64,
    tolerance: f64,
) -> Vec<Point2> {
    let n = arc_subdivision_count(radius, extent_deg.to_radians().abs(), tolerance);
    (0..=n)
        .map(|i| {
            let t = f64::from(i) / f64::from(n);
            arc_point(center, radius, start_deg + extent_deg * t)
        })
        .collect()
}

/// Cubic Bezier approximation of an arc.
///
/// The sweep is clamped to one turn and split into `ceil(|extent| / 90)`
/// equal pieces, chained from the start point. A zero extent gives no pieces.
#[must_use]
pub fn arc_to_cubics(center: &Point2, radius: f64, start_deg: f64, extent_deg: f64) -> Vec<CubicBezier> {
    if extent_deg.abs() < 1e-12 {
        return Vec::new();
    }
    // lyon measures angles counter-clockwise in a Y-up sense, so screen
    // angles flip sign
    let arc = lyon_geom::Arc {
        center: to_lyon(center),
        radii: lyon_geom::vector(radius, radius),
        start_angle: Angle::degrees(-start_deg),
        sweep_angle: Angle::degrees(-extent_deg.clamp(-360.0, 360.0)),
        x_rotation: Angle::radians(0.0),
    };
    let mut pieces = Vec::new();
    arc.for_each_cubic_bezier(&mut |piece| pieces.push(*piece));
    pieces
}
