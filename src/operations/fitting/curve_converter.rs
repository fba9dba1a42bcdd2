use std::f64::consts::PI;

use super::AngleSegment;
use crate::geometry::{Arc, ArcType, Ellipse, Line, Shape};
use crate::math::arc_2d::{screen_angle_deg, snap_to_five_degrees};
use crate::math::bezier::{cubic_flatness, from_lyon, hull_size, quad_flatness, CubicBezier, QuadBezier};
use crate::math::vector_2d::{angle, line_intersection, normal, normal_projection};
use crate::math::{Point2, Vector2, TOLERANCE};

/// Relative tolerance on radii and center coordinates when merging pieces.
const MERGE_RATIO: f64 = 0.9;

/// Center coordinates smaller than this are not compared.
const ASSUME_ZERO: f64 = 0.001;

/// Largest gap, in degrees, between two pieces of the same arc.
const MINIMAL_ANGLE: f64 = 10.0;

/// Curves flatter than this fraction of their hull size become lines.
const FLATNESS_RATIO: f64 = 100.0;

/// Sweep from which a merged run is a whole circle. Kept at single precision
/// so that runs of exactly 359.9 degrees still count.
fn full_circle_extent() -> f64 {
    f64::from(359.9_f32)
}

/// Where a [`CurveConverter`] stands between two curves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConverterState {
    /// Nothing accumulated.
    #[default]
    NoArc,
    /// Curve pieces are buffered and may still merge with the next curve.
    CurrentArc,
    /// The last run was flushed; the next curve starts a new one.
    EndArc,
}

/// One fitted curve, waiting to be merged with its neighbours.
#[derive(Debug, Clone, Copy)]
struct CurvePeer {
    center: Point2,
    start_point: Point2,
    end_point: Point2,
    radius: f64,
    start_angle: f64,
    end_angle: f64,
}

/// Consecutive peers merged into a single arc.
#[derive(Debug, Clone, Copy)]
struct ArcRun {
    angle: AngleSegment,
    radius: f64,
    center: Point2,
    first_point: Point2,
    last_point: Point2,
}

impl ArcRun {
    fn start(peer: &CurvePeer, angle: AngleSegment) -> Self {
        Self {
            angle,
            radius: peer.radius,
            center: peer.center,
            first_point: peer.start_point,
            last_point: peer.end_point,
        }
    }

    fn accepts(&self, peer: &CurvePeer, angle: &AngleSegment) -> bool {
        let (r, r1) = (self.radius, peer.radius);
        if r < MERGE_RATIO * r1 || r1 < MERGE_RATIO * r {
            return false;
        }
        let axes = [(self.center.x, peer.center.x), (self.center.y, peer.center.y)];
        for (c, c1) in axes {
            let (c, c1) = (c.abs(), c1.abs());
            if c > ASSUME_ZERO && c1 > ASSUME_ZERO && (c < MERGE_RATIO * c1 || c1 < MERGE_RATIO * c) {
                return false;
            }
        }
        let deltas = [
            self.angle.end() - angle.start(),
            self.angle.start() - angle.end(),
            self.angle.start() - angle.start(),
            self.angle.end() - angle.end(),
        ];
        deltas.iter().any(|d| d.abs().min(360.0) <= MINIMAL_ANGLE)
    }

    fn extend(&mut self, peer: &CurvePeer, angle: &AngleSegment) {
        if self.radius < peer.radius {
            self.radius = peer.radius;
            self.center = peer.center;
        }
        self.last_point = peer.end_point;
        self.angle = self.angle.concatenate(angle);
    }

    fn finish(&self, allow_circles: bool) -> Shape {
        let extent = self.angle.extent();
        if allow_circles && extent.abs() >= full_circle_extent() {
            return Shape::Ellipse(Ellipse::circle(self.center, self.radius));
        }
        Shape::Arc(self.fitted_arc(extent))
    }

    /// The merged arc, re-centered on the perpendicular bisector of its real
    /// end points so that it starts and ends exactly on them.
    fn fitted_arc(&self, extent: f64) -> Arc {
        let (first, last) = (self.first_point, self.last_point);
        let mid = Point2::new(first.x + (last.x - first.x) / 2.0, first.y + (last.y - first.y) / 2.0);
        let bisector = normal(&(last - first));
        let center = normal_projection(&mid, &bisector, &self.center);
        let radius = (first - center).norm();

        let start_rad = angle(&(first - center));
        let mut sweep = angle(&(last - center)) - start_rad;
        let start = -start_rad * 180.0 / PI;
        if extent.abs() >= 360.0 {
            sweep = extent;
        } else {
            sweep = -sweep * 180.0 / PI;
            if sweep > 360.0 {
                sweep -= 360.0;
            } else if sweep < -360.0 {
                sweep += 360.0;
            }
            // keep the sign of the merged sweep
            if extent < 0.0 && sweep > 0.0 {
                sweep -= 360.0;
            } else if extent > 0.0 && sweep < 0.0 {
                sweep += 360.0;
            }
        }
        Arc::from_parts(center, radius, start, sweep, ArcType::Open)
    }
}

/// Fits a stream of Bezier curves into circular arcs and lines.
///
/// Curves are fed one at a time. Pieces that lie on the same circle are
/// merged until a curve that does not fit, a flat curve, or
/// [`CurveConverter::end_arc`] closes the run. Finished shapes accumulate
/// until taken.
///
/// With circles allowed, a run sweeping at least 359.9 degrees in either
/// direction becomes a circle: clockwise whole turns count as well as
/// counter-clockwise ones.
#[derive(Debug, Clone, Default)]
pub struct CurveConverter {
    peers: Vec<CurvePeer>,
    shapes: Vec<Shape>,
    state: ConverterState,
    allow_circles: bool,
}

impl CurveConverter {
    /// Creates a converter. With `allow_circles`, whole turns come out as
    /// circles instead of 360 degree arcs.
    #[must_use]
    pub fn new(allow_circles: bool) -> Self {
        Self {
            allow_circles,
            ..Self::default()
        }
    }

    /// Forgets buffered pieces and finished shapes, back to `NoArc`.
    pub fn clear(&mut self) {
        self.peers.clear();
        self.shapes.clear();
        self.state = ConverterState::NoArc;
    }

    /// Returns where the converter stands after the last call.
    #[must_use]
    pub fn state(&self) -> ConverterState {
        self.state
    }

    /// Returns whether whole turns come out as circles.
    #[must_use]
    pub fn allows_circles(&self) -> bool {
        self.allow_circles
    }

    /// Sets whether whole turns come out as circles, for runs closed from now on.
    pub fn set_allow_circles(&mut self, allow_circles: bool) {
        self.allow_circles = allow_circles;
    }

    /// Finished shapes, oldest first.
    #[must_use]
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    /// Returns the most recently finished shape.
    #[must_use]
    pub fn last_shape(&self) -> Option<&Shape> {
        self.shapes.last()
    }

    /// Returns true if finished shapes are waiting to be taken.
    #[must_use]
    pub fn has_shapes(&self) -> bool {
        !self.shapes.is_empty()
    }

    /// Removes and returns the finished shapes.
    pub fn take_shapes(&mut self) -> Vec<Shape> {
        std::mem::take(&mut self.shapes)
    }

    /// Feeds a cubic curve.
    pub fn add_cubic(&mut self, curve: &CubicBezier) -> ConverterState {
        let (from, ctrl1, ctrl2, to) =
            (from_lyon(curve.from), from_lyon(curve.ctrl1), from_lyon(curve.ctrl2), from_lyon(curve.to));
        let start_dir = if (ctrl1 - from).norm() > TOLERANCE { ctrl1 - from } else { ctrl2 - from };
        let end_dir = if (to - ctrl2).norm() > TOLERANCE { to - ctrl2 } else { to - ctrl1 };
        let flat = cubic_flatness(curve) < hull_size(&curve.fast_bounding_box()) / FLATNESS_RATIO;
        self.add_curve(from, to, flat, &start_dir, &end_dir)
    }

    /// Feeds a quadratic curve.
    pub fn add_quad(&mut self, curve: &QuadBezier) -> ConverterState {
        let (from, ctrl, to) = (from_lyon(curve.from), from_lyon(curve.ctrl), from_lyon(curve.to));
        let flat = quad_flatness(curve) < hull_size(&curve.fast_bounding_box()) / FLATNESS_RATIO;
        self.add_curve(from, to, flat, &(ctrl - from), &(to - ctrl))
    }

    /// Closes the current run, turning its buffered pieces into shapes.
    ///
    /// Returns `EndArc` if a run was open, `NoArc` otherwise.
    pub fn end_arc(&mut self) -> ConverterState {
        if self.state == ConverterState::CurrentArc {
            self.flush_peers();
            self.state = ConverterState::EndArc;
        } else {
            self.state = ConverterState::NoArc;
        }
        self.peers.clear();
        self.state
    }

    fn add_curve(
        &mut self,
        start: Point2,
        end: Point2,
        flat: bool,
        start_dir: &Vector2,
        end_dir: &Vector2,
    ) -> ConverterState {
        self.state = ConverterState::CurrentArc;
        if flat {
            tracing::debug!(x0 = start.x, y0 = start.y, x1 = end.x, y1 = end.y, "flat curve reduced to a line");
            self.flush_peers();
            self.push_line(start, end);
            self.state = ConverterState::EndArc;
            return self.state;
        }

        let Some(center) = line_intersection(&start, &normal(start_dir), &end, &normal(end_dir)) else {
            tracing::debug!(x0 = start.x, y0 = start.y, x1 = end.x, y1 = end.y, "curve normals are parallel, no arc fits");
            self.flush_peers();
            self.push_line(start, end);
            self.state = ConverterState::EndArc;
            return self.state;
        };

        self.peers.push(CurvePeer {
            center,
            start_point: start,
            end_point: end,
            radius: (start - center).norm(),
            start_angle: screen_angle_deg(&center, &start),
            end_angle: screen_angle_deg(&center, &end),
        });
        self.state
    }

    fn push_line(&mut self, start: Point2, end: Point2) {
        if (end - start).norm() > TOLERANCE {
            self.shapes.push(Shape::Line(Line::new(start, end)));
        }
    }

    /// Merges the buffered peers into runs and emits one shape per run.
    fn flush_peers(&mut self) {
        if self.peers.is_empty() {
            return;
        }
        let peers = std::mem::take(&mut self.peers);
        let mut run: Option<ArcRun> = None;
        for peer in &peers {
            let angle = AngleSegment::from_end(
                snap_to_five_degrees(peer.start_angle),
                snap_to_five_degrees(peer.end_angle),
            );
            if let Some(current) = run.as_mut() {
                if current.accepts(peer, &angle) {
                    current.extend(peer, &angle);
                    continue;
                }
            }
            if let Some(done) = run.replace(ArcRun::start(peer, angle)) {
                self.shapes.push(done.finish(self.allow_circles));
            }
        }
        if let Some(done) = run {
            tracing::debug!(
                pieces = peers.len(),
                extent = done.angle.extent(),
                radius = done.radius,
                "arc run flushed"
            );
            self.shapes.push(done.finish(self.allow_circles));
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::arc_2d::{arc_point, arc_to_cubics};
    use crate::math::bezier::{cubic, quad};
    use approx::assert_abs_diff_eq;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    /// Cubic pieces of the arc `(center, radius, start, extent)`.
    fn arc_cubics(center: Point2, radius: f64, start: f64, extent: f64) -> Vec<CubicBezier> {
        arc_to_cubics(&center, radius, start, extent)
    }

    #[test]
    fn colinear_cubic_becomes_a_line() {
        let mut converter = CurveConverter::new(false);
        let state = converter.add_cubic(&cubic(p(0.0, 0.0), p(3.0, 0.0), p(7.0, 0.0), p(10.0, 0.0)));
        assert_eq!(state, ConverterState::EndArc);
        assert_eq!(converter.shapes(), &[Shape::Line(Line::new(p(0.0, 0.0), p(10.0, 0.0)))]);
    }

    #[test]
    fn two_quarter_cubics_merge_into_a_half_circle() {
        let center = p(100.0, 100.0);
        let mut converter = CurveConverter::new(false);
        for cubic in arc_cubics(center, 50.0, 0.0, 180.0) {
            assert_eq!(converter.add_cubic(&cubic), ConverterState::CurrentArc);
        }
        assert!(!converter.has_shapes());
        assert_eq!(converter.end_arc(), ConverterState::EndArc);

        let shapes = converter.take_shapes();
        assert_eq!(shapes.len(), 1);
        let Shape::Arc(arc) = &shapes[0] else {
            panic!("expected an arc, got {:?}", shapes[0]);
        };
        assert_abs_diff_eq!(arc.center().x, 100.0, epsilon = 1e-9);
        assert_abs_diff_eq!(arc.center().y, 100.0, epsilon = 1e-9);
        assert_abs_diff_eq!(arc.radius(), 50.0, epsilon = 1e-9);
        assert_abs_diff_eq!(arc.start(), 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(arc.extent(), 180.0, epsilon = 1e-9);
    }

    #[test]
    fn fitted_arc_ends_on_the_curve_ends() {
        let center = p(-40.0, 25.0);
        let mut converter = CurveConverter::new(false);
        for cubic in arc_cubics(center, 20.0, 30.0, -120.0) {
            converter.add_cubic(&cubic);
        }
        converter.end_arc();
        let Some(Shape::Arc(arc)) = converter.last_shape() else {
            panic!("expected an arc");
        };
        let (first, last) = (arc_point(&center, 20.0, 30.0), arc_point(&center, 20.0, -90.0));
        assert_abs_diff_eq!((arc.start_point() - first).norm(), 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!((arc.end_point() - last).norm(), 0.0, epsilon = 1e-9);
        assert!(arc.extent() < 0.0);
    }

    #[test]
    fn full_turn_becomes_a_circle_when_allowed() {
        let center = p(50.0, 60.0);
        let mut converter = CurveConverter::new(true);
        for cubic in arc_cubics(center, 10.0, 0.0, 360.0) {
            converter.add_cubic(&cubic);
        }
        converter.end_arc();
        assert_eq!(converter.shapes().len(), 1);
        let Some(Shape::Ellipse(circle)) = converter.last_shape() else {
            panic!("expected a circle");
        };
        let frame = circle.frame();
        assert_abs_diff_eq!(frame.x, 40.0, epsilon = 1e-9);
        assert_abs_diff_eq!(frame.y, 50.0, epsilon = 1e-9);
        assert_abs_diff_eq!(frame.width, 20.0, epsilon = 1e-9);
        assert_abs_diff_eq!(frame.height, 20.0, epsilon = 1e-9);

        converter.clear();
        converter.set_allow_circles(false);
        for cubic in arc_cubics(center, 10.0, 0.0, 360.0) {
            converter.add_cubic(&cubic);
        }
        converter.end_arc();
        let Some(Shape::Arc(arc)) = converter.last_shape() else {
            panic!("expected an arc");
        };
        assert_abs_diff_eq!(arc.extent(), 360.0);
    }

    #[test]
    fn distinct_circles_give_separate_arcs() {
        let mut converter = CurveConverter::new(false);
        for cubic in arc_cubics(p(0.0, 0.0), 10.0, 0.0, 90.0) {
            converter.add_cubic(&cubic);
        }
        for cubic in arc_cubics(p(10.0, -30.0), 20.0, 270.0, 90.0) {
            converter.add_cubic(&cubic);
        }
        converter.end_arc();
        assert_eq!(converter.shapes().len(), 2);
        assert!(converter.shapes().iter().all(|s| matches!(s, Shape::Arc(_))));
    }

    #[test]
    fn flat_curve_flushes_the_pending_arc_first() {
        let mut converter = CurveConverter::new(false);
        for cubic in arc_cubics(p(0.0, 0.0), 10.0, 0.0, 90.0) {
            converter.add_cubic(&cubic);
        }
        converter.add_quad(&quad(p(0.0, -10.0), p(-5.0, -10.0), p(-10.0, -10.0)));
        let shapes = converter.take_shapes();
        assert_eq!(shapes.len(), 2);
        assert!(matches!(shapes[0], Shape::Arc(_)));
        assert!(matches!(shapes[1], Shape::Line(_)));
        assert_eq!(converter.state(), ConverterState::EndArc);
    }

    #[test]
    fn unfittable_curve_flushes_the_pending_arc_first() {
        let mut converter = CurveConverter::new(false);
        for cubic in arc_cubics(p(0.0, 0.0), 10.0, 0.0, 90.0) {
            assert_eq!(converter.add_cubic(&cubic), ConverterState::CurrentArc);
        }
        assert!(!converter.has_shapes());

        // both tangents point down the Y axis, so the normals never meet
        let state = converter.add_cubic(&cubic(p(0.0, -10.0), p(0.0, 0.0), p(10.0, -20.0), p(10.0, -10.0)));
        assert_eq!(state, ConverterState::EndArc);
        let shapes = converter.take_shapes();
        assert_eq!(shapes.len(), 2);
        let Shape::Arc(arc) = &shapes[0] else {
            panic!("expected the pending arc first, got {:?}", shapes[0]);
        };
        assert_abs_diff_eq!(arc.extent(), 90.0, epsilon = 1e-9);
        assert_eq!(shapes[1], Shape::Line(Line::new(p(0.0, -10.0), p(10.0, -10.0))));
    }

    #[test]
    fn clockwise_full_turn_is_a_circle_too() {
        let mut converter = CurveConverter::new(true);
        for cubic in arc_cubics(p(5.0, 5.0), 10.0, 90.0, -360.0) {
            converter.add_cubic(&cubic);
        }
        converter.end_arc();
        let Some(Shape::Ellipse(circle)) = converter.last_shape() else {
            panic!("expected a circle, got {:?}", converter.last_shape());
        };
        assert_abs_diff_eq!(circle.frame().width, 20.0, epsilon = 1e-9);
        assert_abs_diff_eq!(circle.center().x, 5.0, epsilon = 1e-9);
    }

    #[test]
    fn s_curve_has_no_center() {
        let mut converter = CurveConverter::new(false);
        let state = converter.add_cubic(&cubic(p(0.0, 0.0), p(0.0, 10.0), p(10.0, -10.0), p(10.0, 0.0)));
        assert_eq!(state, ConverterState::EndArc);
        assert_eq!(converter.shapes(), &[Shape::Line(Line::new(p(0.0, 0.0), p(10.0, 0.0)))]);
    }

    #[test]
    fn end_arc_without_a_run_resets() {
        let mut converter = CurveConverter::new(false);
        assert_eq!(converter.end_arc(), ConverterState::NoArc);
        converter.add_cubic(&cubic(p(0.0, 0.0), p(1.0, 0.0), p(2.0, 0.0), p(3.0, 0.0)));
        assert_eq!(converter.end_arc(), ConverterState::NoArc);
    }

    #[test]
    fn quad_pieces_fit_their_circle() {
        // quadratic through two tangents of the circle of radius 10 at 0 and 90 degrees
        let mut converter = CurveConverter::new(false);
        converter.add_quad(&quad(p(10.0, 0.0), p(10.0, -10.0), p(0.0, -10.0)));
        converter.end_arc();
        let Some(Shape::Arc(arc)) = converter.last_shape() else {
            panic!("expected an arc");
        };
        assert_abs_diff_eq!(arc.radius(), 10.0, epsilon = 1e-9);
        assert_abs_diff_eq!(arc.extent(), 90.0, epsilon = 1e-9);
    }
}
