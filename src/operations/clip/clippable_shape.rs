use tracing::{debug, trace};

use crate::error::{ConstructionError, Result};
use crate::geometry::{Arc, ArcType, Area, Ellipse, Line, Path, PathSegment, Polygon, Rect, Shape};
use crate::math::affine::AffineTransform;
use crate::math::arc_2d::{ieee_remainder, screen_angle_deg};
use crate::math::vector_2d::{is_colinear, normal, translate};
use crate::math::{Point2, Vector2};
use crate::operations::normalize::ShapeNormalizer;

/// Points and lengths closer than this are the same.
const ASSUME_ZERO: f64 = 1e-4;

/// Width of the quadrilateral standing in for a segment during clipping.
const RIBBON_WIDTH: f64 = 1.0;

/// Slack, in degrees, when merging arc pieces.
const ANGLE_EPSILON: f64 = 1e-6;

/// Sweeps at least this wide clip as a whole circle.
const FULL_TURN: f64 = 359.9;

/// Parameters for clipping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClipParams {
    flatness: f64,
}

impl Default for ClipParams {
    fn default() -> Self {
        Self { flatness: 0.01 }
    }
}

impl ClipParams {
    /// # Errors
    ///
    /// Returns `ConstructionError::InvalidParameter` if `flatness` is not a
    /// positive number.
    pub fn new(flatness: f64) -> Result<Self> {
        Ok(Self {
            flatness: ConstructionError::check_flatness(flatness)?,
        })
    }

    /// Deviation allowed when curved outlines are turned into areas.
    #[must_use]
    pub fn flatness(&self) -> f64 {
        self.flatness
    }
}

/// The outline of `shape` with every CLOSE rewritten: as an explicit line
/// back to the sub-path start when `close_as_line`, dropped otherwise.
/// Drawing after a CLOSE resumes from a fresh move to that start.
#[must_use]
pub fn unclosed_path(shape: &Shape, close_as_line: bool) -> Path {
    let mut path = Path::new();
    let mut subpath_start = None;
    let mut reopen = false;
    for segment in shape.segments() {
        match segment {
            PathSegment::MoveTo(p) => {
                subpath_start = Some(p);
                reopen = false;
                path.move_to(p);
            }
            PathSegment::Close => {
                if let Some(start) = subpath_start {
                    if close_as_line {
                        path.line_to(start);
                    }
                    reopen = true;
                }
            }
            drawing => {
                if reopen {
                    if let Some(start) = subpath_start {
                        path.move_to(start);
                    }
                    reopen = false;
                }
                path.push(drawing);
            }
        }
    }
    path
}

/// How a clip area relates to a bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Coverage {
    Inside,
    Outside,
    Partial,
}

fn coverage(clip: &Area, bounds: &Rect) -> Coverage {
    if clip.contains_rect(bounds) {
        Coverage::Inside
    } else if clip.intersects_rect(bounds) {
        Coverage::Partial
    } else {
        Coverage::Outside
    }
}

/// Sorts `(from, to)` spans and fuses those closer than `slack`.
fn merge_spans(mut spans: Vec<(f64, f64)>, slack: f64) -> Vec<(f64, f64)> {
    spans.sort_by(|a, b| a.0.total_cmp(&b.0));
    let mut merged: Vec<(f64, f64)> = Vec::with_capacity(spans.len());
    for (from, to) in spans {
        match merged.last_mut() {
            Some(last) if from <= last.1 + slack => last.1 = last.1.max(to),
            _ => merged.push((from, to)),
        }
    }
    merged
}

fn point_on(p0: &Point2, p1: &Point2, t: f64) -> Point2 {
    if t <= 0.0 {
        *p0
    } else if t >= 1.0 {
        *p1
    } else {
        p0 + (p1 - p0) * t
    }
}

/// Parameter spans of `p0 → p1` recovered from a ribbon on one side of it.
fn ribbon_spans(p0: &Point2, p1: &Point2, side: &Vector2, clip: &Area) -> Vec<(f64, f64)> {
    let (Ok(q1), Ok(q0)) = (translate(p1, side, RIBBON_WIDTH), translate(p0, side, RIBBON_WIDTH)) else {
        return Vec::new();
    };
    let mut ribbon = Area::from_points(&[*p0, *p1, q1, q0]);
    ribbon.intersect(clip);

    let d = p1 - p0;
    let length = d.norm();
    let len_sq = length * length;
    let mut spans = Vec::new();
    for ring in ribbon.rings() {
        for (i, a) in ring.iter().enumerate() {
            let b = &ring[(i + 1) % ring.len()];
            if !is_colinear(p0, &d, a, b, ASSUME_ZERO) {
                continue;
            }
            let ta = (a - p0).dot(&d) / len_sq;
            let tb = (b - p0).dot(&d) / len_sq;
            let (from, to) = (ta.min(tb).max(0.0), ta.max(tb).min(1.0));
            if (to - from) * length > ASSUME_ZERO {
                spans.push((from, to));
            }
        }
    }
    spans
}

/// The parts of the segment `p0 → p1` inside `clip`, in segment order and
/// direction.
///
/// A segment encloses nothing, so it is widened into a ribbon on each side.
/// Each ribbon is intersected with the clip and only the boundary edges lying
/// back on the segment are kept. A segment running along the clip boundary
/// is recovered from the ribbon on the clip side only.
fn clip_segment(p0: &Point2, p1: &Point2, clip: &Area) -> Vec<(Point2, Point2)> {
    let d = p1 - p0;
    let length = d.norm();
    if length < ASSUME_ZERO {
        return Vec::new();
    }
    let Some(bounds) = Rect::from_points([p0, p1]) else {
        return Vec::new();
    };
    match coverage(clip, &bounds) {
        Coverage::Inside => return vec![(*p0, *p1)],
        Coverage::Outside => return Vec::new(),
        Coverage::Partial => {}
    }
    let n = normal(&d);
    let mut spans = ribbon_spans(p0, p1, &n, clip);
    spans.extend(ribbon_spans(p0, p1, &-n, clip));
    merge_spans(spans, ASSUME_ZERO / length)
        .into_iter()
        .map(|(from, to)| (point_on(p0, p1, from), point_on(p0, p1, to)))
        .collect()
}

/// Clips every edge of an open chain of points.
fn clip_chain(points: &[Point2], clip: &Area) -> Vec<(Point2, Point2)> {
    points
        .windows(2)
        .flat_map(|edge| clip_segment(&edge[0], &edge[1], clip))
        .collect()
}

/// Maximal runs of consecutive ring vertices lying on the circle, each edge
/// of a run included. A ring entirely on the circle is one closed run.
fn circle_runs(ring: &[Point2], center: &Point2, radius: f64, tolerance: f64) -> Vec<Vec<Point2>> {
    let n = ring.len();
    if n < 2 {
        return Vec::new();
    }
    let on_circle = |p: &Point2| ((p - center).norm() - radius).abs() <= tolerance;
    let on_arc: Vec<bool> = (0..n)
        .map(|i| {
            let (a, b) = (&ring[i], &ring[(i + 1) % n]);
            on_circle(a) && on_circle(b) && on_circle(&Point2::from((a.coords + b.coords) * 0.5))
        })
        .collect();

    let Some(first_break) = on_arc.iter().position(|on| !on) else {
        let mut run = ring.to_vec();
        run.push(ring[0]);
        return vec![run];
    };
    let mut runs = Vec::new();
    let mut run: Vec<Point2> = Vec::new();
    for k in 1..=n {
        let i = (first_break + k) % n;
        if on_arc[i] {
            if run.is_empty() {
                run.push(ring[i]);
            }
            run.push(ring[(i + 1) % n]);
        } else if !run.is_empty() {
            runs.push(std::mem::take(&mut run));
        }
    }
    runs
}

/// Start angle and signed sweep of a run of points on a circle.
fn run_angles(run: &[Point2], center: &Point2) -> Option<(f64, f64)> {
    let first = run.first()?;
    let extent: f64 = run
        .windows(2)
        .map(|w| ieee_remainder(screen_angle_deg(center, &w[1]) - screen_angle_deg(center, &w[0]), 360.0))
        .sum();
    Some((screen_angle_deg(center, first), extent))
}

/// Collects clipped pieces into one path, joining pieces that meet.
#[derive(Debug, Default)]
struct ClipOutput {
    path: Path,
    last: Option<Point2>,
}

impl ClipOutput {
    fn joins(&self, p: &Point2, may_connect: bool) -> bool {
        may_connect && self.last.is_some_and(|last| (last - p).norm() < ASSUME_ZERO)
    }

    fn push_lines(&mut self, pieces: &[(Point2, Point2)], connected: bool) {
        for (i, (a, b)) in pieces.iter().enumerate() {
            if !self.joins(a, connected || i > 0) {
                self.path.move_to(*a);
            }
            self.path.line_to(*b);
            self.last = Some(*b);
        }
    }

    fn push_arcs(&mut self, pieces: &[Arc], connected: bool) {
        for (i, arc) in pieces.iter().enumerate() {
            let skip = usize::from(self.joins(&arc.start_point(), connected || i > 0));
            self.path.append_segments(arc.segments().into_iter().skip(skip), false);
            self.last = Some(arc.end_point());
        }
    }

    fn into_shape(self) -> Option<Shape> {
        if self.path.is_empty() {
            debug!("clip left nothing of the shape");
            None
        } else {
            Some(Shape::Path(self.path))
        }
    }
}

/// A shape that can be clipped against an [`Area`], outline only or as a
/// region.
#[derive(Debug, Clone)]
pub struct ClippableShape {
    shape: Shape,
    params: ClipParams,
}

impl ClippableShape {
    /// Wraps `shape` with the default flatness.
    #[must_use]
    pub fn new(shape: Shape) -> Self {
        Self::with_params(shape, ClipParams::default())
    }

    /// Wraps `shape` with explicit clip parameters.
    #[must_use]
    pub fn with_params(shape: Shape, params: ClipParams) -> Self {
        Self { shape, params }
    }

    /// Returns the shape being clipped.
    #[must_use]
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Returns the clip parameters.
    #[must_use]
    pub fn params(&self) -> ClipParams {
        self.params
    }

    /// Returns the shape, consuming the wrapper.
    #[must_use]
    pub fn into_shape(self) -> Shape {
        self.shape
    }

    /// The part of the outline inside `clip`.
    ///
    /// Areas intersect as regions. Any other shape keeps its outline only:
    /// it is decomposed into lines, polylines, polygons and arcs, each piece
    /// is cut against the clip with its direction kept, and the surviving
    /// pieces are chained into a path. Returns the shape itself when the clip
    /// holds its bounds, and `None` when nothing survives.
    #[must_use]
    pub fn intersect(&self, clip: &Area) -> Option<Shape> {
        if let Shape::Area(area) = &self.shape {
            let mut region = area.clone();
            region.intersect(clip);
            return (!region.is_empty()).then_some(Shape::Area(region));
        }
        let bounds = self.shape.bounds()?;
        match coverage(clip, &bounds) {
            Coverage::Inside => {
                debug!("clip holds the shape bounds");
                return Some(self.shape.clone());
            }
            Coverage::Outside => {
                debug!("clip misses the shape bounds");
                return None;
            }
            Coverage::Partial => {}
        }

        let outline = Shape::Path(unclosed_path(&self.shape, true));
        let mut normalizer = ShapeNormalizer::default();
        let mut output = ClipOutput::default();
        for piece in normalizer.convert_connected_path(&outline, &AffineTransform::identity()) {
            let connected = piece.is_connected();
            match piece.shape() {
                Shape::Line(line) => output.push_lines(&clip_segment(&line.p1, &line.p2, clip), connected),
                Shape::Polyline(polyline) => output.push_lines(&clip_chain(polyline.points(), clip), connected),
                Shape::Polygon(polygon) => {
                    let mut points = polygon.points().to_vec();
                    if let Some(first) = points.first().copied() {
                        points.push(first);
                    }
                    output.push_lines(&clip_chain(&points, clip), connected);
                }
                Shape::Arc(arc) => output.push_arcs(&self.clip_arc(arc, clip), connected),
                Shape::Rectangle(_)
                | Shape::RoundRectangle(_)
                | Shape::Ellipse(_)
                | Shape::Path(_)
                | Shape::Area(_) => trace!(shape = ?piece.shape(), "primitive skipped by the clip"),
            }
        }
        output.into_shape()
    }

    /// The part of the region enclosed by the shape inside `clip`.
    ///
    /// A single line encloses nothing and is clipped as a segment instead,
    /// keeping its direction. A result made of one ring without holes comes
    /// back as a [`Polygon`], anything richer as an [`Area`].
    #[must_use]
    pub fn intersect_as_area(&self, clip: &Area) -> Option<Shape> {
        if let Shape::Line(line) = &self.shape {
            let pieces = clip_segment(&line.p1, &line.p2, clip);
            return match pieces.as_slice() {
                [] => {
                    debug!("clip misses the line");
                    None
                }
                [(a, b)] => Some(Shape::Line(Line::new(*a, *b))),
                _ => {
                    let mut output = ClipOutput::default();
                    output.push_lines(&pieces, false);
                    output.into_shape()
                }
            };
        }

        let mut region = match &self.shape {
            Shape::Area(area) => area.clone(),
            other => Area::from_shape(other, self.params.flatness),
        };
        let bounds = region.bounds()?;
        match coverage(clip, &bounds) {
            Coverage::Inside => return Some(self.shape.clone()),
            Coverage::Outside => {
                debug!("clip misses the shape region");
                return None;
            }
            Coverage::Partial => {}
        }
        region.intersect(clip);
        if region.is_empty() {
            debug!("clip left nothing of the shape region");
            return None;
        }
        match <[Vec<Point2>; 1]>::try_from(region.rings()) {
            Ok([ring]) => Some(Shape::Polygon(Polygon::from_points(ring))),
            Err(_) => Some(Shape::Area(region)),
        }
    }

    /// Pieces of `arc` inside `clip`, in sweep order, each sweeping the same
    /// way as `arc`.
    fn clip_arc(&self, arc: &Arc, clip: &Area) -> Vec<Arc> {
        match coverage(clip, &arc.bounds()) {
            Coverage::Inside => return vec![*arc],
            Coverage::Outside => return Vec::new(),
            Coverage::Partial => {}
        }
        let sweep = arc.extent().abs().min(360.0);
        if sweep < ANGLE_EPSILON || arc.radius() < ASSUME_ZERO {
            return Vec::new();
        }
        let full_turn = sweep >= FULL_TURN;
        let sweep = if full_turn { 360.0 } else { sweep };
        let direction = arc.extent().signum();

        let outline = if full_turn {
            Shape::Ellipse(Ellipse::circle(arc.center(), arc.radius()))
        } else {
            Shape::Arc(arc.with_arc_type(ArcType::Pie))
        };
        let mut region = Area::from_shape(&outline, self.params.flatness);
        region.intersect(clip);

        // Chords of the sampled outline stray from the circle by at most the
        // flatness.
        let tolerance = 1.5 * self.params.flatness + ASSUME_ZERO;
        let mut spans = Vec::new();
        for ring in region.rings() {
            for run in circle_runs(&ring, &arc.center(), arc.radius(), tolerance) {
                let Some((mut start, mut extent)) = run_angles(&run, &arc.center()) else {
                    continue;
                };
                if extent * direction < 0.0 {
                    start += extent;
                    extent = -extent;
                }
                // Offsets are measured from the arc start along its sweep.
                let offset = ((start - arc.start()) * direction).rem_euclid(360.0);
                let length = extent.abs();
                if full_turn {
                    if offset + length > 360.0 {
                        spans.push((offset, 360.0));
                        spans.push((0.0, offset + length - 360.0));
                    } else {
                        spans.push((offset, offset + length));
                    }
                } else {
                    let offset = if offset > sweep + (360.0 - sweep) / 2.0 {
                        offset - 360.0
                    } else {
                        offset
                    };
                    let (from, to) = (offset.max(0.0), (offset + length).min(sweep));
                    if to > from {
                        spans.push((from, to));
                    }
                }
            }
        }

        let pieces: Vec<Arc> = merge_spans(spans, ANGLE_EPSILON)
            .into_iter()
            .filter(|(from, to)| to - from > ANGLE_EPSILON)
            .map(|(from, to)| {
                let start = ieee_remainder(arc.start() + direction * from, 360.0);
                Arc::from_parts(arc.center(), arc.radius(), start, direction * (to - from), ArcType::Open)
            })
            .collect();
        trace!(pieces = pieces.len(), start = arc.start(), extent = arc.extent(), "arc clipped");
        pieces
    }
}
