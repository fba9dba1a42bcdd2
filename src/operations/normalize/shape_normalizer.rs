use crate::error::{ConstructionError, Result};
use crate::geometry::{Line, PathSegment, Polygon, Polyline, Shape};
use crate::math::affine::AffineTransform;
use crate::math::bezier::{cubic, quad};
use crate::math::Point2;
use crate::operations::fitting::{ConverterState, CurveConverter};
use crate::operations::transform::{create_transformed_shape, simple_shape_as_transform};

/// Points closer than this are the same point.
pub const ASSUME_ZERO: f64 = 0.01;

/// How a [`ShapeNormalizer`] decomposes paths.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NormalizeOptions {
    /// Whole turns come out as circles rather than 360 degree arcs.
    pub allow_circles: bool,
    /// Curve end points are also kept in the straight outline, which is
    /// then always closed, so that the decomposition keeps the enclosed
    /// surface.
    pub surface_mode: bool,
}

/// A primitive together with whether it continues the previous one.
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectedShape {
    shape: Shape,
    connected: bool,
}

impl ConnectedShape {
    /// Returns the primitive.
    #[must_use]
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// True if the shape starts where the previous one ended.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.connected
    }

    /// Returns the primitive, dropping the tag.
    #[must_use]
    pub fn into_shape(self) -> Shape {
        self.shape
    }
}

/// Decomposes shapes into lines, polylines, polygons, arcs and circles.
///
/// Straight runs are collected into polylines (or polygons when closed),
/// curves go through a [`CurveConverter`] to become arcs. Simple shapes whose
/// kind survives the transform are passed through whole.
#[derive(Debug, Clone, Default)]
pub struct ShapeNormalizer {
    options: NormalizeOptions,
    converter: CurveConverter,
}

impl ShapeNormalizer {
    /// Creates a normalizer with the given options.
    #[must_use]
    pub fn new(options: NormalizeOptions) -> Self {
        Self {
            options,
            converter: CurveConverter::new(options.allow_circles),
        }
    }

    /// Returns the current options.
    #[must_use]
    pub fn options(&self) -> NormalizeOptions {
        self.options
    }

    /// Sets whether whole turns come out as circles.
    pub fn set_allow_circles(&mut self, allow_circles: bool) {
        self.options.allow_circles = allow_circles;
        self.converter.set_allow_circles(allow_circles);
    }

    /// Sets whether curve end points stay in the straight outline.
    pub fn set_surface_mode(&mut self, surface_mode: bool) {
        self.options.surface_mode = surface_mode;
    }

    /// Decomposes `shape` mapped through `transform`, tagging each primitive
    /// with its connectivity.
    pub fn convert_connected_path(&mut self, shape: &Shape, transform: &AffineTransform) -> Vec<ConnectedShape> {
        if simple_shape_as_transform(shape, transform) {
            tracing::trace!("simple shape transformed directly");
            return vec![ConnectedShape {
                shape: create_transformed_shape(shape, transform),
                connected: false,
            }];
        }
        self.convert_segments(shape.transformed_path(transform).segments())
    }

    /// Same as [`ShapeNormalizer::convert_connected_path`], without the tags.
    pub fn convert_path(&mut self, shape: &Shape, transform: &AffineTransform) -> Vec<Shape> {
        strip(self.convert_connected_path(shape, transform))
    }

    /// Decomposes `shape` with every curve first flattened to chords within
    /// `flatness`, so only straight primitives come out. Simple shapes still
    /// pass through whole.
    ///
    /// # Errors
    ///
    /// Returns `ConstructionError::InvalidParameter` if `flatness` is not a
    /// positive number.
    pub fn convert_path_flattened(
        &mut self,
        shape: &Shape,
        transform: &AffineTransform,
        flatness: f64,
    ) -> Result<Vec<Shape>> {
        ConstructionError::check_flatness(flatness)?;
        if simple_shape_as_transform(shape, transform) {
            return Ok(vec![create_transformed_shape(shape, transform)]);
        }
        let path = shape.transformed_path(transform).flattened(flatness);
        Ok(strip(self.convert_segments(path.segments())))
    }

    /// Decomposes a raw path description.
    pub fn convert_segments(&mut self, segments: &[PathSegment]) -> Vec<ConnectedShape> {
        self.converter.clear();
        let mut walk = PathWalk::new(self.options, &mut self.converter);
        for segment in segments {
            match *segment {
                PathSegment::MoveTo(p) => walk.move_to(p),
                PathSegment::LineTo(p) => walk.line_to(p),
                PathSegment::QuadTo(c, p) => walk.quad_to(c, p),
                PathSegment::CubicTo(c1, c2, p) => walk.cubic_to(c1, c2, p),
                PathSegment::Close => walk.close(),
            }
        }
        let shapes = walk.finish();
        tracing::debug!(segments = segments.len(), shapes = shapes.len(), "path decomposed");
        shapes
    }
}

fn strip(shapes: Vec<ConnectedShape>) -> Vec<Shape> {
    shapes.into_iter().map(ConnectedShape::into_shape).collect()
}

fn coincident(a: &Point2, b: &Point2) -> bool {
    (a - b).norm() <= ASSUME_ZERO
}

/// State of one decomposition.
struct PathWalk<'a> {
    options: NormalizeOptions,
    converter: &'a mut CurveConverter,
    current: Point2,
    subpath_start: Point2,
    /// Straight run not yet emitted.
    pending: Vec<Point2>,
    /// End of the last emitted shape, `None` after a move.
    last_end: Option<Point2>,
    out: Vec<ConnectedShape>,
}

impl<'a> PathWalk<'a> {
    fn new(options: NormalizeOptions, converter: &'a mut CurveConverter) -> Self {
        Self {
            options,
            converter,
            current: Point2::origin(),
            subpath_start: Point2::origin(),
            pending: Vec::new(),
            last_end: None,
            out: Vec::new(),
        }
    }

    fn move_to(&mut self, p: Point2) {
        self.flush_arcs();
        self.flush_pending(false);
        self.last_end = None;
        self.current = p;
        self.subpath_start = p;
    }

    fn line_to(&mut self, p: Point2) {
        // a vanishing line does not break an arc either
        if coincident(&p, &self.current) {
            return;
        }
        self.flush_arcs();
        if self.pending.is_empty() {
            self.pending.push(self.current);
        }
        self.pending.push(p);
        self.current = p;
    }

    fn quad_to(&mut self, ctrl: Point2, p: Point2) {
        if coincident(&ctrl, &self.current) && coincident(&p, &self.current) {
            return;
        }
        self.before_curve();
        self.converter.add_quad(&quad(self.current, ctrl, p));
        self.after_curve(p);
    }

    fn cubic_to(&mut self, ctrl1: Point2, ctrl2: Point2, p: Point2) {
        if [ctrl1, ctrl2, p].iter().all(|q| coincident(q, &self.current)) {
            return;
        }
        self.before_curve();
        self.converter.add_cubic(&cubic(self.current, ctrl1, ctrl2, p));
        self.after_curve(p);
    }

    fn before_curve(&mut self) {
        if !self.options.surface_mode {
            self.flush_pending(false);
        }
    }

    fn after_curve(&mut self, end: Point2) {
        self.drain_converter();
        if self.options.surface_mode {
            if self.pending.is_empty() {
                self.pending.push(self.current);
            }
            self.pending.push(end);
        }
        self.current = end;
    }

    fn close(&mut self) {
        self.flush_arcs();
        if let (Some(first), Some(last)) = (self.pending.first().copied(), self.pending.last().copied()) {
            if coincident(&first, &self.subpath_start) {
                if self.pending.len() > 1 && coincident(&last, &first) {
                    self.pending.pop();
                }
                self.flush_pending(true);
            } else {
                if !coincident(&last, &self.subpath_start) {
                    self.pending.push(self.subpath_start);
                }
                self.flush_pending(false);
            }
        } else if !coincident(&self.current, &self.subpath_start) {
            self.emit(Shape::Line(Line::new(self.current, self.subpath_start)));
        }
        self.current = self.subpath_start;
    }

    fn finish(mut self) -> Vec<ConnectedShape> {
        self.flush_arcs();
        self.flush_pending(false);
        self.out
    }

    fn flush_arcs(&mut self) {
        if self.converter.state() == ConverterState::CurrentArc {
            self.converter.end_arc();
        }
        self.drain_converter();
    }

    fn drain_converter(&mut self) {
        for shape in self.converter.take_shapes() {
            self.emit(shape);
        }
    }

    /// Emits the straight run: nothing for a lone point, a line for two
    /// points, a polygon when closed (always in surface mode), a polyline
    /// otherwise.
    fn flush_pending(&mut self, closed: bool) {
        let points = std::mem::take(&mut self.pending);
        let shape = match points.len() {
            0 | 1 => return,
            2 => Shape::Line(Line::new(points[0], points[1])),
            _ if closed || self.options.surface_mode => Shape::Polygon(Polygon::from_points(points)),
            _ => Shape::Polyline(Polyline::from_points(points)),
        };
        self.emit(shape);
    }

    fn emit(&mut self, shape: Shape) {
        let connected = match (self.last_end, shape.start_point()) {
            (Some(end), Some(start)) => coincident(&end, &start),
            _ => false,
        };
        self.last_end = shape.end_point();
        self.out.push(ConnectedShape { shape, connected });
    }
}
