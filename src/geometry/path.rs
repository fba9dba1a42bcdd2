use super::{Rect, Shape};
use crate::math::affine::AffineTransform;
use crate::math::bezier::{cubic, flatten_cubic_into, flatten_quad_into, quad};
use crate::math::Point2;

/// One step of a path description.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathSegment {
    MoveTo(Point2),
    LineTo(Point2),
    /// Control point, end point.
    QuadTo(Point2, Point2),
    /// First control point, second control point, end point.
    CubicTo(Point2, Point2, Point2),
    /// Straight back to the start of the current sub-path.
    Close,
}

impl PathSegment {
    /// The point this segment ends on, `None` for [`PathSegment::Close`].
    #[must_use]
    pub fn end_point(&self) -> Option<Point2> {
        match *self {
            Self::MoveTo(p) | Self::LineTo(p) | Self::QuadTo(_, p) | Self::CubicTo(_, _, p) => Some(p),
            Self::Close => None,
        }
    }

    #[must_use]
    pub fn transformed(&self, transform: &AffineTransform) -> Self {
        let t = |p: &Point2| transform.transform_point(p);
        match self {
            Self::MoveTo(p) => Self::MoveTo(t(p)),
            Self::LineTo(p) => Self::LineTo(t(p)),
            Self::QuadTo(c, p) => Self::QuadTo(t(c), t(p)),
            Self::CubicTo(c1, c2, p) => Self::CubicTo(t(c1), t(c2), t(p)),
            Self::Close => Self::Close,
        }
    }

    fn control_points(&self) -> impl Iterator<Item = Point2> {
        let (buf, n) = match *self {
            Self::MoveTo(p) | Self::LineTo(p) => ([p, p, p], 1),
            Self::QuadTo(c, p) => ([c, p, p], 2),
            Self::CubicTo(c1, c2, p) => ([c1, c2, p], 3),
            Self::Close => ([Point2::origin(); 3], 0),
        };
        buf.into_iter().take(n)
    }
}

/// A general path built from [`PathSegment`]s.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Path {
    segments: Vec<PathSegment>,
}

impl Path {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_segments(segments: Vec<PathSegment>) -> Self {
        Self { segments }
    }

    pub fn push(&mut self, segment: PathSegment) {
        self.segments.push(segment);
    }

    pub fn move_to(&mut self, p: Point2) {
        self.push(PathSegment::MoveTo(p));
    }

    pub fn line_to(&mut self, p: Point2) {
        self.push(PathSegment::LineTo(p));
    }

    pub fn quad_to(&mut self, ctrl: Point2, p: Point2) {
        self.push(PathSegment::QuadTo(ctrl, p));
    }

    pub fn cubic_to(&mut self, ctrl1: Point2, ctrl2: Point2, p: Point2) {
        self.push(PathSegment::CubicTo(ctrl1, ctrl2, p));
    }

    pub fn close(&mut self) {
        self.push(PathSegment::Close);
    }

    /// Appends the outline of `shape`.
    ///
    /// With `connect`, the shape's opening move becomes a line from the
    /// current point, or disappears if it lands exactly on it.
    pub fn append(&mut self, shape: &Shape, connect: bool) {
        self.append_segments(shape.segments(), connect);
    }

    /// Appends raw segments, with the same `connect` rule as [`Path::append`].
    pub fn append_segments(&mut self, segments: impl IntoIterator<Item = PathSegment>, connect: bool) {
        let mut connect = connect;
        for segment in segments {
            if let (true, PathSegment::MoveTo(p)) = (connect, segment) {
                match self.segments.last() {
                    Some(PathSegment::Close) => self.line_to(p),
                    Some(last) if last.end_point() == Some(p) => {}
                    Some(_) => self.line_to(p),
                    None => self.move_to(p),
                }
            } else {
                self.push(segment);
            }
            connect = false;
        }
    }

    /// Returns the segments in order.
    #[must_use]
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Where the path starts, the target of its first move.
    #[must_use]
    pub fn start_point(&self) -> Option<Point2> {
        self.segments.first().and_then(PathSegment::end_point)
    }

    /// Where the pen rests after the last segment.
    #[must_use]
    pub fn current_point(&self) -> Option<Point2> {
        let mut subpath_start = None;
        let mut current = None;
        for segment in &self.segments {
            match segment {
                PathSegment::MoveTo(p) => {
                    subpath_start = Some(*p);
                    current = Some(*p);
                }
                PathSegment::Close => current = subpath_start,
                other => current = other.end_point(),
            }
        }
        current
    }

    /// Bounds of every end and control point.
    #[must_use]
    pub fn bounds(&self) -> Option<Rect> {
        let points: Vec<Point2> = self.segments.iter().flat_map(PathSegment::control_points).collect();
        Rect::from_points(&points)
    }

    /// The same path with every curve replaced by chords deviating at most
    /// `flatness` from it.
    #[must_use]
    pub fn flattened(&self, flatness: f64) -> Self {
        let mut out = Vec::with_capacity(self.segments.len());
        let mut current = Point2::origin();
        let mut subpath_start = current;
        let mut chords = Vec::new();
        for segment in &self.segments {
            match *segment {
                PathSegment::MoveTo(p) => {
                    subpath_start = p;
                    current = p;
                    out.push(*segment);
                }
                PathSegment::LineTo(p) => {
                    current = p;
                    out.push(*segment);
                }
                PathSegment::QuadTo(c, p) => {
                    chords.clear();
                    flatten_quad_into(&quad(current, c, p), flatness, &mut chords);
                    out.extend(chords.iter().map(|q| PathSegment::LineTo(*q)));
                    current = p;
                }
                PathSegment::CubicTo(c1, c2, p) => {
                    chords.clear();
                    flatten_cubic_into(&cubic(current, c1, c2, p), flatness, &mut chords);
                    out.extend(chords.iter().map(|q| PathSegment::LineTo(*q)));
                    current = p;
                }
                PathSegment::Close => {
                    current = subpath_start;
                    out.push(*segment);
                }
            }
        }
        Self::from_segments(out)
    }

    /// Point chains of each sub-path. Curves contribute their end points only,
    /// so flatten first when the curves matter.
    #[must_use]
    pub fn subpaths(&self) -> Vec<Vec<Point2>> {
        let mut chains = Vec::new();
        let mut chain: Vec<Point2> = Vec::new();
        let mut subpath_start = None;
        for segment in &self.segments {
            match segment {
                PathSegment::MoveTo(p) => {
                    if !chain.is_empty() {
                        chains.push(std::mem::take(&mut chain));
                    }
                    subpath_start = Some(*p);
                    chain.push(*p);
                }
                PathSegment::Close => {
                    if !chain.is_empty() {
                        chains.push(std::mem::take(&mut chain));
                    }
                }
                other => {
                    if chain.is_empty() {
                        chain.extend(subpath_start);
                    }
                    chain.extend(other.end_point());
                }
            }
        }
        if !chain.is_empty() {
            chains.push(chain);
        }
        chains
    }

    #[must_use]
    pub fn transformed(&self, transform: &AffineTransform) -> Self {
        if transform.is_identity() {
            return self.clone();
        }
        Self::from_segments(self.segments.iter().map(|s| s.transformed(transform)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Line;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    #[test]
    fn current_point_returns_to_subpath_start_on_close() {
        let mut path = Path::new();
        path.move_to(p(1.0, 1.0));
        path.line_to(p(5.0, 1.0));
        path.line_to(p(5.0, 5.0));
        assert_eq!(path.current_point(), Some(p(5.0, 5.0)));
        path.close();
        assert_eq!(path.current_point(), Some(p(1.0, 1.0)));
    }

    #[test]
    fn connected_append_turns_move_into_line() {
        let mut path = Path::new();
        path.append(&Shape::Line(Line::new(p(0.0, 0.0), p(10.0, 0.0))), false);
        path.append(&Shape::Line(Line::new(p(10.0, 5.0), p(20.0, 5.0))), true);
        assert_eq!(
            path.segments(),
            &[
                PathSegment::MoveTo(p(0.0, 0.0)),
                PathSegment::LineTo(p(10.0, 0.0)),
                PathSegment::LineTo(p(10.0, 5.0)),
                PathSegment::LineTo(p(20.0, 5.0)),
            ]
        );
    }

    #[test]
    fn connected_append_skips_move_onto_current_point() {
        let mut path = Path::new();
        path.append(&Shape::Line(Line::new(p(0.0, 0.0), p(10.0, 0.0))), false);
        path.append(&Shape::Line(Line::new(p(10.0, 0.0), p(20.0, 5.0))), true);
        assert_eq!(path.segments().len(), 3);
    }

    #[test]
    fn unconnected_append_keeps_move() {
        let mut path = Path::new();
        path.append(&Shape::Line(Line::new(p(0.0, 0.0), p(10.0, 0.0))), false);
        path.append(&Shape::Line(Line::new(p(10.0, 0.0), p(20.0, 5.0))), false);
        assert!(matches!(path.segments()[2], PathSegment::MoveTo(_)));
    }

    #[test]
    fn bounds_include_control_points() {
        let mut path = Path::new();
        path.move_to(p(0.0, 0.0));
        path.quad_to(p(5.0, -10.0), p(10.0, 0.0));
        let b = path.bounds().unwrap_or(Rect::new(0.0, 0.0, 0.0, 0.0));
        assert!((b.y + 10.0).abs() < 1e-12);
        assert!(Path::new().bounds().is_none());
    }

    #[test]
    fn transform_maps_every_point() {
        let mut path = Path::new();
        path.move_to(p(0.0, 0.0));
        path.cubic_to(p(1.0, 0.0), p(2.0, 0.0), p(3.0, 0.0));
        path.close();
        let moved = path.transformed(&AffineTransform::translation(1.0, 2.0));
        assert_eq!(moved.segments()[1], PathSegment::CubicTo(p(2.0, 2.0), p(3.0, 2.0), p(4.0, 2.0)));
        assert_eq!(moved.segments()[2], PathSegment::Close);
    }

    #[test]
    fn flattening_replaces_curves_with_lines() {
        let mut path = Path::new();
        path.move_to(p(0.0, 0.0));
        path.cubic_to(p(0.0, 10.0), p(10.0, 10.0), p(10.0, 0.0));
        path.close();
        let flat = path.flattened(0.01);
        assert!(flat.segments().len() > 4);
        assert!(flat
            .segments()
            .iter()
            .all(|s| !matches!(s, PathSegment::CubicTo(..) | PathSegment::QuadTo(..))));
        assert_eq!(flat.current_point(), Some(p(0.0, 0.0)));
    }

    #[test]
    fn subpaths_split_on_move_and_close() {
        let mut path = Path::new();
        path.move_to(p(0.0, 0.0));
        path.line_to(p(1.0, 0.0));
        path.line_to(p(1.0, 1.0));
        path.close();
        path.line_to(p(-1.0, 0.0));
        path.move_to(p(5.0, 5.0));
        path.line_to(p(6.0, 5.0));
        let chains = path.subpaths();
        assert_eq!(chains.len(), 3);
        assert_eq!(chains[0].len(), 3);
        assert_eq!(chains[1], vec![p(0.0, 0.0), p(-1.0, 0.0)]);
        assert_eq!(chains[2].len(), 2);
    }
}
