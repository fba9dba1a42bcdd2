use super::{Arc, Area, Ellipse, Line, Path, PathSegment, Polygon, Polyline, Rect, RoundRectangle};
use crate::math::affine::AffineTransform;
use crate::math::Point2;

/// Every kind of shape the kernel handles.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Line(Line),
    Polyline(Polyline),
    Polygon(Polygon),
    Rectangle(Rect),
    RoundRectangle(RoundRectangle),
    Ellipse(Ellipse),
    Arc(Arc),
    Path(Path),
    Area(Area),
}

impl Shape {
    /// The outline as a path description.
    #[must_use]
    pub fn segments(&self) -> Vec<PathSegment> {
        match self {
            Self::Line(l) => vec![PathSegment::MoveTo(l.p1), PathSegment::LineTo(l.p2)],
            Self::Polyline(p) => p.segments(),
            Self::Polygon(p) => p.segments(),
            Self::Rectangle(r) => Polygon::from_rect(r).segments(),
            Self::RoundRectangle(r) => r.segments(),
            Self::Ellipse(e) => e.segments(),
            Self::Arc(a) => a.segments(),
            Self::Path(p) => p.segments().to_vec(),
            Self::Area(a) => a.segments(),
        }
    }

    /// Axis-aligned bounds, `None` for shapes with no points.
    #[must_use]
    pub fn bounds(&self) -> Option<Rect> {
        match self {
            Self::Line(l) => Some(l.bounds()),
            Self::Polyline(p) => p.bounds(),
            Self::Polygon(p) => p.bounds(),
            Self::Rectangle(r) => Some(*r),
            Self::RoundRectangle(r) => Some(r.frame()),
            Self::Ellipse(e) => Some(e.frame()),
            Self::Arc(a) => Some(a.bounds()),
            Self::Path(p) => p.bounds(),
            Self::Area(a) => a.bounds(),
        }
    }

    /// First point of the outline.
    #[must_use]
    pub fn start_point(&self) -> Option<Point2> {
        match self {
            Self::Line(l) => Some(l.p1),
            Self::Polyline(p) => p.points().first().copied(),
            Self::Polygon(p) => p.points().first().copied(),
            Self::Rectangle(r) => Some(Point2::new(r.x, r.y)),
            Self::RoundRectangle(r) => Some(r.start_point()),
            Self::Ellipse(e) => Some(e.start_point()),
            Self::Arc(a) => Some(a.start_point()),
            Self::Path(p) => p.start_point(),
            Self::Area(a) => a.segments().first().and_then(PathSegment::end_point),
        }
    }

    /// Where the outline ends. Closed outlines end where they start.
    #[must_use]
    pub fn end_point(&self) -> Option<Point2> {
        match self {
            Self::Line(l) => Some(l.p2),
            Self::Polyline(p) => p.points().last().copied(),
            Self::Arc(a) => Some(a.end_point()),
            Self::Path(p) => p.current_point(),
            Self::Polygon(_)
            | Self::Rectangle(_)
            | Self::RoundRectangle(_)
            | Self::Ellipse(_) => self.start_point(),
            Self::Area(a) => Path::from_segments(a.segments()).current_point(),
        }
    }

    /// True for region shapes, whose clipping is a plain boolean intersection.
    #[must_use]
    pub fn is_area(&self) -> bool {
        matches!(self, Self::Area(_))
    }

    /// The outline mapped point by point, as a general path.
    #[must_use]
    pub fn transformed_path(&self, transform: &AffineTransform) -> Path {
        Path::from_segments(self.segments().iter().map(|s| s.transformed(transform)).collect())
    }
}

impl From<Line> for Shape {
    fn from(value: Line) -> Self {
        Self::Line(value)
    }
}

impl From<Polyline> for Shape {
    fn from(value: Polyline) -> Self {
        Self::Polyline(value)
    }
}

impl From<Polygon> for Shape {
    fn from(value: Polygon) -> Self {
        Self::Polygon(value)
    }
}

impl From<Rect> for Shape {
    fn from(value: Rect) -> Self {
        Self::Rectangle(value)
    }
}

impl From<RoundRectangle> for Shape {
    fn from(value: RoundRectangle) -> Self {
        Self::RoundRectangle(value)
    }
}

impl From<Ellipse> for Shape {
    fn from(value: Ellipse) -> Self {
        Self::Ellipse(value)
    }
}

impl From<Arc> for Shape {
    fn from(value: Arc) -> Self {
        Self::Arc(value)
    }
}

impl From<Path> for Shape {
    fn from(value: Path) -> Self {
        Self::Path(value)
    }
}

impl From<Area> for Shape {
    fn from(value: Area) -> Self {
        Self::Area(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::ArcType;

    #[test]
    fn rectangle_outline_is_closed() {
        let shape = Shape::from(Rect::new(0.0, 0.0, 4.0, 2.0));
        let segs = shape.segments();
        assert_eq!(segs.len(), 5);
        assert_eq!(segs[4], PathSegment::Close);
        assert_eq!(shape.end_point(), shape.start_point());
    }

    #[test]
    fn arc_endpoints() {
        let arc = Arc::new(Point2::new(0.0, 0.0), 2.0, 0.0, 90.0, ArcType::Open)
            .unwrap_or_else(|e| panic!("{e}"));
        let shape = Shape::from(arc);
        let end = shape.end_point().unwrap_or_else(|| panic!("no end"));
        assert!((end.x).abs() < 1e-12 && (end.y + 2.0).abs() < 1e-12);
    }

    #[test]
    fn empty_shapes_have_no_bounds() {
        assert!(Shape::from(Polygon::new()).bounds().is_none());
        assert!(Shape::from(Path::new()).start_point().is_none());
    }
}
