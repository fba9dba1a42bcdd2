use super::points::PointBuffer;
use super::{Area, PathSegment, Polyline, Rect};
use crate::error::Result;
use crate::math::affine::AffineTransform;
use crate::math::intersect_2d::segment_segment_intersect_2d;
use crate::math::polygon_2d::contains_point_2d;
use crate::math::Point2;

/// A closed polygon. The edge from the last point back to the first is implicit.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Polygon {
    buffer: PointBuffer,
}

impl Polygon {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_points(points: Vec<Point2>) -> Self {
        Self {
            buffer: PointBuffer::from_points(points),
        }
    }

    /// Builds a polygon from the first `npoints` entries of two coordinate arrays.
    ///
    /// # Errors
    ///
    /// Returns `ConstructionError::PointCountMismatch` if either array holds
    /// fewer than `npoints` values.
    pub fn from_coordinates(xs: &[f64], ys: &[f64], npoints: usize) -> Result<Self> {
        Ok(Self {
            buffer: PointBuffer::from_coordinates(xs, ys, npoints)?,
        })
    }

    /// The four corners of `rect`, in path order.
    #[must_use]
    pub fn from_rect(rect: &Rect) -> Self {
        Self::from_points(rect.corners().to_vec())
    }

    pub fn add_point(&mut self, p: Point2) {
        self.buffer.push(p);
    }

    pub fn reset(&mut self) {
        self.buffer.clear();
    }

    /// Returns the vertices in order.
    #[must_use]
    pub fn points(&self) -> &[Point2] {
        self.buffer.points()
    }

    /// Returns the number of vertices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points().is_empty()
    }

    /// Returns the cached bounds, or `None` without vertices.
    #[must_use]
    pub fn bounds(&self) -> Option<Rect> {
        self.buffer.bounds()
    }

    /// Even-odd containment. A polygon with fewer than three points contains nothing.
    #[must_use]
    pub fn contains(&self, p: &Point2) -> bool {
        match self.bounds() {
            Some(b) if b.contains_point(p) => contains_point_2d(self.points(), p),
            _ => false,
        }
    }

    /// True if the outline or the interior touches `rect`.
    #[must_use]
    pub fn intersects_rect(&self, rect: &Rect) -> bool {
        let Some(bounds) = self.bounds() else {
            return false;
        };
        if bounds.max_x() < rect.min_x()
            || bounds.min_x() > rect.max_x()
            || bounds.max_y() < rect.min_y()
            || bounds.min_y() > rect.max_y()
        {
            return false;
        }
        let pts = self.points();
        if pts.iter().any(|p| rect.contains_point(p)) {
            return true;
        }
        let corners = rect.corners();
        if corners.iter().any(|c| self.contains(c)) {
            return true;
        }
        (0..pts.len()).any(|i| {
            let (a, b) = (&pts[i], &pts[(i + 1) % pts.len()]);
            (0..4).any(|k| segment_segment_intersect_2d(a, b, &corners[k], &corners[(k + 1) % 4]).is_some())
        })
    }

    /// True if `rect` lies entirely inside the polygon.
    #[must_use]
    pub fn contains_rect(&self, rect: &Rect) -> bool {
        if self.len() < 3 {
            return false;
        }
        Area::from_points(self.points()).contains_rect(rect)
    }

    /// The open form of this polygon, ending back on its first point.
    #[must_use]
    pub fn to_polyline(&self) -> Polyline {
        let mut points = self.points().to_vec();
        if let Some(&first) = points.first() {
            points.push(first);
        }
        Polyline::from_points(points)
    }

    #[must_use]
    pub fn transformed(&self, transform: &AffineTransform) -> Self {
        Self {
            buffer: self.buffer.transformed(transform),
        }
    }

    /// Path description: move to the first point, line through the rest, close.
    #[must_use]
    pub fn segments(&self) -> Vec<PathSegment> {
        let pts = self.points();
        let Some((first, rest)) = pts.split_first() else {
            return Vec::new();
        };
        let mut segments = Vec::with_capacity(pts.len() + 1);
        segments.push(PathSegment::MoveTo(*first));
        segments.extend(rest.iter().map(|p| PathSegment::LineTo(*p)));
        segments.push(PathSegment::Close);
        segments
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn square() -> Polygon {
        Polygon::from_coordinates(&[0.0, 10.0, 10.0, 0.0], &[0.0, 0.0, 10.0, 10.0], 4).unwrap()
    }

    #[test]
    fn bounds_track_points() {
        let mut p = square();
        let b = p.bounds().unwrap();
        assert_abs_diff_eq!(b.width, 10.0);
        p.add_point(Point2::new(-5.0, 20.0));
        let b = p.bounds().unwrap();
        assert_abs_diff_eq!(b.x, -5.0);
        assert_abs_diff_eq!(b.max_y(), 20.0);
        p.reset();
        assert!(p.bounds().is_none());
    }

    #[test]
    fn mismatched_count_is_rejected() {
        assert!(Polygon::from_coordinates(&[0.0, 1.0], &[0.0, 1.0], 3).is_err());
    }

    #[test]
    fn contains_points() {
        let p = square();
        assert!(p.contains(&Point2::new(5.0, 5.0)));
        assert!(!p.contains(&Point2::new(15.0, 5.0)));
        let degenerate = Polygon::from_points(vec![Point2::new(0.0, 0.0), Point2::new(1.0, 1.0)]);
        assert!(!degenerate.contains(&Point2::new(0.5, 0.5)));
    }

    #[test]
    fn intersects_rectangles() {
        let p = square();
        assert!(p.intersects_rect(&Rect::new(5.0, 5.0, 10.0, 10.0)));
        assert!(p.intersects_rect(&Rect::new(2.0, 2.0, 1.0, 1.0)));
        assert!(p.intersects_rect(&Rect::new(-5.0, -5.0, 30.0, 30.0)));
        assert!(!p.intersects_rect(&Rect::new(20.0, 20.0, 5.0, 5.0)));
        // Crossing band with no vertex inside either shape.
        assert!(p.intersects_rect(&Rect::new(-5.0, 4.0, 30.0, 2.0)));
    }

    #[test]
    fn contains_rectangles() {
        let p = square();
        assert!(p.contains_rect(&Rect::new(2.0, 2.0, 3.0, 3.0)));
        assert!(!p.contains_rect(&Rect::new(5.0, 5.0, 10.0, 10.0)));
    }

    #[test]
    fn to_polyline_closes_the_chain() {
        let line = square().to_polyline();
        assert_eq!(line.len(), 5);
        assert_eq!(line.points()[0], line.points()[4]);
    }

    #[test]
    fn segments_close_the_path() {
        let segs = square().segments();
        assert_eq!(segs.len(), 5);
        assert!(matches!(segs[0], PathSegment::MoveTo(_)));
        assert_eq!(segs[4], PathSegment::Close);
        assert!(Polygon::new().segments().is_empty());
    }
}
