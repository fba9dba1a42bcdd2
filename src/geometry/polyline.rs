use super::points::PointBuffer;
use super::{Line, PathSegment, Polygon, Rect};
use crate::error::Result;
use crate::math::affine::AffineTransform;
use crate::math::Point2;

/// Distance under which a polyline's last point is taken as its first.
const CLOSING_DISTANCE: f64 = 0.001;

/// An open chain of points. It encloses nothing, so containment is always false.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Polyline {
    buffer: PointBuffer,
}

impl Polyline {
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

    /// Builds a polyline from the first `npoints` entries of two coordinate arrays.
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

    #[must_use]
    pub fn from_line(line: &Line) -> Self {
        Self::from_points(vec![line.p1, line.p2])
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

    #[must_use]
    pub fn contains(&self, _p: &Point2) -> bool {
        false
    }

    #[must_use]
    pub fn contains_rect(&self, _rect: &Rect) -> bool {
        false
    }

    /// The closed form of this chain. A last point within 0.001 of the first
    /// is dropped, since the polygon closes on its own.
    #[must_use]
    pub fn to_polygon(&self) -> Polygon {
        let pts = self.points();
        let end = match (pts.first(), pts.last()) {
            (Some(first), Some(last)) if pts.len() > 1 && (last - first).norm() < CLOSING_DISTANCE => {
                pts.len() - 1
            }
            _ => pts.len(),
        };
        Polygon::from_points(pts[..end].to_vec())
    }

    #[must_use]
    pub fn transformed(&self, transform: &AffineTransform) -> Self {
        Self {
            buffer: self.buffer.transformed(transform),
        }
    }

    #[must_use]
    pub fn segments(&self) -> Vec<PathSegment> {
        let pts = self.points();
        let Some((first, rest)) = pts.split_first() else {
            return Vec::new();
        };
        let mut segments = Vec::with_capacity(pts.len());
        segments.push(PathSegment::MoveTo(*first));
        segments.extend(rest.iter().map(|p| PathSegment::LineTo(*p)));
        segments
    }
}
