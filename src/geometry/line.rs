use super::Rect;
use crate::math::affine::AffineTransform;
use crate::math::{Point2, Vector2};

/// A straight segment from `p1` to `p2`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    pub p1: Point2,
    pub p2: Point2,
}

impl Line {
    #[must_use]
    pub fn new(p1: Point2, p2: Point2) -> Self {
        Self { p1, p2 }
    }

    /// Returns the vector from the first point to the second.
    #[must_use]
    pub fn direction(&self) -> Vector2 {
        self.p2 - self.p1
    }

    /// Returns the distance between the end points.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.direction().norm()
    }

    /// Returns the line running the other way.
    #[must_use]
    pub fn reversed(&self) -> Self {
        Self::new(self.p2, self.p1)
    }

    /// Returns the box spanned by the end points.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        Rect::from_corners(&self.p1, &self.p2)
    }

    #[must_use]
    pub fn transformed(&self, transform: &AffineTransform) -> Self {
        Self::new(transform.transform_point(&self.p1), transform.transform_point(&self.p2))
    }
}
