use crate::math::affine::AffineTransform;
use crate::math::Point2;

/// An axis-aligned rectangle given by its top-left corner and size.
///
/// Doubles as bounding box and as the rectangle shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// The smallest rectangle holding both corners.
    #[must_use]
    pub fn from_corners(a: &Point2, b: &Point2) -> Self {
        let x = a.x.min(b.x);
        let y = a.y.min(b.y);
        Self::new(x, y, a.x.max(b.x) - x, a.y.max(b.y) - y)
    }

    /// Bounds of a point set, `None` when empty.
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Point2>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let (mut min, mut max) = (*first, *first);
        for p in iter {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
        }
        Some(Self::from_corners(&min, &max))
    }

    /// Returns the left edge.
    #[must_use]
    pub fn min_x(&self) -> f64 {
        self.x
    }

    /// Returns the top edge.
    #[must_use]
    pub fn min_y(&self) -> f64 {
        self.y
    }

    /// Returns the right edge.
    #[must_use]
    pub fn max_x(&self) -> f64 {
        self.x + self.width
    }

    /// Returns the bottom edge.
    #[must_use]
    pub fn max_y(&self) -> f64 {
        self.y + self.height
    }

    /// Returns the center point.
    #[must_use]
    pub fn center(&self) -> Point2 {
        Point2::new(self.x + self.width * 0.5, self.y + self.height * 0.5)
    }

    /// True when the rectangle encloses no area.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Corners in path order: top-left, top-right, bottom-right, bottom-left.
    #[must_use]
    pub fn corners(&self) -> [Point2; 4] {
        [
            Point2::new(self.min_x(), self.min_y()),
            Point2::new(self.max_x(), self.min_y()),
            Point2::new(self.max_x(), self.max_y()),
            Point2::new(self.min_x(), self.max_y()),
        ]
    }

    /// Inclusive point containment.
    #[must_use]
    pub fn contains_point(&self, p: &Point2) -> bool {
        p.x >= self.min_x() && p.x <= self.max_x() && p.y >= self.min_y() && p.y <= self.max_y()
    }

    /// True if the two rectangles share interior.
    #[must_use]
    pub fn intersects(&self, other: &Rect) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && other.max_x() > self.min_x()
            && other.min_x() < self.max_x()
            && other.max_y() > self.min_y()
            && other.min_y() < self.max_y()
    }

    #[must_use]
    pub fn union(&self, other: &Rect) -> Rect {
        let min = Point2::new(self.min_x().min(other.min_x()), self.min_y().min(other.min_y()));
        let max = Point2::new(self.max_x().max(other.max_x()), self.max_y().max(other.max_y()));
        Rect::from_corners(&min, &max)
    }

    /// Bounds of the four transformed corners.
    #[must_use]
    pub fn transformed_bounds(&self, transform: &AffineTransform) -> Rect {
        let corners = self.corners().map(|c| transform.transform_point(&c));
        Rect::from_corners(&corners[0], &corners[2]).union(&Rect::from_corners(&corners[1], &corners[3]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn bounds_of_points() {
        let pts = [Point2::new(3.0, -1.0), Point2::new(-2.0, 4.0), Point2::new(0.0, 0.0)];
        let r = Rect::from_points(&pts).unwrap_or(Rect::new(0.0, 0.0, 0.0, 0.0));
        assert_abs_diff_eq!(r.x, -2.0);
        assert_abs_diff_eq!(r.y, -1.0);
        assert_abs_diff_eq!(r.width, 5.0);
        assert_abs_diff_eq!(r.height, 5.0);
        assert!(Rect::from_points(&[] as &[Point2]).is_none());
    }

    #[test]
    fn intersects_needs_shared_interior() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(a.intersects(&Rect::new(5.0, 5.0, 10.0, 10.0)));
        assert!(!a.intersects(&Rect::new(10.0, 0.0, 5.0, 5.0)));
        assert!(!a.intersects(&Rect::new(2.0, 2.0, 0.0, 5.0)));
    }

    #[test]
    fn transformed_bounds_of_rotation() {
        let r = Rect::new(10.0, 40.0, 30.0, 150.0);
        let b = r.transformed_bounds(&AffineTransform::rotation(std::f64::consts::FRAC_PI_2));
        assert_abs_diff_eq!(b.x, -190.0, epsilon = 1e-9);
        assert_abs_diff_eq!(b.y, 10.0, epsilon = 1e-9);
        assert_abs_diff_eq!(b.width, 150.0, epsilon = 1e-9);
        assert_abs_diff_eq!(b.height, 30.0, epsilon = 1e-9);
    }

    #[test]
    fn containment_is_inclusive() {
        let r = Rect::new(0.0, 0.0, 1.0, 1.0);
        assert!(r.contains_point(&Point2::new(1.0, 0.5)));
        assert!(!r.contains_point(&Point2::new(1.1, 0.5)));
    }
}
