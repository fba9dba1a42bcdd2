use super::{PathSegment, Rect};
use crate::math::arc_2d::KAPPA;
use crate::math::Point2;

/// Width/height difference under which an ellipse is a circle.
const CIRCLE_TOLERANCE: f64 = 0.001;

/// An axis-aligned ellipse inscribed in its frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ellipse {
    frame: Rect,
}

impl Ellipse {
    #[must_use]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::from_frame(Rect::new(x, y, width, height))
    }

    #[must_use]
    pub fn from_frame(frame: Rect) -> Self {
        Self { frame }
    }

    #[must_use]
    pub fn circle(center: Point2, radius: f64) -> Self {
        Self::new(center.x - radius, center.y - radius, 2.0 * radius, 2.0 * radius)
    }

    /// Returns the bounding frame.
    #[must_use]
    pub fn frame(&self) -> Rect {
        self.frame
    }

    /// Returns the center of the frame.
    #[must_use]
    pub fn center(&self) -> Point2 {
        self.frame.center()
    }

    #[must_use]
    pub fn is_circle(&self) -> bool {
        (self.frame.width - self.frame.height).abs() <= CIRCLE_TOLERANCE
    }

    /// Where the outline starts: the middle of the right side.
    #[must_use]
    pub fn start_point(&self) -> Point2 {
        Point2::new(self.frame.max_x(), self.frame.y + self.frame.height * 0.5)
    }

    /// Four cubic quarters, right, bottom, left, top, then close.
    #[must_use]
    pub fn segments(&self) -> Vec<PathSegment> {
        let c = self.center();
        let rx = self.frame.width * 0.5;
        let ry = self.frame.height * 0.5;
        let (kx, ky) = (KAPPA * rx, KAPPA * ry);
        let p = |dx: f64, dy: f64| Point2::new(c.x + dx, c.y + dy);
        vec![
            PathSegment::MoveTo(p(rx, 0.0)),
            PathSegment::CubicTo(p(rx, ky), p(kx, ry), p(0.0, ry)),
            PathSegment::CubicTo(p(-kx, ry), p(-rx, ky), p(-rx, 0.0)),
            PathSegment::CubicTo(p(-rx, -ky), p(-kx, -ry), p(0.0, -ry)),
            PathSegment::CubicTo(p(kx, -ry), p(rx, -ky), p(rx, 0.0)),
            PathSegment::Close,
        ]
    }
}
