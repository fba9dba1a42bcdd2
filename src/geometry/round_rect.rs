use super::{PathSegment, Rect};
use crate::math::arc_2d::KAPPA;
use crate::math::Point2;

/// A rectangle with elliptic corners of size `arc_width` x `arc_height`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoundRectangle {
    frame: Rect,
    arc_width: f64,
    arc_height: f64,
}

impl RoundRectangle {
    #[must_use]
    pub fn new(x: f64, y: f64, width: f64, height: f64, arc_width: f64, arc_height: f64) -> Self {
        Self {
            frame: Rect::new(x, y, width, height),
            arc_width,
            arc_height,
        }
    }

    /// Returns the outer frame.
    #[must_use]
    pub fn frame(&self) -> Rect {
        self.frame
    }

    /// Returns the corner arc width.
    #[must_use]
    pub fn arc_width(&self) -> f64 {
        self.arc_width
    }

    /// Returns the corner arc height.
    #[must_use]
    pub fn arc_height(&self) -> f64 {
        self.arc_height
    }

    /// Corner radii actually drawn: half the arc size, capped by the frame.
    fn corner_radii(&self) -> (f64, f64) {
        let rx = self.arc_width.abs().min(self.frame.width.abs()) * 0.5;
        let ry = self.arc_height.abs().min(self.frame.height.abs()) * 0.5;
        (rx, ry)
    }

    /// Where the outline starts: on the left side, below the top-left corner.
    #[must_use]
    pub fn start_point(&self) -> Point2 {
        let (_, ry) = self.corner_radii();
        Point2::new(self.frame.x, self.frame.y + ry)
    }

    /// Left side downward, then counter-clockwise on screen: four sides and
    /// four cubic corners, closed.
    #[must_use]
    pub fn segments(&self) -> Vec<PathSegment> {
        let (x0, y0) = (self.frame.min_x(), self.frame.min_y());
        let (x1, y1) = (self.frame.max_x(), self.frame.max_y());
        let (rx, ry) = self.corner_radii();
        let (kx, ky) = (rx * (1.0 - KAPPA), ry * (1.0 - KAPPA));
        let p = Point2::new;
        vec![
            PathSegment::MoveTo(p(x0, y0 + ry)),
            PathSegment::LineTo(p(x0, y1 - ry)),
            PathSegment::CubicTo(p(x0, y1 - ky), p(x0 + kx, y1), p(x0 + rx, y1)),
            PathSegment::LineTo(p(x1 - rx, y1)),
            PathSegment::CubicTo(p(x1 - kx, y1), p(x1, y1 - ky), p(x1, y1 - ry)),
            PathSegment::LineTo(p(x1, y0 + ry)),
            PathSegment::CubicTo(p(x1, y0 + ky), p(x1 - kx, y0), p(x1 - rx, y0)),
            PathSegment::LineTo(p(x0 + rx, y0)),
            PathSegment::CubicTo(p(x0 + kx, y0), p(x0, y0 + ky), p(x0, y0 + ry)),
            PathSegment::Close,
        ]
    }
}
