use std::f64::consts::PI;

use crate::geometry::{Arc, Ellipse, Shape};
use crate::math::polygon_2d::perimeter_2d;
use crate::operations::normalize::ShapeNormalizer;

/// Computes the length of a shape's outline.
///
/// Lines, polylines, polygons, rectangles, arcs and ellipses are measured in
/// closed form. Other shapes are decomposed into those primitives first, with
/// curves fitted to arcs where they can be.
pub struct ShapeLength<'a> {
    shape: &'a Shape,
}

impl<'a> ShapeLength<'a> {
    #[must_use]
    pub fn new(shape: &'a Shape) -> Self {
        Self { shape }
    }

    /// Executes the query, returning the outline length.
    #[must_use]
    pub fn execute(&self) -> f64 {
        match self.shape {
            Shape::Line(line) => line.length(),
            Shape::Polyline(polyline) => perimeter_2d(polyline.points(), false),
            Shape::Polygon(polygon) => perimeter_2d(polygon.points(), true),
            Shape::Rectangle(rect) => 2.0 * (rect.width + rect.height),
            Shape::Arc(arc) => arc_length(arc),
            Shape::Ellipse(ellipse) => ellipse_length(ellipse),
            other => {
                let pieces = ShapeNormalizer::default().convert_segments(&other.segments());
                pieces.iter().map(|piece| ShapeLength::new(piece.shape()).execute()).sum()
            }
        }
    }
}

/// Length of the curved part only, closing edges excluded.
fn arc_length(arc: &Arc) -> f64 {
    arc.radius() * arc.extent().abs().min(360.0).to_radians()
}

/// Ramanujan-style estimate, exact for circles.
fn ellipse_length(ellipse: &Ellipse) -> f64 {
    let frame = ellipse.frame();
    let (a, b) = (frame.width / 2.0, frame.height / 2.0);
    PI * (2.0 * (a * a + b * b) - (a - b) * (a - b) / 2.0).sqrt()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::{ArcType, Line, Path, Polygon, Polyline, Rect, RoundRectangle};
    use crate::math::Point2;
    use approx::assert_abs_diff_eq;

    fn length(shape: &Shape) -> f64 {
        ShapeLength::new(shape).execute()
    }

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    #[test]
    fn straight_shapes() {
        assert_abs_diff_eq!(length(&Shape::Line(Line::new(p(0.0, 0.0), p(3.0, 4.0)))), 5.0);

        let chain = vec![p(0.0, 0.0), p(3.0, 0.0), p(3.0, 4.0)];
        assert_abs_diff_eq!(length(&Shape::Polyline(Polyline::from_points(chain.clone()))), 7.0);
        assert_abs_diff_eq!(length(&Shape::Polygon(Polygon::from_points(chain))), 12.0);
        assert_abs_diff_eq!(length(&Shape::Rectangle(Rect::new(5.0, 5.0, 2.0, 3.0))), 10.0);
    }

    #[test]
    fn curved_shapes() {
        let arc = Arc::new(p(0.0, 0.0), 2.0, 45.0, -90.0, ArcType::Pie).unwrap();
        assert_abs_diff_eq!(length(&Shape::Arc(arc)), PI, epsilon = 1e-12);

        let circle = Ellipse::circle(p(10.0, 10.0), 3.0);
        assert_abs_diff_eq!(length(&Shape::Ellipse(circle)), 6.0 * PI, epsilon = 1e-12);
    }

    #[test]
    fn round_rectangle_through_its_decomposition() {
        let round = Shape::RoundRectangle(RoundRectangle::new(0.0, 0.0, 20.0, 10.0, 4.0, 4.0));
        // straight parts 2 * (16 + 6), corners one circle of radius 2
        let expected = 44.0 + 4.0 * PI;
        assert_abs_diff_eq!(length(&round), expected, epsilon = 1e-3);
    }

    #[test]
    fn path_with_a_half_circle() {
        let mut path = Path::new();
        path.move_to(p(0.0, 0.0));
        path.line_to(p(10.0, 0.0));
        path.append(&Shape::Arc(Arc::new(p(10.0, 5.0), 5.0, 90.0, -180.0, ArcType::Open).unwrap()), true);
        assert_abs_diff_eq!(length(&Shape::Path(path)), 10.0 + 5.0 * PI, epsilon = 1e-3);
    }
}
