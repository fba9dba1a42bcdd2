use std::f64::consts::PI;

use crate::error::{ConstructionError, Result};
use crate::geometry::{Arc, ArcType, Area, Shape};
use crate::math::polygon_2d::signed_area_2d;

/// Computes the surface enclosed by a shape.
///
/// Ellipses, arcs, rectangles and polygons are measured exactly. Anything
/// else is flattened into an [`Area`] first, so the result depends on the
/// flatness.
pub struct ShapeArea<'a> {
    shape: &'a Shape,
    flatness: f64,
}

impl<'a> ShapeArea<'a> {
    #[must_use]
    pub fn new(shape: &'a Shape, flatness: f64) -> Self {
        Self { shape, flatness }
    }

    /// Executes the query, returning the enclosed surface.
    ///
    /// # Errors
    ///
    /// Returns `ConstructionError::InvalidParameter` if the flatness is not a
    /// positive number.
    pub fn execute(&self) -> Result<f64> {
        let flatness = ConstructionError::check_flatness(self.flatness)?;
        let surface = match self.shape {
            Shape::Line(_) | Shape::Polyline(_) => 0.0,
            Shape::Polygon(polygon) => signed_area_2d(polygon.points()).abs(),
            Shape::Rectangle(rect) => rect.width * rect.height,
            Shape::Ellipse(ellipse) => {
                let frame = ellipse.frame();
                PI * frame.width * frame.height / 4.0
            }
            Shape::Arc(arc) => arc_surface(arc),
            Shape::Area(area) => area.surface(),
            other => Area::from_shape(other, flatness).surface(),
        };
        Ok(surface)
    }
}

/// A pie encloses its sector; chord and open arcs enclose the segment cut
/// off by the chord.
fn arc_surface(arc: &Arc) -> f64 {
    let theta = arc.extent().abs().min(360.0).to_radians();
    let r_sq = arc.radius() * arc.radius();
    match arc.arc_type() {
        ArcType::Pie => r_sq * theta / 2.0,
        ArcType::Chord | ArcType::Open => r_sq * (theta - theta.sin()) / 2.0,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::{Ellipse, Line, Path, Polygon, Rect, RoundRectangle};
    use crate::math::Point2;
    use approx::assert_abs_diff_eq;

    fn surface(shape: &Shape) -> f64 {
        ShapeArea::new(shape, 0.01).execute().unwrap()
    }

    #[test]
    fn closed_forms() {
        assert_abs_diff_eq!(surface(&Shape::Rectangle(Rect::new(1.0, 2.0, 4.0, 5.0))), 20.0);
        assert_abs_diff_eq!(surface(&Shape::Ellipse(Ellipse::new(0.0, 0.0, 4.0, 2.0))), 2.0 * PI);

        let triangle = Polygon::from_points(vec![
            Point2::new(0.0, 0.0),
            Point2::new(4.0, 0.0),
            Point2::new(0.0, 3.0),
        ]);
        assert_abs_diff_eq!(surface(&Shape::Polygon(triangle)), 6.0);

        let line = Line::new(Point2::new(0.0, 0.0), Point2::new(5.0, 5.0));
        assert_abs_diff_eq!(surface(&Shape::Line(line)), 0.0);
    }

    #[test]
    fn arcs_by_closure() {
        let center = Point2::new(0.0, 0.0);
        let pie = Arc::new(center, 2.0, 0.0, 90.0, ArcType::Pie).unwrap();
        assert_abs_diff_eq!(surface(&Shape::Arc(pie)), PI, epsilon = 1e-12);

        let chord = Arc::new(center, 2.0, 0.0, -180.0, ArcType::Chord).unwrap();
        assert_abs_diff_eq!(surface(&Shape::Arc(chord)), 2.0 * PI, epsilon = 1e-12);

        let quarter = Arc::new(center, 2.0, 0.0, 90.0, ArcType::Open).unwrap();
        assert_abs_diff_eq!(surface(&Shape::Arc(quarter)), PI - 2.0, epsilon = 1e-12);
    }

    #[test]
    fn other_shapes_through_their_area() {
        let round = Shape::RoundRectangle(RoundRectangle::new(0.0, 0.0, 20.0, 10.0, 4.0, 4.0));
        // four quarter-circle corners of radius 2 are cut away
        let expected = 200.0 - (4.0 - PI) * 4.0;
        assert_abs_diff_eq!(surface(&round), expected, epsilon = 0.05);

        let mut path = Path::new();
        path.move_to(Point2::new(0.0, 0.0));
        path.line_to(Point2::new(10.0, 0.0));
        path.line_to(Point2::new(10.0, 10.0));
        path.close();
        assert_abs_diff_eq!(surface(&Shape::Path(path)), 50.0, epsilon = 1e-9);
    }

    #[test]
    fn flatness_must_be_positive() {
        let shape = Shape::Rectangle(Rect::new(0.0, 0.0, 1.0, 1.0));
        assert!(ShapeArea::new(&shape, 0.0).execute().is_err());
        assert!(ShapeArea::new(&shape, -1.0).execute().is_err());
    }
}
