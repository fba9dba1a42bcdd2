use super::TransformClass;
use crate::geometry::{Ellipse, Polygon, Rect, RoundRectangle, Shape};
use crate::math::affine::AffineTransform;

/// Width/height and arc size differences under which two sizes are equal.
const ASSUME_ZERO: f64 = 0.001;

/// Maps a shape through an affine transform, keeping its kind when the
/// transform allows it.
///
/// Lines, polylines and polygons always keep their kind. Rectangles stay
/// rectangles under quarter turns and become polygons otherwise; squares are
/// no exception, so a square turned by 45° comes out as a polygon. Round
/// rectangles with equal corner sizes stay round rectangles under quarter
/// turns. Ellipses stay ellipses under quarter turns, and circles under any
/// uniform scale. Arcs stay arcs under uniform scales. Everything else comes
/// out as a general path.
pub struct TransformShape<'a> {
    shape: &'a Shape,
    transform: AffineTransform,
}

impl<'a> TransformShape<'a> {
    /// Creates a new `TransformShape` operation.
    #[must_use]
    pub fn new(shape: &'a Shape, transform: AffineTransform) -> Self {
        Self { shape, transform }
    }

    /// True if [`TransformShape::execute`] yields a single line, polyline,
    /// polygon, rectangle, round rectangle, ellipse or arc rather than a path.
    ///
    /// Nothing is transformed.
    #[must_use]
    pub fn keeps_simple_shape(&self) -> bool {
        let class = TransformClass::of(&self.transform);
        match self.shape {
            Shape::Line(_) | Shape::Polyline(_) | Shape::Polygon(_) | Shape::Rectangle(_) => true,
            Shape::RoundRectangle(r) => keeps_round_rectangle(r, class),
            Shape::Ellipse(e) => keeps_ellipse(e, class),
            Shape::Arc(_) => class.uniform_scale,
            Shape::Path(_) | Shape::Area(_) => false,
        }
    }

    /// Executes the transformation.
    #[must_use]
    pub fn execute(&self) -> Shape {
        let t = &self.transform;
        let class = TransformClass::of(t);
        match self.shape {
            Shape::Line(l) => Shape::Line(l.transformed(t)),
            Shape::Polyline(p) => Shape::Polyline(p.transformed(t)),
            Shape::Polygon(p) => Shape::Polygon(p.transformed(t)),
            Shape::Rectangle(r) => transform_rectangle(r, t, class),
            Shape::RoundRectangle(r) if keeps_round_rectangle(r, class) => {
                let frame = r.frame().transformed_bounds(t);
                let corner = Rect::new(0.0, 0.0, r.arc_width(), r.arc_height()).transformed_bounds(t);
                Shape::RoundRectangle(RoundRectangle::new(
                    frame.x,
                    frame.y,
                    frame.width,
                    frame.height,
                    corner.width,
                    corner.height,
                ))
            }
            Shape::Ellipse(e) if class.quadrant_rotation => {
                Shape::Ellipse(Ellipse::from_frame(e.frame().transformed_bounds(t)))
            }
            Shape::Ellipse(e) if keeps_ellipse(e, class) => {
                let radius = e.frame().width * 0.5 * t.determinant().abs().sqrt();
                Shape::Ellipse(Ellipse::circle(t.transform_point(&e.center()), radius))
            }
            Shape::Arc(a) if class.uniform_scale => Shape::Arc(a.transformed_uniform(t)),
            Shape::Area(a) => Shape::Area(a.transformed(t)),
            Shape::RoundRectangle(_) | Shape::Ellipse(_) | Shape::Arc(_) | Shape::Path(_) => {
                Shape::Path(self.shape.transformed_path(t))
            }
        }
    }
}

fn keeps_round_rectangle(r: &RoundRectangle, class: TransformClass) -> bool {
    class.quadrant_rotation && (r.arc_width() - r.arc_height()).abs() <= ASSUME_ZERO
}

fn keeps_ellipse(e: &Ellipse, class: TransformClass) -> bool {
    class.quadrant_rotation || (e.is_circle() && class.uniform_scale)
}

fn transform_rectangle(r: &Rect, t: &AffineTransform, class: TransformClass) -> Shape {
    if class.quadrant_rotation {
        Shape::Rectangle(r.transformed_bounds(t))
    } else {
        Shape::Polygon(Polygon::from_rect(r).transformed(t))
    }
}

/// True if `shape` maps through `transform` into a single simple shape.
///
/// Answers the decision [`create_transformed_shape`] takes, without
/// transforming anything.
#[must_use]
pub fn simple_shape_as_transform(shape: &Shape, transform: &AffineTransform) -> bool {
    TransformShape::new(shape, *transform).keeps_simple_shape()
}

/// Maps `shape` through `transform`, keeping its kind where possible.
#[must_use]
pub fn create_transformed_shape(shape: &Shape, transform: &AffineTransform) -> Shape {
    TransformShape::new(shape, *transform).execute()
}
