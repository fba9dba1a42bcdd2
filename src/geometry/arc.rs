use super::{PathSegment, Rect};
use crate::error::{ConstructionError, Result};
use crate::math::affine::AffineTransform;
use crate::math::arc_2d::{arc_point, arc_to_cubics, screen_angle_deg};
use crate::math::bezier::from_lyon;
use crate::math::Point2;

/// How an arc's outline is closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArcType {
    /// Just the curve.
    #[default]
    Open,
    /// The curve plus the straight chord between its ends.
    Chord,
    /// The curve plus two radii, a pie slice.
    Pie,
}

/// A circular arc.
///
/// `start` and `extent` are degrees; positive extents turn counter-clockwise
/// on a Y-down screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arc {
    center: Point2,
    radius: f64,
    start: f64,
    extent: f64,
    arc_type: ArcType,
}

impl Arc {
    /// Creates a new arc.
    ///
    /// # Errors
    ///
    /// Returns `ConstructionError::InvalidParameter` if the radius is negative
    /// or any value is not finite.
    pub fn new(center: Point2, radius: f64, start: f64, extent: f64, arc_type: ArcType) -> Result<Self> {
        if !radius.is_finite() || radius < 0.0 {
            return Err(ConstructionError::InvalidParameter {
                parameter: "radius",
                value: radius,
                reason: "must be finite and non-negative",
            }
            .into());
        }
        for (parameter, value) in [("start", start), ("extent", extent), ("center.x", center.x), ("center.y", center.y)] {
            if !value.is_finite() {
                return Err(ConstructionError::InvalidParameter {
                    parameter,
                    value,
                    reason: "must be finite",
                }
                .into());
            }
        }
        Ok(Self::from_parts(center, radius, start, extent, arc_type))
    }

    /// Creates an arc inscribed in a square frame.
    ///
    /// # Errors
    ///
    /// Returns `ConstructionError::InvalidParameter` if the frame is not
    /// square, since only circular arcs are represented.
    pub fn from_frame(frame: &Rect, start: f64, extent: f64, arc_type: ArcType) -> Result<Self> {
        if (frame.width - frame.height).abs() > 1e-9 * frame.width.abs().max(1.0) {
            return Err(ConstructionError::InvalidParameter {
                parameter: "frame.height",
                value: frame.height,
                reason: "arc frames must be square",
            }
            .into());
        }
        Self::new(frame.center(), frame.width * 0.5, start, extent, arc_type)
    }

    pub(crate) fn from_parts(center: Point2, radius: f64, start: f64, extent: f64, arc_type: ArcType) -> Self {
        Self {
            center,
            radius,
            start,
            extent,
            arc_type,
        }
    }

    /// Returns the center of the arc.
    #[must_use]
    pub fn center(&self) -> Point2 {
        self.center
    }

    /// Returns the radius of the arc.
    #[must_use]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Start angle in degrees.
    #[must_use]
    pub fn start(&self) -> f64 {
        self.start
    }

    /// Signed angular extent in degrees.
    #[must_use]
    pub fn extent(&self) -> f64 {
        self.extent
    }

    /// Returns how the arc is closed.
    #[must_use]
    pub fn arc_type(&self) -> ArcType {
        self.arc_type
    }

    /// Returns the same arc closed as `arc_type`.
    #[must_use]
    pub fn with_arc_type(&self, arc_type: ArcType) -> Self {
        Self { arc_type, ..*self }
    }

    /// The square enclosing the full circle.
    #[must_use]
    pub fn frame(&self) -> Rect {
        Rect::new(
            self.center.x - self.radius,
            self.center.y - self.radius,
            2.0 * self.radius,
            2.0 * self.radius,
        )
    }

    /// Returns the point at the start angle.
    #[must_use]
    pub fn start_point(&self) -> Point2 {
        arc_point(&self.center, self.radius, self.start)
    }

    /// Returns the point at the end of the sweep.
    #[must_use]
    pub fn end_point(&self) -> Point2 {
        arc_point(&self.center, self.radius, self.start + self.extent)
    }

    /// True if the screen angle `angle` (degrees) lies on the swept range.
    #[must_use]
    pub fn contains_angle(&self, angle: f64) -> bool {
        if self.extent.abs() >= 360.0 {
            return true;
        }
        if self.extent >= 0.0 {
            (angle - self.start).rem_euclid(360.0) <= self.extent
        } else {
            (self.start - angle).rem_euclid(360.0) <= -self.extent
        }
    }

    /// Tight bounds of the outline, including the center for pie slices.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        let mut points = vec![self.start_point(), self.end_point()];
        for quadrant in [0.0, 90.0, 180.0, 270.0] {
            if self.contains_angle(quadrant) {
                points.push(arc_point(&self.center, self.radius, quadrant));
            }
        }
        if self.arc_type == ArcType::Pie {
            points.push(self.center);
        }
        Rect::from_points(&points).unwrap_or_else(|| self.frame())
    }

    /// Maps the arc through a transform whose linear part is a uniform scale,
    /// possibly mirrored. A mirror reverses the sweep.
    #[must_use]
    pub(crate) fn transformed_uniform(&self, transform: &AffineTransform) -> Self {
        let det = transform.determinant();
        let center = transform.transform_point(&self.center);
        let start_point = transform.transform_point(&self.start_point());
        let start = screen_angle_deg(&center, &start_point);
        let extent = if det < 0.0 { -self.extent } else { self.extent };
        Self::from_parts(center, self.radius * det.abs().sqrt(), start, extent, self.arc_type)
    }

    /// Path description: cubic pieces of at most a quarter turn, then the
    /// closing edges for chord and pie arcs.
    #[must_use]
    pub fn segments(&self) -> Vec<PathSegment> {
        let mut segments = vec![PathSegment::MoveTo(self.start_point())];
        segments.extend(
            arc_to_cubics(&self.center, self.radius, self.start, self.extent)
                .into_iter()
                .map(|piece| PathSegment::CubicTo(from_lyon(piece.ctrl1), from_lyon(piece.ctrl2), from_lyon(piece.to))),
        );
        match self.arc_type {
            ArcType::Open => {}
            ArcType::Chord => segments.push(PathSegment::Close),
            ArcType::Pie => {
                segments.push(PathSegment::LineTo(self.center));
                segments.push(PathSegment::Close);
            }
        }
        segments
    }
}
