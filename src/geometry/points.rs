use super::Rect;
use crate::error::{ConstructionError, Result};
use crate::math::affine::AffineTransform;
use crate::math::Point2;

/// Growable point storage with bounds kept in step with the points.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct PointBuffer {
    points: Vec<Point2>,
    bounds: Option<Rect>,
}

impl PointBuffer {
    pub(crate) fn from_points(points: Vec<Point2>) -> Self {
        let bounds = Rect::from_points(&points);
        Self { points, bounds }
    }

    /// Takes the first `npoints` coordinates of two parallel arrays.
    pub(crate) fn from_coordinates(xs: &[f64], ys: &[f64], npoints: usize) -> Result<Self> {
        if npoints > xs.len() || npoints > ys.len() {
            return Err(ConstructionError::PointCountMismatch {
                npoints,
                x_len: xs.len(),
                y_len: ys.len(),
            }
            .into());
        }
        let points = xs
            .iter()
            .zip(ys)
            .take(npoints)
            .map(|(&x, &y)| Point2::new(x, y))
            .collect();
        Ok(Self::from_points(points))
    }

    pub(crate) fn push(&mut self, p: Point2) {
        let point_bounds = Rect::new(p.x, p.y, 0.0, 0.0);
        self.bounds = Some(match self.bounds {
            Some(b) => b.union(&point_bounds),
            None => point_bounds,
        });
        self.points.push(p);
    }

    pub(crate) fn clear(&mut self) {
        self.points.clear();
        self.bounds = None;
    }

    pub(crate) fn points(&self) -> &[Point2] {
        &self.points
    }

    pub(crate) fn bounds(&self) -> Option<Rect> {
        self.bounds
    }

    pub(crate) fn transformed(&self, transform: &AffineTransform) -> Self {
        Self::from_points(self.points.iter().map(|p| transform.transform_point(p)).collect())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn bounds_follow_pushes() {
        let mut buf = PointBuffer::default();
        assert!(buf.bounds().is_none());
        buf.push(Point2::new(1.0, 1.0));
        buf.push(Point2::new(-3.0, 4.0));
        let b = buf.bounds().unwrap();
        assert_abs_diff_eq!(b.x, -3.0);
        assert_abs_diff_eq!(b.max_y(), 4.0);
        buf.clear();
        assert!(buf.bounds().is_none());
        assert!(buf.points().is_empty());
    }

    #[test]
    fn coordinates_longer_than_count_are_truncated() {
        let buf = PointBuffer::from_coordinates(&[0.0, 1.0, 2.0], &[0.0, 1.0, 2.0], 2).unwrap();
        assert_eq!(buf.points().len(), 2);
    }

    #[test]
    fn count_beyond_arrays_is_rejected() {
        let err = PointBuffer::from_coordinates(&[0.0, 1.0], &[0.0, 1.0, 2.0], 3).unwrap_err();
        assert!(err.to_string().contains("point count 3"), "{err}");
    }
}
