use super::{Matrix3, Point2, Vector2, TOLERANCE};

/// Tolerance used when classifying a transform.
const ASSUME_ZERO: f64 = 0.001;

/// A 2D affine transform.
///
/// Coefficients follow the usual graphics naming: `x' = m00·x + m01·y + m02`
/// and `y' = m10·x + m11·y + m12`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AffineTransform {
    matrix: Matrix3,
}

impl Default for AffineTransform {
    fn default() -> Self {
        Self::identity()
    }
}

impl AffineTransform {
    #[must_use]
    pub fn identity() -> Self {
        Self {
            matrix: Matrix3::identity(),
        }
    }

    /// Builds a transform from its six coefficients, given column by column:
    /// `m00, m10, m01, m11, m02, m12`.
    #[must_use]
    pub fn from_coefficients(m00: f64, m10: f64, m01: f64, m11: f64, m02: f64, m12: f64) -> Self {
        Self {
            matrix: Matrix3::new(m00, m01, m02, m10, m11, m12, 0.0, 0.0, 1.0),
        }
    }

    #[must_use]
    pub fn translation(tx: f64, ty: f64) -> Self {
        Self::from_coefficients(1.0, 0.0, 0.0, 1.0, tx, ty)
    }

    #[must_use]
    pub fn scale(sx: f64, sy: f64) -> Self {
        Self::from_coefficients(sx, 0.0, 0.0, sy, 0.0, 0.0)
    }

    /// Rotation by `theta` radians about the origin.
    ///
    /// Positive angles turn the X axis toward the Y axis, which reads
    /// clockwise on a Y-down screen.
    #[must_use]
    pub fn rotation(theta: f64) -> Self {
        let (sin, cos) = snapped_sin_cos(theta);
        Self::from_coefficients(cos, sin, -sin, cos, 0.0, 0.0)
    }

    /// Rotation by `theta` radians about `(x, y)`.
    #[must_use]
    pub fn rotation_about(theta: f64, x: f64, y: f64) -> Self {
        Self::translation(-x, -y)
            .then(&Self::rotation(theta))
            .then(&Self::translation(x, y))
    }

    /// The transform applying `self` first, then `next`.
    #[must_use]
    pub fn then(&self, next: &Self) -> Self {
        Self {
            matrix: next.matrix * self.matrix,
        }
    }

    #[must_use]
    pub fn m00(&self) -> f64 {
        self.matrix[(0, 0)]
    }

    #[must_use]
    pub fn m01(&self) -> f64 {
        self.matrix[(0, 1)]
    }

    #[must_use]
    pub fn m02(&self) -> f64 {
        self.matrix[(0, 2)]
    }

    #[must_use]
    pub fn m10(&self) -> f64 {
        self.matrix[(1, 0)]
    }

    #[must_use]
    pub fn m11(&self) -> f64 {
        self.matrix[(1, 1)]
    }

    #[must_use]
    pub fn m12(&self) -> f64 {
        self.matrix[(1, 2)]
    }

    #[must_use]
    pub fn transform_point(&self, p: &Point2) -> Point2 {
        self.matrix.transform_point(p)
    }

    /// Applies the linear part only.
    #[must_use]
    pub fn transform_vector(&self, v: &Vector2) -> Vector2 {
        self.matrix.transform_vector(v)
    }

    /// Determinant of the linear part. Negative for mirroring transforms.
    #[must_use]
    pub fn determinant(&self) -> f64 {
        self.m00() * self.m11() - self.m01() * self.m10()
    }

    #[must_use]
    pub fn is_identity(&self) -> bool {
        (self.matrix - Matrix3::identity()).abs().max() < TOLERANCE
    }

    /// True if the linear part scales every direction by the same amount:
    /// its columns are orthogonal and of equal length. Mirrors qualify.
    #[must_use]
    pub fn is_uniform_scale(&self) -> bool {
        let (a, b, c, d) = (self.m00(), self.m10(), self.m01(), self.m11());
        let len_x = a * a + b * b;
        let len_y = c * c + d * d;
        let scale = len_x.max(len_y);
        if scale < TOLERANCE {
            return false;
        }
        (a * c + b * d).abs() <= ASSUME_ZERO * scale && (len_x - len_y).abs() <= ASSUME_ZERO * scale
    }

    /// True if the linear part keeps axis-aligned boxes axis-aligned:
    /// a multiple of a quarter turn, possibly with axis scaling or mirroring.
    #[must_use]
    pub fn is_quadrant_rotation(&self) -> bool {
        let (a, b, c, d) = (self.m00(), self.m10(), self.m01(), self.m11());
        (b.abs() < ASSUME_ZERO && c.abs() < ASSUME_ZERO)
            || (a.abs() < ASSUME_ZERO && d.abs() < ASSUME_ZERO)
    }

    /// Rotation angle of the linear part, in radians.
    ///
    /// Angles closer to zero than 0.001 rad snap to 0. A transform with no
    /// diagonal is a quarter turn, signed by `m10`.
    #[must_use]
    pub fn rotation_angle(&self) -> f64 {
        let (m00, m01, m10, m11) = (self.m00(), self.m01(), self.m10(), self.m11());
        let norm = (m00 * m00 + m11 * m11).sqrt();
        if norm == 0.0 {
            return if m10 >= 0.0 {
                std::f64::consts::FRAC_PI_2
            } else {
                -std::f64::consts::FRAC_PI_2
            };
        }
        let theta = -(m01 / norm).atan2(m00 / norm);
        if theta.abs() < ASSUME_ZERO {
            0.0
        } else {
            theta
        }
    }
}

/// Sine and cosine with exact zeros at quarter turns.
fn snapped_sin_cos(theta: f64) -> (f64, f64) {
    let (sin, cos) = theta.sin_cos();
    let snap = |v: f64| if v.abs() < 1e-15 { 0.0 } else { v };
    (snap(sin), snap(cos))
}
