use crate::math::affine::AffineTransform;

/// What an affine transform does to shapes, as far as keeping their kind goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransformClass {
    /// Same scale factor in every direction, mirrors included.
    pub uniform_scale: bool,
    /// Axis-aligned boxes stay axis-aligned (turns by multiples of 90°).
    pub quadrant_rotation: bool,
}

impl TransformClass {
    #[must_use]
    pub fn of(transform: &AffineTransform) -> Self {
        Self {
            uniform_scale: transform.is_uniform_scale(),
            quadrant_rotation: transform.is_quadrant_rotation(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification() {
        let c = TransformClass::of(&AffineTransform::translation(5.0, -3.0));
        assert!(c.uniform_scale && c.quadrant_rotation);

        let c = TransformClass::of(&AffineTransform::scale(2.0, 1.0));
        assert!(!c.uniform_scale && c.quadrant_rotation);

        let c = TransformClass::of(&AffineTransform::rotation(35_f64.to_radians()));
        assert!(c.uniform_scale && !c.quadrant_rotation);

        let c = TransformClass::of(&AffineTransform::rotation(std::f64::consts::FRAC_PI_2));
        assert!(c.uniform_scale && c.quadrant_rotation);

        let shear = AffineTransform::from_coefficients(1.0, 0.0, 0.5, 1.0, 0.0, 0.0);
        let c = TransformClass::of(&shear);
        assert!(!c.uniform_scale && !c.quadrant_rotation);
    }
}
