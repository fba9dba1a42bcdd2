use thiserror::Error;

/// Top-level error type for the planar geometry kernel.
#[derive(Debug, Error)]
pub enum PlanarError {
    #[error(transparent)]
    Construction(#[from] ConstructionError),

    #[error(transparent)]
    Geometry(#[from] GeometryError),
}

/// Errors raised while building a shape or a parameter set.
#[derive(Debug, Error)]
pub enum ConstructionError {
    #[error("point count {npoints} exceeds the coordinate arrays (x: {x_len}, y: {y_len})")]
    PointCountMismatch {
        npoints: usize,
        x_len: usize,
        y_len: usize,
    },

    #[error("invalid parameter {parameter} = {value}: {reason}")]
    InvalidParameter {
        parameter: &'static str,
        value: f64,
        reason: &'static str,
    },
}

impl ConstructionError {
    /// Accepts a flattening tolerance only if it is positive and finite.
    pub(crate) fn check_flatness(flatness: f64) -> Result<f64> {
        if flatness > 0.0 && flatness.is_finite() {
            Ok(flatness)
        } else {
            Err(Self::InvalidParameter {
                parameter: "flatness",
                value: flatness,
                reason: "must be positive and finite",
            }
            .into())
        }
    }
}

/// Errors related to geometric computations.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("zero-length vector")]
    ZeroVector,
}

/// Convenience type alias for results using [`PlanarError`].
pub type Result<T> = std::result::Result<T, PlanarError>;
