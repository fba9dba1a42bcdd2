mod shape_normalizer;

pub use shape_normalizer::{ConnectedShape, NormalizeOptions, ShapeNormalizer, ASSUME_ZERO};
