mod transform_class;
mod transform_shape;

pub use transform_class::TransformClass;
pub use transform_shape::{create_transformed_shape, simple_shape_as_transform, TransformShape};
