mod area;
mod length;

pub use area::ShapeArea;
pub use length::ShapeLength;
