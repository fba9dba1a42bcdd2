mod angle_segment;
mod curve_converter;

pub use angle_segment::AngleSegment;
pub use curve_converter::{ConverterState, CurveConverter};
