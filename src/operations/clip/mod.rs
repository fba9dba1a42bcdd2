mod clippable_shape;

pub use clippable_shape::{unclosed_path, ClipParams, ClippableShape};
