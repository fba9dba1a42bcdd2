//! A 2D geometry kernel.
//!
//! Paths are decomposed into elementary primitives (lines, polylines,
//! polygons, circular arcs), Bezier runs are fitted back into arcs, shapes
//! keep their kind under affine transforms whenever the transform allows it,
//! and outline shapes can be clipped against boolean regions.
//!
//! Angles on arcs are degrees, counter-clockwise on a screen whose Y axis
//! points down.

pub mod error;
pub mod geometry;
pub mod math;
pub mod operations;

pub use error::{PlanarError, Result};
