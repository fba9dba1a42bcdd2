mod arc;
mod area;
mod ellipse;
mod line;
mod path;
mod points;
mod polygon;
mod polyline;
mod rect;
mod round_rect;
mod shape;

pub use arc::{Arc, ArcType};
pub use area::Area;
pub use ellipse::Ellipse;
pub use line::Line;
pub use path::{Path, PathSegment};
pub use polygon::Polygon;
pub use polyline::Polyline;
pub use rect::Rect;
pub use round_rect::RoundRectangle;
pub use shape::Shape;
