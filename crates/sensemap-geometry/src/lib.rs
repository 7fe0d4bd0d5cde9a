//! Floor-plan geometry for sensemap.
//!
//! All coordinates live in the floor-plan image's own coordinate space. The
//! pan/zoom projection from screen pixels happens outside this crate.

mod circle;
mod point;
mod polygon;
mod rect;

pub use circle::Circle;
pub use point::{Point, Vector};
pub use polygon::{polygon_contains, polygon_outline_distance, segment_distance, vertex_mean};
pub use rect::Rect;
