/// Shoelace area, bounding boxes and other polygon-level algorithms
pub mod polygon;
pub mod primitives;

#[doc(inline)]
pub use polygon::{bounding_box, calculate_area, calculate_signed_area, is_collinear};
