pub mod builders;
pub mod polygon;

pub use builders::{circle, ellipse, mouth, pie, quadrilateral, rectangle, star, triangle};
pub use polygon::Polygon;
