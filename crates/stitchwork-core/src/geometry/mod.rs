//! Geometry helpers - room polygons and bounding boxes

pub mod aabb;
pub mod polygon;

pub use aabb::Aabb;
pub use polygon::{point_in_polygon, polygon_vertices};
