mod aabb;
mod color;
mod ray;
mod triangle;

pub use aabb::AABB;
pub use color::Rgb;
pub use ray::{intersect_aabb, Ray};
pub use triangle::{moller_trumbore_intersect, TriangleIntersection};
