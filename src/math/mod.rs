pub mod bounds;

pub use bounds::{BoundingSphere, AABB};
