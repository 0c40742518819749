//! Geometry primitives shared across the easel workspace.

pub mod bounds;
pub mod transform;

pub use bounds::Bounds;
pub use transform::{inverse_scale, rotate};
