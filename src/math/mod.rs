//! Geometry kernel: small value-type vectors.

pub mod vec2;
pub mod vec3;

pub use vec2::{Vec2, Vec2f, Vec2i};
pub use vec3::{Vec3, Vec3f, Vec3i};
