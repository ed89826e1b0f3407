//! Orthographic model-to-screen mapping.
//!
//! Models are expected in normalized coordinates, `[-1, 1]` on every axis.
//! X and Y are stretched over the image; Z is passed through untouched so it
//! can be compared in the depth buffer (greater is closer).

use crate::config::RenderConfig;
use crate::math::{Vec2i, Vec3f};

/// Maps a model-space point to screen space, rounding x and y to the nearest
/// pixel.
///
/// `(-1, -1, z)` lands on `(0, 0, z)` and `(1, 1, z)` on `(width, height, z)`.
pub fn world_to_screen(v: Vec3f, config: &RenderConfig) -> Vec3f {
    let half_w = config.width as f32 / 2.0;
    let half_h = config.height as f32 / 2.0;
    Vec3f::new(
        ((v.x + 1.0) * half_w).round(),
        ((v.y + 1.0) * half_h).round(),
        v.z,
    )
}

/// Maps a model-space point to integer pixel coordinates, truncating toward
/// zero. Used by the wireframe and flat-fill passes.
pub fn world_to_pixel(v: Vec3f, config: &RenderConfig) -> Vec2i {
    let half_w = config.width as f32 / 2.0;
    let half_h = config.height as f32 / 2.0;
    Vec2i::new(
        ((v.x + 1.0) * half_w) as i32,
        ((v.y + 1.0) * half_h) as i32,
    )
}
