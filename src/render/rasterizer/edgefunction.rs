//! Bounding-box triangle rasterization with barycentric coverage.
//!
//! # Algorithm Overview
//!
//! 1. Compute the triangle's bounding box, clamped to the target
//! 2. For each pixel in the box, compute barycentric coordinates
//! 3. Skip the pixel if any coordinate is negative (outside the triangle)
//! 4. Interpolate depth from the vertices and write only if it is closer
//!
//! # Barycentric Coordinates
//!
//! For a triangle ABC and a point P, build the two vectors
//!
//! ```text
//! sx = (C.x - A.x, B.x - A.x, A.x - P.x)
//! sy = (C.y - A.y, B.y - A.y, A.y - P.y)
//! ```
//!
//! Their cross product `u` is orthogonal to both, so `(u.x/u.z, u.y/u.z, 1)`
//! solves `P = A + v*(B - A) + w*(C - A)` with `w = u.x/u.z`, `v = u.y/u.z`.
//! The weights are `(1 - v - w, v, w)`.
//!
//! `u.z` is twice the signed area of the triangle. When it is (nearly) zero the
//! triangle is degenerate and the coordinates are forced negative, so the same
//! inside test rejects every pixel.

use super::{Rasterizer, Triangle};
use crate::colors::Color;
use crate::math::Vec3f;
use crate::render::target::RenderTarget;

/// Triangles whose doubled screen area is at most this are treated as empty.
pub const DEGENERATE_EPSILON: f32 = 1e-2;

/// Barycentric weights of `p` with respect to triangle `abc`.
///
/// Returns `(-1, 1, 1)` for a degenerate triangle.
pub fn barycentric(a: Vec3f, b: Vec3f, c: Vec3f, p: Vec3f) -> Vec3f {
    let sx = Vec3f::new(c.x - a.x, b.x - a.x, a.x - p.x);
    let sy = Vec3f::new(c.y - a.y, b.y - a.y, a.y - p.y);
    let u = sx.cross(sy);
    if u.z.abs() > DEGENERATE_EPSILON {
        Vec3f::new(1.0 - (u.x + u.y) / u.z, u.y / u.z, u.x / u.z)
    } else {
        Vec3f::new(-1.0, 1.0, 1.0)
    }
}

/// Triangle rasterizer using bounding-box iteration and barycentric tests.
///
/// Every candidate pixel goes through [`RenderTarget::set_pixel_with_depth`],
/// so with a depth buffer attached the nearest surface wins regardless of
/// draw order.
pub struct EdgeFunctionRasterizer;

impl EdgeFunctionRasterizer {
    /// Creates a new edge function rasterizer instance.
    pub fn new() -> Self {
        EdgeFunctionRasterizer {}
    }
}

impl Default for EdgeFunctionRasterizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Rasterizer for EdgeFunctionRasterizer {
    fn fill_triangle(&self, triangle: &Triangle, target: &mut RenderTarget, color: Color) {
        let [v0, v1, v2] = triangle.points;

        // Bounding box, clipped to the target
        let clamp_x = target.width() as f32 - 1.0;
        let clamp_y = target.height() as f32 - 1.0;
        let min_x = v0.x.min(v1.x).min(v2.x).max(0.0).ceil() as i32;
        let max_x = v0.x.max(v1.x).max(v2.x).min(clamp_x).floor() as i32;
        let min_y = v0.y.min(v1.y).min(v2.y).max(0.0).ceil() as i32;
        let max_y = v0.y.max(v1.y).max(v2.y).min(clamp_y).floor() as i32;

        for x in min_x..=max_x {
            for y in min_y..=max_y {
                let p = Vec3f::new(x as f32, y as f32, 0.0);
                let bc = barycentric(v0, v1, v2, p);
                if bc.x < 0.0 || bc.y < 0.0 || bc.z < 0.0 {
                    continue;
                }
                let depth = v0.z * bc.x + v1.z * bc.y + v2.z * bc.z;
                target.set_pixel_with_depth(x, y, depth, color);
            }
        }
    }
}
