//! Triangle rasterization algorithms.
//!
//! Available algorithms:
//! - [`ScanlineRasterizer`]: sorted-vertex scanline fill, no depth testing
//! - [`EdgeFunctionRasterizer`]: bounding box iteration with barycentric
//!   inside tests and depth-gated writes

mod edgefunction;
mod scanline;

pub use edgefunction::{barycentric, EdgeFunctionRasterizer, DEGENERATE_EPSILON};
pub use scanline::ScanlineRasterizer;

use super::target::RenderTarget;
use crate::colors::Color;
use crate::math::Vec3f;

/// A triangle ready for rasterization in screen space.
///
/// `x` and `y` are pixel coordinates; `z` is the depth used by the z-buffer
/// (greater is closer).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Triangle {
    pub points: [Vec3f; 3],
}

impl Triangle {
    pub fn new(points: [Vec3f; 3]) -> Self {
        Self { points }
    }
}

/// Trait for triangle rasterization algorithms.
///
/// Implementors define how triangles are filled into a render target.
pub trait Rasterizer {
    /// Fill a triangle into the render target with a single color.
    fn fill_triangle(&self, triangle: &Triangle, target: &mut RenderTarget, color: Color);
}

/// Available rasterization algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RasterizerType {
    /// Scanline fill of the two halves of the triangle. Ignores depth.
    Scanline,
    /// Edge function rasterizer that tests each pixel in the bounding box.
    #[default]
    EdgeFunction,
}
