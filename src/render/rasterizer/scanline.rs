//! Scanline-based triangle rasterization.
//!
//! The triangle is processed one horizontal line at a time:
//!
//! 1. **Sort vertices** by Y coordinate (ascending)
//! 2. **Split** at the middle vertex's row into a lower and an upper half
//! 3. **Fill** each row between the long edge and the edge of the current half
//!
//! ```text
//!        t2
//!        /\
//!       /  \       upper half: long edge t0-t2 against t1-t2
//!  t1  /----\
//!      \     \     lower half: long edge t0-t2 against t0-t1
//!        \    \
//!          \___\
//!               t0
//! ```
//!
//! Edge positions are found by linear interpolation on integer vectors:
//! `alpha` runs over the full height along the long edge and `beta` over the
//! height of the current half. Interpolated coordinates truncate toward zero.
//!
//! The topmost row (`t2.y`) is not filled; a triangle whose three vertices
//! share one row draws nothing.

use super::{Rasterizer, Triangle};
use crate::colors::Color;
use crate::math::Vec2i;
use crate::render::target::RenderTarget;

/// Scanline triangle rasterizer without depth testing.
pub struct ScanlineRasterizer;

impl ScanlineRasterizer {
    /// Creates a new scanline rasterizer instance.
    pub fn new() -> Self {
        Self
    }

    /// Sorts three points by ascending Y.
    fn sort_vertices(t0: &mut Vec2i, t1: &mut Vec2i, t2: &mut Vec2i) {
        if t0.y > t1.y {
            std::mem::swap(t0, t1);
        }
        if t0.y > t2.y {
            std::mem::swap(t0, t2);
        }
        if t1.y > t2.y {
            std::mem::swap(t1, t2);
        }
    }

    /// Fills an integer screen-space triangle with a solid color.
    pub fn fill_points(
        &self,
        mut t0: Vec2i,
        mut t1: Vec2i,
        mut t2: Vec2i,
        target: &mut RenderTarget,
        color: Color,
    ) {
        if t0.y == t1.y && t0.y == t2.y {
            return; // Degenerate triangle
        }
        Self::sort_vertices(&mut t0, &mut t1, &mut t2);

        let total_height = t2.y - t0.y;
        let lower_height = t1.y - t0.y;

        for i in 0..total_height {
            let second_half = i > lower_height || t1.y == t0.y;
            let segment_height = if second_half {
                t2.y - t1.y
            } else {
                lower_height
            };
            let alpha = i as f32 / total_height as f32;
            let beta = (i - if second_half { lower_height } else { 0 }) as f32
                / segment_height as f32;

            let mut a = t0 + (t2 - t0) * alpha;
            let mut b = if second_half {
                t1 + (t2 - t1) * beta
            } else {
                t0 + (t1 - t0) * beta
            };
            if a.x > b.x {
                std::mem::swap(&mut a, &mut b);
            }
            for x in a.x..=b.x {
                target.set_pixel(x, t0.y + i, color);
            }
        }
    }
}

impl Default for ScanlineRasterizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Rasterizer for ScanlineRasterizer {
    /// Fills the triangle's x/y footprint, truncating to whole pixels. Depth is
    /// ignored even when the target carries a depth buffer.
    fn fill_triangle(&self, triangle: &Triangle, target: &mut RenderTarget, color: Color) {
        let [t0, t1, t2] = triangle
            .points
            .map(|p| Vec2i::new(p.x as i32, p.y as i32));
        self.fill_points(t0, t1, t2, target, color);
    }
}
