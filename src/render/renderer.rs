//! Line primitives.
//!
//! Extends [`RenderTarget`] with Bresenham line drawing and triangle outlines.
//! Lines are drawn without depth testing.

use super::target::RenderTarget;
use crate::colors::Color;
use crate::math::Vec2i;

impl RenderTarget<'_> {
    /// Draws the three edges of a screen-space triangle.
    pub fn draw_triangle_wireframe(&mut self, points: [Vec2i; 3], color: Color) {
        for i in 0..3 {
            let p0 = points[i];
            let p1 = points[(i + 1) % 3];
            self.draw_line(p0.x, p0.y, p1.x, p1.y, color);
        }
    }

    /// Draws a one-pixel-wide line between two points using Bresenham's
    /// algorithm.
    ///
    /// The loop always walks the axis with more samples: a steep line is
    /// transposed before stepping and transposed back when plotting, so it has
    /// no gaps. Endpoints are swapped if needed so the walk runs toward
    /// increasing x. A zero-length line plots a single pixel.
    ///
    /// The error term is kept doubled so everything stays in integers: each
    /// step adds `2|dy|`, and once that passes `dx` the minor axis advances and
    /// `2dx` is paid back.
    pub fn draw_line(&mut self, mut x0: i32, mut y0: i32, mut x1: i32, mut y1: i32, color: Color) {
        let steep = (x0 - x1).abs() < (y0 - y1).abs();
        if steep {
            std::mem::swap(&mut x0, &mut y0);
            std::mem::swap(&mut x1, &mut y1);
        }
        if x0 > x1 {
            std::mem::swap(&mut x0, &mut x1);
            std::mem::swap(&mut y0, &mut y1);
        }

        let dx = x1 - x0;
        let dy = y1 - y0;
        let derr2 = dy.abs() * 2;
        let y_step = if y1 > y0 { 1 } else { -1 };
        let mut err2 = 0;
        let mut y = y0;

        for x in x0..=x1 {
            if steep {
                self.set_pixel(y, x, color);
            } else {
                self.set_pixel(x, y, color);
            }
            err2 += derr2;
            if err2 > dx {
                y += y_step;
                err2 -= dx * 2;
            }
        }
    }
}
