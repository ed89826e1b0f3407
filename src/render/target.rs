//! Borrowed view over the buffers of one render pass.
//!
//! Bundles the color image with an optional depth buffer so rasterizers can
//! write pixels with or without depth testing through one handle. This is a
//! borrowed view, not an owning type - it is created for the duration of a
//! pass and dropped before the image is encoded.

use super::depth::DepthBuffer;
use crate::colors::Color;
use crate::framebuffer::Framebuffer;

pub struct RenderTarget<'a> {
    image: &'a mut Framebuffer,
    depth: Option<&'a mut DepthBuffer>,
}

impl<'a> RenderTarget<'a> {
    /// Create a new view. A depth buffer, when given, must match the image size.
    pub fn new(image: &'a mut Framebuffer, depth: Option<&'a mut DepthBuffer>) -> Self {
        if let Some(depth) = &depth {
            debug_assert_eq!(
                (depth.width(), depth.height()),
                (image.width(), image.height()),
                "Depth buffer size doesn't match image"
            );
        }
        Self { image, depth }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Set a pixel without depth testing. Out-of-range writes are ignored.
    #[inline]
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Color) {
        self.image.set(x, y, color);
    }

    /// Set a pixel at (x, y) with depth testing.
    ///
    /// The pixel is only written if `depth` is strictly greater than the
    /// stored depth. Without a depth buffer this is a plain write.
    #[inline]
    pub fn set_pixel_with_depth(&mut self, x: i32, y: i32, depth: f32, color: Color) {
        match self.depth.as_deref_mut() {
            Some(buffer) => {
                if buffer.test_and_set(x, y, depth) {
                    self.image.set(x, y, color);
                }
            }
            None => self.set_pixel(x, y, color),
        }
    }
}
