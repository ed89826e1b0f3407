//! Owned pixel storage.
//!
//! A [`Framebuffer`] is a dense, row-major byte buffer with a fixed
//! [`ColorMode`]. Row 0 is the top of the image in memory; the TGA codec is
//! responsible for converting to and from the format's bottom-left origin.

use image::{Rgba, RgbaImage};

use crate::colors::{Color, ColorMode};

/// An owned image buffer of `width * height * bytes_per_pixel` bytes.
///
/// Cloning deep-copies the pixel data.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Framebuffer {
    data: Vec<u8>,
    width: u32,
    height: u32,
    mode: ColorMode,
}

impl Framebuffer {
    /// Creates a zero-filled framebuffer.
    pub fn new(width: u32, height: u32, mode: ColorMode) -> Self {
        let size = width as usize * height as usize * mode.bytes_per_pixel();
        Self {
            data: vec![0; size],
            width,
            height,
            mode,
        }
    }

    /// Wraps existing pixel bytes. Returns `None` if the length does not
    /// match the dimensions.
    pub fn from_raw(width: u32, height: u32, mode: ColorMode, data: Vec<u8>) -> Option<Self> {
        if data.len() != width as usize * height as usize * mode.bytes_per_pixel() {
            return None;
        }
        Some(Self {
            data,
            width,
            height,
            mode,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn mode(&self) -> ColorMode {
        self.mode
    }

    pub fn bytes_per_pixel(&self) -> usize {
        self.mode.bytes_per_pixel()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    #[inline]
    fn offset(&self, x: i32, y: i32) -> Option<usize> {
        if x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32 {
            Some((y as usize * self.width as usize + x as usize) * self.bytes_per_pixel())
        } else {
            None
        }
    }

    /// Reads the pixel at (x, y). Out-of-range reads yield [`Color::ZERO`].
    #[inline]
    pub fn get(&self, x: i32, y: i32) -> Color {
        match self.offset(x, y) {
            Some(idx) => Color::from_bytes(&self.data[idx..idx + self.bytes_per_pixel()]),
            None => Color::ZERO,
        }
    }

    /// Writes the leading `bytes_per_pixel` bytes of `color` at (x, y).
    ///
    /// Returns `false` and leaves the buffer untouched when out of range.
    #[inline]
    pub fn set(&mut self, x: i32, y: i32, color: Color) -> bool {
        let Some(idx) = self.offset(x, y) else {
            return false;
        };
        let bpp = self.bytes_per_pixel();
        self.data[idx..idx + bpp].copy_from_slice(&color.raw()[..bpp]);
        true
    }

    /// Zero-fills every pixel.
    pub fn clear(&mut self) {
        self.data.fill(0);
    }

    /// Mirrors the image left to right.
    pub fn flip_horizontal(&mut self) {
        let bpp = self.bytes_per_pixel();
        let width = self.width as usize;
        for row in self.data.chunks_exact_mut(width * bpp) {
            for i in 0..width / 2 {
                let (left, right) = row.split_at_mut((width - 1 - i) * bpp);
                left[i * bpp..(i + 1) * bpp].swap_with_slice(&mut right[..bpp]);
            }
        }
    }

    /// Mirrors the image top to bottom.
    pub fn flip_vertical(&mut self) {
        let line = self.width as usize * self.bytes_per_pixel();
        let height = self.height as usize;
        for j in 0..height / 2 {
            let (top, bottom) = self.data.split_at_mut((height - 1 - j) * line);
            top[j * line..(j + 1) * line].swap_with_slice(&mut bottom[..line]);
        }
    }

    /// Resamples to `new_width` x `new_height` with error-accumulating
    /// nearest-neighbour stepping.
    ///
    /// Columns: each source column adds `new_width` to an error term and a
    /// destination column is emitted every time the error reaches the source
    /// width. Rows: each source row adds `new_height`; when the error overshoots
    /// by a whole extra row the current destination line is duplicated into the
    /// next one so no destination row is left unwritten.
    ///
    /// Returns `false` without touching the buffer when a target dimension is
    /// zero or the buffer is empty.
    pub fn scale(&mut self, new_width: u32, new_height: u32) -> bool {
        if new_width == 0 || new_height == 0 || self.data.is_empty() {
            return false;
        }

        let bpp = self.bytes_per_pixel();
        let (old_w, old_h) = (self.width as i64, self.height as i64);
        let (new_w, new_h) = (new_width as i64, new_height as i64);
        let old_line = old_w as usize * bpp;
        let new_line = new_w as usize * bpp;

        let mut scaled = vec![0u8; new_line * new_height as usize];
        let mut new_scanline = 0usize;
        let mut old_scanline = 0usize;
        let mut err_y = 0i64;

        for _ in 0..old_h {
            let mut err_x = old_w - new_w;
            let mut new_x = 0usize;
            for i in 0..old_w as usize {
                let old_x = i * bpp;
                err_x += new_w;
                while err_x >= old_w {
                    err_x -= old_w;
                    if new_x + bpp <= new_line {
                        let dst = new_scanline + new_x;
                        let src = old_scanline + old_x;
                        scaled[dst..dst + bpp].copy_from_slice(&self.data[src..src + bpp]);
                    }
                    new_x += bpp;
                }
            }

            err_y += new_h;
            old_scanline += old_line;
            while err_y >= old_h {
                if err_y >= old_h << 1 {
                    // about to skip a destination row; duplicate the current one
                    scaled.copy_within(new_scanline..new_scanline + new_line, new_scanline + new_line);
                }
                err_y -= old_h;
                new_scanline += new_line;
            }
        }

        self.data = scaled;
        self.width = new_width;
        self.height = new_height;
        true
    }

    /// Converts to an 8-bit RGBA image for export through the `image` crate.
    pub fn to_image(&self) -> RgbaImage {
        RgbaImage::from_fn(self.width, self.height, |x, y| {
            let c = self.get(x as i32, y as i32);
            match self.mode {
                ColorMode::Grayscale => Rgba([c.b(), c.b(), c.b(), 255]),
                ColorMode::Rgb => Rgba([c.r(), c.g(), c.b(), 255]),
                ColorMode::Rgba => Rgba([c.r(), c.g(), c.b(), c.a()]),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors::{RED, WHITE};

    fn gradient(width: u32, height: u32) -> Framebuffer {
        let mut fb = Framebuffer::new(width, height, ColorMode::Grayscale);
        for y in 0..height as i32 {
            for x in 0..width as i32 {
                fb.set(x, y, Color::gray((x + y * width as i32) as u8));
            }
        }
        fb
    }

    #[test]
    fn new_is_zero_filled() {
        let fb = Framebuffer::new(4, 3, ColorMode::Rgba);
        assert_eq!(fb.as_bytes().len(), 4 * 3 * 4);
        assert!(fb.as_bytes().iter().all(|&b| b == 0));
    }

    #[test]
    fn out_of_bounds_access_is_a_no_op() {
        let mut fb = Framebuffer::new(2, 2, ColorMode::Rgb);
        assert!(!fb.set(-1, 0, WHITE));
        assert!(!fb.set(2, 0, WHITE));
        assert!(!fb.set(0, 2, WHITE));
        assert_eq!(fb.get(5, 5), Color::ZERO);
        assert!(fb.as_bytes().iter().all(|&b| b == 0));
    }

    #[test]
    fn set_then_get_uses_buffer_depth() {
        let mut fb = Framebuffer::new(2, 2, ColorMode::Rgb);
        assert!(fb.set(1, 1, RED));
        let c = fb.get(1, 1);
        assert_eq!(c.bytes_per_pixel(), 3);
        assert_eq!((c.r(), c.g(), c.b()), (255, 0, 0));
        assert_eq!(&fb.as_bytes()[9..12], &[0, 0, 255]);
    }

    #[test]
    fn flips_are_involutions() {
        let original = gradient(5, 3);
        let mut fb = original.clone();
        fb.flip_vertical();
        assert_ne!(fb, original);
        fb.flip_vertical();
        assert_eq!(fb, original);

        fb.flip_horizontal();
        assert_ne!(fb, original);
        fb.flip_horizontal();
        assert_eq!(fb, original);
    }

    #[test]
    fn flip_moves_pixels_to_mirrored_position() {
        let original = gradient(3, 2);
        let mut fb = original.clone();
        fb.flip_horizontal();
        assert_eq!(fb.get(0, 0), original.get(2, 0));
        assert_eq!(fb.get(1, 1), original.get(1, 1));

        let mut fb = original.clone();
        fb.flip_vertical();
        assert_eq!(fb.get(2, 0), original.get(2, 1));
    }

    #[test]
    fn clear_zero_fills() {
        let mut fb = gradient(3, 3);
        fb.clear();
        assert!(fb.as_bytes().iter().all(|&b| b == 0));
    }

    #[test]
    fn scale_rejects_zero_target() {
        let mut fb = gradient(4, 4);
        assert!(!fb.scale(0, 2));
        assert!(!fb.scale(2, 0));
        assert_eq!((fb.width(), fb.height()), (4, 4));
    }

    #[test]
    fn scale_rejects_empty_buffer() {
        let mut fb = Framebuffer::new(0, 0, ColorMode::Rgb);
        assert!(!fb.scale(2, 2));
    }

    #[test]
    fn scale_to_same_size_is_identity() {
        let original = gradient(4, 3);
        let mut fb = original.clone();
        assert!(fb.scale(4, 3));
        assert_eq!(fb, original);
    }

    #[test]
    fn scale_down_by_half_picks_accumulated_samples() {
        let mut fb = gradient(4, 4);
        assert!(fb.scale(2, 2));
        assert_eq!((fb.width(), fb.height()), (2, 2));
        // first column of each pair, last row of each pair
        assert_eq!(fb.get(0, 0), Color::gray(4));
        assert_eq!(fb.get(1, 0), Color::gray(6));
        assert_eq!(fb.get(0, 1), Color::gray(12));
        assert_eq!(fb.get(1, 1), Color::gray(14));
    }

    #[test]
    fn scale_up_vertically_duplicates_rows() {
        let mut fb = gradient(2, 2);
        assert!(fb.scale(2, 4));
        assert_eq!(fb.get(0, 0), Color::gray(0));
        assert_eq!(fb.get(0, 1), Color::gray(0));
        assert_eq!(fb.get(1, 2), Color::gray(3));
        assert_eq!(fb.get(1, 3), Color::gray(3));
    }

    #[test]
    fn to_image_expands_gray() {
        let mut fb = Framebuffer::new(1, 1, ColorMode::Grayscale);
        fb.set(0, 0, Color::gray(42));
        assert_eq!(fb.to_image().get_pixel(0, 0), &Rgba([42, 42, 42, 255]));
    }
}
