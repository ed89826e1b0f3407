//! Pixel colors and channel layouts.
//!
//! Colors are stored the way TGA stores them on disk: blue, green, red, alpha.
//! A [`Color`] carries its own byte depth so that a grayscale value and an RGBA
//! value can share one type without aliasing tricks.

use std::fmt;

/// Number of bytes per pixel a framebuffer or color uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorMode {
    Grayscale = 1,
    Rgb = 3,
    Rgba = 4,
}

impl ColorMode {
    pub const fn bytes_per_pixel(self) -> usize {
        self as usize
    }

    /// Maps a byte depth back to a mode. Only 1, 3 and 4 are valid.
    pub const fn from_bytes_per_pixel(bytes: usize) -> Option<Self> {
        match bytes {
            1 => Some(Self::Grayscale),
            3 => Some(Self::Rgb),
            4 => Some(Self::Rgba),
            _ => None,
        }
    }
}

impl fmt::Display for ColorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorMode::Grayscale => write!(f, "grayscale"),
            ColorMode::Rgb => write!(f, "rgb"),
            ColorMode::Rgba => write!(f, "rgba"),
        }
    }
}

/// A pixel value of 1 to 4 bytes in b, g, r, a order.
///
/// Only the first `bytes_per_pixel` bytes are meaningful; equality ignores
/// the rest.
#[derive(Clone, Copy, Debug)]
pub struct Color {
    raw: [u8; 4],
    bytes_per_pixel: usize,
}

pub const BLACK: Color = Color::rgba(0, 0, 0, 255);
pub const WHITE: Color = Color::rgba(255, 255, 255, 255);
pub const RED: Color = Color::rgba(255, 0, 0, 255);

impl Color {
    /// The zero color returned for out-of-range reads.
    pub const ZERO: Color = Color {
        raw: [0; 4],
        bytes_per_pixel: 1,
    };

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            raw: [b, g, r, a],
            bytes_per_pixel: 4,
        }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self {
            raw: [b, g, r, 0],
            bytes_per_pixel: 3,
        }
    }

    pub const fn gray(value: u8) -> Self {
        Self {
            raw: [value, 0, 0, 0],
            bytes_per_pixel: 1,
        }
    }

    /// Builds a color from the leading bytes of `bytes`, which must hold 1..=4 bytes.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let len = bytes.len().min(4);
        let mut raw = [0u8; 4];
        raw[..len].copy_from_slice(&bytes[..len]);
        Self {
            raw,
            bytes_per_pixel: len,
        }
    }

    /// A gray level with full alpha, as used for shaded faces.
    pub fn intensity(intensity: f32) -> Self {
        let level = (intensity.clamp(0.0, 1.0) * 255.0) as u8;
        Self::rgba(level, level, level, 255)
    }

    pub fn b(&self) -> u8 {
        self.raw[0]
    }

    pub fn g(&self) -> u8 {
        self.raw[1]
    }

    pub fn r(&self) -> u8 {
        self.raw[2]
    }

    pub fn a(&self) -> u8 {
        self.raw[3]
    }

    pub fn bytes_per_pixel(&self) -> usize {
        self.bytes_per_pixel
    }

    /// The meaningful bytes, in storage order.
    pub fn as_bytes(&self) -> &[u8] {
        &self.raw[..self.bytes_per_pixel]
    }

    /// All four storage bytes regardless of depth.
    pub fn raw(&self) -> [u8; 4] {
        self.raw
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::ZERO
    }
}

impl PartialEq for Color {
    fn eq(&self, other: &Self) -> bool {
        self.bytes_per_pixel == other.bytes_per_pixel && self.as_bytes() == other.as_bytes()
    }
}

impl Eq for Color {}
