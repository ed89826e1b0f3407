//! TGA image codec.
//!
//! Encodes a [`Framebuffer`] as an uncompressed or run-length encoded
//! truecolor/grayscale TGA stream and decodes such streams back.
//!
//! # File layout
//!
//! ```text
//! offset  size  field
//!      0     1  id length
//!      1     1  color map type
//!      2     1  data type (2 raw rgb, 3 raw gray, 10 rle rgb, 11 rle gray)
//!      3     2  color map origin
//!      5     2  color map length
//!      7     1  color map depth
//!      8     2  x origin
//!     10     2  y origin
//!     12     2  width
//!     14     2  height
//!     16     1  bits per pixel
//!     17     1  image descriptor (0x20 top origin, 0x10 right origin)
//!     18     -  pixel data
//!    end    26  developer area ref (4 x 0), extension area ref (4 x 0),
//!               "TRUEVISION-XFILE.\0"
//! ```
//!
//! All 16-bit fields are little-endian. TGA rows run bottom to top, so the
//! encoder writes the framebuffer's rows in reverse.

pub mod rle;

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;

use thiserror::Error;

use crate::colors::ColorMode;
use crate::framebuffer::Framebuffer;

pub const HEADER_LEN: usize = 18;
pub const SIGNATURE: &[u8; 18] = b"TRUEVISION-XFILE.\0";
pub const FOOTER_LEN: usize = 4 + 4 + SIGNATURE.len();

/// Upper bound on the pixel buffer reserved before any payload is read.
/// Headers are untrusted; larger images grow as data arrives.
pub(crate) const MAX_PREALLOC: usize = 1 << 20;

/// Image descriptor bit: rows are stored top to bottom.
pub const DESCRIPTOR_TOP_ORIGIN: u8 = 0x20;
/// Image descriptor bit: columns are stored right to left.
pub const DESCRIPTOR_RIGHT_ORIGIN: u8 = 0x10;

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("invalid image dimensions {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("unsupported pixel depth of {0} bits")]
    UnsupportedDepth(u8),

    #[error("unknown TGA data type {0}")]
    UnsupportedDataType(u8),

    #[error("RLE stream holds more pixels than the image")]
    TooManyPixels,

    #[error("pixel data ended after {decoded} of {expected} pixels")]
    Truncated { expected: usize, decoded: usize },
}

/// The pixel encodings this codec reads and writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataType {
    RawTrueColor = 2,
    RawGrayscale = 3,
    RleTrueColor = 10,
    RleGrayscale = 11,
}

impl DataType {
    pub fn for_mode(mode: ColorMode, use_rle: bool) -> Self {
        match (mode, use_rle) {
            (ColorMode::Grayscale, false) => DataType::RawGrayscale,
            (ColorMode::Grayscale, true) => DataType::RleGrayscale,
            (_, false) => DataType::RawTrueColor,
            (_, true) => DataType::RleTrueColor,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            2 => Some(DataType::RawTrueColor),
            3 => Some(DataType::RawGrayscale),
            10 => Some(DataType::RleTrueColor),
            11 => Some(DataType::RleGrayscale),
            _ => None,
        }
    }

    pub fn is_rle(self) -> bool {
        matches!(self, DataType::RleTrueColor | DataType::RleGrayscale)
    }
}

/// The fixed 18-byte TGA header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TgaHeader {
    pub id_length: u8,
    pub color_map_type: u8,
    pub data_type: u8,
    pub color_map_origin: u16,
    pub color_map_length: u16,
    pub color_map_depth: u8,
    pub x_origin: u16,
    pub y_origin: u16,
    pub width: u16,
    pub height: u16,
    pub bits_per_pixel: u8,
    pub image_descriptor: u8,
}

impl TgaHeader {
    pub fn to_bytes(&self) -> [u8; HEADER_LEN] {
        let mut b = [0u8; HEADER_LEN];
        b[0] = self.id_length;
        b[1] = self.color_map_type;
        b[2] = self.data_type;
        b[3..5].copy_from_slice(&self.color_map_origin.to_le_bytes());
        b[5..7].copy_from_slice(&self.color_map_length.to_le_bytes());
        b[7] = self.color_map_depth;
        b[8..10].copy_from_slice(&self.x_origin.to_le_bytes());
        b[10..12].copy_from_slice(&self.y_origin.to_le_bytes());
        b[12..14].copy_from_slice(&self.width.to_le_bytes());
        b[14..16].copy_from_slice(&self.height.to_le_bytes());
        b[16] = self.bits_per_pixel;
        b[17] = self.image_descriptor;
        b
    }

    pub fn from_bytes(b: &[u8; HEADER_LEN]) -> Self {
        let le = |i: usize| u16::from_le_bytes([b[i], b[i + 1]]);
        Self {
            id_length: b[0],
            color_map_type: b[1],
            data_type: b[2],
            color_map_origin: le(3),
            color_map_length: le(5),
            color_map_depth: b[7],
            x_origin: le(8),
            y_origin: le(10),
            width: le(12),
            height: le(14),
            bits_per_pixel: b[16],
            image_descriptor: b[17],
        }
    }
}

/// Writes `image` as a TGA stream.
///
/// The caller's framebuffer is left untouched; the bottom-up row order is
/// produced on a private copy. On error the stream may hold a partial file
/// and must be discarded.
pub fn encode<W: Write>(image: &Framebuffer, out: &mut W, use_rle: bool) -> Result<(), CodecError> {
    let (width, height) = (image.width(), image.height());
    if width == 0 || height == 0 || width > u16::MAX as u32 || height > u16::MAX as u32 {
        return Err(CodecError::InvalidDimensions { width, height });
    }

    let mut flipped = image.clone();
    flipped.flip_vertical();

    let header = TgaHeader {
        data_type: DataType::for_mode(image.mode(), use_rle) as u8,
        width: width as u16,
        height: height as u16,
        bits_per_pixel: (image.bytes_per_pixel() * 8) as u8,
        ..TgaHeader::default()
    };
    out.write_all(&header.to_bytes())?;

    if use_rle {
        rle::compress(flipped.as_bytes(), flipped.bytes_per_pixel(), out)?;
    } else {
        out.write_all(flipped.as_bytes())?;
    }

    out.write_all(&[0u8; 4])?; // developer area ref
    out.write_all(&[0u8; 4])?; // extension area ref
    out.write_all(SIGNATURE)?;
    Ok(())
}

/// Reads a TGA stream into a framebuffer with row 0 at the top.
pub fn decode<R: Read>(input: &mut R) -> Result<Framebuffer, CodecError> {
    let mut raw_header = [0u8; HEADER_LEN];
    input.read_exact(&mut raw_header)?;
    let header = TgaHeader::from_bytes(&raw_header);

    let (width, height) = (header.width as u32, header.height as u32);
    if width == 0 || height == 0 {
        return Err(CodecError::InvalidDimensions { width, height });
    }
    let mode = ColorMode::from_bytes_per_pixel((header.bits_per_pixel >> 3) as usize)
        .ok_or(CodecError::UnsupportedDepth(header.bits_per_pixel))?;
    let data_type = DataType::from_code(header.data_type)
        .ok_or(CodecError::UnsupportedDataType(header.data_type))?;
    log::debug!(
        "decoding {}x{}/{} ({:?})",
        width,
        height,
        header.bits_per_pixel,
        data_type
    );

    // image id field, not retained
    io::copy(&mut input.by_ref().take(header.id_length as u64), &mut io::sink())?;

    let bpp = mode.bytes_per_pixel();
    let pixel_count = width as usize * height as usize;
    let data = if data_type.is_rle() {
        rle::decompress(input, pixel_count, bpp)?
    } else {
        let expected = pixel_count * bpp;
        let mut data = Vec::with_capacity(expected.min(MAX_PREALLOC));
        input.by_ref().take(expected as u64).read_to_end(&mut data)?;
        if data.len() < expected {
            return Err(CodecError::Truncated {
                expected: pixel_count,
                decoded: data.len() / bpp,
            });
        }
        data
    };

    let mut image = Framebuffer::from_raw(width, height, mode, data).ok_or(
        CodecError::Truncated {
            expected: pixel_count,
            decoded: 0,
        },
    )?;
    if header.image_descriptor & DESCRIPTOR_TOP_ORIGIN == 0 {
        image.flip_vertical();
    }
    if header.image_descriptor & DESCRIPTOR_RIGHT_ORIGIN != 0 {
        image.flip_horizontal();
    }
    Ok(image)
}

/// Encodes `image` into the file at `path`, creating or truncating it.
pub fn save<P: AsRef<Path>>(image: &Framebuffer, path: P, use_rle: bool) -> Result<(), CodecError> {
    let path = path.as_ref();
    let mut out = BufWriter::new(File::create(path)?);
    encode(image, &mut out, use_rle)?;
    out.flush()?;
    log::info!("saved {}", path.display());
    Ok(())
}

/// Decodes the TGA file at `path`.
pub fn load<P: AsRef<Path>>(path: P) -> Result<Framebuffer, CodecError> {
    let mut input = BufReader::new(File::open(path)?);
    decode(&mut input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors::Color;

    fn checkerboard(width: u32, height: u32, mode: ColorMode) -> Framebuffer {
        let mut fb = Framebuffer::new(width, height, mode);
        for y in 0..height as i32 {
            for x in 0..width as i32 {
                let v = if (x / 3 + y) % 2 == 0 { 200 } else { (x * 7 + y) as u8 };
                fb.set(x, y, Color::rgba(v, v / 2, 255 - v, 128));
            }
        }
        fb
    }

    fn encode_to_vec(fb: &Framebuffer, use_rle: bool) -> Vec<u8> {
        let mut bytes = Vec::new();
        encode(fb, &mut bytes, use_rle).unwrap();
        bytes
    }

    #[test]
    fn round_trip_all_modes() {
        for mode in [ColorMode::Grayscale, ColorMode::Rgb, ColorMode::Rgba] {
            for (w, h) in [(1, 1), (7, 5), (130, 3)] {
                let fb = checkerboard(w, h, mode);
                for use_rle in [false, true] {
                    let bytes = encode_to_vec(&fb, use_rle);
                    let decoded = decode(&mut bytes.as_slice()).unwrap();
                    assert_eq!(decoded, fb, "{mode} {w}x{h} rle={use_rle}");
                }
            }
        }
    }

    #[test]
    fn encode_does_not_modify_source() {
        let fb = checkerboard(4, 4, ColorMode::Rgb);
        let copy = fb.clone();
        encode_to_vec(&fb, true);
        assert_eq!(fb, copy);
    }

    #[test]
    fn header_and_footer_layout() {
        let fb = checkerboard(3, 2, ColorMode::Rgb);
        let bytes = encode_to_vec(&fb, false);
        assert_eq!(bytes.len(), HEADER_LEN + 3 * 2 * 3 + FOOTER_LEN);
        assert_eq!(bytes[2], 2);
        assert_eq!(&bytes[12..14], &[3, 0]);
        assert_eq!(&bytes[14..16], &[2, 0]);
        assert_eq!(bytes[16], 24);
        assert_eq!(bytes[17], 0);
        let footer = &bytes[bytes.len() - FOOTER_LEN..];
        assert_eq!(&footer[..8], &[0; 8]);
        assert_eq!(&footer[8..], SIGNATURE);
    }

    #[test]
    fn raw_payload_is_bottom_up() {
        let mut fb = Framebuffer::new(1, 2, ColorMode::Grayscale);
        fb.set(0, 0, Color::gray(10));
        fb.set(0, 1, Color::gray(20));
        let bytes = encode_to_vec(&fb, false);
        assert_eq!(&bytes[HEADER_LEN..HEADER_LEN + 2], &[20, 10]);
    }

    #[test]
    fn data_type_codes() {
        assert_eq!(DataType::for_mode(ColorMode::Rgb, false) as u8, 2);
        assert_eq!(DataType::for_mode(ColorMode::Grayscale, false) as u8, 3);
        assert_eq!(DataType::for_mode(ColorMode::Rgba, true) as u8, 10);
        assert_eq!(DataType::for_mode(ColorMode::Grayscale, true) as u8, 11);
    }

    #[test]
    fn descriptor_bits_control_orientation() {
        let fb = checkerboard(4, 3, ColorMode::Rgb);
        let mut bytes = encode_to_vec(&fb, false);

        bytes[17] = DESCRIPTOR_TOP_ORIGIN;
        let mut expected = fb.clone();
        expected.flip_vertical();
        assert_eq!(decode(&mut bytes.as_slice()).unwrap(), expected);

        bytes[17] = DESCRIPTOR_RIGHT_ORIGIN;
        let mut expected = fb.clone();
        expected.flip_horizontal();
        assert_eq!(decode(&mut bytes.as_slice()).unwrap(), expected);
    }

    #[test]
    fn id_field_is_skipped() {
        let fb = checkerboard(2, 2, ColorMode::Rgb);
        let bytes = encode_to_vec(&fb, true);
        let mut with_id = bytes[..HEADER_LEN].to_vec();
        with_id[0] = 3;
        with_id.extend_from_slice(b"abc");
        with_id.extend_from_slice(&bytes[HEADER_LEN..]);
        assert_eq!(decode(&mut with_id.as_slice()).unwrap(), fb);
    }

    #[test]
    fn rejects_bad_headers() {
        let fb = checkerboard(2, 2, ColorMode::Rgb);
        let bytes = encode_to_vec(&fb, false);

        let mut zero_width = bytes.clone();
        zero_width[12] = 0;
        assert!(matches!(
            decode(&mut zero_width.as_slice()),
            Err(CodecError::InvalidDimensions { width: 0, .. })
        ));

        let mut bad_depth = bytes.clone();
        bad_depth[16] = 16;
        assert!(matches!(
            decode(&mut bad_depth.as_slice()),
            Err(CodecError::UnsupportedDepth(16))
        ));

        let mut color_mapped = bytes.clone();
        color_mapped[2] = 1;
        assert!(matches!(
            decode(&mut color_mapped.as_slice()),
            Err(CodecError::UnsupportedDataType(1))
        ));
    }

    #[test]
    fn truncated_raw_payload() {
        let fb = checkerboard(4, 4, ColorMode::Rgb);
        let bytes = encode_to_vec(&fb, false);
        let cut = &bytes[..HEADER_LEN + 10];
        assert!(matches!(
            decode(&mut &cut[..]),
            Err(CodecError::Truncated {
                expected: 16,
                decoded: 3
            })
        ));
    }

    #[test]
    fn oversized_header_with_short_payload_is_truncated() {
        for data_type in [DataType::RawTrueColor, DataType::RleTrueColor] {
            let header = TgaHeader {
                data_type: data_type as u8,
                width: u16::MAX,
                height: u16::MAX,
                bits_per_pixel: 32,
                ..TgaHeader::default()
            };
            let mut bytes = header.to_bytes().to_vec();
            bytes.extend_from_slice(&[1, 2, 3, 4]);
            let pixels = u16::MAX as usize * u16::MAX as usize;
            match decode(&mut bytes.as_slice()) {
                Err(CodecError::Truncated { expected, .. }) => assert_eq!(expected, pixels),
                other => panic!("{data_type:?}: expected Truncated, got {other:?}"),
            }
        }
    }

    #[test]
    fn save_into_missing_directory_fails() {
        let path = std::env::temp_dir()
            .join(format!("tinyraster-missing-{}", std::process::id()))
            .join("out.tga");
        let fb = checkerboard(2, 2, ColorMode::Rgb);
        assert!(matches!(save(&fb, &path, true), Err(CodecError::Io(_))));
        assert!(!path.exists());
    }

    #[test]
    fn truncated_header_is_io_error() {
        let bytes = [0u8; 5];
        assert!(matches!(
            decode(&mut &bytes[..]),
            Err(CodecError::Io(_))
        ));
    }

    #[test]
    fn encode_rejects_empty_image() {
        let fb = Framebuffer::new(0, 3, ColorMode::Rgb);
        let mut out = Vec::new();
        assert!(matches!(
            encode(&fb, &mut out, true),
            Err(CodecError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn failing_writer_surfaces_error() {
        struct Full;
        impl Write for Full {
            fn write(&mut self, _: &[u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::WriteZero, "disk full"))
            }
            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }
        let fb = checkerboard(2, 2, ColorMode::Rgb);
        assert!(matches!(
            encode(&fb, &mut Full, false),
            Err(CodecError::Io(_))
        ));
    }
}
