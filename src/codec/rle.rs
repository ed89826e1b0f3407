//! Packet run-length encoding over whole pixels.
//!
//! The stream is a sequence of packets, each introduced by one header byte:
//!
//! ```text
//! header < 128   raw packet: (header + 1) pixels follow verbatim
//! header >= 128  run packet: one pixel follows, repeated (header - 127) times
//! ```
//!
//! Packets never hold more than [`MAX_PACKET_PIXELS`] pixels.

use std::io::{self, ErrorKind, Read, Write};

use super::{CodecError, MAX_PREALLOC};

pub const MAX_PACKET_PIXELS: usize = 128;

/// Compresses `data`, a flat array of `bpp`-byte pixels, into `out`.
///
/// Packetization: starting at the current pixel, compare it with its
/// successor. The first comparison decides the packet kind (equal starts a
/// run, different starts a raw packet). A raw packet grows until it meets a
/// pixel equal to its successor, which is handed back to start the next
/// packet; a run grows until the successor differs.
pub fn compress<W: Write>(data: &[u8], bpp: usize, out: &mut W) -> io::Result<()> {
    let pixel_count = data.len() / bpp;
    let pixel = |i: usize| &data[i * bpp..(i + 1) * bpp];

    let mut current = 0usize;
    while current < pixel_count {
        let chunk_start = current;
        let mut probe = current;
        let mut run_length = 1usize;
        let mut raw = true;

        while current + run_length < pixel_count && run_length < MAX_PACKET_PIXELS {
            let succ_eq = pixel(probe) == pixel(probe + 1);
            probe += 1;
            if run_length == 1 {
                raw = !succ_eq;
            }
            if raw && succ_eq {
                run_length -= 1;
                break;
            }
            if !raw && !succ_eq {
                break;
            }
            run_length += 1;
        }

        current += run_length;
        if raw {
            out.write_all(&[(run_length - 1) as u8])?;
            out.write_all(&data[chunk_start * bpp..(chunk_start + run_length) * bpp])?;
        } else {
            out.write_all(&[(run_length + 127) as u8])?;
            out.write_all(pixel(chunk_start))?;
        }
    }
    Ok(())
}

/// Decompresses exactly `pixel_count` pixels of `bpp` bytes from `input`.
///
/// Fails with [`CodecError::TooManyPixels`] when a packet would run past the
/// expected pixel count and with [`CodecError::Truncated`] when the stream ends
/// first.
pub fn decompress<R: Read>(
    input: &mut R,
    pixel_count: usize,
    bpp: usize,
) -> Result<Vec<u8>, CodecError> {
    let mut data = Vec::with_capacity((pixel_count * bpp).min(MAX_PREALLOC));
    let mut decoded = 0usize;
    let mut pixel = [0u8; 4];
    let pixel = &mut pixel[..bpp];

    let truncated = |e: io::Error, decoded: usize| {
        if e.kind() == ErrorKind::UnexpectedEof {
            CodecError::Truncated {
                expected: pixel_count,
                decoded,
            }
        } else {
            CodecError::Io(e)
        }
    };

    while decoded < pixel_count {
        let mut header = [0u8; 1];
        input
            .read_exact(&mut header)
            .map_err(|e| truncated(e, decoded))?;
        let header = header[0] as usize;

        if header < 128 {
            let len = header + 1;
            if decoded + len > pixel_count {
                return Err(CodecError::TooManyPixels);
            }
            for _ in 0..len {
                input.read_exact(pixel).map_err(|e| truncated(e, decoded))?;
                data.extend_from_slice(pixel);
                decoded += 1;
            }
        } else {
            let len = header - 127;
            if decoded + len > pixel_count {
                return Err(CodecError::TooManyPixels);
            }
            input.read_exact(pixel).map_err(|e| truncated(e, decoded))?;
            for _ in 0..len {
                data.extend_from_slice(pixel);
            }
            decoded += len;
        }
    }
    Ok(data)
}
