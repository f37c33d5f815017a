//! BODY decoding: ByteRun1 decompression and bitplane-to-chunky conversion.

use alloc::borrow::Cow;
use alloc::vec;
use alloc::vec::Vec;

use enough::{Stop, Unstoppable};

use crate::error::IlbmError;
use crate::header::BitmapHeader;
use crate::limits::Limits;

/// Expand a ByteRun1 (PackBits) stream.
///
/// Control byte `n` (signed): `0..=127` copies `n + 1` literal bytes,
/// `-127..=-1` repeats the next byte `1 - n` times, `-128` is a no-op that
/// also consumes the byte after it. A literal run cut short by the end of
/// input emits only the bytes that exist.
pub fn decompress(payload: &[u8]) -> Vec<u8> {
    byte_run1(payload, usize::MAX)
}

/// Like [`decompress`], but stops once `cap` bytes have been produced.
/// The result may exceed `cap` by at most one run.
fn byte_run1(src: &[u8], cap: usize) -> Vec<u8> {
    let mut out = Vec::with_capacity(cap.min(src.len().saturating_mul(2)));
    let mut pos = 0usize;

    while pos < src.len() && out.len() < cap {
        let n = src[pos] as i8;
        pos += 1;
        match n {
            0..=127 => {
                let end = pos.saturating_add(n as usize + 1).min(src.len());
                out.extend_from_slice(&src[pos..end]);
                pos = end;
            }
            -128 => pos += 1,
            _ => {
                let Some(&byte) = src.get(pos) else {
                    break;
                };
                let count = (1 - i16::from(n)) as usize;
                out.resize(out.len() + count, byte);
                pos += 1;
            }
        }
    }
    out
}

/// Convert one planar scanline to chunky pixels.
///
/// `source_row` holds `planes` bitplane rows of `bytes_per_row` bytes each.
/// The result has `width * bytes_per_pixel` bytes.
pub fn convert_planar_row(source_row: &[u8], header: &BitmapHeader) -> Result<Vec<u8>, IlbmError> {
    let mut out = vec![0u8; usize::from(header.width) * header.bytes_per_pixel()];
    convert_planar_row_into(source_row, header, &mut out)?;
    Ok(out)
}

/// [`convert_planar_row`] into a caller-provided row. `out` is overwritten.
///
/// Plane `p` sets bit `p % 8` of byte `p / 8` within each pixel, so indexed
/// images get palette indices and 24/32-plane images get R, G, B(, A) bytes.
pub fn convert_planar_row_into(
    source_row: &[u8],
    header: &BitmapHeader,
    out: &mut [u8],
) -> Result<(), IlbmError> {
    header.validate()?;
    let width = usize::from(header.width);
    let planes = usize::from(header.planes);
    let bpp = header.bytes_per_pixel();
    let bpr = header.bytes_per_row();

    let needed = bpr * planes;
    if source_row.len() < needed {
        return Err(IlbmError::corrupt(alloc::format!(
            "planar row is {} bytes, need {needed}",
            source_row.len()
        )));
    }
    if out.len() != width * bpp {
        return Err(IlbmError::corrupt(alloc::format!(
            "output row is {} bytes, need {}",
            out.len(),
            width * bpp
        )));
    }

    out.fill(0);
    if bpr == 0 {
        return Ok(());
    }
    for (p, plane) in source_row[..needed].chunks_exact(bpr).enumerate() {
        let byte_offset = p >> 3;
        let bit = 1u8 << (p & 7);
        for x in 0..width {
            if plane[x >> 3] & (0x80 >> (x & 7)) != 0 {
                out[x * bpp + byte_offset] |= bit;
            }
        }
    }
    Ok(())
}

/// Decode an ILBM BODY payload into a row-major chunky pixel buffer.
pub fn decode_body(payload: &[u8], header: &BitmapHeader) -> Result<Vec<u8>, IlbmError> {
    decode_planar(payload, header, None, &Unstoppable)
}

/// Decode a PBM BODY payload: rows are already chunky, padded to even length.
pub fn decode_chunky_body(payload: &[u8], header: &BitmapHeader) -> Result<Vec<u8>, IlbmError> {
    decode_chunky(payload, header, None, &Unstoppable)
}

struct RowGeometry {
    src_stride: usize,
    out_row: usize,
    required: usize,
    out_len: usize,
}

fn geometry(header: &BitmapHeader, src_stride: Option<usize>) -> Result<RowGeometry, IlbmError> {
    let too_large = || IlbmError::DimensionsTooLarge {
        width: u32::from(header.width),
        height: u32::from(header.height),
    };
    let height = usize::from(header.height);
    let src_stride = src_stride.ok_or_else(too_large)?;
    let out_row = usize::from(header.width)
        .checked_mul(header.bytes_per_pixel())
        .ok_or_else(too_large)?;
    Ok(RowGeometry {
        src_stride,
        out_row,
        required: src_stride.checked_mul(height).ok_or_else(too_large)?,
        out_len: out_row.checked_mul(height).ok_or_else(too_large)?,
    })
}

/// Decompress `payload` if needed and check it covers `required` bytes.
fn body_bytes<'a>(
    payload: &'a [u8],
    header: &BitmapHeader,
    required: usize,
    limits: Option<&Limits>,
) -> Result<Cow<'a, [u8]>, IlbmError> {
    let data = if header.is_compressed() {
        if let Some(limits) = limits {
            limits.check_memory(required)?;
        }
        Cow::Owned(byte_run1(payload, required))
    } else {
        Cow::Borrowed(payload)
    };
    if data.len() < required {
        return Err(IlbmError::corrupt(alloc::format!(
            "BODY holds {} bytes of pixel data, need {required}",
            data.len()
        )));
    }
    Ok(data)
}

pub(crate) fn decode_planar(
    payload: &[u8],
    header: &BitmapHeader,
    limits: Option<&Limits>,
    stop: &dyn Stop,
) -> Result<Vec<u8>, IlbmError> {
    header.validate()?;
    let stride = header.bytes_per_row().checked_mul(header.stored_planes());
    let geo = geometry(header, stride)?;
    if let Some(limits) = limits {
        limits.check_memory(geo.out_len)?;
    }

    let data = body_bytes(payload, header, geo.required, limits)?;
    let mut out = vec![0u8; geo.out_len];
    if geo.src_stride == 0 || geo.out_row == 0 {
        return Ok(out);
    }

    for (y, (src_row, dst_row)) in data[..geo.required]
        .chunks_exact(geo.src_stride)
        .zip(out.chunks_exact_mut(geo.out_row))
        .enumerate()
    {
        if y % 16 == 0 {
            stop.check()?;
        }
        convert_planar_row_into(src_row, header, dst_row)?;
    }
    Ok(out)
}

pub(crate) fn decode_chunky(
    payload: &[u8],
    header: &BitmapHeader,
    limits: Option<&Limits>,
    stop: &dyn Stop,
) -> Result<Vec<u8>, IlbmError> {
    header.validate()?;
    let stride = usize::from(header.width)
        .checked_mul(header.bytes_per_pixel())
        .map(|row| row + (row & 1));
    let geo = geometry(header, stride)?;
    if let Some(limits) = limits {
        limits.check_memory(geo.out_len)?;
    }

    let data = body_bytes(payload, header, geo.required, limits)?;
    let mut out = Vec::with_capacity(geo.out_len);
    if geo.src_stride == 0 {
        return Ok(out);
    }

    for (y, src_row) in data[..geo.required].chunks_exact(geo.src_stride).enumerate() {
        if y % 16 == 0 {
            stop.check()?;
        }
        out.extend_from_slice(&src_row[..geo.out_row]);
    }
    Ok(out)
}
