//! Fixture builders shared by the integration tests.
//!
//! These write IFF files (framing, BMHD, planar rows, ByteRun1) so tests can
//! decode known pixels without binary fixtures on disk.

#![allow(dead_code)]

pub const NO_MASK: u8 = 0;
pub const HAS_MASK: u8 = 1;
pub const UNCOMPRESSED: u8 = 0;
pub const BYTERUN1: u8 = 1;

/// Build a 20-byte BMHD payload.
pub fn bmhd(width: u16, height: u16, planes: u8, masking: u8, compression: u8) -> Vec<u8> {
    let mut p = Vec::with_capacity(20);
    p.extend_from_slice(&width.to_be_bytes());
    p.extend_from_slice(&height.to_be_bytes());
    p.extend_from_slice(&0i16.to_be_bytes()); // x origin
    p.extend_from_slice(&0i16.to_be_bytes()); // y origin
    p.push(planes);
    p.push(masking);
    p.push(compression);
    p.push(0); // pad
    p.extend_from_slice(&0u16.to_be_bytes()); // transparent colour
    p.push(10);
    p.push(11);
    p.extend_from_slice(&(width as i16).to_be_bytes());
    p.extend_from_slice(&(height as i16).to_be_bytes());
    p
}

/// Assembles a `FORM` with chunks in insertion order.
pub struct IffBuilder {
    sub_type: [u8; 4],
    stream: Vec<u8>,
}

impl IffBuilder {
    pub fn ilbm() -> Self {
        Self::new(*b"ILBM")
    }

    pub fn pbm() -> Self {
        Self::new(*b"PBM ")
    }

    pub fn new(sub_type: [u8; 4]) -> Self {
        Self {
            sub_type,
            stream: Vec::new(),
        }
    }

    pub fn chunk(mut self, tag: &[u8; 4], payload: &[u8]) -> Self {
        self.stream.extend_from_slice(tag);
        self.stream
            .extend_from_slice(&(payload.len() as u32).to_be_bytes());
        self.stream.extend_from_slice(payload);
        if payload.len() % 2 == 1 {
            self.stream.push(0);
        }
        self
    }

    pub fn build(self) -> Vec<u8> {
        let mut out = Vec::with_capacity(12 + self.stream.len());
        out.extend_from_slice(b"FORM");
        out.extend_from_slice(&(4 + self.stream.len() as u32).to_be_bytes());
        out.extend_from_slice(&self.sub_type);
        out.extend_from_slice(&self.stream);
        out
    }
}

pub fn bytes_per_row(width: usize) -> usize {
    width.div_ceil(16) * 2
}

/// Chunky pixels (`bpp` bytes each) to interleaved bitplane rows.
///
/// Plane `p` carries bit `p % 8` of pixel byte `p / 8`. When `mask` is set,
/// a mask plane with every bit set follows the colour planes of each row.
pub fn planar_encode(
    pixels: &[u8],
    width: usize,
    height: usize,
    planes: usize,
    mask: bool,
) -> Vec<u8> {
    let bpp = if planes > 8 { planes / 8 } else { 1 };
    let bpr = bytes_per_row(width);
    let stored = planes + usize::from(mask);
    let mut out = vec![0u8; bpr * stored * height];
    for y in 0..height {
        let row = &mut out[y * bpr * stored..(y + 1) * bpr * stored];
        for p in 0..planes {
            let plane = &mut row[p * bpr..(p + 1) * bpr];
            for x in 0..width {
                let value = pixels[(y * width + x) * bpp + p / 8];
                if value & (1 << (p % 8)) != 0 {
                    plane[x / 8] |= 0x80 >> (x % 8);
                }
            }
        }
        if mask {
            for x in 0..width {
                row[planes * bpr + x / 8] |= 0x80 >> (x % 8);
            }
        }
    }
    out
}

/// ByteRun1-encode `data`: repeats of 3 or more become repeat runs.
pub fn byte_run1_encode(data: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    let mut i = 0;
    while i < data.len() {
        let mut run = 1;
        while i + run < data.len() && run < 128 && data[i + run] == data[i] {
            run += 1;
        }
        if run >= 3 {
            out.push((1 - run as i16) as i8 as u8);
            out.push(data[i]);
            i += run;
            continue;
        }
        let start = i;
        while i < data.len() && i - start < 128 {
            if i + 2 < data.len() && data[i] == data[i + 1] && data[i] == data[i + 2] {
                break;
            }
            i += 1;
        }
        out.push((i - start - 1) as u8);
        out.extend_from_slice(&data[start..i]);
    }
    out
}

/// `n` RGB entries with distinct values.
pub fn ramp_palette(n: usize) -> Vec<u8> {
    (0..n)
        .flat_map(|i| [i as u8, (i * 3) as u8, 255 - i as u8])
        .collect()
}

pub fn noise_pattern(len: usize, max: u8) -> Vec<u8> {
    let mut state: u32 = 0xDEAD_BEEF;
    (0..len)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            if max == u8::MAX {
                state as u8
            } else {
                (state % (u32::from(max) + 1)) as u8
            }
        })
        .collect()
}

/// A planar ILBM with the given chunky pixels and palette.
pub fn ilbm_file(
    pixels: &[u8],
    width: u16,
    height: u16,
    planes: u8,
    compression: u8,
    palette: &[u8],
) -> Vec<u8> {
    let planar = planar_encode(pixels, width as usize, height as usize, planes as usize, false);
    let body = if compression == BYTERUN1 {
        let stride = bytes_per_row(width as usize) * planes as usize;
        if stride == 0 {
            Vec::new()
        } else {
            planar.chunks(stride).flat_map(byte_run1_encode).collect()
        }
    } else {
        planar
    };
    let mut builder =
        IffBuilder::ilbm().chunk(b"BMHD", &bmhd(width, height, planes, NO_MASK, compression));
    if !palette.is_empty() {
        builder = builder.chunk(b"CMAP", palette);
    }
    builder.chunk(b"BODY", &body).build()
}
