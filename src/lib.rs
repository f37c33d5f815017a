//! # zenilbm
//!
//! Decoder for Amiga IFF raster images: `FORM ILBM` (interleaved bitplanes)
//! and `FORM PBM ` (packed chunky pixels, as written by DeluxePaint).
//!
//! The whole decode is one pass over an in-memory buffer. Every chunk length
//! and row stride is checked against the buffer before it is used, so hostile
//! input produces an [`IlbmError`], never a panic or an out-of-bounds read.
//!
//! ## Pipeline
//!
//! 1. [`chunk`] — `FORM` header and the chunk stream (tag, big-endian size,
//!    payload, pad byte).
//! 2. Dispatch — `BMHD` sets the header, `CMAP` payloads are concatenated into
//!    the [`Palette`], `BODY` is decoded. `CRNG`, `CAMG`, `GRAB`, `DPPS`,
//!    `ANNO` and `DPI ` are skipped. Any other tag fails with
//!    [`IlbmError::UnsupportedChunk`] unless [`ChunkPolicy::Lenient`] is set.
//! 3. [`body`] — optional ByteRun1 decompression, then planar-to-chunky
//!    conversion, one scanline at a time.
//!
//! ## Output
//!
//! Images with up to 8 bitplanes decode to one palette index per pixel
//! ([`PixelLayout::Indexed8`]). Deeper images decode to one byte per group of
//! 8 planes: 24 planes give RGB, 32 give RGBA. Building a displayable image
//! from the pixels and palette is left to the caller.
//!
//! ## Non-Goals
//!
//! - Encoding IFF files
//! - Decoding chunks other than BMHD, CMAP and BODY
//! - Colour conversion (HAM, EHB, palette expansion)
//!
//! ## Usage
//!
//! ```no_run
//! use zenilbm::{DecodeRequest, ImageInfo, Unstoppable};
//!
//! let data: &[u8] = &[]; // your ILBM/PBM bytes
//!
//! // Probe without decoding
//! let info = ImageInfo::from_bytes(data)?;
//! println!("{}x{} {} planes", info.width, info.height, info.planes);
//!
//! let decoded = DecodeRequest::new(data).decode(Unstoppable)?;
//! if decoded.is_indexed() {
//!     for &index in decoded.pixels() {
//!         let _rgb = decoded.palette().get(usize::from(index));
//!     }
//! }
//! # Ok::<(), zenilbm::IlbmError>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

mod decode;
mod error;
mod header;
mod info;
mod limits;
mod palette;
mod pixel;

pub mod body;
pub mod chunk;
pub mod endian;

// Re-exports
pub use chunk::{ChunkId, FormType, IffHeader};
pub use decode::{ChunkPolicy, DecodeOutput, DecodeRequest};
pub use enough::{Stop, Unstoppable};
pub use error::IlbmError;
pub use header::{BitmapHeader, Compression, Masking};
pub use info::ImageInfo;
pub use limits::Limits;
pub use palette::Palette;
#[cfg(feature = "rgb")]
pub use pixel::DecodePixel;
pub use pixel::PixelLayout;

/// Decode an ILBM or PBM file with default settings.
pub fn decode(data: &[u8], stop: impl Stop) -> Result<DecodeOutput, IlbmError> {
    DecodeRequest::new(data).decode(stop)
}
