use alloc::vec::Vec;

use enough::Stop;

use crate::body;
use crate::chunk::{self, Chunk, ChunkId, FormType, IffHeader};
use crate::error::IlbmError;
use crate::header::BitmapHeader;
use crate::limits::Limits;
use crate::palette::Palette;
use crate::pixel::PixelLayout;

/// How to treat chunk tags that are neither decoded nor on the skip list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChunkPolicy {
    /// Abort with [`IlbmError::UnsupportedChunk`].
    #[default]
    Strict,
    /// Skip them, like most IFF readers.
    Lenient,
}

/// Decoded image: chunky pixels plus the palette they index into.
#[derive(Clone, Debug)]
pub struct DecodeOutput {
    pixels: Vec<u8>,
    palette: Palette,
    pub width: u16,
    pub height: u16,
    pub bits_per_pixel: u8,
    pub bytes_per_pixel: u8,
    pub layout: PixelLayout,
    pub form: FormType,
    /// The BMHD chunk the pixels were decoded with.
    pub header: BitmapHeader,
}

impl DecodeOutput {
    /// Row-major pixel data, `width * height * bytes_per_pixel` bytes, no row padding.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Take ownership of the pixel data.
    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }

    /// Colour map for indexed images; empty for deep (direct colour) images.
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// True iff the image has at most 8 bitplanes.
    pub fn is_indexed(&self) -> bool {
        self.layout.is_indexed()
    }

    /// Reinterpret pixel data as typed pixel slice.
    ///
    /// Returns [`IlbmError::LayoutMismatch`] if the pixel layout doesn't match `P`.
    #[cfg(feature = "rgb")]
    pub fn as_pixels<P: crate::DecodePixel>(&self) -> Result<&[P], IlbmError> {
        if self.layout != P::layout() {
            return Err(IlbmError::LayoutMismatch {
                expected: P::layout(),
                actual: self.layout,
            });
        }
        Ok(P::cast_slice(&self.pixels))
    }

    /// Zero-copy view as an [`imgref::ImgRef`] of typed pixels.
    #[cfg(feature = "imgref")]
    pub fn as_imgref<P: crate::DecodePixel>(&self) -> Result<imgref::ImgRef<'_, P>, IlbmError> {
        let pixels: &[P] = self.as_pixels()?;
        Ok(imgref::ImgRef::new(
            pixels,
            usize::from(self.width),
            usize::from(self.height),
        ))
    }

    /// Convert to an [`imgref::ImgVec`] of typed pixels.
    #[cfg(feature = "imgref")]
    pub fn to_imgvec<P: crate::DecodePixel>(&self) -> Result<imgref::ImgVec<P>, IlbmError> {
        let pixels: &[P] = self.as_pixels()?;
        Ok(imgref::ImgVec::new(
            pixels.to_vec(),
            usize::from(self.width),
            usize::from(self.height),
        ))
    }
}

/// Builder for a decode call.
///
/// ```no_run
/// use zenilbm::{ChunkPolicy, DecodeRequest, Limits, Unstoppable};
///
/// let data: &[u8] = &[]; // your IFF bytes
/// let limits = Limits { max_pixels: Some(4096 * 4096), ..Default::default() };
/// let decoded = DecodeRequest::new(data)
///     .with_limits(&limits)
///     .with_chunk_policy(ChunkPolicy::Lenient)
///     .decode(Unstoppable)?;
/// # Ok::<(), zenilbm::IlbmError>(())
/// ```
#[derive(Clone, Debug)]
pub struct DecodeRequest<'a> {
    data: &'a [u8],
    limits: Option<&'a Limits>,
    policy: ChunkPolicy,
}

impl<'a> DecodeRequest<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            limits: None,
            policy: ChunkPolicy::default(),
        }
    }

    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    pub fn with_chunk_policy(mut self, policy: ChunkPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn decode(self, stop: impl Stop) -> Result<DecodeOutput, IlbmError> {
        decode_form(self.data, self.limits, self.policy, &stop)
    }
}

/// Whether a BMHD has been seen yet.
#[derive(Clone, Copy, Debug)]
enum HeaderState {
    NoHeaderYet,
    HeaderKnown(BitmapHeader),
}

/// Per-call accumulators driven by chunk dispatch.
struct Dispatch<'l> {
    form: FormType,
    limits: Option<&'l Limits>,
    policy: ChunkPolicy,
    header: HeaderState,
    palette: Palette,
    pixels: Option<Vec<u8>>,
}

impl<'l> Dispatch<'l> {
    fn new(form: FormType, limits: Option<&'l Limits>, policy: ChunkPolicy) -> Self {
        Self {
            form,
            limits,
            policy,
            header: HeaderState::NoHeaderYet,
            palette: Palette::new(),
            pixels: None,
        }
    }

    fn handle(&mut self, chunk: &Chunk<'_>, stop: &dyn Stop) -> Result<(), IlbmError> {
        match chunk.id() {
            ChunkId::BMHD => {
                if let HeaderState::HeaderKnown(_) = self.header {
                    return Err(IlbmError::corrupt(alloc::format!(
                        "second BMHD chunk at offset {}",
                        chunk.offset
                    )));
                }
                self.header = HeaderState::HeaderKnown(read_bmhd(chunk.payload, self.limits)?);
            }
            ChunkId::CMAP => self.palette.extend(chunk.payload),
            ChunkId::BODY => {
                let HeaderState::HeaderKnown(header) = self.header else {
                    return Err(IlbmError::corrupt("BODY chunk before BMHD"));
                };
                if self.pixels.is_some() {
                    return Err(IlbmError::corrupt(alloc::format!(
                        "second BODY chunk at offset {}",
                        chunk.offset
                    )));
                }
                let pixels = match self.form {
                    FormType::Ilbm => body::decode_planar(chunk.payload, &header, self.limits, stop)?,
                    FormType::Pbm => body::decode_chunky(chunk.payload, &header, self.limits, stop)?,
                };
                self.pixels = Some(pixels);
            }
            id if id.is_skipped() => log::debug!("skipping {id} chunk ({} bytes)", chunk.payload.len()),
            id => match self.policy {
                ChunkPolicy::Strict => return Err(IlbmError::UnsupportedChunk(id)),
                ChunkPolicy::Lenient => {
                    log::debug!("skipping unknown {id} chunk at offset {}", chunk.offset)
                }
            },
        }
        Ok(())
    }

    fn finish(self) -> Result<DecodeOutput, IlbmError> {
        let HeaderState::HeaderKnown(header) = self.header else {
            return Err(IlbmError::corrupt("no BMHD chunk"));
        };
        let Some(pixels) = self.pixels else {
            return Err(IlbmError::corrupt("no BODY chunk"));
        };
        let layout = header.layout();
        let palette = if layout.is_indexed() {
            self.palette
        } else {
            Palette::new()
        };
        Ok(DecodeOutput {
            pixels,
            palette,
            width: header.width,
            height: header.height,
            bits_per_pixel: header.bits_per_pixel() as u8,
            bytes_per_pixel: header.bytes_per_pixel() as u8,
            layout,
            form: self.form,
            header,
        })
    }
}

pub(crate) fn read_bmhd(payload: &[u8], limits: Option<&Limits>) -> Result<BitmapHeader, IlbmError> {
    let header = BitmapHeader::parse(payload)?;
    if let Some(limits) = limits {
        limits.check_header(&header)?;
    }
    Ok(header)
}

/// Parse the FORM header and note a size field that disagrees with the buffer.
pub(crate) fn open_form(data: &[u8]) -> Result<(IffHeader, FormType), IlbmError> {
    let iff = chunk::parse_header(data)?;
    let form = iff
        .form_type()
        .ok_or_else(|| IlbmError::invalid("unsupported FORM subtype"))?;
    let declared = u64::from(iff.total_size) + 8;
    if declared != data.len() as u64 {
        log::debug!(
            "FORM size field says {declared} bytes, buffer has {}",
            data.len()
        );
    }
    Ok((iff, form))
}

fn decode_form(
    data: &[u8],
    limits: Option<&Limits>,
    policy: ChunkPolicy,
    stop: &dyn Stop,
) -> Result<DecodeOutput, IlbmError> {
    let (_, form) = open_form(data)?;
    stop.check()?;

    let mut dispatch = Dispatch::new(form, limits, policy);
    for chunk in chunk::iterate_chunks(data, chunk::HEADER_SIZE) {
        let chunk = chunk?;
        stop.check()?;
        dispatch.handle(&chunk, stop)?;
    }
    dispatch.finish()
}
