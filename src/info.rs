use crate::chunk::{self, ChunkId, FormType};
use crate::decode::{open_form, read_bmhd};
use crate::error::IlbmError;
use crate::header::{Compression, Masking};
use crate::pixel::PixelLayout;

/// Image metadata read from the BMHD chunk, without decoding BODY.
#[derive(Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub struct ImageInfo {
    pub width: u16,
    pub height: u16,
    pub planes: u8,
    pub form: FormType,
    pub masking: Masking,
    pub compression: Compression,
    pub layout: PixelLayout,
}

impl ImageInfo {
    /// Walk chunks up to the first BMHD.
    ///
    /// Chunks before BMHD are validated the same way a full decode would
    /// validate them (strict chunk policy).
    pub fn from_bytes(data: &[u8]) -> Result<Self, IlbmError> {
        let (_, form) = open_form(data)?;
        for chunk in chunk::iterate_chunks(data, chunk::HEADER_SIZE) {
            let chunk = chunk?;
            match chunk.id() {
                ChunkId::BMHD => {
                    let header = read_bmhd(chunk.payload, None)?;
                    return Ok(Self {
                        width: header.width,
                        height: header.height,
                        planes: header.planes,
                        form,
                        masking: header.masking,
                        compression: header.compression,
                        layout: header.layout(),
                    });
                }
                ChunkId::BODY => return Err(IlbmError::corrupt("BODY chunk before BMHD")),
                ChunkId::CMAP => {}
                id if id.is_skipped() => {}
                id => return Err(IlbmError::UnsupportedChunk(id)),
            }
        }
        Err(IlbmError::corrupt("no BMHD chunk"))
    }
}
