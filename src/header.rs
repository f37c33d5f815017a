//! BMHD: the bitmap header chunk.

use crate::endian::{i16_at, u8_at, u16_at};
use crate::error::IlbmError;
use crate::pixel::PixelLayout;

/// Wire size of a BMHD payload.
pub const BMHD_SIZE: usize = 20;

/// How the image marks transparent pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Masking {
    None,
    /// An extra mask bitplane follows the colour planes of every row.
    HasMask,
    /// Pixels equal to `transparent_color` are transparent.
    HasTransparentColor,
    Lasso,
}

impl Masking {
    fn from_u8(v: u8) -> Option<Self> {
        match v {
            0 => Some(Self::None),
            1 => Some(Self::HasMask),
            2 => Some(Self::HasTransparentColor),
            3 => Some(Self::Lasso),
            _ => None,
        }
    }
}

/// BODY compression scheme.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Compression {
    None,
    ByteRun1,
}

/// Decoded BMHD chunk, all fields in host byte order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BitmapHeader {
    pub width: u16,
    pub height: u16,
    pub x_origin: i16,
    pub y_origin: i16,
    pub planes: u8,
    pub masking: Masking,
    pub compression: Compression,
    pub transparent_color: u16,
    pub x_aspect: u8,
    pub y_aspect: u8,
    pub page_width: i16,
    pub page_height: i16,
}

impl BitmapHeader {
    /// Decode a BMHD payload. Extra trailing bytes are ignored.
    pub fn parse(payload: &[u8]) -> Result<Self, IlbmError> {
        if payload.len() < BMHD_SIZE {
            return Err(IlbmError::corrupt(alloc::format!(
                "BMHD payload is {} bytes, need {BMHD_SIZE}",
                payload.len()
            )));
        }
        let truncated = || IlbmError::corrupt("truncated BMHD");
        let u8f = |off| u8_at(payload, off).ok_or_else(truncated);
        let u16f = |off| u16_at(payload, off).ok_or_else(truncated);
        let i16f = |off| i16_at(payload, off).ok_or_else(truncated);

        let masking_raw = u8f(9)?;
        let masking = Masking::from_u8(masking_raw).ok_or_else(|| {
            IlbmError::corrupt(alloc::format!("unknown BMHD masking {masking_raw}"))
        })?;
        let compression = match u8f(10)? {
            0 => Compression::None,
            1 => Compression::ByteRun1,
            other => {
                return Err(IlbmError::corrupt(alloc::format!(
                    "unknown BMHD compression {other}"
                )));
            }
        };

        let header = Self {
            width: u16f(0)?,
            height: u16f(2)?,
            x_origin: i16f(4)?,
            y_origin: i16f(6)?,
            planes: u8f(8)?,
            masking,
            compression,
            // offset 11 is padding
            transparent_color: u16f(12)?,
            x_aspect: u8f(14)?,
            y_aspect: u8f(15)?,
            page_width: i16f(16)?,
            page_height: i16f(18)?,
        };

        header.validate()?;
        Ok(header)
    }

    /// Reject plane counts the chunky conversion cannot represent. A row
    /// must store at least one plane.
    pub fn validate(&self) -> Result<(), IlbmError> {
        if self.stored_planes() == 0 {
            return Err(IlbmError::corrupt("BMHD declares no bitplanes"));
        }
        if self.planes > 8 && self.planes % 8 != 0 {
            return Err(IlbmError::corrupt(alloc::format!(
                "{} bitplanes; deep images need a multiple of 8",
                self.planes
            )));
        }
        Ok(())
    }

    /// Bytes in one bitplane row, padded to a 16-bit word.
    pub fn bytes_per_row(&self) -> usize {
        ((usize::from(self.width) + 15) >> 4) << 1
    }

    pub fn bytes_per_pixel(&self) -> usize {
        if self.planes > 8 {
            usize::from(self.planes >> 3)
        } else {
            1
        }
    }

    pub fn bits_per_pixel(&self) -> usize {
        self.bytes_per_pixel() * 8
    }

    /// Indexed colour (palette lookup) images have at most 8 planes.
    pub fn is_indexed(&self) -> bool {
        self.planes <= 8
    }

    pub fn is_compressed(&self) -> bool {
        self.compression == Compression::ByteRun1
    }

    /// Planes stored per row in BODY, counting the mask plane.
    pub fn stored_planes(&self) -> usize {
        usize::from(self.planes) + usize::from(self.masking == Masking::HasMask)
    }

    pub fn layout(&self) -> PixelLayout {
        PixelLayout::from_planes(self.planes)
    }
}
