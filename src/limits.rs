use alloc::format;

use crate::IlbmError;
use crate::header::BitmapHeader;

/// Caps applied while decoding. `None` leaves a dimension unchecked.
///
/// Width and height are compared against the BMHD, so anything above
/// `u16::MAX` never rejects.
#[derive(Clone, Debug, Default)]
pub struct Limits {
    pub max_width: Option<u16>,
    pub max_height: Option<u16>,
    /// Upper bound on `width * height`.
    pub max_pixels: Option<u64>,
    /// Largest single buffer: decompressed BODY or output pixels.
    pub max_memory_bytes: Option<u64>,
}

impl Limits {
    /// Compare the BMHD dimensions against the caps.
    pub(crate) fn check_header(&self, header: &BitmapHeader) -> Result<(), IlbmError> {
        let (width, height) = (header.width, header.height);
        if self.max_width.is_some_and(|max| width > max) {
            return Err(exceeded("width", u64::from(width), self.max_width));
        }
        if self.max_height.is_some_and(|max| height > max) {
            return Err(exceeded("height", u64::from(height), self.max_height));
        }
        let pixels = u64::from(width) * u64::from(height);
        if self.max_pixels.is_some_and(|max| pixels > max) {
            return Err(exceeded("pixel count", pixels, self.max_pixels));
        }
        Ok(())
    }

    pub(crate) fn check_memory(&self, bytes: usize) -> Result<(), IlbmError> {
        let bytes = bytes as u64;
        if self.max_memory_bytes.is_some_and(|max| bytes > max) {
            return Err(exceeded("allocation size", bytes, self.max_memory_bytes));
        }
        Ok(())
    }
}

fn exceeded(what: &str, value: u64, max: Option<impl Into<u64>>) -> IlbmError {
    let max: u64 = max.map_or(0, Into::into);
    IlbmError::LimitExceeded(format!("{what} {value} exceeds limit {max}"))
}
