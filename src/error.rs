use alloc::string::String;
use enough::StopReason;

use crate::chunk::ChunkId;

/// Errors from IFF ILBM/PBM decoding.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum IlbmError {
    /// Not an IFF image: short header, missing `FORM`, or unknown subtype.
    #[error("invalid file: {0}")]
    InvalidFile(String),

    /// Chunk tag outside both the decoded and the skipped sets.
    #[error("unsupported chunk: {0}")]
    UnsupportedChunk(ChunkId),

    /// Structural damage: chunk overrun, BODY before BMHD, short pixel data.
    #[error("corrupt file: {0}")]
    CorruptFile(String),

    #[error("dimensions too large: {width}x{height}")]
    DimensionsTooLarge { width: u32, height: u32 },

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("pixel layout mismatch: expected {expected:?}, got {actual:?}")]
    LayoutMismatch {
        expected: crate::PixelLayout,
        actual: crate::PixelLayout,
    },

    #[error("operation cancelled")]
    Cancelled(StopReason),
}

impl From<StopReason> for IlbmError {
    fn from(r: StopReason) -> Self {
        IlbmError::Cancelled(r)
    }
}

impl IlbmError {
    pub(crate) fn corrupt(msg: impl Into<String>) -> Self {
        IlbmError::CorruptFile(msg.into())
    }

    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        IlbmError::InvalidFile(msg.into())
    }
}
