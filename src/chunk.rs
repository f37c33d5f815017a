//! IFF container framing: the `FORM` header and the chunk stream after it.
//!
//! Every chunk is a four-byte tag, a big-endian `u32` payload length, the
//! payload, and one pad byte when the length is odd.

use core::fmt;

use crate::endian::{tag_at, u32_at};
use crate::error::IlbmError;

/// Size of the `FORM` header: tag, total size, subtype.
pub const HEADER_SIZE: usize = 12;

/// Size of a chunk descriptor: tag and payload length.
pub const DESCRIPTOR_SIZE: usize = 8;

/// Known chunks that carry nothing this decoder uses; skipped without error.
pub const SKIPPED_CHUNKS: [ChunkId; 6] = [
    ChunkId(*b"CRNG"),
    ChunkId(*b"CAMG"),
    ChunkId(*b"GRAB"),
    ChunkId(*b"DPPS"),
    ChunkId(*b"ANNO"),
    ChunkId(*b"DPI "),
];

/// A four-character chunk tag.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChunkId(pub [u8; 4]);

impl ChunkId {
    pub const FORM: Self = Self(*b"FORM");
    pub const ILBM: Self = Self(*b"ILBM");
    pub const PBM: Self = Self(*b"PBM ");
    pub const BMHD: Self = Self(*b"BMHD");
    pub const CMAP: Self = Self(*b"CMAP");
    pub const BODY: Self = Self(*b"BODY");

    /// Raw tag bytes.
    pub fn as_bytes(&self) -> &[u8; 4] {
        &self.0
    }

    /// Whether this tag is in [`SKIPPED_CHUNKS`].
    pub fn is_skipped(&self) -> bool {
        SKIPPED_CHUNKS.contains(self)
    }
}

impl fmt::Display for ChunkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &b in &self.0 {
            if b.is_ascii_graphic() || b == b' ' {
                write!(f, "{}", b as char)?;
            } else {
                write!(f, "\\x{b:02x}")?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for ChunkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ChunkId(\"{self}\")")
    }
}

/// IFF form subtype.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FormType {
    /// Interleaved bitplanes.
    Ilbm,
    /// Packed (chunky) bitmap, as written by DeluxePaint II Enhanced.
    Pbm,
}

/// The fixed header at offset 0.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IffHeader {
    pub form_tag: ChunkId,
    /// Size field as written; counts the subtype and the chunk stream.
    pub total_size: u32,
    pub sub_type: ChunkId,
}

impl IffHeader {
    /// Form kind for the subtype. Always `Some` for a header returned by [`parse_header`].
    pub fn form_type(&self) -> Option<FormType> {
        match self.sub_type {
            ChunkId::ILBM => Some(FormType::Ilbm),
            ChunkId::PBM => Some(FormType::Pbm),
            _ => None,
        }
    }
}

/// Read and validate the `FORM` header.
pub fn parse_header(data: &[u8]) -> Result<IffHeader, IlbmError> {
    if data.len() < HEADER_SIZE {
        return Err(IlbmError::invalid(alloc::format!(
            "{} bytes is shorter than the {HEADER_SIZE}-byte FORM header",
            data.len()
        )));
    }
    let (Some(form_tag), Some(total_size), Some(sub_type)) =
        (tag_at(data, 0), u32_at(data, 4), tag_at(data, 8))
    else {
        return Err(IlbmError::invalid("truncated FORM header"));
    };
    let header = IffHeader {
        form_tag: ChunkId(form_tag),
        total_size,
        sub_type: ChunkId(sub_type),
    };
    if header.form_tag != ChunkId::FORM {
        return Err(IlbmError::invalid(alloc::format!(
            "expected FORM, found {}",
            header.form_tag
        )));
    }
    if header.form_type().is_none() {
        return Err(IlbmError::invalid(alloc::format!(
            "unsupported FORM subtype {}",
            header.sub_type
        )));
    }
    Ok(header)
}

/// Tag and payload length of one chunk.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChunkDescriptor {
    pub chunk_type: ChunkId,
    pub chunk_size: u32,
}

/// One chunk: its descriptor, its payload, and where the descriptor starts.
#[derive(Clone, Copy, Debug)]
pub struct Chunk<'a> {
    pub descriptor: ChunkDescriptor,
    pub payload: &'a [u8],
    pub offset: usize,
}

impl Chunk<'_> {
    pub fn id(&self) -> ChunkId {
        self.descriptor.chunk_type
    }
}

/// Walk the chunk stream of `data` from `start`.
///
/// The walk ends when the offset lands exactly on `data.len()`. Anything
/// else that would step outside the buffer yields `CorruptFile` once, after
/// which the iterator is exhausted.
pub fn iterate_chunks(data: &[u8], start: usize) -> Chunks<'_> {
    Chunks {
        data,
        offset: start,
        done: false,
    }
}

/// Iterator returned by [`iterate_chunks`].
#[derive(Clone, Debug)]
pub struct Chunks<'a> {
    data: &'a [u8],
    offset: usize,
    done: bool,
}

impl<'a> Chunks<'a> {
    /// Current offset of the walk.
    pub fn offset(&self) -> usize {
        self.offset
    }

    fn fail(&mut self, msg: alloc::string::String) -> Option<Result<Chunk<'a>, IlbmError>> {
        self.done = true;
        Some(Err(IlbmError::CorruptFile(msg)))
    }
}

impl<'a> Iterator for Chunks<'a> {
    type Item = Result<Chunk<'a>, IlbmError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let len = self.data.len();
        if self.offset == len {
            self.done = true;
            return None;
        }
        if self.offset > len {
            return self.fail(alloc::format!(
                "chunk stream ends at {} past buffer end {len} (missing pad byte)",
                self.offset
            ));
        }

        let offset = self.offset;
        let (Some(tag), Some(chunk_size)) = (tag_at(self.data, offset), u32_at(self.data, offset + 4))
        else {
            return self.fail(alloc::format!(
                "truncated chunk descriptor at offset {offset}"
            ));
        };
        let chunk_type = ChunkId(tag);

        let payload_start = offset + DESCRIPTOR_SIZE;
        let payload_end = match payload_start.checked_add(chunk_size as usize) {
            Some(end) if end <= len => end,
            _ => {
                return self.fail(alloc::format!(
                    "{chunk_type} chunk at offset {offset} claims {chunk_size} bytes, \
                     only {} remain",
                    len - payload_start
                ));
            }
        };

        log::trace!("chunk {chunk_type} size {chunk_size} at offset {offset}");

        self.offset = payload_end + (payload_end & 1);
        Some(Ok(Chunk {
            descriptor: ChunkDescriptor {
                chunk_type,
                chunk_size,
            },
            payload: &self.data[payload_start..payload_end],
            offset,
        }))
    }
}

impl core::iter::FusedIterator for Chunks<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    fn form(sub: &[u8; 4], chunks: &[(&[u8; 4], &[u8])]) -> Vec<u8> {
        let mut out = Vec::new();
        out.extend_from_slice(b"FORM");
        out.extend_from_slice(&[0; 4]);
        out.extend_from_slice(sub);
        for (tag, payload) in chunks {
            out.extend_from_slice(*tag);
            out.extend_from_slice(&(payload.len() as u32).to_be_bytes());
            out.extend_from_slice(payload);
            if payload.len() % 2 == 1 {
                out.push(0);
            }
        }
        let size = (out.len() - 8) as u32;
        out[4..8].copy_from_slice(&size.to_be_bytes());
        out
    }

    #[test]
    fn header_accepts_ilbm_and_pbm() {
        let ilbm = form(b"ILBM", &[]);
        let header = parse_header(&ilbm).unwrap();
        assert_eq!(header.form_type(), Some(FormType::Ilbm));
        assert_eq!(header.total_size, 4);

        let pbm = form(b"PBM ", &[]);
        assert_eq!(parse_header(&pbm).unwrap().form_type(), Some(FormType::Pbm));
    }

    #[test]
    fn header_rejects_short_and_foreign() {
        assert!(matches!(
            parse_header(b"FORM\0\0\0\x04IL"),
            Err(IlbmError::InvalidFile(_))
        ));
        assert!(matches!(
            parse_header(&form(b"8SVX", &[])),
            Err(IlbmError::InvalidFile(_))
        ));
        let mut riff = form(b"ILBM", &[]);
        riff[..4].copy_from_slice(b"RIFF");
        assert!(matches!(parse_header(&riff), Err(IlbmError::InvalidFile(_))));
    }

    #[test]
    fn walk_honors_padding_and_terminates() {
        let data = form(b"ILBM", &[(b"ANNO", &b"odd"[..]), (b"CMAP", &[1, 2, 3, 4, 5, 6][..])]);
        let chunks: Vec<_> = iterate_chunks(&data, HEADER_SIZE)
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].id(), ChunkId(*b"ANNO"));
        assert_eq!(chunks[0].payload, b"odd");
        assert_eq!(chunks[1].id(), ChunkId::CMAP);
        assert_eq!(chunks[1].offset, HEADER_SIZE + 8 + 4);
        assert_eq!(chunks[1].payload, &[1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn empty_stream_yields_nothing() {
        let data = form(b"ILBM", &[]);
        assert_eq!(iterate_chunks(&data, HEADER_SIZE).count(), 0);
    }

    #[test]
    fn oversized_chunk_is_corrupt() {
        let mut data = form(b"ILBM", &[(b"CMAP", &[0; 6][..])]);
        let size_at = HEADER_SIZE + 4;
        data[size_at..size_at + 4].copy_from_slice(&1000u32.to_be_bytes());
        let mut walk = iterate_chunks(&data, HEADER_SIZE);
        assert!(matches!(walk.next(), Some(Err(IlbmError::CorruptFile(_)))));
        assert!(walk.next().is_none());
    }

    #[test]
    fn huge_size_does_not_overflow() {
        let mut data = form(b"ILBM", &[(b"BODY", &[0; 2][..])]);
        let size_at = HEADER_SIZE + 4;
        data[size_at..size_at + 4].copy_from_slice(&u32::MAX.to_be_bytes());
        let err = iterate_chunks(&data, HEADER_SIZE).next().unwrap();
        assert!(matches!(err, Err(IlbmError::CorruptFile(_))));
    }

    #[test]
    fn missing_final_pad_byte_is_corrupt() {
        let mut data = form(b"ILBM", &[(b"ANNO", &b"abc"[..])]);
        data.pop();
        let results: Vec<_> = iterate_chunks(&data, HEADER_SIZE).collect();
        assert_eq!(results.len(), 2);
        assert!(results[0].is_ok());
        assert!(matches!(results[1], Err(IlbmError::CorruptFile(_))));
    }

    #[test]
    fn truncated_descriptor_is_corrupt() {
        let mut data = form(b"ILBM", &[]);
        data.extend_from_slice(b"BMH");
        let results: Vec<_> = iterate_chunks(&data, HEADER_SIZE).collect();
        assert_eq!(results.len(), 1);
        assert!(matches!(results[0], Err(IlbmError::CorruptFile(_))));
    }

    #[test]
    fn display_escapes_binary_tags() {
        assert_eq!(alloc::format!("{}", ChunkId(*b"DPI ")), "DPI ");
        assert_eq!(alloc::format!("{}", ChunkId([b'A', 0, b'B', 0xff])), "A\\x00B\\xff");
        assert!(ChunkId(*b"CAMG").is_skipped());
        assert!(!ChunkId(*b"XXXX").is_skipped());
    }
}
