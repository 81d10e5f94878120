//! The Chunk type - a descriptor together with the bytes it covers.

use bytes::Bytes;
use std::fmt;

use super::{ChunkDescriptor, ChunkHash};

/// A content-defined chunk with its bytes.
///
/// Produced by [`crate::Splitter::next_chunk`] and by the reader drivers.
/// `hash` is only filled in by the drivers, when hashing is enabled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// The chunk data.
    pub data: Bytes,

    /// Position, level and finality of the chunk.
    pub descriptor: ChunkDescriptor,

    /// The content hash of this chunk (if computed).
    pub hash: Option<ChunkHash>,
}

impl Chunk {
    /// Returns the length of the chunk data.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the chunk has no data. Never the case for chunks the
    /// splitter emits.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the stream offset of the first byte.
    pub fn offset(&self) -> u64 {
        self.descriptor.offset
    }

    /// Returns the boundary level.
    pub fn level(&self) -> u32 {
        self.descriptor.level
    }

    /// Returns true for the chunk emitted by the end-of-stream flush.
    pub fn is_final(&self) -> bool {
        self.descriptor.is_final
    }

    /// Consumes the chunk and returns the underlying data.
    pub fn into_data(self) -> Bytes {
        self.data
    }
}

impl fmt::Display for Chunk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Chunk({})", self.descriptor)?;
        if let Some(hash) = self.hash {
            write!(f, " {}", hash)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk(data: &'static [u8], offset: u64, level: u32) -> Chunk {
        Chunk {
            data: Bytes::from_static(data),
            descriptor: ChunkDescriptor {
                offset,
                len: data.len(),
                level,
                is_final: false,
            },
            hash: None,
        }
    }

    #[test]
    fn test_accessors() {
        let c = chunk(b"hello", 100, 3);
        assert_eq!(c.len(), 5);
        assert!(!c.is_empty());
        assert_eq!(c.offset(), 100);
        assert_eq!(c.level(), 3);
        assert!(!c.is_final());
        assert_eq!(c.into_data(), Bytes::from_static(b"hello"));
    }

    #[test]
    fn test_display() {
        let mut c = chunk(b"hello", 100, 0);
        assert_eq!(c.to_string(), "Chunk(100+5 L0)");

        c.hash = Some(ChunkHash::new([0xab; 32]));
        assert!(c.to_string().ends_with(&"ab".repeat(32)));
    }
}
