//! The chunk descriptor emitted by the splitter.

use std::fmt;
use std::ops::Range;

/// Where one chunk lies in the stream, and how rare its end boundary is.
///
/// Descriptors carry no bytes; callers slice their own copy of the input
/// with [`range`](Self::range), or use [`crate::Splitter::next_chunk`] to get
/// the bytes alongside.
///
/// # Example
///
/// ```
/// use hashsplit::{SplitConfig, SplitEvent, Splitter};
///
/// let mut splitter = Splitter::new(SplitConfig::new(13, 1, 8192)?);
/// splitter.put(&[0u8; 10_000])?;
/// splitter.finish()?;
///
/// let SplitEvent::Chunk(first) = splitter.next()? else { unreachable!() };
/// assert_eq!(first.range(), 0..8192);
/// assert_eq!(first.level, 0);
/// assert!(!first.is_final);
/// # Ok::<(), hashsplit::SplitError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChunkDescriptor {
    /// Stream position of the chunk's first byte.
    pub offset: u64,

    /// Number of bytes in the chunk (always at least 1).
    pub len: usize,

    /// Boundary level: 0 for ordinary boundaries, higher for rarer ones.
    pub level: u32,

    /// True only for the trailing chunk emitted by the end-of-stream flush.
    pub is_final: bool,
}

impl ChunkDescriptor {
    /// Returns the end offset (exclusive).
    pub fn end(&self) -> u64 {
        self.offset + self.len as u64
    }

    /// Returns the chunk as a stream range.
    pub fn range(&self) -> Range<u64> {
        self.offset..self.end()
    }
}

impl fmt::Display for ChunkDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}+{} L{}", self.offset, self.len, self.level)?;
        if self.is_final {
            f.write_str(" (final)")?;
        }
        Ok(())
    }
}
