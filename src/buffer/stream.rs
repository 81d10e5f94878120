//! Append-only byte accumulator with a consuming cursor.

use tracing::trace;

use super::pool;
use crate::error::SplitError;

/// An append-only buffer whose front is consumed by advancing a cursor.
///
/// The unconsumed bytes are `storage[start..]`. Bytes before `start` are
/// logically gone and are never handed out again. [`StreamBuffer::put`] may
/// move the unconsumed range to the front of the storage before appending,
/// so the copy cost stays proportional to unconsumed bytes rather than to the
/// whole stream history. Logical content is unaffected.
///
/// The sanctioned consumption pattern is [`peek`](Self::peek) followed by
/// [`eat`](Self::eat) of at most the peeked length.
///
/// # Example
///
/// ```
/// use hashsplit::StreamBuffer;
///
/// let mut buf = StreamBuffer::new();
/// buf.put(b"hello ");
/// buf.put(b"world");
///
/// assert_eq!(buf.peek(5), b"hello");
/// buf.eat(6)?;
/// assert_eq!(buf.peek(100), b"world");
/// assert_eq!(buf.unconsumed_len(), 5);
///
/// assert!(buf.eat(6).is_err());
/// # Ok::<(), hashsplit::SplitError>(())
/// ```
#[derive(Debug)]
pub struct StreamBuffer {
    storage: Vec<u8>,
    start: usize,
}

impl StreamBuffer {
    /// Creates an empty buffer, reusing a pooled backing store if one is free.
    pub fn new() -> Self {
        Self {
            storage: pool::take(),
            start: 0,
        }
    }

    /// Appends bytes to the unconsumed range. Empty input is a no-op.
    pub fn put(&mut self, data: &[u8]) {
        if data.is_empty() {
            return;
        }

        if self.should_compact(data.len()) {
            self.compact();
        }

        self.storage.extend_from_slice(data);
    }

    /// Returns up to `count` unconsumed bytes without consuming them.
    ///
    /// The returned slice is shorter than `count` when fewer bytes are
    /// available; callers must check its length.
    pub fn peek(&self, count: usize) -> &[u8] {
        let end = self.start.saturating_add(count).min(self.storage.len());
        &self.storage[self.start..end]
    }

    /// Consumes `count` bytes from the front.
    ///
    /// # Errors
    ///
    /// Returns [`SplitError::Range`] if `count` exceeds
    /// [`unconsumed_len`](Self::unconsumed_len); nothing is consumed then.
    pub fn eat(&mut self, count: usize) -> Result<(), SplitError> {
        let available = self.unconsumed_len();
        if count > available {
            return Err(SplitError::Range {
                requested: count,
                available,
            });
        }

        self.start += count;
        if self.start == self.storage.len() {
            // Fully drained: rewind for free instead of compacting later
            self.storage.clear();
            self.start = 0;
        }
        Ok(())
    }

    /// Returns the number of bytes not yet consumed.
    pub fn unconsumed_len(&self) -> usize {
        self.storage.len() - self.start
    }

    /// Returns true if every byte put so far has been consumed.
    pub fn is_empty(&self) -> bool {
        self.unconsumed_len() == 0
    }

    /// Discards all bytes, consumed or not.
    pub fn clear(&mut self) {
        self.storage.clear();
        self.start = 0;
    }

    /// Compaction pays off once the dead prefix is at least as large as the
    /// live tail (so each byte is moved at most a bounded number of times),
    /// or when appending would otherwise force the vector to reallocate.
    fn should_compact(&self, incoming: usize) -> bool {
        if self.start == 0 {
            return false;
        }
        let live = self.unconsumed_len();
        self.start >= live || self.storage.len() + incoming > self.storage.capacity()
    }

    fn compact(&mut self) {
        let live = self.unconsumed_len();
        trace!(discarded = self.start, live, "compacting stream buffer");
        self.storage.copy_within(self.start.., 0);
        self.storage.truncate(live);
        self.start = 0;
    }
}

impl Default for StreamBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for StreamBuffer {
    fn drop(&mut self) {
        pool::recycle(std::mem::take(&mut self.storage));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_put_is_noop() {
        let mut buf = StreamBuffer::new();
        buf.put(b"");
        assert!(buf.is_empty());
        assert_eq!(buf.peek(10), b"");
    }

    #[test]
    fn test_peek_is_bounded_by_available() {
        let mut buf = StreamBuffer::new();
        buf.put(b"abc");
        assert_eq!(buf.peek(2), b"ab");
        assert_eq!(buf.peek(3), b"abc");
        assert_eq!(buf.peek(usize::MAX), b"abc");
        assert_eq!(buf.unconsumed_len(), 3, "peek must not consume");
    }

    #[test]
    fn test_eat_advances_cursor() {
        let mut buf = StreamBuffer::new();
        buf.put(b"abcdef");
        buf.eat(2).unwrap();
        assert_eq!(buf.peek(10), b"cdef");
        buf.eat(0).unwrap();
        assert_eq!(buf.unconsumed_len(), 4);
    }

    #[test]
    fn test_eat_past_end_fails_without_consuming() {
        let mut buf = StreamBuffer::new();
        buf.put(b"abc");
        let err = buf.eat(4).unwrap_err();
        assert!(matches!(
            err,
            SplitError::Range {
                requested: 4,
                available: 3
            }
        ));
        assert_eq!(buf.peek(10), b"abc");
    }

    #[test]
    fn test_put_preserves_unconsumed_across_compaction() {
        let mut buf = StreamBuffer::new();
        buf.put(b"0123456789");
        buf.eat(8).unwrap();
        // Dead prefix (8) >= live tail (2): this put compacts
        buf.put(b"abc");
        assert_eq!(buf.peek(100), b"89abc");
        assert_eq!(buf.start, 0);
        assert_eq!(buf.storage.len(), 5);
    }

    #[test]
    fn test_put_without_compaction_when_prefix_is_small() {
        let mut buf = StreamBuffer::new();
        buf.put(b"0123456789");
        buf.eat(2).unwrap();
        buf.put(b"ab");
        assert_eq!(buf.start, 2);
        assert_eq!(buf.peek(100), b"23456789ab");
    }

    #[test]
    fn test_full_drain_rewinds() {
        let mut buf = StreamBuffer::new();
        buf.put(b"abc");
        buf.eat(3).unwrap();
        assert!(buf.is_empty());
        assert_eq!(buf.start, 0);
        buf.put(b"xyz");
        assert_eq!(buf.peek(3), b"xyz");
    }

    #[test]
    fn test_many_small_puts_and_eats() {
        let data: Vec<u8> = (0..10_000u32).map(|i| (i % 251) as u8).collect();
        let mut buf = StreamBuffer::new();
        let mut out = Vec::new();

        for piece in data.chunks(7) {
            buf.put(piece);
            let take = buf.unconsumed_len() / 2;
            out.extend_from_slice(buf.peek(take));
            buf.eat(take).unwrap();
        }
        out.extend_from_slice(buf.peek(buf.unconsumed_len()));

        assert_eq!(out, data);
    }

    #[test]
    fn test_clear() {
        let mut buf = StreamBuffer::new();
        buf.put(b"abc");
        buf.eat(1).unwrap();
        buf.clear();
        assert!(buf.is_empty());
        assert_eq!(buf.peek(10), b"");
    }
}
