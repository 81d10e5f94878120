//! Synchronous reader driver - `SplitIter` and `split_bytes`.
//!
//! [`SplitIter`] runs the `put`/`next`/`finish` loop of a [`Splitter`] over
//! any [`std::io::Read`] source and yields [`Chunk`]s with their bytes.
//!
//! # Example
//!
//! ```no_run
//! use std::fs::File;
//! use hashsplit::{SplitConfig, Splitter};
//!
//! let file = File::open("data.bin")?;
//! let splitter = Splitter::new(SplitConfig::default());
//!
//! for chunk in splitter.split_reader(file) {
//!     let chunk = chunk?;
//!     println!("{}", chunk);
//! }
//! # Ok::<(), hashsplit::SplitError>(())
//! ```

use std::fmt;
use std::io::{ErrorKind, Read};

use tracing::debug;

use super::engine::{SplitEvent, Splitter};
use crate::chunk::Chunk;
use crate::config::SplitConfig;
use crate::error::SplitError;
use crate::hash::hash_chunk;

/// Number of bytes requested from the reader per `read` call.
pub const READ_BLOCK_SIZE: usize = 64 * 1024;

type ProgressFn<'a> = Box<dyn FnMut(u64) + 'a>;

impl Splitter {
    /// Turns this splitter into an iterator over the chunks of `reader`.
    ///
    /// The splitter should be fresh (or [`reset`](Splitter::reset)); bytes
    /// already put into it are treated as the start of the stream.
    pub fn split_reader<'a, R: Read>(self, reader: R) -> SplitIter<'a, R> {
        SplitIter::new(self, reader)
    }
}

/// Splits an in-memory buffer in one go.
///
/// # Errors
///
/// Returns [`SplitError::InvalidConfig`] if `config` is invalid.
///
/// # Example
///
/// ```
/// use hashsplit::{split_bytes, SplitConfig};
///
/// let chunks = split_bytes(SplitConfig::new(13, 1, 8192)?, &[0u8; 10_000])?;
/// let lengths: Vec<_> = chunks.iter().map(|c| c.len()).collect();
/// assert_eq!(lengths, vec![8192, 1808]);
/// # Ok::<(), hashsplit::SplitError>(())
/// ```
pub fn split_bytes(config: SplitConfig, data: &[u8]) -> Result<Vec<Chunk>, SplitError> {
    Splitter::try_new(config)?.split_reader(data).collect()
}

/// An iterator that yields chunks from a reader.
///
/// Reads [`READ_BLOCK_SIZE`] bytes at a time, only when the splitter asks
/// for more input. Hashes every chunk when the configuration enables it.
/// The iterator is fused: after the last chunk, or after an I/O error, it
/// returns `None` forever. Interrupted reads are retried.
pub struct SplitIter<'a, R> {
    reader: R,
    splitter: Splitter,
    read_buf: Box<[u8]>,
    progress: Option<ProgressFn<'a>>,
    bytes_read: u64,
    done: bool,
}

impl<'a, R: Read> SplitIter<'a, R> {
    fn new(splitter: Splitter, reader: R) -> Self {
        Self {
            reader,
            splitter,
            read_buf: vec![0u8; READ_BLOCK_SIZE].into_boxed_slice(),
            progress: None,
            bytes_read: 0,
            done: false,
        }
    }

    /// Registers a callback invoked with the byte count of every non-empty read.
    ///
    /// ```
    /// use std::cell::Cell;
    /// use hashsplit::Splitter;
    ///
    /// let total = Cell::new(0u64);
    /// let data = vec![7u8; 100_000];
    /// let chunks = Splitter::default()
    ///     .split_reader(&data[..])
    ///     .with_progress(|n| total.set(total.get() + n))
    ///     .count();
    ///
    /// assert!(chunks > 0);
    /// assert_eq!(total.get(), 100_000);
    /// ```
    pub fn with_progress(mut self, progress: impl FnMut(u64) + 'a) -> Self {
        self.progress = Some(Box::new(progress));
        self
    }

    /// Returns the total number of bytes read from the reader so far.
    pub fn bytes_read(&self) -> u64 {
        self.bytes_read
    }

    /// Returns the underlying splitter.
    pub fn splitter(&self) -> &Splitter {
        &self.splitter
    }

    /// Reads one block into the splitter, or finishes it at end of input.
    fn fill(&mut self) -> Result<(), SplitError> {
        loop {
            match self.reader.read(&mut self.read_buf) {
                Ok(0) => {
                    debug!(bytes_read = self.bytes_read, "reader exhausted");
                    return self.splitter.finish();
                }
                Ok(n) => {
                    self.bytes_read += n as u64;
                    if let Some(progress) = self.progress.as_mut() {
                        progress(n as u64);
                    }
                    return self.splitter.put(&self.read_buf[..n]);
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
    }
}

impl<R: Read> Iterator for SplitIter<'_, R> {
    type Item = Result<Chunk, SplitError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        loop {
            let event = match self.splitter.next_chunk() {
                Ok(event) => event,
                Err(e) => {
                    self.done = true;
                    return Some(Err(e));
                }
            };

            match event {
                SplitEvent::Chunk(mut chunk) => {
                    chunk.hash = hash_chunk(self.splitter.config().hash_config(), &chunk.data);
                    return Some(Ok(chunk));
                }
                SplitEvent::Done => {
                    self.done = true;
                    return None;
                }
                SplitEvent::NeedMoreInput => {
                    if let Err(e) = self.fill() {
                        self.done = true;
                        return Some(Err(e));
                    }
                }
            }
        }
    }
}

impl<R> fmt::Debug for SplitIter<'_, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SplitIter")
            .field("splitter", &self.splitter)
            .field("bytes_read", &self.bytes_read)
            .field("done", &self.done)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HashConfig;
    use std::io::Cursor;

    /// Reader that hands out at most `step` bytes per call and fails once
    /// after `fail_at` bytes, if set.
    struct Trickle {
        data: Vec<u8>,
        pos: usize,
        step: usize,
        fail_at: Option<usize>,
        interrupted: bool,
    }

    impl Read for Trickle {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            if !self.interrupted {
                self.interrupted = true;
                return Err(std::io::Error::new(ErrorKind::Interrupted, "try again"));
            }
            if self.fail_at.is_some_and(|at| self.pos >= at) {
                return Err(std::io::Error::new(ErrorKind::BrokenPipe, "gone"));
            }
            let n = self.step.min(buf.len()).min(self.data.len() - self.pos);
            buf[..n].copy_from_slice(&self.data[self.pos..self.pos + n]);
            self.pos += n;
            Ok(n)
        }
    }

    fn sample(len: usize) -> Vec<u8> {
        (0..len as u32).map(|i| (i.wrapping_mul(2_654_435_761) >> 13) as u8).collect()
    }

    #[test]
    fn test_empty_reader() {
        let chunks = split_bytes(SplitConfig::default(), b"").unwrap();
        assert!(chunks.is_empty());
    }

    #[test]
    fn test_reader_reassembles_input() {
        let data = sample(200_000);
        let config = SplitConfig::new(10, 256, 4096).unwrap();
        let chunks: Vec<_> = Splitter::new(config)
            .split_reader(Cursor::new(&data))
            .collect::<Result<_, _>>()
            .unwrap();

        assert!(chunks.len() > 10);
        let rebuilt: Vec<u8> = chunks.iter().flat_map(|c| c.data.iter().copied()).collect();
        assert_eq!(rebuilt, data);
    }

    #[test]
    fn test_read_granularity_does_not_matter() {
        let data = sample(50_000);
        let config = SplitConfig::new(8, 16, 2048).unwrap();

        let bulk = split_bytes(config, &data).unwrap();
        let trickled: Vec<_> = Splitter::new(config)
            .split_reader(Trickle {
                data: data.clone(),
                pos: 0,
                step: 13,
                fail_at: None,
                interrupted: false,
            })
            .collect::<Result<_, _>>()
            .unwrap();

        assert_eq!(bulk, trickled);
    }

    #[test]
    #[cfg(feature = "hash-blake3")]
    fn test_chunks_are_hashed() {
        let config = SplitConfig::new(8, 16, 2048)
            .unwrap()
            .with_hash_config(HashConfig::enabled());
        let chunks = split_bytes(config, &sample(10_000)).unwrap();
        assert!(chunks.iter().all(|c| c.hash.is_some()));
    }

    #[test]
    fn test_hashing_disabled() {
        let config = SplitConfig::new(8, 16, 2048)
            .unwrap()
            .with_hash_config(HashConfig::disabled());
        let chunks = split_bytes(config, &sample(10_000)).unwrap();
        assert!(chunks.iter().all(|c| c.hash.is_none()));
    }

    #[test]
    fn test_io_error_is_reported_once() {
        let config = SplitConfig::new(8, 16, 2048).unwrap();
        let mut iter = Splitter::new(config).split_reader(Trickle {
            data: sample(10_000),
            pos: 0,
            step: 1000,
            fail_at: Some(3000),
            interrupted: false,
        });

        let mut saw_error = false;
        for item in iter.by_ref() {
            if let Err(e) = item {
                assert!(matches!(e, SplitError::Io(_)));
                saw_error = true;
            }
        }
        assert!(saw_error);
        assert!(iter.next().is_none(), "iterator must be fused after an error");
        assert_eq!(iter.bytes_read(), 3000);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = SplitConfig::default().with_window_size(3);
        assert!(split_bytes(config, b"data").is_err());
    }
}
