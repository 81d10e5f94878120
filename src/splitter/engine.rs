//! Core splitting engine - the pull-based `Splitter` state machine.
//!
//! The caller owns the loop:
//!
//! - `put()` - feed bytes in any size (1 byte, 8KB, 1MB, ...)
//! - `next()` - pull the next chunk, or learn that more input is needed
//! - `finish()` - declare end of stream, then drain with `next()` until `Done`
//!
//! # Example
//!
//! ```
//! use hashsplit::{SplitConfig, SplitEvent, Splitter};
//!
//! let data = vec![0u8; 10_000];
//! let mut splitter = Splitter::new(SplitConfig::new(13, 1, 8192)?);
//! let mut lengths = Vec::new();
//!
//! for piece in data.chunks(1000) {
//!     splitter.put(piece)?;
//!     while let SplitEvent::Chunk(desc) = splitter.next()? {
//!         lengths.push(desc.len);
//!     }
//! }
//!
//! splitter.finish()?;
//! while let SplitEvent::Chunk(desc) = splitter.next()? {
//!     lengths.push(desc.len);
//! }
//!
//! assert_eq!(lengths, vec![8192, 1808]);
//! # Ok::<(), hashsplit::SplitError>(())
//! ```

use bytes::Bytes;
use tracing::{debug, trace};

use crate::buffer::StreamBuffer;
use crate::cdc::{BoundaryDecision, BoundaryPolicy, RollingWindow};
use crate::chunk::{Chunk, ChunkDescriptor};
use crate::config::SplitConfig;
use crate::error::SplitError;

/// Where the splitter is in its stream lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SplitState {
    /// Looking for the next boundary in buffered bytes.
    Scanning,
    /// Every buffered byte was scanned without finding a boundary; waiting
    /// for `put()` or `finish()`. Scan state is kept across the pause.
    AwaitingInput,
    /// The stream was finished and its remainder drained. Terminal.
    Flushed,
}

/// Result of one [`Splitter::next`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SplitEvent<T = ChunkDescriptor> {
    /// A complete chunk was consumed from the buffer.
    Chunk(T),
    /// No boundary can be determined from the bytes buffered so far.
    NeedMoreInput,
    /// The stream is finished and fully drained.
    Done,
}

impl<T> SplitEvent<T> {
    /// Returns the chunk, if this event carries one.
    pub fn into_chunk(self) -> Option<T> {
        match self {
            SplitEvent::Chunk(chunk) => Some(chunk),
            _ => None,
        }
    }
}

/// A boundary found by scanning, not yet consumed from the buffer.
enum Located {
    Chunk(ChunkDescriptor),
    NeedMoreInput,
    Done,
}

/// A streaming content-defined splitter for one input stream.
///
/// `Splitter` owns its [`StreamBuffer`], [`RollingWindow`] and
/// [`BoundaryPolicy`]. Each [`next`](Self::next) call resumes scanning at the
/// first byte not yet fed to the rolling window, so bytes are scanned exactly
/// once no matter how often the caller pauses for input.
///
/// # Determinism
///
/// Identical byte streams produce identical descriptors regardless of how
/// the bytes were divided between `put()` calls.
///
/// # Errors
///
/// Driving the splitter after `finish()` (more `put`, a second `finish`) or
/// after `Done` was returned fails with [`SplitError::InvalidState`].
#[derive(Debug)]
pub struct Splitter {
    config: SplitConfig,
    policy: BoundaryPolicy,
    window: RollingWindow,
    buffer: StreamBuffer,
    state: SplitState,
    /// Bytes of the buffer already fed to the window since the last boundary.
    scanned: usize,
    /// Stream offset of the next chunk.
    offset: u64,
    /// `finish()` was called; no more input will arrive.
    input_closed: bool,
    /// `Done` was handed out once; the next call is a caller bug.
    done_reported: bool,
}

impl Splitter {
    /// Creates a splitter with the given configuration.
    ///
    /// # Panics
    ///
    /// Panics if `config` fails [`SplitConfig::validate`]; use
    /// [`try_new`](Self::try_new) to handle that as an error instead.
    pub fn new(config: SplitConfig) -> Self {
        match Self::try_new(config) {
            Ok(splitter) => splitter,
            Err(e) => panic!("{}", e),
        }
    }

    /// Validates `config` and creates a splitter with it.
    ///
    /// # Errors
    ///
    /// Returns [`SplitError::InvalidConfig`] if the configuration is invalid.
    pub fn try_new(config: SplitConfig) -> Result<Self, SplitError> {
        config.validate()?;
        Ok(Self {
            config,
            policy: BoundaryPolicy::new(&config),
            window: RollingWindow::new(config.window_size()),
            buffer: StreamBuffer::new(),
            state: SplitState::Scanning,
            scanned: 0,
            offset: 0,
            input_closed: false,
            done_reported: false,
        })
    }

    /// Appends input bytes. Empty input is accepted and changes nothing.
    ///
    /// # Errors
    ///
    /// Returns [`SplitError::InvalidState`] after [`finish`](Self::finish).
    pub fn put(&mut self, data: &[u8]) -> Result<(), SplitError> {
        if self.input_closed {
            return Err(SplitError::invalid_state("put"));
        }
        self.buffer.put(data);
        if !data.is_empty() && self.state == SplitState::AwaitingInput {
            self.state = SplitState::Scanning;
        }
        Ok(())
    }

    /// Declares the end of the input stream.
    ///
    /// Buffered bytes are still split at their natural boundaries by later
    /// [`next`](Self::next) calls; whatever remains after the last one is
    /// emitted as a single final chunk.
    ///
    /// # Errors
    ///
    /// Returns [`SplitError::InvalidState`] if called more than once.
    pub fn finish(&mut self) -> Result<(), SplitError> {
        if self.input_closed {
            return Err(SplitError::invalid_state("finish"));
        }
        debug!(
            offset = self.offset,
            pending = self.buffer.unconsumed_len(),
            "input finished"
        );
        self.input_closed = true;
        if self.state == SplitState::AwaitingInput {
            self.state = SplitState::Scanning;
        }
        Ok(())
    }

    /// Pulls the next chunk descriptor, consuming its bytes from the buffer.
    ///
    /// # Errors
    ///
    /// Returns [`SplitError::InvalidState`] if called again after `Done`.
    pub fn next(&mut self) -> Result<SplitEvent, SplitError> {
        match self.locate()? {
            Located::Chunk(desc) => {
                self.consume(&desc)?;
                Ok(SplitEvent::Chunk(desc))
            }
            Located::NeedMoreInput => Ok(SplitEvent::NeedMoreInput),
            Located::Done => Ok(SplitEvent::Done),
        }
    }

    /// Like [`next`](Self::next), but also copies out the chunk's bytes
    /// before they are consumed.
    ///
    /// The returned [`Chunk`] has no hash; the reader drivers add one.
    ///
    /// # Errors
    ///
    /// Returns [`SplitError::InvalidState`] if called again after `Done`.
    pub fn next_chunk(&mut self) -> Result<SplitEvent<Chunk>, SplitError> {
        match self.locate()? {
            Located::Chunk(desc) => {
                let data = Bytes::copy_from_slice(self.buffer.peek(desc.len));
                self.consume(&desc)?;
                Ok(SplitEvent::Chunk(Chunk {
                    data,
                    descriptor: desc,
                    hash: None,
                }))
            }
            Located::NeedMoreInput => Ok(SplitEvent::NeedMoreInput),
            Located::Done => Ok(SplitEvent::Done),
        }
    }

    /// Discards all state and starts a new stream with the same configuration.
    pub fn reset(&mut self) {
        self.window.reset();
        self.buffer.clear();
        self.state = SplitState::Scanning;
        self.scanned = 0;
        self.offset = 0;
        self.input_closed = false;
        self.done_reported = false;
    }

    /// Returns the current lifecycle state.
    pub fn state(&self) -> SplitState {
        self.state
    }

    /// Returns the stream offset at which the next chunk starts.
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Returns the number of buffered bytes not yet emitted in a chunk.
    pub fn pending_len(&self) -> usize {
        self.buffer.unconsumed_len()
    }

    /// Returns true once [`finish`](Self::finish) has been called.
    pub fn is_finished(&self) -> bool {
        self.input_closed
    }

    /// Returns the configuration used by this splitter.
    pub fn config(&self) -> &SplitConfig {
        &self.config
    }

    /// Returns the input buffer, read-only.
    pub fn buffer(&self) -> &StreamBuffer {
        &self.buffer
    }

    /// Scans forward from where the last call stopped, without consuming.
    fn locate(&mut self) -> Result<Located, SplitError> {
        if self.state == SplitState::Flushed {
            if self.done_reported {
                return Err(SplitError::invalid_state("next"));
            }
            self.done_reported = true;
            return Ok(Located::Done);
        }

        let available = self.buffer.peek(self.buffer.unconsumed_len());
        for &byte in &available[self.scanned..] {
            let checksum = self.window.roll(byte);
            self.scanned += 1;

            if let BoundaryDecision::Boundary(level) = self.policy.classify(checksum, self.scanned) {
                if self.scanned >= self.config.max_size() {
                    debug!(offset = self.offset, len = self.scanned, "forced max-size boundary");
                }
                return Ok(Located::Chunk(ChunkDescriptor {
                    offset: self.offset,
                    len: self.scanned,
                    level,
                    is_final: false,
                }));
            }
        }

        if !self.input_closed {
            self.state = SplitState::AwaitingInput;
            return Ok(Located::NeedMoreInput);
        }

        let remaining = self.buffer.unconsumed_len();
        self.state = SplitState::Flushed;
        if remaining == 0 {
            self.done_reported = true;
            return Ok(Located::Done);
        }

        debug!(offset = self.offset, len = remaining, "flushing final chunk");
        Ok(Located::Chunk(ChunkDescriptor {
            offset: self.offset,
            len: remaining,
            level: 0,
            is_final: true,
        }))
    }

    /// Eats a located chunk and restarts the scan after it.
    fn consume(&mut self, desc: &ChunkDescriptor) -> Result<(), SplitError> {
        self.buffer.eat(desc.len)?;
        trace!(
            offset = desc.offset,
            len = desc.len,
            level = desc.level,
            is_final = desc.is_final,
            "chunk boundary"
        );
        self.window.reset();
        self.scanned = 0;
        self.offset += desc.len as u64;
        Ok(())
    }
}

impl Default for Splitter {
    fn default() -> Self {
        Self::new(SplitConfig::default())
    }
}
