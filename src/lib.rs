//! hashsplit
//!
//! Streaming content-defined chunking for Rust.
//!
//! `hashsplit` decides where to cut a byte stream so that chunk boundaries
//! follow the content instead of fixed offsets: an edit only re-chunks its
//! neighbourhood. It is the splitting primitive for:
//!
//! - deduplicating backup systems
//! - content-addressable storage
//! - delta synchronization
//!
//! The core is a rolling checksum over a small window ([`RollingWindow`]), a
//! boundary policy that also tags each boundary with a hierarchical level
//! ([`BoundaryPolicy`]), a streaming input buffer ([`StreamBuffer`]) and the
//! pull-based [`Splitter`] state machine driving them. Levels nest, so a
//! [`FanoutBuilder`] can turn the boundaries into a content-defined tree.
//!
//! The crate intentionally:
//! - does NOT manage files or paths
//! - does NOT persist or name chunks
//! - does NOT spawn threads or block inside the core
//!
//! # Pull-based core
//!
//! ```
//! use hashsplit::{SplitConfig, SplitEvent, Splitter};
//!
//! let mut splitter = Splitter::new(SplitConfig::default());
//! let mut chunks = Vec::new();
//!
//! for block in [&b"first block "[..], &b"second block"[..]] {
//!     splitter.put(block)?;
//!     while let SplitEvent::Chunk(desc) = splitter.next()? {
//!         chunks.push(desc);
//!     }
//! }
//!
//! splitter.finish()?;
//! loop {
//!     match splitter.next()? {
//!         SplitEvent::Chunk(desc) => chunks.push(desc),
//!         SplitEvent::Done => break,
//!         SplitEvent::NeedMoreInput => unreachable!(),
//!     }
//! }
//!
//! assert_eq!(chunks.iter().map(|d| d.len).sum::<usize>(), 24);
//! # Ok::<(), hashsplit::SplitError>(())
//! ```
//!
//! # Readers
//!
//! ```no_run
//! use std::fs::File;
//! use hashsplit::{SplitConfig, SplitError, Splitter};
//!
//! fn main() -> Result<(), SplitError> {
//!     let file = File::open("data.bin")?;
//!     for chunk in Splitter::new(SplitConfig::default()).split_reader(file) {
//!         let chunk = chunk?;
//!         println!("{} bytes at level {}", chunk.len(), chunk.level());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! With the `async-io` feature, [`split_async`] does the same for any
//! `futures_io::AsyncRead`.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod buffer;
mod cdc;
mod chunk;
mod config;
mod error;
mod fanout;
mod hash;
mod splitter;

#[cfg(feature = "async-io")]
mod async_stream;

//
// Public surface
//

pub use buffer::StreamBuffer;
pub use cdc::{BoundaryDecision, BoundaryPolicy, CHAR_OFFSET, RollingWindow};
pub use chunk::{Chunk, ChunkDescriptor, ChunkHash};
pub use config::{
    DEFAULT_BASE_BITS, DEFAULT_FAN_BITS, DEFAULT_MAX_CHUNK_SIZE, DEFAULT_MAX_LEVEL_BITS,
    DEFAULT_MIN_CHUNK_SIZE, DEFAULT_WINDOW_SIZE, HashConfig, SplitConfig,
};
pub use error::SplitError;
pub use fanout::{FanoutBuilder, FanoutNode};
pub use splitter::{READ_BLOCK_SIZE, SplitEvent, SplitIter, SplitState, Splitter, split_bytes};

#[cfg(feature = "async-io")]
pub use async_stream::{SplitStream, split_async};
