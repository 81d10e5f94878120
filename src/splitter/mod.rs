//! Splitting engine for processing byte streams.
//!
//! - [`Splitter`] - Pull-based state machine with `put()`/`next()`/`finish()`
//! - [`SplitIter`] - Iterator that yields chunks from a [`std::io::Read`] source

mod engine;
mod iter;

pub use engine::{SplitEvent, SplitState, Splitter};
pub use iter::{READ_BLOCK_SIZE, SplitIter, split_bytes};
