//! Async streaming support for splitting.
//!
//! This module drives a [`crate::Splitter`] from a `futures_io::AsyncRead`
//! source, making it runtime-agnostic and compatible with tokio, async-std,
//! smol, and other async runtimes.
//!
//! - [`split_async`] - Creates an async stream of chunks from an async reader
//!
//! This module requires the `async-io` feature to be enabled.

mod stream;

pub use stream::{SplitStream, split_async};
