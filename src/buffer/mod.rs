//! Streaming input buffer.
//!
//! - [`StreamBuffer`] - append-only accumulator with `put`/`peek`/`eat`
//!
//! Backing stores come from a thread-local pool (internal).

mod pool;
mod stream;

pub use stream::StreamBuffer;
