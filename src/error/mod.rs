//! Error types for hashsplit.

use thiserror::Error;

/// Errors that can occur while splitting a stream.
///
/// The core never retries or masks a contract violation: every variant except
/// [`SplitError::Io`] means the caller drove the splitter incorrectly.
#[derive(Debug, Error)]
pub enum SplitError {
    /// An I/O error occurred while a reader driver was pulling input.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Tried to consume more bytes than the buffer holds.
    #[error("range error: cannot eat {requested} bytes, only {available} unconsumed")]
    Range {
        /// Number of bytes the caller asked to consume.
        requested: usize,
        /// Number of unconsumed bytes actually available.
        available: usize,
    },

    /// The splitter was driven after its stream was finished.
    #[error("invalid state: {operation} called after the stream was finished")]
    InvalidState {
        /// The operation that was rejected.
        operation: &'static str,
    },

    /// Invalid configuration parameter.
    #[error("invalid config: {message}")]
    InvalidConfig {
        /// Description of what was invalid.
        message: &'static str,
    },
}

impl SplitError {
    pub(crate) fn invalid_state(operation: &'static str) -> Self {
        SplitError::InvalidState { operation }
    }
}
