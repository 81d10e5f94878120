//! Async stream adapter for splitting.
//!
//! # Example
//!
//! ```ignore
//! use futures_util::StreamExt;
//! use hashsplit::{split_async, SplitConfig};
//! use futures_io::AsyncRead;
//!
//! async fn demo<R: AsyncRead + Unpin>(reader: R) -> Result<(), hashsplit::SplitError> {
//!     let mut stream = split_async(reader, SplitConfig::default())?;
//!
//!     while let Some(chunk) = stream.next().await {
//!         let chunk = chunk?;
//!         println!("{}", chunk);
//!     }
//!     Ok(())
//! }
//! ```

use std::io::ErrorKind;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures_core::Stream;
use futures_io::AsyncRead;
use pin_project_lite::pin_project;
use tracing::debug;

use crate::chunk::Chunk;
use crate::config::SplitConfig;
use crate::error::SplitError;
use crate::hash::hash_chunk;
use crate::splitter::{READ_BLOCK_SIZE, SplitEvent, Splitter};

pin_project! {
    /// A stream that yields chunks from an async reader.
    ///
    /// The async counterpart of [`crate::SplitIter`]: it reads only when the
    /// splitter reports `NeedMoreInput`, finishes the splitter at end of
    /// input, hashes chunks when enabled, and ends after the last chunk or
    /// the first I/O error.
    pub struct SplitStream<R> {
        #[pin]
        reader: R,
        splitter: Splitter,
        read_buf: Box<[u8]>,
        done: bool,
    }
}

impl<R> SplitStream<R> {
    /// Returns the underlying splitter.
    pub fn splitter(&self) -> &Splitter {
        &self.splitter
    }
}

impl<R: AsyncRead> Stream for SplitStream<R> {
    type Item = Result<Chunk, SplitError>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();

        if *this.done {
            return Poll::Ready(None);
        }

        loop {
            match this.splitter.next_chunk() {
                Ok(SplitEvent::Chunk(mut chunk)) => {
                    chunk.hash = hash_chunk(this.splitter.config().hash_config(), &chunk.data);
                    return Poll::Ready(Some(Ok(chunk)));
                }
                Ok(SplitEvent::Done) => {
                    *this.done = true;
                    return Poll::Ready(None);
                }
                Ok(SplitEvent::NeedMoreInput) => {}
                Err(e) => {
                    *this.done = true;
                    return Poll::Ready(Some(Err(e)));
                }
            }

            let fed = match this.reader.as_mut().poll_read(cx, &mut this.read_buf[..]) {
                Poll::Pending => return Poll::Pending,
                Poll::Ready(Err(e)) if e.kind() == ErrorKind::Interrupted => continue,
                Poll::Ready(Err(e)) => Err(SplitError::Io(e)),
                Poll::Ready(Ok(0)) => {
                    debug!(offset = this.splitter.offset(), "async reader exhausted");
                    this.splitter.finish()
                }
                Poll::Ready(Ok(n)) => this.splitter.put(&this.read_buf[..n]),
            };

            if let Err(e) = fed {
                *this.done = true;
                return Poll::Ready(Some(Err(e)));
            }
        }
    }
}

/// Creates a chunk stream from an async reader.
///
/// Uses `futures_io::AsyncRead` for runtime-agnostic async I/O. For tokio
/// readers, convert with `tokio_util::compat::TokioAsyncReadCompatExt`:
///
/// ```ignore
/// use tokio_util::compat::TokioAsyncReadCompatExt;
/// use hashsplit::{split_async, SplitConfig};
///
/// let file = tokio::fs::File::open("file").await?;
/// let stream = split_async(file.compat(), SplitConfig::default())?;
/// ```
///
/// # Errors
///
/// Returns [`SplitError::InvalidConfig`] if `config` is invalid.
pub fn split_async<R: AsyncRead>(
    reader: R,
    config: SplitConfig,
) -> Result<SplitStream<R>, SplitError> {
    Ok(SplitStream {
        reader,
        splitter: Splitter::try_new(config)?,
        read_buf: vec![0u8; READ_BLOCK_SIZE].into_boxed_slice(),
        done: false,
    })
}
