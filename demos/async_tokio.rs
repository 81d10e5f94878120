//! Async file splitting on tokio.
//!
//! `split_async` takes any `futures_io::AsyncRead`; tokio readers are
//! adapted with `tokio_util::compat`.
//!
//! Run with:
//!     cargo run --example async_tokio --features async-io -- /path/to/file

use std::env;

use futures_util::StreamExt;
use hashsplit::{SplitConfig, split_async};
use tokio_util::compat::TokioAsyncReadCompatExt;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let paths: Vec<String> = match env::args().skip(1).collect::<Vec<_>>() {
        args if args.is_empty() => vec!["Cargo.toml".to_string()],
        args => args,
    };

    // Each file is split concurrently on its own task
    let handles: Vec<_> = paths
        .into_iter()
        .map(|path| tokio::spawn(split_file(path)))
        .collect();

    for handle in handles {
        let (path, chunks, bytes) = handle.await??;
        println!("{}: {} chunks, {} bytes", path, chunks, bytes);
    }

    Ok(())
}

async fn split_file(
    path: String,
) -> Result<(String, usize, usize), Box<dyn std::error::Error + Send + Sync>> {
    let file = tokio::fs::File::open(&path).await?;
    let mut stream = split_async(file.compat(), SplitConfig::default())?;

    let mut chunks = 0;
    let mut bytes = 0;
    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        chunks += 1;
        bytes += chunk.len();
    }

    Ok((path, chunks, bytes))
}
