//! File splitting example with progress reporting.
//!
//! Run with:
//!     cargo run --example sync_file -- /path/to/file

use std::env;
use std::fs::File;

use hashsplit::{SplitConfig, Splitter};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let path = env::args()
        .nth(1)
        .unwrap_or_else(|| "Cargo.toml".to_string());

    println!("Splitting file: {}\n", path);

    let file = File::open(&path)?;
    let size = file.metadata()?.len();
    println!("File size: {} bytes\n", size);

    // ~8 KiB average, between 2 KiB and 64 KiB
    let config = SplitConfig::new(13, 2 * 1024, 64 * 1024)?;
    let splitter = Splitter::try_new(config)?;

    let mut total_chunks = 0;
    let mut total_bytes = 0;
    let mut levels = [0usize; 8];

    let mut seen = 0u64;
    let iter = splitter.split_reader(file).with_progress(|n| {
        seen += n;
        if size > 0 {
            eprintln!("read {:>3}%", seen * 100 / size);
        }
    });

    for chunk in iter {
        let chunk = chunk?;
        total_chunks += 1;
        total_bytes += chunk.len();
        levels[(chunk.level() as usize).min(levels.len() - 1)] += 1;

        match chunk.hash {
            Some(hash) => println!("{} {}", &hash.to_hex()[..16], chunk.descriptor),
            None => println!("{}", chunk.descriptor),
        }
    }

    println!("\nTotal: {} chunks, {} bytes", total_chunks, total_bytes);
    for (level, count) in levels.iter().enumerate().filter(|(_, c)| **c > 0) {
        println!("  level {}: {} boundaries", level, count);
    }

    Ok(())
}
