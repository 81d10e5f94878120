//! Basic pull-API example: feed blocks with `put`, drain with `next`.
//!
//! Run with:
//!     cargo run --example sync_basic

use hashsplit::{SplitConfig, SplitEvent, Splitter};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1 MB of pseudo-random data
    let data: Vec<u8> = (0..1024 * 1024u32)
        .map(|i| (i.wrapping_mul(2_654_435_761) >> 13) as u8)
        .collect();

    let mut splitter = Splitter::try_new(SplitConfig::default())?;

    println!("Splitting {} bytes of data...\n", data.len());

    let mut total_chunks = 0;
    let mut total_bytes = 0;

    // Simulate streaming data in 8 KB batches
    for batch in data.chunks(8 * 1024) {
        splitter.put(batch)?;
        while let SplitEvent::Chunk(desc) = splitter.next()? {
            total_chunks += 1;
            total_bytes += desc.len;
            println!("Chunk {}: {}", total_chunks, desc);
        }
    }

    // End of stream: drain the remaining boundaries and the final chunk
    splitter.finish()?;
    loop {
        match splitter.next()? {
            SplitEvent::Chunk(desc) => {
                total_chunks += 1;
                total_bytes += desc.len;
                println!("Chunk {}: {}", total_chunks, desc);
            }
            SplitEvent::Done => break,
            SplitEvent::NeedMoreInput => unreachable!("input is finished"),
        }
    }

    println!("\nTotal: {} chunks, {} bytes", total_chunks, total_bytes);
    if total_chunks > 0 {
        println!("Average chunk size: {} bytes", total_bytes / total_chunks);
    }

    Ok(())
}
