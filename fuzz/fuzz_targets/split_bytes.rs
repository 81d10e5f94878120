#![no_main]

use libfuzzer_sys::fuzz_target;
use hashsplit::{split_bytes, HashConfig, SplitConfig};

fuzz_target!(|data: Vec<u8>| {
    let configs = [
        // Tiny chunks, many levels
        SplitConfig::new(2, 1, 64).unwrap(),
        // Medium chunks, wide fan-out
        SplitConfig::new(6, 16, 1024).unwrap().with_fan_bits(3),
        // Small window
        SplitConfig::new(4, 4, 256).unwrap().with_window_size(8),
        SplitConfig::default(),
    ];

    for config in configs {
        let chunks = split_bytes(config, &data).unwrap();

        // Sizes within bounds, only the last chunk may be short or final
        for (i, chunk) in chunks.iter().enumerate() {
            assert!(!chunk.is_empty());
            assert!(chunk.len() <= config.max_size());
            assert!(chunk.level() <= config.max_level());
            if i + 1 < chunks.len() {
                assert!(chunk.len() >= config.min_size());
                assert!(!chunk.is_final());
            }
        }

        // Offsets tile the input and the bytes reassemble it
        let mut offset = 0u64;
        let mut rebuilt = Vec::with_capacity(data.len());
        for chunk in &chunks {
            assert_eq!(chunk.offset(), offset);
            offset += chunk.len() as u64;
            rebuilt.extend_from_slice(&chunk.data);
        }
        assert_eq!(rebuilt, data);

        // Determinism
        let again = split_bytes(config, &data).unwrap();
        assert_eq!(chunks, again);
    }

    let hashed = split_bytes(
        SplitConfig::default().with_hash_config(HashConfig::enabled()),
        &data,
    )
    .unwrap();
    assert!(hashed.iter().all(|c| c.hash.is_some()));
});
