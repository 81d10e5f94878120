// Property tests for splitting invariants
// Random inputs, random feed patterns, random configurations

use hashsplit::{BoundaryPolicy, ChunkDescriptor, RollingWindow, SplitConfig, SplitEvent, Splitter};
use proptest::prelude::*;

fn split_feeding(config: SplitConfig, data: &[u8], cuts: &[usize]) -> Vec<ChunkDescriptor> {
    let mut splitter = Splitter::try_new(config).unwrap();
    let mut out = Vec::new();
    let mut start = 0;

    let mut positions: Vec<usize> = cuts.iter().map(|c| c % (data.len() + 1)).collect();
    positions.sort_unstable();
    positions.push(data.len());

    for end in positions {
        splitter.put(&data[start..end]).unwrap();
        start = end;
        while let SplitEvent::Chunk(desc) = splitter.next().unwrap() {
            out.push(desc);
        }
    }

    splitter.finish().unwrap();
    while let SplitEvent::Chunk(desc) = splitter.next().unwrap() {
        out.push(desc);
    }
    out
}

fn small_config() -> impl Strategy<Value = SplitConfig> {
    (1u32..8, 1usize..64, 0usize..512, 1u32..4).prop_map(|(base, min, extra, fan)| {
        SplitConfig::new(base, min, min + extra)
            .unwrap()
            .with_fan_bits(fan)
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn feed_pattern_does_not_change_descriptors(
        config in small_config(),
        data in prop::collection::vec(any::<u8>(), 0..8192),
        cuts in prop::collection::vec(any::<usize>(), 0..16),
    ) {
        let whole = split_feeding(config, &data, &[]);
        let pieces = split_feeding(config, &data, &cuts);
        prop_assert_eq!(whole, pieces);
    }

    #[test]
    fn descriptors_tile_the_stream(
        config in small_config(),
        data in prop::collection::vec(any::<u8>(), 0..8192),
    ) {
        let descs = split_feeding(config, &data, &[]);

        let mut offset = 0u64;
        for desc in &descs {
            prop_assert_eq!(desc.offset, offset);
            prop_assert!(desc.len >= 1);
            prop_assert!(desc.len <= config.max_size());
            offset = desc.end();
        }
        prop_assert_eq!(offset, data.len() as u64);

        // A stream ending exactly on a boundary has no final chunk
        if let Some((last, rest)) = descs.split_last() {
            if last.is_final {
                prop_assert_eq!(last.level, 0);
            } else {
                prop_assert!(last.len >= config.min_size());
            }
            for desc in rest {
                prop_assert!(!desc.is_final);
                prop_assert!(desc.len >= config.min_size());
            }
        }
    }

    #[test]
    fn levels_match_checksum_at_boundary(
        config in small_config(),
        data in prop::collection::vec(any::<u8>(), 1..4096),
    ) {
        let descs = split_feeding(config, &data, &[]);
        let policy = BoundaryPolicy::new(&config);

        for desc in descs.iter().filter(|d| !d.is_final) {
            let mut window = RollingWindow::new(config.window_size());
            let mut checksum = 0;
            for &byte in &data[desc.range().start as usize..desc.end() as usize] {
                checksum = window.roll(byte);
            }

            if desc.len == config.max_size() {
                // Forced cuts are always level 0
                prop_assert_eq!(desc.level, 0);
            } else {
                prop_assert_eq!(policy.level_of(checksum), Some(desc.level));
            }
        }
    }

    #[test]
    fn levels_never_exceed_maximum(
        config in small_config(),
        data in prop::collection::vec(any::<u8>(), 0..8192),
    ) {
        for desc in split_feeding(config, &data, &[]) {
            prop_assert!(desc.level <= config.max_level());
        }
    }
}
