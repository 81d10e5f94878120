#![no_main]

use libfuzzer_sys::fuzz_target;
use hashsplit::{ChunkDescriptor, SplitConfig, SplitEvent, Splitter};

fn drive(config: SplitConfig, pieces: &[&[u8]]) -> Vec<ChunkDescriptor> {
    let mut splitter = Splitter::new(config);
    let mut out = Vec::new();
    for piece in pieces {
        splitter.put(piece).unwrap();
        while let SplitEvent::Chunk(desc) = splitter.next().unwrap() {
            out.push(desc);
        }
    }
    splitter.finish().unwrap();
    loop {
        match splitter.next().unwrap() {
            SplitEvent::Chunk(desc) => out.push(desc),
            SplitEvent::Done => break,
            SplitEvent::NeedMoreInput => panic!("NeedMoreInput after finish"),
        }
    }
    assert!(splitter.next().is_err());
    out
}

// First byte picks the piece length, the rest is the stream
fuzz_target!(|data: Vec<u8>| {
    let Some((&step, stream)) = data.split_first() else {
        return;
    };
    let step = usize::from(step).max(1);

    for config in [
        SplitConfig::new(3, 1, 128).unwrap(),
        SplitConfig::new(5, 32, 512).unwrap().with_fan_bits(2),
    ] {
        let whole = drive(config, &[stream]);
        let pieces: Vec<&[u8]> = stream.chunks(step).collect();
        assert_eq!(whole, drive(config, &pieces));
    }
});
