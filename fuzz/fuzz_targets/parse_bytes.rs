#![no_main]

use chunkbox::{Chunk, parse, parse_sealed};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: Vec<u8>| {
    // Arbitrary input must produce chunks or an error, never a panic.
    if let Ok(chunks) = parse(data.clone()) {
        // Verify: whatever parsed re-encodes to the exact input
        let mut out = Vec::with_capacity(data.len());
        for chunk in &chunks {
            out.extend_from_slice(&chunk.save().unwrap());
        }
        assert_eq!(out, data);

        // Verify: frame sizes account for every byte
        let total: usize = chunks.iter().map(Chunk::frame_len).sum();
        assert_eq!(total, data.len());
    }

    let _ = parse_sealed(data);
});
