#![no_main]

use chunkbox::{Chunk, parse, parse_sealed, save_all};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|input: (Vec<(Vec<u8>, Vec<u8>)>, bool)| {
    let (parts, compress) = input;

    let originals: Vec<Chunk> = parts
        .into_iter()
        .map(|(name, data)| Chunk::new(name, data))
        .collect();

    let mut chunks = originals.clone();
    if compress {
        for chunk in &mut chunks {
            chunk.compress().unwrap();
        }
    }

    // Verify: concatenated frames parse back in order
    let buf = save_all(&chunks).unwrap();
    let mut parsed = parse(buf).unwrap();
    assert_eq!(parsed, chunks);

    // Verify: sealed frames agree with plain ones
    let mut sealed = bytes::BytesMut::new();
    for chunk in &chunks {
        chunk.save_sealed_into(&mut sealed).unwrap();
    }
    assert_eq!(parse_sealed(sealed.freeze()).unwrap(), chunks);

    // Verify: uncompress restores the original payloads
    if compress {
        for chunk in &mut parsed {
            chunk.uncompress().unwrap();
        }
    }
    assert_eq!(parsed, originals);
});
