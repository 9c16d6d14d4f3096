//! Builds a small chunk file in memory, then reads it back.
//!
//! Run with:
//!     RUST_LOG=chunkbox=trace cargo run --example basic

use chunkbox::{Chunk, parse, save_all};
use tracing_subscriber::EnvFilter;

const LICENSE: &str = "Permission is hereby granted, free of charge, to any person \
obtaining a copy of this software, to deal in the Software without restriction.\n";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut license = Chunk::new("LICENSE.z", LICENSE.repeat(100));
    let plain_size = license.size();
    license.compress()?;

    let chunks = vec![
        Chunk::new("README", "chunkbox demo"),
        license,
        Chunk::new("empty", ""),
    ];

    let buf = save_all(&chunks)?;
    println!("Wrote {} chunks into {} bytes", chunks.len(), buf.len());
    println!(
        "LICENSE: {} bytes plain, {} bytes compressed\n",
        plain_size,
        chunks[1].size()
    );

    for mut chunk in parse(buf)? {
        // Naming convention: a ".z" suffix marks compressed payloads.
        if chunk.name.ends_with(b".z") {
            chunk.uncompress()?;
        }
        println!("{}", chunk);
    }

    Ok(())
}
