//! Chunk types.
//!
//! - [`Chunk`] - Named payload, the unit of the container format
//! - [`ChunkDigest`] - 32-byte BLAKE3 payload digest (requires `hash-blake3`)

mod data;
#[cfg(feature = "hash-blake3")]
mod hash;

pub use data::Chunk;
#[cfg(feature = "hash-blake3")]
pub use hash::ChunkDigest;
