//! chunkbox
//!
//! A minimal container format for named binary chunks.
//!
//! Each chunk is written as one self-delimiting frame. Frames are simply
//! concatenated: there is no file header, no index, no chunk count. Parsing
//! walks the buffer frame by frame until it ends exactly on a boundary.
//!
//! ```text
//! [ data length (u32 BE) ][ name length (u32 BE) ][ name ][ data ]
//! ```
//!
//! The crate intentionally:
//! - does NOT touch files or sockets (bytes in, bytes out)
//! - does NOT track whether a payload is compressed
//! - does NOT add checksums or versions to the plain format
//!
//! Payloads can be compressed in place with raw DEFLATE. With the default
//! `hash-blake3` feature, chunks can also be written as *sealed* frames that
//! carry a magic, a version and a BLAKE3 digest, through separate entry points.
//!
//! # Example
//!
//! ```
//! use chunkbox::{Chunk, ChunkError, parse, save_all};
//!
//! fn main() -> Result<(), ChunkError> {
//!     let mut license = Chunk::new("LICENSE", "MIT License. ".repeat(64));
//!     license.compress()?;
//!
//!     let buf = save_all(&[Chunk::new("README", "hello"), license])?;
//!
//!     for mut chunk in parse(buf)? {
//!         if chunk.name_str() == Some("LICENSE") {
//!             chunk.uncompress()?;
//!         }
//!         println!("{}", chunk);
//!     }
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod chunk;
mod codec;
mod config;
mod error;

mod buffer; // internal (thread-local reuse)
mod compress; // internal raw deflate

//
// Public surface (intentionally tiny)
//

pub use chunk::Chunk;
#[cfg(feature = "hash-blake3")]
pub use chunk::ChunkDigest;
pub use codec::{FrameIter, HEADER_LEN, frames, parse, save_all};
#[cfg(feature = "hash-blake3")]
pub use codec::{SEALED_MAGIC, SEALED_OVERHEAD, SEALED_VERSION, parse_sealed, sealed_frames};
pub use config::{CompressionConfig, DEFAULT_COMPRESSION_LEVEL, MAX_COMPRESSION_LEVEL};
pub use error::{ChunkError, Field};
