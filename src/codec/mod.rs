//! Frame encoding and decoding.
//!
//! - [`frames`] / [`parse`] - Decode a buffer of concatenated plain frames
//! - [`save_all`] - Encode a sequence of chunks into one buffer
//! - [`sealed_frames`] / [`parse_sealed`] - Same, for sealed frames
//!   (requires `hash-blake3`)
//!
//! Single-chunk encoding lives on [`Chunk`](crate::Chunk) as `save` and
//! `save_sealed`.

mod header;
mod iter;
#[cfg(feature = "hash-blake3")]
mod sealed;

pub use header::HEADER_LEN;
pub use iter::{FrameIter, frames, parse, save_all};
#[cfg(feature = "hash-blake3")]
pub use iter::{parse_sealed, sealed_frames};
#[cfg(feature = "hash-blake3")]
pub use sealed::{SEALED_MAGIC, SEALED_OVERHEAD, SEALED_VERSION};

pub(crate) use header::encode_into;
#[cfg(feature = "hash-blake3")]
pub(crate) use sealed::encode_sealed_into;
