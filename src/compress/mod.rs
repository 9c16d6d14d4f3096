//! Payload compression.
//!
//! Raw DEFLATE (RFC 1951) with no zlib or gzip wrapper, via `flate2`.
//! Only [`Chunk::compress`](crate::Chunk::compress) and
//! [`Chunk::uncompress`](crate::Chunk::uncompress) call into this module.

mod deflate;

pub(crate) use deflate::{deflate, inflate};
