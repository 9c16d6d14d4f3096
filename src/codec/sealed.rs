//! Sealed frames: a plain frame wrapped with magic, version and a digest.
//!
//! ```text
//! [ magic "CBX1" (4) ]
//! [ version (1)      ]
//! [ plain frame      ]
//! [ BLAKE3 (32)      ] over the plain frame bytes
//! ```
//!
//! Plain and sealed frames must not be mixed in one buffer.

use bytes::{BufMut, Bytes, BytesMut};

use crate::chunk::Chunk;
use crate::error::ChunkError;

use super::header::{decode_at, encode_into};

/// Magic bytes opening every sealed frame.
pub const SEALED_MAGIC: [u8; 4] = *b"CBX1";

/// Current sealed frame version.
pub const SEALED_VERSION: u8 = 1;

const PREFIX_LEN: usize = SEALED_MAGIC.len() + 1;
const DIGEST_LEN: usize = blake3::OUT_LEN;

/// Bytes a sealed frame adds on top of the plain frame.
pub const SEALED_OVERHEAD: usize = PREFIX_LEN + DIGEST_LEN;

pub(crate) fn encode_sealed_into(chunk: &Chunk, out: &mut BytesMut) -> Result<(), ChunkError> {
    let start = out.len();
    out.reserve(chunk.frame_len() + SEALED_OVERHEAD);
    out.put_slice(&SEALED_MAGIC);
    out.put_u8(SEALED_VERSION);

    if let Err(e) = encode_into(chunk, out) {
        out.truncate(start);
        return Err(e);
    }

    let digest = blake3::hash(&out[start + PREFIX_LEN..]);
    out.put_slice(digest.as_bytes());
    Ok(())
}

pub(crate) fn decode_sealed_at(buf: &Bytes, offset: usize) -> Result<(Chunk, usize), ChunkError> {
    let rest = &buf[offset..];
    if rest.len() < PREFIX_LEN {
        return Err(ChunkError::Truncated {
            offset,
            needed: PREFIX_LEN,
            available: rest.len(),
        });
    }

    let mut found = [0u8; 4];
    found.copy_from_slice(&rest[..4]);
    if found != SEALED_MAGIC {
        return Err(ChunkError::BadMagic { offset, found });
    }
    if rest[4] != SEALED_VERSION {
        return Err(ChunkError::UnsupportedVersion {
            offset,
            version: rest[4],
        });
    }

    let frame_start = offset + PREFIX_LEN;
    let (chunk, frame_end) = decode_at(buf, frame_start)?;

    let available = buf.len() - frame_end;
    if available < DIGEST_LEN {
        return Err(ChunkError::Truncated {
            offset: frame_end,
            needed: DIGEST_LEN,
            available,
        });
    }

    let mut stored = [0u8; DIGEST_LEN];
    stored.copy_from_slice(&buf[frame_end..frame_end + DIGEST_LEN]);
    // blake3::Hash equality is constant-time.
    if blake3::Hash::from(stored) != blake3::hash(&buf[frame_start..frame_end]) {
        return Err(ChunkError::DigestMismatch { offset });
    }

    Ok((chunk, frame_end + DIGEST_LEN))
}
