//! Error types for chunkbox.

use std::fmt;

/// Which length field of a frame a size error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    /// The chunk name.
    Name,
    /// The chunk payload.
    Data,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Name => f.write_str("name"),
            Field::Data => f.write_str("data"),
        }
    }
}

/// Errors that can occur while encoding, decoding or transforming chunks.
#[derive(Debug)]
pub enum ChunkError {
    /// An I/O error occurred while driving the compression encoder.
    Io(std::io::Error),

    /// A name or payload is too long for its 4-byte length field.
    OversizedField {
        /// The field that overflowed.
        field: Field,
        /// Its actual length in bytes.
        len: usize,
    },

    /// The input ended before a complete frame could be read.
    Truncated {
        /// Offset of the frame being decoded.
        offset: usize,
        /// Bytes the frame still required.
        needed: usize,
        /// Bytes left in the buffer.
        available: usize,
    },

    /// The payload is not a valid raw DEFLATE stream.
    CorruptPayload(std::io::Error),

    /// Invalid configuration parameter.
    InvalidConfig {
        /// Description of what was invalid.
        message: &'static str,
    },

    /// A sealed frame did not start with the expected magic bytes.
    BadMagic {
        /// Offset of the frame.
        offset: usize,
        /// The bytes found instead.
        found: [u8; 4],
    },

    /// A sealed frame carries a version this build does not understand.
    UnsupportedVersion {
        /// Offset of the frame.
        offset: usize,
        /// The version byte found.
        version: u8,
    },

    /// A sealed frame's digest does not match its contents.
    DigestMismatch {
        /// Offset of the frame.
        offset: usize,
    },
}

impl fmt::Display for ChunkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChunkError::Io(e) => write!(f, "io error: {}", e),
            ChunkError::OversizedField { field, len } => {
                write!(f, "{} too large: {} bytes (max {})", field, len, u32::MAX)
            }
            ChunkError::Truncated {
                offset,
                needed,
                available,
            } => write!(
                f,
                "truncated input at offset {}: need {} bytes, {} available",
                offset, needed, available
            ),
            ChunkError::CorruptPayload(e) => write!(f, "corrupt payload: {}", e),
            ChunkError::InvalidConfig { message } => {
                write!(f, "invalid config: {}", message)
            }
            ChunkError::BadMagic { offset, found } => {
                write!(f, "bad magic at offset {}: {:02x?}", offset, found)
            }
            ChunkError::UnsupportedVersion { offset, version } => {
                write!(f, "unsupported version {} at offset {}", version, offset)
            }
            ChunkError::DigestMismatch { offset } => {
                write!(f, "digest mismatch at offset {}", offset)
            }
        }
    }
}

impl std::error::Error for ChunkError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ChunkError::Io(e) | ChunkError::CorruptPayload(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ChunkError {
    fn from(e: std::io::Error) -> Self {
        ChunkError::Io(e)
    }
}
