//! The Chunk type - a named, opaque payload.

use bytes::{Bytes, BytesMut};
use std::fmt;

use crate::codec::{self, HEADER_LEN};
use crate::compress;
use crate::config::CompressionConfig;
use crate::error::ChunkError;

#[cfg(feature = "hash-blake3")]
use super::ChunkDigest;

/// A named block of bytes, the unit of the container format.
///
/// The codec never records whether `data` is compressed. Callers that mix
/// compressed and plain chunks in one buffer must track that themselves,
/// for example through a naming convention.
///
/// # Example
///
/// ```
/// use chunkbox::Chunk;
///
/// let mut chunk = Chunk::new("LICENSE", "Permission is hereby granted...");
/// chunk.compress()?.uncompress()?;
///
/// assert_eq!(chunk.name_str(), Some("LICENSE"));
/// assert_eq!(chunk.size(), 31);
/// # Ok::<(), chunkbox::ChunkError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Chunk {
    /// The label, conventionally UTF-8 text.
    pub name: Bytes,

    /// The payload, compressed or not.
    pub data: Bytes,
}

impl Chunk {
    /// Creates a chunk from a name and a payload.
    ///
    /// Both accept anything convertible into [`Bytes`]: string literals,
    /// `String`, `Vec<u8>`, static byte slices. Lengths are not checked
    /// here; [`Chunk::save`] rejects fields that overflow the wire format.
    pub fn new(name: impl Into<Bytes>, data: impl Into<Bytes>) -> Self {
        Self {
            name: name.into(),
            data: data.into(),
        }
    }

    /// Returns the name bytes.
    pub fn name(&self) -> &Bytes {
        &self.name
    }

    /// Returns the name as text, or `None` if it is not valid UTF-8.
    pub fn name_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.name).ok()
    }

    /// Returns the payload bytes.
    pub fn data(&self) -> &Bytes {
        &self.data
    }

    /// Returns the byte length of the payload.
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the payload is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the number of bytes [`Chunk::save`] will emit.
    pub fn frame_len(&self) -> usize {
        HEADER_LEN
            .saturating_add(self.name.len())
            .saturating_add(self.data.len())
    }

    /// Splits the chunk into (name, data).
    pub fn into_parts(self) -> (Bytes, Bytes) {
        (self.name, self.data)
    }

    /// Replaces the payload with its raw DEFLATE encoding at the default level.
    ///
    /// Calling this twice compresses the already-compressed bytes. On error
    /// the chunk is left unchanged.
    pub fn compress(&mut self) -> Result<&mut Self, ChunkError> {
        self.compress_with(&CompressionConfig::default())
    }

    /// Replaces the payload with its raw DEFLATE encoding at `config`'s level.
    ///
    /// # Errors
    ///
    /// Returns [`ChunkError::InvalidConfig`] if the level is out of range.
    pub fn compress_with(&mut self, config: &CompressionConfig) -> Result<&mut Self, ChunkError> {
        let packed = compress::deflate(&self.data, config)?;
        tracing::debug!(
            before = self.data.len(),
            after = packed.len(),
            level = config.level(),
            "compressed chunk payload"
        );
        self.data = packed;
        Ok(self)
    }

    /// Replaces the payload with the decoding of its raw DEFLATE stream.
    ///
    /// # Errors
    ///
    /// Returns [`ChunkError::CorruptPayload`] if the payload is not a valid
    /// raw DEFLATE stream. The chunk is left unchanged.
    pub fn uncompress(&mut self) -> Result<&mut Self, ChunkError> {
        let unpacked = compress::inflate(&self.data)?;
        tracing::debug!(
            before = self.data.len(),
            after = unpacked.len(),
            "uncompressed chunk payload"
        );
        self.data = unpacked;
        Ok(self)
    }

    /// Encodes this chunk as a single frame.
    ///
    /// # Errors
    ///
    /// Returns [`ChunkError::OversizedField`] if the name or the payload is
    /// longer than `u32::MAX` bytes.
    ///
    /// # Example
    ///
    /// ```
    /// use chunkbox::{Chunk, parse};
    ///
    /// let chunk = Chunk::new("id", "payload");
    /// let frame = chunk.save()?;
    /// assert_eq!(&frame[..8], &[0, 0, 0, 7, 0, 0, 0, 2]);
    /// assert_eq!(parse(frame)?, vec![chunk]);
    /// # Ok::<(), chunkbox::ChunkError>(())
    /// ```
    pub fn save(&self) -> Result<Bytes, ChunkError> {
        let mut out = BytesMut::with_capacity(self.frame_len());
        self.save_into(&mut out)?;
        Ok(out.freeze())
    }

    /// Appends this chunk's frame to `out`.
    ///
    /// Nothing is written if the chunk is rejected.
    pub fn save_into(&self, out: &mut BytesMut) -> Result<(), ChunkError> {
        codec::encode_into(self, out)
    }

    /// Returns the BLAKE3 digest of the payload.
    #[cfg(feature = "hash-blake3")]
    pub fn digest(&self) -> ChunkDigest {
        ChunkDigest::of(&self.data)
    }

    /// Encodes this chunk as a sealed frame: magic, version, the plain frame
    /// and a BLAKE3 digest of that frame.
    #[cfg(feature = "hash-blake3")]
    pub fn save_sealed(&self) -> Result<Bytes, ChunkError> {
        let mut out = BytesMut::with_capacity(self.frame_len() + codec::SEALED_OVERHEAD);
        self.save_sealed_into(&mut out)?;
        Ok(out.freeze())
    }

    /// Appends this chunk's sealed frame to `out`.
    #[cfg(feature = "hash-blake3")]
    pub fn save_sealed_into(&self, out: &mut BytesMut) -> Result<(), ChunkError> {
        codec::encode_sealed_into(self, out)
    }
}

impl fmt::Display for Chunk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name_str() {
            Some(name) => write!(f, "Chunk({:?}, {} bytes)", name, self.size()),
            None => write!(f, "Chunk({:02x?}, {} bytes)", &self.name[..], self.size()),
        }
    }
}
