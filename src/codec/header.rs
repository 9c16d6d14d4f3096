//! The 8-byte frame header and single-frame encode/decode.
//!
//! ```text
//! [ data length (4, BE) ]
//! [ name length (4, BE) ]
//! [ name (name length)  ]
//! [ data (data length)  ]
//! ```
//!
//! The data length comes first. Swapping the two fields still round-trips
//! in isolation but breaks compatibility with every existing buffer.

use bytes::{Buf, BufMut, Bytes, BytesMut};

use crate::chunk::Chunk;
use crate::error::{ChunkError, Field};

/// Size of the fixed frame header in bytes.
pub const HEADER_LEN: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FrameHeader {
    pub data_len: u32,
    pub name_len: u32,
}

impl FrameHeader {
    /// Builds the header for `chunk`, rejecting fields that do not fit in u32.
    pub fn for_chunk(chunk: &Chunk) -> Result<Self, ChunkError> {
        Ok(Self {
            data_len: field_len(Field::Data, chunk.data.len())?,
            name_len: field_len(Field::Name, chunk.name.len())?,
        })
    }

    pub fn put(&self, out: &mut impl BufMut) {
        out.put_u32(self.data_len);
        out.put_u32(self.name_len);
    }

    /// Reads a header from the front of `buf`.
    ///
    /// `offset` is only used for error reporting.
    pub fn read(mut buf: &[u8], offset: usize) -> Result<Self, ChunkError> {
        if buf.remaining() < HEADER_LEN {
            return Err(ChunkError::Truncated {
                offset,
                needed: HEADER_LEN,
                available: buf.remaining(),
            });
        }
        let data_len = buf.get_u32();
        let name_len = buf.get_u32();
        Ok(Self { data_len, name_len })
    }

    /// Total frame size, header included. Computed in u64 so two maximal
    /// fields cannot overflow a 32-bit usize.
    pub fn frame_len(&self) -> u64 {
        HEADER_LEN as u64 + u64::from(self.name_len) + u64::from(self.data_len)
    }
}

fn field_len(field: Field, len: usize) -> Result<u32, ChunkError> {
    u32::try_from(len).map_err(|_| ChunkError::OversizedField { field, len })
}

/// Appends the frame for `chunk` to `out`.
pub(crate) fn encode_into(chunk: &Chunk, out: &mut BytesMut) -> Result<(), ChunkError> {
    let header = FrameHeader::for_chunk(chunk)?;

    out.reserve(chunk.frame_len());
    header.put(out);
    out.put_slice(&chunk.name);
    out.put_slice(&chunk.data);

    tracing::trace!(
        name_len = header.name_len,
        data_len = header.data_len,
        "encoded frame"
    );
    Ok(())
}

/// Decodes the frame starting at `offset` and returns it with the offset of
/// the next frame.
///
/// Name and data are zero-copy slices of `buf`.
pub(crate) fn decode_at(buf: &Bytes, offset: usize) -> Result<(Chunk, usize), ChunkError> {
    let rest = &buf[offset..];
    let header = FrameHeader::read(rest, offset)?;

    let frame_len = header.frame_len();
    if (rest.len() as u64) < frame_len {
        return Err(ChunkError::Truncated {
            offset,
            needed: usize::try_from(frame_len).unwrap_or(usize::MAX),
            available: rest.len(),
        });
    }

    let name_start = offset + HEADER_LEN;
    let data_start = name_start + header.name_len as usize;
    let end = data_start + header.data_len as usize;

    let chunk = Chunk {
        name: buf.slice(name_start..data_start),
        data: buf.slice(data_start..end),
    };

    tracing::trace!(
        offset,
        name_len = header.name_len,
        data_len = header.data_len,
        "decoded frame"
    );
    Ok((chunk, end))
}
