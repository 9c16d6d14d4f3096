//! The parse loop - FrameIter and the eager helpers built on it.

use std::iter::FusedIterator;

use bytes::{Bytes, BytesMut};

use crate::chunk::Chunk;
use crate::error::ChunkError;

use super::header::decode_at;
#[cfg(feature = "hash-blake3")]
use super::sealed::decode_sealed_at;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Layout {
    Plain,
    #[cfg(feature = "hash-blake3")]
    Sealed,
}

/// An iterator over the chunks in a buffer of concatenated frames.
///
/// Frames are decoded lazily, one per call to `next`. A malformed frame is
/// reported once as an error, after which the iterator is exhausted: the
/// offsets of anything that follows cannot be trusted.
///
/// # Example
///
/// ```
/// use chunkbox::{Chunk, frames, save_all};
///
/// let buf = save_all(&[Chunk::new("a", "1"), Chunk::new("b", "22")])?;
///
/// let mut iter = frames(buf);
/// assert_eq!(iter.next().transpose()?, Some(Chunk::new("a", "1")));
/// assert_eq!(iter.offset(), 10);
/// assert_eq!(iter.next().transpose()?, Some(Chunk::new("b", "22")));
/// assert!(iter.next().is_none());
/// # Ok::<(), chunkbox::ChunkError>(())
/// ```
#[derive(Debug, Clone)]
pub struct FrameIter {
    buf: Bytes,
    offset: usize,
    layout: Layout,
    finished: bool,
}

impl FrameIter {
    fn new(buf: Bytes, layout: Layout) -> Self {
        Self {
            buf,
            offset: 0,
            layout,
            finished: false,
        }
    }

    /// Returns the offset of the next frame to decode.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Returns the bytes not yet consumed.
    pub fn remaining(&self) -> Bytes {
        self.buf.slice(self.offset..)
    }
}

impl Iterator for FrameIter {
    type Item = Result<Chunk, ChunkError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished || self.offset == self.buf.len() {
            self.finished = true;
            return None;
        }

        let decoded = match self.layout {
            Layout::Plain => decode_at(&self.buf, self.offset),
            #[cfg(feature = "hash-blake3")]
            Layout::Sealed => decode_sealed_at(&self.buf, self.offset),
        };

        match decoded {
            Ok((chunk, next)) => {
                self.offset = next;
                Some(Ok(chunk))
            }
            Err(e) => {
                tracing::debug!(offset = self.offset, error = %e, "aborting parse");
                self.finished = true;
                Some(Err(e))
            }
        }
    }
}

impl FusedIterator for FrameIter {}

/// Lazily decodes plain frames from `buf`.
pub fn frames(buf: impl Into<Bytes>) -> FrameIter {
    FrameIter::new(buf.into(), Layout::Plain)
}

/// Decodes every plain frame in `buf`, in order.
///
/// An empty buffer yields an empty vector. The buffer must end exactly on a
/// frame boundary; a frame cut short anywhere fails the whole call with
/// [`ChunkError::Truncated`] rather than returning the frames before it.
///
/// The returned chunks share `buf`'s allocation.
///
/// # Example
///
/// ```
/// use chunkbox::{Chunk, parse};
///
/// assert!(parse(Vec::<u8>::new())?.is_empty());
///
/// let frame = Chunk::new("k", "v").save()?;
/// assert_eq!(parse(frame.clone())?, vec![Chunk::new("k", "v")]);
/// assert!(parse(frame.slice(..frame.len() - 1)).is_err());
/// # Ok::<(), chunkbox::ChunkError>(())
/// ```
pub fn parse(buf: impl Into<Bytes>) -> Result<Vec<Chunk>, ChunkError> {
    collect(frames(buf))
}

/// Lazily decodes sealed frames from `buf`.
#[cfg(feature = "hash-blake3")]
pub fn sealed_frames(buf: impl Into<Bytes>) -> FrameIter {
    FrameIter::new(buf.into(), Layout::Sealed)
}

/// Decodes and verifies every sealed frame in `buf`, in order.
///
/// Fails on the first frame with bad magic, an unknown version, a digest
/// mismatch or missing bytes.
#[cfg(feature = "hash-blake3")]
pub fn parse_sealed(buf: impl Into<Bytes>) -> Result<Vec<Chunk>, ChunkError> {
    collect(sealed_frames(buf))
}

fn collect(iter: FrameIter) -> Result<Vec<Chunk>, ChunkError> {
    let total = iter.buf.len();
    let chunks = iter.collect::<Result<Vec<_>, _>>()?;
    tracing::debug!(frames = chunks.len(), bytes = total, "parsed buffer");
    Ok(chunks)
}

/// Concatenates the plain frames of `chunks` into one buffer.
///
/// The result parses back to the same chunks in the same order.
pub fn save_all<'a, I>(chunks: I) -> Result<Bytes, ChunkError>
where
    I: IntoIterator<Item = &'a Chunk>,
{
    let mut out = BytesMut::new();
    for chunk in chunks {
        chunk.save_into(&mut out)?;
    }
    Ok(out.freeze())
}
