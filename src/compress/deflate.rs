//! Raw DEFLATE encode/decode through pooled scratch buffers.

use std::io::{self, Write};

use bytes::Bytes;
use flate2::write::DeflateEncoder;
use flate2::{Decompress, FlushDecompress, Status};

use crate::buffer::Buffer;
use crate::config::CompressionConfig;
use crate::error::ChunkError;

/// Extra room reserved whenever the decode buffer fills up.
const INFLATE_STEP: usize = 32 * 1024;

/// Compresses `input` into a raw DEFLATE stream.
pub(crate) fn deflate(input: &[u8], config: &CompressionConfig) -> Result<Bytes, ChunkError> {
    config.validate()?;

    let mut scratch = Buffer::take();
    let mut encoder = DeflateEncoder::new(&mut scratch, config.to_flate2());
    encoder.write_all(input)?;
    encoder.finish()?;

    Ok(scratch.to_bytes())
}

/// Decodes a raw DEFLATE stream produced by [`deflate`].
///
/// `input` must hold exactly one complete stream. Invalid blocks, a stream
/// cut short before its final block, and bytes left over after the final
/// block are all reported as [`ChunkError::CorruptPayload`].
pub(crate) fn inflate(input: &[u8]) -> Result<Bytes, ChunkError> {
    let mut decoder = Decompress::new(false);
    let mut scratch = Buffer::take();
    let out = scratch.as_mut_vec();

    loop {
        if out.len() == out.capacity() {
            out.reserve(INFLATE_STEP);
        }

        let before = (decoder.total_in(), decoder.total_out());
        let rest = &input[decoder.total_in() as usize..];
        let status = decoder
            .decompress_vec(rest, out, FlushDecompress::None)
            .map_err(corrupt)?;

        if status == Status::StreamEnd {
            break;
        }
        // Output had room, so no progress means the input ran out mid-stream.
        if (decoder.total_in(), decoder.total_out()) == before {
            return Err(corrupt("deflate stream ends before its final block"));
        }
    }

    if decoder.total_in() != input.len() as u64 {
        return Err(corrupt("trailing bytes after deflate stream"));
    }

    Ok(scratch.to_bytes())
}

fn corrupt<E>(error: E) -> ChunkError
where
    E: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    ChunkError::CorruptPayload(io::Error::new(io::ErrorKind::InvalidData, error))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inverse() {
        let input = b"the quick brown fox jumps over the lazy dog".repeat(20);
        let packed = deflate(&input, &CompressionConfig::default()).unwrap();
        assert!(packed.len() < input.len());
        assert_eq!(inflate(&packed).unwrap(), Bytes::from(input));
    }

    #[test]
    fn test_no_container_header() {
        // A zlib header has CM=8 in the low nibble of its first byte. The first
        // byte of a raw stream holds BFINAL/BTYPE bits and can never match.
        let packed = deflate(b"hello hello hello", &CompressionConfig::default()).unwrap();
        let mut zlib = flate2::read::ZlibDecoder::new(&packed[..]);
        let mut out = Vec::new();
        assert!(std::io::Read::read_to_end(&mut zlib, &mut out).is_err());
    }

    #[test]
    fn test_empty_input() {
        let packed = deflate(b"", &CompressionConfig::default()).unwrap();
        assert!(!packed.is_empty());
        assert!(inflate(&packed).unwrap().is_empty());
    }

    #[test]
    fn test_every_level_decodes() {
        let input = b"abcabcabcabcabcabc".repeat(8);
        for level in 0..=9 {
            let config = CompressionConfig::new(level).unwrap();
            let packed = deflate(&input, &config).unwrap();
            assert_eq!(inflate(&packed).unwrap(), &input[..]);
        }
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = CompressionConfig::default().with_level(11);
        assert!(matches!(
            deflate(b"x", &config),
            Err(ChunkError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_garbage_is_corrupt() {
        // 0xff: BFINAL=1, BTYPE=11 (reserved), always invalid.
        let err = inflate(&[0xff, 0xff, 0xff, 0xff]).unwrap_err();
        assert!(matches!(err, ChunkError::CorruptPayload(_)));
    }

    #[test]
    fn test_trailing_bytes_are_corrupt() {
        let mut packed = deflate(b"payload", &CompressionConfig::default())
            .unwrap()
            .to_vec();
        packed.extend_from_slice(b"GARBAGE");

        let err = inflate(&packed).unwrap_err();
        assert!(matches!(err, ChunkError::CorruptPayload(_)));
    }

    #[test]
    fn test_truncated_stream_is_corrupt() {
        let input = b"the quick brown fox jumps over the lazy dog".repeat(50);
        let packed = deflate(&input, &CompressionConfig::default()).unwrap();

        for cut in [1, packed.len() / 2, packed.len() - 1] {
            let err = inflate(&packed[..cut]).unwrap_err();
            assert!(
                matches!(err, ChunkError::CorruptPayload(_)),
                "Stream cut at {cut} of {} should be rejected",
                packed.len()
            );
        }
    }

    #[test]
    fn test_empty_payload_is_corrupt() {
        assert!(matches!(inflate(b""), Err(ChunkError::CorruptPayload(_))));
    }

    #[test]
    fn test_output_larger_than_scratch() {
        // Forces the decode buffer to grow past its pooled capacity
        let input = vec![b'z'; 300 * 1024];
        let packed = deflate(&input, &CompressionConfig::fast()).unwrap();
        assert_eq!(inflate(&packed).unwrap(), &input[..]);
    }
}
