//! One-shot stream encoding and decoding
//!
//! Each call opens a private channel, runs every frame through it in order
//! and closes it before returning, on success and on error alike.

use crate::channel::Channel;
use crate::codecs::celp::{COMPRESSED_FRAME_BYTES, PCM_FRAME_BYTES};
use crate::error::Result;
use crate::types::CompressedFrame;
use crate::utils::validate_stream_length;
use tracing::debug;

/// Run `body` on a fresh channel and close the channel afterwards.
fn with_channel<T>(body: impl FnOnce(&mut Channel) -> Result<T>) -> Result<T> {
    let mut channel = Channel::open()?;
    let result = body(&mut channel);
    let closed = channel.close();
    let value = result?;
    closed?;
    Ok(value)
}

/// Encode a little-endian PCM stream. The length must be a multiple of
/// 160 bytes; an empty stream yields no frames.
pub fn encode_stream(pcm: &[u8]) -> Result<Vec<CompressedFrame>> {
    validate_stream_length(pcm, PCM_FRAME_BYTES)?;
    let frames = with_channel(|channel| {
        pcm.chunks_exact(PCM_FRAME_BYTES)
            .map(|chunk| channel.encode_bytes(chunk))
            .collect::<Result<Vec<_>>>()
    })?;
    debug!(frames = frames.len(), "Encoded stream");
    Ok(frames)
}

/// Decode a stream of 10-byte frames into 160-byte PCM frames. The length
/// must be a multiple of 10 bytes.
pub fn decode_stream(data: &[u8]) -> Result<Vec<Vec<u8>>> {
    validate_stream_length(data, COMPRESSED_FRAME_BYTES)?;
    let frames = with_channel(|channel| {
        data.chunks_exact(COMPRESSED_FRAME_BYTES)
            .map(|chunk| channel.decode_to_bytes(chunk))
            .collect::<Result<Vec<_>>>()
    })?;
    debug!(frames = frames.len(), "Decoded stream");
    Ok(frames)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codecs::l16::samples_to_le_bytes;
    use crate::error::CodecError;

    fn pcm_stream(frames: usize) -> Vec<u8> {
        let samples: Vec<i16> = (0..frames * 80)
            .map(|n| ((n as f64 * 0.21).sin() * 7000.0) as i16)
            .collect();
        samples_to_le_bytes(&samples)
    }

    #[test]
    fn test_encode_stream_frame_count() {
        let frames = encode_stream(&pcm_stream(6)).unwrap();
        assert_eq!(frames.len(), 6);
        assert!(encode_stream(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_stream_lengths_validated() {
        assert_eq!(
            encode_stream(&[0u8; 161]).unwrap_err(),
            CodecError::InvalidLength { unit: 160, actual: 161 }
        );
        assert_eq!(
            decode_stream(&[0u8; 15]).unwrap_err(),
            CodecError::InvalidLength { unit: 10, actual: 15 }
        );
    }

    #[test]
    fn test_stream_matches_channel() {
        let pcm = pcm_stream(4);
        let frames = encode_stream(&pcm).unwrap();

        let mut channel = Channel::open().unwrap();
        for (chunk, frame) in pcm.chunks_exact(PCM_FRAME_BYTES).zip(frames.iter()) {
            assert_eq!(&channel.encode_bytes(chunk).unwrap(), frame);
        }
    }

    #[test]
    fn test_decode_stream_layout() {
        let frames = encode_stream(&pcm_stream(3)).unwrap();
        let data: Vec<u8> = frames.iter().flat_map(|f| f.into_bytes()).collect();
        let pcm = decode_stream(&data).unwrap();
        assert_eq!(pcm.len(), 3);
        assert!(pcm.iter().all(|frame| frame.len() == PCM_FRAME_BYTES));
    }

    #[test]
    fn test_calls_are_independent() {
        let pcm = pcm_stream(2);
        assert_eq!(encode_stream(&pcm).unwrap(), encode_stream(&pcm).unwrap());
    }
}
