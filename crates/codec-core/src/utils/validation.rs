//! Input validation utilities for codec operations
//!
//! Each check runs before any state is touched, so a rejected call leaves
//! its channel exactly as it was.

use crate::codecs::celp::{COMPRESSED_FRAME_BYTES, PCM_FRAME_BYTES, PCM_FRAME_SAMPLES};
use crate::error::{CodecError, Result};

/// Validate one PCM frame and view it as a fixed-size array
pub fn validate_pcm_frame(samples: &[i16]) -> Result<&[i16; PCM_FRAME_SAMPLES]> {
    samples
        .try_into()
        .map_err(|_| CodecError::InvalidFrameSize {
            expected: PCM_FRAME_SAMPLES,
            actual: samples.len(),
        })
}

/// Validate one PCM frame given as little-endian bytes
pub fn validate_pcm_bytes(pcm: &[u8]) -> Result<()> {
    if pcm.len() != PCM_FRAME_BYTES {
        return Err(CodecError::InvalidFrameSize {
            expected: PCM_FRAME_BYTES,
            actual: pcm.len(),
        });
    }
    Ok(())
}

/// Validate one compressed frame and view it as a fixed-size array
pub fn validate_compressed_frame(data: &[u8]) -> Result<&[u8; COMPRESSED_FRAME_BYTES]> {
    data.try_into()
        .map_err(|_| CodecError::InvalidFrameSize {
            expected: COMPRESSED_FRAME_BYTES,
            actual: data.len(),
        })
}

/// Validate that a byte stream splits into whole units of `unit` bytes
pub fn validate_stream_length(data: &[u8], unit: usize) -> Result<()> {
    if data.len() % unit != 0 {
        return Err(CodecError::InvalidLength {
            unit,
            actual: data.len(),
        });
    }
    Ok(())
}
