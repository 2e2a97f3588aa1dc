//! Error types for audio processing

use thiserror::Error;
use voxlane_codec_core::CodecError;

/// Result type for audio operations
pub type AudioResult<T> = std::result::Result<T, AudioError>;

/// Audio processing error types
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AudioError {
    /// No input streams were supplied
    #[error("No input streams to mix")]
    EmptyInput,

    /// An input stream differs in length from the first stream
    #[error("Stream {index} has {actual} samples, expected {expected}")]
    LengthMismatch {
        /// Position of the offending stream
        index: usize,
        /// Length of the first stream
        expected: usize,
        /// Length of the offending stream
        actual: usize,
    },

    /// Sample rate is not usable
    #[error("Invalid sample rate: {rate} Hz")]
    InvalidSampleRate {
        /// Rejected rate
        rate: u32,
    },

    /// Byte-level sample conversion failed
    #[error("Codec error: {0}")]
    Codec(#[from] CodecError),
}

impl AudioError {
    /// Check if the caller can retry with corrected input
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::EmptyInput | Self::LengthMismatch { .. } | Self::InvalidSampleRate { .. } => true,
            Self::Codec(err) => err.is_recoverable(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AudioError::LengthMismatch { index: 2, expected: 160, actual: 80 };
        assert_eq!(err.to_string(), "Stream 2 has 80 samples, expected 160");
        assert_eq!(AudioError::EmptyInput.to_string(), "No input streams to mix");
    }

    #[test]
    fn test_codec_error_conversion() {
        let err: AudioError = CodecError::odd_sample_bytes(3).into();
        assert!(matches!(err, AudioError::Codec(CodecError::InvalidLength { unit: 2, actual: 3 })));
        assert!(err.is_recoverable());
        assert!(!AudioError::Codec(CodecError::ClosedChannel).is_recoverable());
    }
}
