//! Core types and traits for the codec library
//!
//! This module defines the fundamental types and traits that form the
//! foundation of the codec library's API.

use crate::codecs::celp::{COMPRESSED_FRAME_BYTES, DEFAULT_MUTE_AFTER, PCM_FRAME_SAMPLES};
use crate::error::{CodecError, Result};
use std::fmt;

/// Primary trait for audio codecs
///
/// This trait defines the core operations that all audio codecs must implement:
/// encoding, decoding, and state management.
pub trait AudioCodec: Send + Sync {
    /// Encode audio samples to compressed data
    ///
    /// # Errors
    ///
    /// Returns an error if encoding fails or input is invalid
    fn encode(&mut self, samples: &[i16]) -> Result<Vec<u8>>;

    /// Decode compressed data to audio samples
    ///
    /// # Errors
    ///
    /// Returns an error if decoding fails or data is invalid
    fn decode(&mut self, data: &[u8]) -> Result<Vec<i16>>;

    /// Get codec information
    fn info(&self) -> CodecInfo;

    /// Reset codec state
    ///
    /// This clears all internal state and prepares the codec for fresh input.
    /// Useful for handling stream discontinuities.
    fn reset(&mut self) -> Result<()>;

    /// Get the expected frame size in samples
    fn frame_size(&self) -> usize;

    /// Check if the codec supports variable frame sizes
    fn supports_variable_frame_size(&self) -> bool {
        false
    }
}

/// Audio codec information
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodecInfo {
    /// Codec name (e.g., "PCMU", "PCMA", "CELP8K")
    pub name: &'static str,
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Number of channels
    pub channels: u8,
    /// Bitrate in bits per second
    pub bitrate: u32,
    /// Frame size in samples
    pub frame_size: usize,
}

/// Audio codec types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CodecType {
    /// G.711 μ-law (PCMU)
    Pcmu,
    /// G.711 A-law (PCMA)
    Pcma,
    /// 16-bit linear PCM
    L16,
    /// Backward-adaptive CELP, 8 kbit/s, 10 ms frames
    Celp8k,
}

impl CodecType {
    /// Get the codec name
    pub fn name(self) -> &'static str {
        match self {
            Self::Pcmu => "PCMU",
            Self::Pcma => "PCMA",
            Self::L16 => "L16",
            Self::Celp8k => "CELP8K",
        }
    }

    /// Get the bitrate at 8 kHz mono
    pub fn bitrate(self) -> u32 {
        match self {
            Self::Pcmu | Self::Pcma => 64000,
            Self::L16 => 128000,
            Self::Celp8k => 8000,
        }
    }

    /// Get the frame size in samples (10 ms for every codec here)
    pub fn frame_size(self) -> usize {
        PCM_FRAME_SAMPLES
    }

    /// Check whether the codec carries state between frames
    pub fn is_stateful(self) -> bool {
        matches!(self, Self::Celp8k)
    }

    /// Parse a codec name (case-insensitive)
    pub fn from_name(name: &str) -> Result<Self> {
        match name.to_uppercase().as_str() {
            "PCMU" => Ok(Self::Pcmu),
            "PCMA" => Ok(Self::Pcma),
            "L16" => Ok(Self::L16),
            "CELP8K" => Ok(Self::Celp8k),
            _ => Err(CodecError::invalid_config(format!("unknown codec name: {name}"))),
        }
    }
}

impl fmt::Display for CodecType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Byte order tag for 16-bit linear sample data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ByteOrder {
    /// Least significant byte first (the internal PCM layout)
    LittleEndian,
    /// Most significant byte first (network order, the L16 default)
    #[default]
    BigEndian,
}

/// One compressed CELP frame (80 bits)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CompressedFrame([u8; COMPRESSED_FRAME_BYTES]);

impl CompressedFrame {
    /// Wrap raw frame bytes
    pub fn from_bytes(bytes: [u8; COMPRESSED_FRAME_BYTES]) -> Self {
        Self(bytes)
    }

    /// Copy a frame out of a slice, validating its length
    pub fn try_from_slice(data: &[u8]) -> Result<Self> {
        let bytes: [u8; COMPRESSED_FRAME_BYTES] =
            data.try_into().map_err(|_| CodecError::InvalidFrameSize {
                expected: COMPRESSED_FRAME_BYTES,
                actual: data.len(),
            })?;
        Ok(Self(bytes))
    }

    /// Borrow the frame bytes
    pub fn as_bytes(&self) -> &[u8; COMPRESSED_FRAME_BYTES] {
        &self.0
    }

    /// Consume the frame, returning its bytes
    pub fn into_bytes(self) -> [u8; COMPRESSED_FRAME_BYTES] {
        self.0
    }
}

impl AsRef<[u8]> for CompressedFrame {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; COMPRESSED_FRAME_BYTES]> for CompressedFrame {
    fn from(bytes: [u8; COMPRESSED_FRAME_BYTES]) -> Self {
        Self(bytes)
    }
}

/// Codec configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodecConfig {
    /// Codec type
    pub codec_type: CodecType,
    /// Wire byte order (L16 only)
    pub byte_order: ByteOrder,
    /// Remove DC before CELP analysis
    pub highpass: bool,
    /// Consecutive concealed CELP frames before output is muted
    pub conceal_mute_after: u32,
}

impl CodecConfig {
    /// Create a new codec configuration
    pub fn new(codec_type: CodecType) -> Self {
        Self {
            codec_type,
            byte_order: ByteOrder::default(),
            highpass: true,
            conceal_mute_after: DEFAULT_MUTE_AFTER,
        }
    }

    /// Create G.711 PCMU configuration
    pub fn pcmu() -> Self {
        Self::new(CodecType::Pcmu)
    }

    /// Create G.711 PCMA configuration
    pub fn pcma() -> Self {
        Self::new(CodecType::Pcma)
    }

    /// Create L16 configuration
    pub fn l16() -> Self {
        Self::new(CodecType::L16)
    }

    /// Create CELP configuration
    pub fn celp8k() -> Self {
        Self::new(CodecType::Celp8k)
    }

    /// Set the L16 wire byte order
    pub fn with_byte_order(mut self, byte_order: ByteOrder) -> Self {
        self.byte_order = byte_order;
        self
    }

    /// Enable or disable the CELP input high-pass filter
    pub fn with_highpass(mut self, highpass: bool) -> Self {
        self.highpass = highpass;
        self
    }

    /// Set how many consecutive lost frames are concealed before muting
    pub fn with_conceal_mute_after(mut self, frames: u32) -> Self {
        self.conceal_mute_after = frames;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.conceal_mute_after == 0 {
            return Err(CodecError::invalid_config(
                "conceal_mute_after must be at least 1 frame",
            ));
        }
        Ok(())
    }
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self::celp8k()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codec_type_names() {
        assert_eq!(CodecType::Pcmu.name(), "PCMU");
        assert_eq!(CodecType::Celp8k.to_string(), "CELP8K");
        assert_eq!(CodecType::from_name("pcma").unwrap(), CodecType::Pcma);
        assert!(CodecType::from_name("G722").is_err());
    }

    #[test]
    fn test_codec_type_properties() {
        assert_eq!(CodecType::Celp8k.bitrate(), 8000);
        assert_eq!(CodecType::Pcmu.bitrate(), 64000);
        assert!(CodecType::Celp8k.is_stateful());
        assert!(!CodecType::L16.is_stateful());
        assert_eq!(CodecType::Pcma.frame_size(), 80);
    }

    #[test]
    fn test_compressed_frame_from_slice() {
        let frame = CompressedFrame::try_from_slice(&[7u8; 10]).unwrap();
        assert_eq!(frame.as_bytes(), &[7u8; 10]);

        let err = CompressedFrame::try_from_slice(&[0u8; 11]).unwrap_err();
        assert_eq!(
            err,
            CodecError::InvalidFrameSize {
                expected: 10,
                actual: 11
            }
        );
    }

    #[test]
    fn test_config_validation() {
        assert!(CodecConfig::default().validate().is_ok());
        let config = CodecConfig::celp8k().with_conceal_mute_after(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_defaults_match_channel_defaults() {
        use crate::channel::ChannelConfig;
        let config = CodecConfig::celp8k();
        assert_eq!(config.conceal_mute_after, DEFAULT_MUTE_AFTER);
        assert_eq!(ChannelConfig::from(&config), ChannelConfig::default());
    }

    #[test]
    fn test_default_byte_order_is_network() {
        assert_eq!(ByteOrder::default(), ByteOrder::BigEndian);
    }
}
