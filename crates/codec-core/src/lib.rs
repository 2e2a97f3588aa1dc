//! # Voxlane Codec-Core: Stateful Speech Channel Engine
//!
//! This library provides the codec half of the Voxlane speech engine:
//! stateless companding codecs and a stateful 8 kbit/s CELP frame codec
//! wrapped in explicitly managed channels.
//!
//! ## Features
//!
//! - **G.711 (PCMU/PCMA)**: ITU-T μ-law and A-law with lookup tables
//! - **L16**: 16-bit linear PCM with explicit byte order
//! - **CELP8K**: Backward-adaptive CELP, 80 samples in, 10 bytes out
//! - **Channels**: Open/encode/decode/close lifecycle with per-channel state
//!
//! ## Usage
//!
//! ```rust
//! use voxlane_codec_core::{CodecConfig, CodecFactory};
//!
//! // Create a CELP channel through the factory
//! let mut codec = CodecFactory::create(CodecConfig::celp8k())?;
//!
//! // Encode one 10 ms frame
//! let samples = vec![0i16; 80];
//! let encoded = codec.encode(&samples)?;
//! assert_eq!(encoded.len(), 10);
//!
//! // Decode back to samples
//! let decoded = codec.decode(&encoded)?;
//! assert_eq!(decoded.len(), 80);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `g711`: G.711 μ-law/A-law codecs (enabled by default)

#![deny(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod channel;
pub mod codecs;
pub mod error;
pub mod stream;
pub mod types;
pub mod utils;

// Re-export commonly used types and traits
pub use channel::{Channel, ChannelConfig, ChannelStats};
pub use codecs::CodecFactory;
pub use codecs::celp::{COMPRESSED_FRAME_BYTES, PCM_FRAME_BYTES, PCM_FRAME_SAMPLES};
pub use error::{CodecError, ErrorCategory, Result};
pub use stream::{decode_stream, encode_stream};
pub use types::{
    AudioCodec, ByteOrder, CodecConfig, CodecInfo, CodecType, CompressedFrame,
};

/// Version information for the codec library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Supported codec types
pub const SUPPORTED_CODECS: &[&str] = &[
    #[cfg(feature = "g711")]
    "PCMU",
    #[cfg(feature = "g711")]
    "PCMA",
    "L16",
    "CELP8K",
];

/// Initialize the codec library
///
/// Installs a `tracing` subscriber if none is set and builds the G.711
/// lookup tables. It's safe to call multiple times.
///
/// # Errors
///
/// Currently infallible; the `Result` leaves room for fallible setup.
pub fn init() -> Result<()> {
    // Initialize logging if not already done
    let _ = tracing_subscriber::fmt::try_init();

    // Initialize lookup tables
    #[cfg(feature = "g711")]
    codecs::g711::init_tables();

    tracing::info!("Voxlane codec-core v{} initialized", VERSION);
    tracing::info!("Supported codecs: {:?}", SUPPORTED_CODECS);

    Ok(())
}

/// Get library information
pub fn info() -> LibraryInfo {
    LibraryInfo {
        version: VERSION,
        supported_codecs: SUPPORTED_CODECS.to_vec(),
        pcm_frame_samples: PCM_FRAME_SAMPLES,
        compressed_frame_bytes: COMPRESSED_FRAME_BYTES,
    }
}

/// Library information structure
#[derive(Debug, Clone)]
pub struct LibraryInfo {
    /// Library version
    pub version: &'static str,
    /// List of supported codec names
    pub supported_codecs: Vec<&'static str>,
    /// Samples per CELP frame
    pub pcm_frame_samples: usize,
    /// Bytes per compressed CELP frame
    pub compressed_frame_bytes: usize,
}
