//! # Voxlane Audio-Core
//!
//! Sample-level processing for the Voxlane speech engine. The codec half
//! lives in `voxlane-codec-core`; this crate combines decoded streams.
//!
//! ## Usage
//!
//! ```rust
//! use voxlane_audio_core::processing::mix;
//!
//! let near: &[i16] = &[1000, 30000];
//! let far: &[i16] = &[-500, 10000];
//! let mixed = mix(&[near, far], 8000)?;
//! assert_eq!(mixed.samples, vec![500, 32767]);
//! # Ok::<(), voxlane_audio_core::AudioError>(())
//! ```

#![deny(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod processing;
pub mod types;

// Re-export commonly used types
pub use error::{AudioError, AudioResult};
pub use processing::{AudioMixer, mix, mix_pcm_bytes};
pub use types::AudioFrame;

/// Version information for the audio library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
