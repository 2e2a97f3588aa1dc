//! 8 kbit/s CELP speech codec
//!
//! Narrowband speech at 8 kHz is coded in 10 ms frames: 80 samples in,
//! 10 bytes out. The codec is backward adaptive. The LPC synthesis filter
//! and the innovation gain predictor are derived from already decoded
//! output, so a frame carries only excitation parameters:
//!
//! | Field              | Bits | Per    |
//! |--------------------|------|--------|
//! | Gain delta         | 8    | frame  |
//! | Pitch lag (20..83) | 6    | subframe |
//! | Pitch gain         | 2    | subframe |
//! | Pulse sign + position | 2 x 5 | subframe |
//!
//! Encoder and decoder share [`synthesis::SynthesisState`], and both are
//! fully deterministic. Two encoders fed the same PCM produce the same bits,
//! and a decoder fed those bits reproduces the encoder's local
//! reconstruction exactly.
//!
//! # Example
//!
//! ```rust
//! use voxlane_codec_core::codecs::celp::{CelpDecoder, CelpEncoder, L_FRAME};
//!
//! let mut encoder = CelpEncoder::new()?;
//! let mut decoder = CelpDecoder::new()?;
//!
//! let pcm = [0i16; L_FRAME];
//! let frame = encoder.encode_frame(&pcm);
//! assert_eq!(frame.len(), 10);
//!
//! let decoded = decoder.decode_frame(&frame);
//! assert_eq!(decoded.len(), L_FRAME);
//! # Ok::<(), voxlane_codec_core::CodecError>(())
//! ```

pub mod bitstream;
pub mod decoder;
pub mod encoder;
pub mod lpc;
pub mod math;
pub mod synthesis;
pub mod types;

pub use decoder::{CelpDecoder, DEFAULT_MUTE_AFTER};
pub use encoder::{CelpEncoder, HighPassFilter};
pub use types::{
    COMPRESSED_FRAME_BYTES, FrameParams, L_FRAME, PCM_FRAME_BYTES, PCM_FRAME_SAMPLES, Pulse,
    SubframeParams,
};
