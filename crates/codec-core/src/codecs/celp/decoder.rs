//! CELP Decoder

use super::bitstream::unpack_frame;
use super::math::gain_from_index;
use super::synthesis::SynthesisState;
use super::types::{COMPRESSED_FRAME_BYTES, L_FRAME, L_SUBFR};
use crate::error::Result;
use tracing::trace;

/// Default number of consecutive erased frames before output is muted
pub const DEFAULT_MUTE_AFTER: u32 = 6;

/// CELP decoder state
#[derive(Debug, Clone)]
pub struct CelpDecoder {
    state: SynthesisState,
    consecutive_erasures: u32,
    mute_after: u32,
}

impl CelpDecoder {
    /// Create a decoder with the default concealment length
    pub fn new() -> Result<Self> {
        Self::with_mute_after(DEFAULT_MUTE_AFTER)
    }

    /// Create a decoder that mutes after `mute_after` erased frames
    pub fn with_mute_after(mute_after: u32) -> Result<Self> {
        Ok(Self {
            state: SynthesisState::new()?,
            consecutive_erasures: 0,
            mute_after,
        })
    }

    /// Decode one 10-byte frame into 80 samples. Any bit pattern is accepted.
    pub fn decode_frame(&mut self, frame: &[u8; COMPRESSED_FRAME_BYTES]) -> [i16; L_FRAME] {
        let params = unpack_frame(frame);
        let gain_index = self.state.predicted_gain_index().wrapping_add(params.gain_delta);
        let amplitude = gain_from_index(gain_index);

        let mut out = [0i16; L_FRAME];
        for (subframe, (sub_params, chunk)) in params
            .subframes
            .iter()
            .zip(out.chunks_exact_mut(L_SUBFR))
            .enumerate()
        {
            self.state.decode_subframe(subframe, sub_params, amplitude, chunk);
        }
        self.state.finish_frame(&out, gain_index);

        self.consecutive_erasures = 0;
        out
    }

    /// Produce a replacement for a lost frame.
    pub fn conceal_frame(&mut self) -> [i16; L_FRAME] {
        self.consecutive_erasures = self.consecutive_erasures.saturating_add(1);
        let muted = self.consecutive_erasures > self.mute_after;
        trace!(erasures = self.consecutive_erasures, muted, "Concealing lost frame");

        let mut out = [0i16; L_FRAME];
        self.state.conceal_frame(muted, &mut out);
        out
    }

    /// Number of erased frames since the last good frame
    pub fn consecutive_erasures(&self) -> u32 {
        self.consecutive_erasures
    }

    /// Return to the freshly created state
    pub fn reset(&mut self) {
        self.state.reset();
        self.consecutive_erasures = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_frame_is_silent() {
        let mut decoder = CelpDecoder::new().unwrap();
        for _ in 0..5 {
            assert_eq!(decoder.decode_frame(&[0u8; COMPRESSED_FRAME_BYTES]), [0; L_FRAME]);
        }
    }

    #[test]
    fn test_garbage_frames_decode() {
        let mut decoder = CelpDecoder::new().unwrap();
        let mut seed = 0x1234_5678u32;
        for _ in 0..200 {
            let mut frame = [0u8; COMPRESSED_FRAME_BYTES];
            for byte in frame.iter_mut() {
                seed = seed.wrapping_mul(1_103_515_245).wrapping_add(12345);
                *byte = (seed >> 16) as u8;
            }
            let _ = decoder.decode_frame(&frame);
        }
        let _ = decoder.decode_frame(&[0xFF; COMPRESSED_FRAME_BYTES]);
    }

    #[test]
    fn test_same_frames_same_output() {
        let frames: Vec<[u8; COMPRESSED_FRAME_BYTES]> =
            (0..10u8).map(|i| [i.wrapping_mul(37); COMPRESSED_FRAME_BYTES]).collect();
        let mut a = CelpDecoder::new().unwrap();
        let mut b = CelpDecoder::new().unwrap();
        for frame in &frames {
            assert_eq!(a.decode_frame(frame), b.decode_frame(frame));
        }
    }

    #[test]
    fn test_concealment_mutes_after_limit() {
        let mut decoder = CelpDecoder::with_mute_after(2).unwrap();
        let _ = decoder.decode_frame(&[0x90; COMPRESSED_FRAME_BYTES]);
        let _ = decoder.conceal_frame();
        let _ = decoder.conceal_frame();
        assert_eq!(decoder.consecutive_erasures(), 2);
        assert_eq!(decoder.conceal_frame(), [0; L_FRAME]);

        let _ = decoder.decode_frame(&[0u8; COMPRESSED_FRAME_BYTES]);
        assert_eq!(decoder.consecutive_erasures(), 0);
    }

    #[test]
    fn test_reset_matches_fresh_decoder() {
        let frame = [0x5A; COMPRESSED_FRAME_BYTES];
        let mut used = CelpDecoder::new().unwrap();
        for _ in 0..4 {
            let _ = used.decode_frame(&[0xC3; COMPRESSED_FRAME_BYTES]);
        }
        used.reset();
        let mut fresh = CelpDecoder::new().unwrap();
        assert_eq!(used.decode_frame(&frame), fresh.decode_frame(&frame));
    }
}
