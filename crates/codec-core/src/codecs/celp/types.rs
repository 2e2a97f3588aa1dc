//! CELP Types and Constants

/// Frame size in samples (10ms at 8kHz)
pub const L_FRAME: usize = 80;

/// Subframe size in samples (2.5ms at 8kHz)
pub const L_SUBFR: usize = 20;

/// Number of subframes per frame
pub const N_SUBFR: usize = L_FRAME / L_SUBFR;

/// LPC filter order
pub const M: usize = 10;

/// LPC filter order + 1
pub const MP1: usize = M + 1;

/// Minimum pitch lag
pub const PIT_MIN: usize = 20;

/// Maximum pitch lag (6-bit lag index)
pub const PIT_MAX: usize = PIT_MIN + 63;

/// Reconstructed speech kept for backward LPC analysis
pub const L_HISTORY: usize = 160;

/// Pulse tracks per subframe (even and odd positions)
pub const NB_TRACKS: usize = 2;

/// Positions per track
pub const NB_POS: usize = L_SUBFR / NB_TRACKS;

/// Gain indices averaged by the gain predictor
pub const GAIN_HISTORY: usize = 4;

/// Bits per compressed frame
pub const FRAME_BITS: usize = 80;

/// Samples in one PCM frame
pub const PCM_FRAME_SAMPLES: usize = L_FRAME;

/// Bytes in one little-endian PCM frame
pub const PCM_FRAME_BYTES: usize = L_FRAME * 2;

/// Bytes in one compressed frame
pub const COMPRESSED_FRAME_BYTES: usize = FRAME_BITS / 8;

/// Quantized pitch gains (Q14): 0, 0.35, 0.65, 0.9
pub const PITCH_GAIN_Q14: [i32; 4] = [0, 5734, 10650, 14746];

/// 2^(k/16) in Q15 for k = 0..15
pub const POW2_FRAC_Q15: [i64; 16] = [
    32768, 34219, 35734, 37316, 38968, 40693, 42495, 44376, 46341, 48393, 50535, 52773, 55109,
    57549, 60097, 62757,
];

/// One signed unit pulse of the fixed codebook
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Pulse {
    /// Position index within the track (4 bits on the wire, 0..=9 meaningful)
    pub position: u8,
    /// Pulse sign
    pub negative: bool,
}

impl Pulse {
    /// Sample offset within the subframe. Out-of-range indices clamp to
    /// the last position of the track.
    pub fn offset(self, track: usize) -> usize {
        track + NB_TRACKS * (self.position as usize).min(NB_POS - 1)
    }
}

/// Parameters of one subframe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SubframeParams {
    /// Pitch lag minus `PIT_MIN` (6 bits)
    pub lag_index: u8,
    /// Index into `PITCH_GAIN_Q14` (2 bits)
    pub pitch_gain_index: u8,
    /// One pulse per track
    pub pulses: [Pulse; NB_TRACKS],
}

impl SubframeParams {
    /// Pitch lag in samples
    pub fn lag(&self) -> usize {
        PIT_MIN + (self.lag_index as usize).min(PIT_MAX - PIT_MIN)
    }

    /// Pitch gain in Q14
    pub fn pitch_gain(&self) -> i32 {
        PITCH_GAIN_Q14[(self.pitch_gain_index as usize).min(PITCH_GAIN_Q14.len() - 1)]
    }
}

/// Parameters of one frame, the unpacked form of a compressed frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameParams {
    /// Innovation gain index minus the predicted index, modulo 256
    pub gain_delta: u8,
    /// Per-subframe parameters
    pub subframes: [SubframeParams; N_SUBFR],
}
