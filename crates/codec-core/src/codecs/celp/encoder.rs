//! CELP Encoder
//!
//! Analysis-by-synthesis search against a local copy of the decoder state:
//! adaptive codebook first, then one pulse per track on the pitch-removed
//! target.

use super::bitstream::pack_frame;
use super::lpc::{convolve, impulse_response, residual};
use super::math::{
    FILTERED_LIMIT, clamp_magnitude, dot, gain_from_index, quantize_gain, round_shift, saturate,
};
use super::synthesis::SynthesisState;
use super::types::{
    COMPRESSED_FRAME_BYTES, FrameParams, L_FRAME, L_SUBFR, M, N_SUBFR, NB_POS, NB_TRACKS, PIT_MAX,
    PIT_MIN, PITCH_GAIN_Q14, Pulse, SubframeParams,
};
use crate::error::Result;

/// High-pass pole (0.98 in Q15)
const HIGHPASS_POLE_Q15: i64 = 32113;

/// First-order DC blocker applied to encoder input
#[derive(Debug, Clone, Default)]
pub struct HighPassFilter {
    x1: i16,
    /// Previous output in Q15
    y1: i64,
}

impl HighPassFilter {
    /// Filter a block in place.
    pub fn process(&mut self, samples: &mut [i16]) {
        const LIMIT_Q15: i64 = (i16::MAX as i64) << 15;
        for sample in samples.iter_mut() {
            let x = *sample as i64;
            let y = ((x - self.x1 as i64) << 15) + ((self.y1 * HIGHPASS_POLE_Q15) >> 15);
            self.y1 = clamp_magnitude(y, LIMIT_Q15);
            self.x1 = *sample;
            *sample = saturate(round_shift(y, 15));
        }
    }

    /// Clear the filter memory
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// CELP encoder state
#[derive(Debug, Clone)]
pub struct CelpEncoder {
    state: SynthesisState,
    highpass: Option<HighPassFilter>,
    residual_mem: [i16; M],
}

impl CelpEncoder {
    /// Create an encoder with input high-pass filtering enabled
    pub fn new() -> Result<Self> {
        Self::with_highpass(true)
    }

    /// Create an encoder, optionally without the input high-pass filter
    pub fn with_highpass(highpass: bool) -> Result<Self> {
        Ok(Self {
            state: SynthesisState::new()?,
            highpass: highpass.then(HighPassFilter::default),
            residual_mem: [0; M],
        })
    }

    /// Encode 80 samples into one 10-byte frame.
    pub fn encode_frame(&mut self, pcm: &[i16; L_FRAME]) -> [u8; COMPRESSED_FRAME_BYTES] {
        let mut speech = *pcm;
        if let Some(filter) = self.highpass.as_mut() {
            filter.process(&mut speech);
        }

        let a = self.state.lpc().a;
        let gain_index = self.estimate_gain_index(&speech);
        let amplitude = gain_from_index(gain_index);
        let gain_delta = gain_index.wrapping_sub(self.state.predicted_gain_index());
        let h = impulse_response(&a);

        let mut reconstructed = [0i16; L_FRAME];
        let mut subframes = [SubframeParams::default(); N_SUBFR];
        for (subframe, params_out) in subframes.iter_mut().enumerate() {
            let start = subframe * L_SUBFR;
            let zir = self.state.zero_input_response();
            let mut target = [0i64; L_SUBFR];
            for (n, t) in target.iter_mut().enumerate() {
                *t = speech[start + n] as i64 - zir[n] as i64;
            }

            let (lag_index, pitch_gain_index, filtered) =
                self.search_adaptive(subframe, &h, &target);
            let pitch_gain = PITCH_GAIN_Q14[pitch_gain_index as usize] as i64;
            for (t, &y) in target.iter_mut().zip(filtered.iter()) {
                *t -= round_shift(pitch_gain * y, 14);
            }

            let pulses = search_pulses(&h, &mut target, amplitude);
            let params = SubframeParams { lag_index, pitch_gain_index, pulses };
            self.state.decode_subframe(
                subframe,
                &params,
                amplitude,
                &mut reconstructed[start..start + L_SUBFR],
            );
            *params_out = params;
        }
        self.state.finish_frame(&reconstructed, gain_index);

        pack_frame(&FrameParams { gain_delta, subframes })
    }

    /// Quantized innovation amplitude from the LPC residual energy.
    fn estimate_gain_index(&mut self, speech: &[i16; L_FRAME]) -> u8 {
        let a = self.state.lpc().a;
        let mut res = [0i64; L_FRAME];
        residual(&a, speech, &mut self.residual_mem, &mut res);

        let energy: i64 = res
            .iter()
            .map(|&r| {
                let r = clamp_magnitude(r, 1 << 20);
                r * r
            })
            .sum();
        let rms = (energy / L_FRAME as i64).isqrt();
        // two pulses carry the energy of a whole subframe
        quantize_gain(rms * 5 / 2)
    }

    /// Best lag and quantized gain for the adaptive codebook.
    ///
    /// Returns the lag index, pitch gain index and the filtered vector of the
    /// chosen lag. Lags with no positive correlation are never chosen.
    fn search_adaptive(
        &self,
        subframe: usize,
        h: &[i64; L_SUBFR],
        target: &[i64; L_SUBFR],
    ) -> (u8, u8, [i64; L_SUBFR]) {
        let mut best: Option<(usize, i64, i64, [i64; L_SUBFR])> = None;

        for lag in PIT_MIN..=PIT_MAX {
            let y = convolve(h, &self.state.past_excitation(subframe, lag));
            let corr = dot(target, &y);
            let energy = dot(&y, &y);
            if corr <= 0 || energy <= 0 {
                continue;
            }
            let better = match &best {
                None => true,
                Some((_, best_corr, best_energy, _)) => {
                    let lhs = corr as i128 * corr as i128 * *best_energy as i128;
                    let rhs = *best_corr as i128 * *best_corr as i128 * energy as i128;
                    lhs > rhs
                }
            };
            if better {
                best = Some((lag, corr, energy, y));
            }
        }

        match best {
            None => (0, 0, [0; L_SUBFR]),
            Some((lag, corr, energy, y)) => {
                let optimal = ((corr as i128) << 14) / energy as i128;
                let gain_index = PITCH_GAIN_Q14
                    .iter()
                    .enumerate()
                    .min_by_key(|&(_, &g)| (g as i128 - optimal).abs())
                    .map_or(0, |(i, _)| i as u8);
                ((lag - PIT_MIN) as u8, gain_index, y)
            }
        }
    }

    /// Clear all adaptation state
    pub fn reset(&mut self) {
        self.state.reset();
        if let Some(filter) = self.highpass.as_mut() {
            filter.reset();
        }
        self.residual_mem = [0; M];
    }
}

/// Greedy fixed codebook search: one signed pulse per track, each removed
/// from the target before the next track is searched.
fn search_pulses(
    h: &[i64; L_SUBFR],
    target: &mut [i64; L_SUBFR],
    amplitude: i32,
) -> [Pulse; NB_TRACKS] {
    let mut pulses = [Pulse::default(); NB_TRACKS];
    if amplitude == 0 {
        return pulses;
    }

    for (track, pulse_out) in pulses.iter_mut().enumerate() {
        let mut best_score = i64::MIN;
        let mut best = (Pulse::default(), [0i64; L_SUBFR]);

        for position in 0..NB_POS as u8 {
            let offset = Pulse { position, negative: false }.offset(track);
            let mut z = [0i64; L_SUBFR];
            for n in offset..L_SUBFR {
                z[n] = clamp_magnitude(
                    round_shift(amplitude as i64 * h[n - offset], 12),
                    FILTERED_LIMIT,
                );
            }
            let corr = dot(target, &z);
            let score = 2 * corr.abs() - dot(&z, &z);
            if score > best_score {
                best_score = score;
                best = (Pulse { position, negative: corr < 0 }, z);
            }
        }

        let (pulse, z) = best;
        for (t, &zn) in target.iter_mut().zip(z.iter()) {
            if pulse.negative {
                *t += zn;
            } else {
                *t -= zn;
            }
        }
        *pulse_out = pulse;
    }

    pulses
}
