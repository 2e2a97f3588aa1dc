//! Excitation and synthesis state shared by the encoder and decoder
//!
//! The encoder drives its own copy of this state with the parameters it has
//! just chosen, so both ends run the same code over the same inputs and stay
//! in lockstep.

use super::lpc::{LpcCoefficients, synthesis_filter};
use super::math::{gain_from_index, round_shift, saturate};
use super::types::{
    GAIN_HISTORY, L_FRAME, L_HISTORY, L_SUBFR, M, N_SUBFR, NB_POS, PIT_MAX, Pulse, SubframeParams,
};
use crate::error::Result;

/// Gain index decrement applied per concealed frame (-3 dB)
const CONCEAL_GAIN_STEP: u8 = 8;

/// Seed of the concealment pulse generator
const CONCEAL_SEED: u16 = 21845;

/// State of the excitation generator and synthesis filter
#[derive(Debug, Clone)]
pub struct SynthesisState {
    /// Past excitation followed by the current frame's excitation
    old_exc: Vec<i16>,
    /// Reconstructed speech used for backward LPC analysis
    history: Vec<i16>,
    mem_syn: [i16; M],
    lpc: LpcCoefficients,
    gain_history: [u8; GAIN_HISTORY],
    last_lag_index: u8,
    last_pitch_gain_index: u8,
    last_gain_index: u8,
    seed: u16,
}

fn zeroed(len: usize) -> Result<Vec<i16>> {
    let mut buffer = Vec::new();
    buffer.try_reserve_exact(len)?;
    buffer.resize(len, 0);
    Ok(buffer)
}

impl SynthesisState {
    /// Allocate a silent state
    pub fn new() -> Result<Self> {
        Ok(Self {
            old_exc: zeroed(PIT_MAX + L_FRAME)?,
            history: zeroed(L_HISTORY)?,
            mem_syn: [0; M],
            lpc: LpcCoefficients::default(),
            gain_history: [0; GAIN_HISTORY],
            last_lag_index: 0,
            last_pitch_gain_index: 0,
            last_gain_index: 0,
            seed: CONCEAL_SEED,
        })
    }

    /// Return to the freshly allocated state without reallocating.
    pub fn reset(&mut self) {
        self.old_exc.fill(0);
        self.history.fill(0);
        self.mem_syn = [0; M];
        self.lpc = LpcCoefficients::default();
        self.gain_history = [0; GAIN_HISTORY];
        self.last_lag_index = 0;
        self.last_pitch_gain_index = 0;
        self.last_gain_index = 0;
        self.seed = CONCEAL_SEED;
    }

    /// Current synthesis filter
    pub fn lpc(&self) -> &LpcCoefficients {
        &self.lpc
    }

    /// Reconstructed speech history, oldest first
    pub fn history(&self) -> &[i16] {
        &self.history
    }

    /// Gain index predicted from the last `GAIN_HISTORY` frames
    pub fn predicted_gain_index(&self) -> u8 {
        let sum: u32 = self.gain_history.iter().map(|&g| g as u32).sum();
        ((sum + GAIN_HISTORY as u32 / 2) / GAIN_HISTORY as u32) as u8
    }

    /// Adaptive codebook vector for `lag` at subframe `subframe`.
    ///
    /// Lags shorter than the subframe repeat the most recent period.
    pub fn past_excitation(&self, subframe: usize, lag: usize) -> [i64; L_SUBFR] {
        let base = PIT_MAX + subframe * L_SUBFR;
        let mut v = [0i64; L_SUBFR];
        for (n, out) in v.iter_mut().enumerate() {
            *out = self.old_exc[base + n - lag] as i64;
        }
        if lag < L_SUBFR {
            for n in lag..L_SUBFR {
                v[n] = v[n - lag];
            }
        }
        v
    }

    /// Output of the synthesis filter for zero excitation over one subframe
    pub fn zero_input_response(&self) -> [i16; L_SUBFR] {
        let mut mem = self.mem_syn;
        let mut out = [0i16; L_SUBFR];
        synthesis_filter(&self.lpc.a, &[0i16; L_SUBFR], &mut mem, &mut out);
        out
    }

    /// Build one subframe of excitation and synthesize it into `out`.
    pub fn decode_subframe(
        &mut self,
        subframe: usize,
        params: &SubframeParams,
        amplitude: i32,
        out: &mut [i16],
    ) {
        let v = self.past_excitation(subframe, params.lag());
        let pitch_gain = params.pitch_gain() as i64;

        let mut excitation = [0i64; L_SUBFR];
        for (e, &past) in excitation.iter_mut().zip(v.iter()) {
            *e = round_shift(pitch_gain * past, 14);
        }
        for (track, pulse) in params.pulses.iter().enumerate() {
            let offset = pulse.offset(track);
            if pulse.negative {
                excitation[offset] -= amplitude as i64;
            } else {
                excitation[offset] += amplitude as i64;
            }
        }

        let base = PIT_MAX + subframe * L_SUBFR;
        let mut current = [0i16; L_SUBFR];
        for (slot, &e) in current.iter_mut().zip(excitation.iter()) {
            *slot = saturate(e);
        }
        self.old_exc[base..base + L_SUBFR].copy_from_slice(&current);

        synthesis_filter(&self.lpc.a, &current, &mut self.mem_syn, &mut out[..L_SUBFR]);

        self.last_lag_index = params.lag_index;
        self.last_pitch_gain_index = params.pitch_gain_index;
    }

    /// Close a frame: shift the excitation buffer, append the reconstruction
    /// to the history and re-derive the filter for the next frame.
    pub fn finish_frame(&mut self, frame: &[i16], gain_index: u8) {
        self.old_exc.copy_within(L_FRAME.., 0);
        self.history.copy_within(L_FRAME.., 0);
        self.history[L_HISTORY - L_FRAME..].copy_from_slice(&frame[..L_FRAME]);
        self.lpc = LpcCoefficients::analyze(&self.history);

        self.gain_history.rotate_left(1);
        self.gain_history[GAIN_HISTORY - 1] = gain_index;
        self.last_gain_index = gain_index;
    }

    /// Synthesize a frame without received parameters.
    ///
    /// Repeats the last pitch lag with decaying gains and a pseudo-random
    /// innovation. A muted frame is silent and clears the filter memory.
    pub fn conceal_frame(&mut self, muted: bool, out: &mut [i16; L_FRAME]) {
        if muted {
            out.fill(0);
            self.mem_syn = [0; M];
            self.old_exc[PIT_MAX..].fill(0);
            self.last_pitch_gain_index = 0;
            self.finish_frame(out, 0);
            return;
        }

        let gain_index = self.last_gain_index.saturating_sub(CONCEAL_GAIN_STEP);
        let pitch_gain_index = self.last_pitch_gain_index.saturating_sub(1);
        let amplitude = gain_from_index(gain_index);

        for subframe in 0..N_SUBFR {
            let pulses = [self.random_pulse(), self.random_pulse()];
            let params = SubframeParams {
                lag_index: self.last_lag_index,
                pitch_gain_index,
                pulses,
            };
            let range = subframe * L_SUBFR..(subframe + 1) * L_SUBFR;
            self.decode_subframe(subframe, &params, amplitude, &mut out[range]);
        }

        self.finish_frame(out, gain_index);
    }

    fn random_pulse(&mut self) -> Pulse {
        self.seed = self.seed.wrapping_mul(31821).wrapping_add(13849);
        Pulse {
            position: ((self.seed >> 8) % NB_POS as u16) as u8,
            negative: self.seed & 1 == 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn impulse_params(position: u8) -> SubframeParams {
        SubframeParams {
            lag_index: 0,
            pitch_gain_index: 0,
            pulses: [Pulse { position, negative: false }, Pulse { position, negative: true }],
        }
    }

    #[test]
    fn test_new_state_is_silent() {
        let state = SynthesisState::new().unwrap();
        assert!(state.history().iter().all(|&s| s == 0));
        assert_eq!(state.predicted_gain_index(), 0);
        assert_eq!(state.zero_input_response(), [0; L_SUBFR]);
        assert!(state.lpc().is_flat());
    }

    #[test]
    fn test_flat_filter_passes_excitation() {
        let mut state = SynthesisState::new().unwrap();
        let mut out = [0i16; L_SUBFR];
        state.decode_subframe(0, &impulse_params(3), 1000, &mut out);
        // track 0 at sample 6 positive, track 1 at sample 7 negative
        assert_eq!(out[6], 1000);
        assert_eq!(out[7], -1000);
        assert_eq!(out.iter().filter(|&&s| s != 0).count(), 2);
    }

    #[test]
    fn test_pitch_repetition() {
        let mut state = SynthesisState::new().unwrap();
        let mut frame = [0i16; L_FRAME];
        state.decode_subframe(0, &impulse_params(0), 8000, &mut frame[..L_SUBFR]);
        // lag 20 with gain 0.9 copies the previous subframe's pulses
        let params = SubframeParams { pitch_gain_index: 3, ..impulse_params(9) };
        let v = state.past_excitation(1, params.lag());
        assert_eq!(v[0], 8000);
        assert_eq!(v[1], -8000);
        state.decode_subframe(1, &params, 0, &mut frame[L_SUBFR..2 * L_SUBFR]);
        assert_eq!(frame[L_SUBFR], 7200);
        assert_eq!(frame[L_SUBFR + 1], -7200);
    }

    #[test]
    fn test_short_lag_repeats_period() {
        let mut state = SynthesisState::new().unwrap();
        state.old_exc[PIT_MAX - 1] = 5;
        let v = state.past_excitation(0, 1);
        assert!(v.iter().all(|&x| x == 5));
    }

    #[test]
    fn test_finish_frame_tracks_gain() {
        let mut state = SynthesisState::new().unwrap();
        let frame = [100i16; L_FRAME];
        for gain in [40u8, 80, 120, 160] {
            state.finish_frame(&frame, gain);
        }
        assert_eq!(state.predicted_gain_index(), 100);
        assert_eq!(&state.history()[L_HISTORY - L_FRAME..], &frame[..]);
        assert!(!state.lpc().is_flat());
    }

    #[test]
    fn test_conceal_decays_to_silence() {
        let mut state = SynthesisState::new().unwrap();
        let mut frame = [0i16; L_FRAME];
        state.finish_frame(&frame, 200);
        state.conceal_frame(false, &mut frame);
        assert!(frame.iter().any(|&s| s != 0));

        state.conceal_frame(true, &mut frame);
        assert_eq!(frame, [0; L_FRAME]);
        assert_eq!(state.zero_input_response(), [0; L_SUBFR]);
    }

    #[test]
    fn test_reset_restores_initial_state() {
        let mut state = SynthesisState::new().unwrap();
        let mut frame = [0i16; L_FRAME];
        state.finish_frame(&[300; L_FRAME], 90);
        state.conceal_frame(false, &mut frame);
        state.reset();

        let fresh = SynthesisState::new().unwrap();
        assert_eq!(state.history(), fresh.history());
        assert_eq!(state.lpc(), fresh.lpc());
        assert_eq!(state.predicted_gain_index(), 0);
        assert_eq!(state.seed, CONCEAL_SEED);
    }
}
