//! Common test utilities

#![allow(dead_code)]

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use voxlane_codec_core::PCM_FRAME_SAMPLES;

/// Generate a sine tone at 8 kHz
pub fn generate_test_signal(length: usize, frequency: f32, amplitude: f32) -> Vec<i16> {
    (0..length)
        .map(|i| {
            let t = i as f32 / 8000.0;
            let sample = (2.0 * std::f32::consts::PI * frequency * t).sin() * amplitude;
            sample.clamp(-32768.0, 32767.0) as i16
        })
        .collect()
}

/// Generate speech-like signal: three formants under a syllable envelope
pub fn generate_speech_signal(length: usize) -> Vec<i16> {
    let formants = [500.0f32, 1500.0, 2500.0];
    let gains = [0.8f32, 0.6, 0.4];
    (0..length)
        .map(|i| {
            let t = i as f32 / 8000.0;
            let envelope = (2.0 * std::f32::consts::PI * 4.0 * t).sin().abs();
            let sum: f32 = formants
                .iter()
                .zip(gains.iter())
                .map(|(f, g)| (2.0 * std::f32::consts::PI * f * t).sin() * g)
                .sum();
            (sum * envelope * 6000.0).clamp(-32768.0, 32767.0) as i16
        })
        .collect()
}

/// Reproducible white noise
pub fn generate_white_noise(length: usize, amplitude: i16, seed: u64) -> Vec<i16> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..length).map(|_| rng.gen_range(-amplitude..=amplitude)).collect()
}

/// Reproducible random bytes
pub fn random_bytes(length: usize, seed: u64) -> Vec<u8> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..length).map(|_| rng.gen_range(0..=u8::MAX)).collect()
}

/// Split a signal into whole PCM frames
pub fn frames(signal: &[i16]) -> Vec<Vec<i16>> {
    signal.chunks_exact(PCM_FRAME_SAMPLES).map(<[i16]>::to_vec).collect()
}
