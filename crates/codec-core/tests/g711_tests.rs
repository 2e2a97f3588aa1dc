//! G.711 companding integration tests

#![cfg(feature = "g711")]

mod common;

use common::generate_test_signal;
use voxlane_codec_core::codecs::g711::{alaw_to_pcm, pcm_to_alaw, pcm_to_ulaw, ulaw_to_pcm};
use voxlane_codec_core::codecs::l16::{samples_from_le_bytes, samples_to_le_bytes};
use voxlane_codec_core::{CodecConfig, CodecError, CodecFactory};

fn snr_db(original: &[i16], decoded: &[i16]) -> f64 {
    let signal: f64 = original.iter().map(|&s| (s as f64).powi(2)).sum();
    let noise: f64 = original
        .iter()
        .zip(decoded)
        .map(|(&a, &b)| (a as f64 - b as f64).powi(2))
        .sum();
    10.0 * (signal / noise.max(1.0)).log10()
}

#[test]
fn test_alaw_round_trip_quality() {
    let samples = generate_test_signal(1600, 1000.0, 16000.0);
    let pcm = samples_to_le_bytes(&samples);
    let decoded = samples_from_le_bytes(&alaw_to_pcm(&pcm_to_alaw(&pcm).unwrap())).unwrap();
    assert_eq!(decoded.len(), samples.len());
    assert!(snr_db(&samples, &decoded) > 30.0);
}

#[test]
fn test_ulaw_round_trip_quality() {
    let samples = generate_test_signal(1600, 440.0, 12000.0);
    let pcm = samples_to_le_bytes(&samples);
    let decoded = samples_from_le_bytes(&ulaw_to_pcm(&pcm_to_ulaw(&pcm).unwrap())).unwrap();
    assert!(snr_db(&samples, &decoded) > 30.0);
}

#[test]
fn test_harness_frame_sizes() {
    // a 160-byte PCM frame compands to 80 bytes and back
    let pcm = samples_to_le_bytes(&generate_test_signal(80, 500.0, 3000.0));
    let alaw = pcm_to_alaw(&pcm).unwrap();
    assert_eq!(alaw.len(), 80);
    assert_eq!(alaw_to_pcm(&alaw).len(), 160);
}

#[test]
fn test_odd_length_pcm_rejected() {
    assert_eq!(
        pcm_to_ulaw(&[0u8; 161]).unwrap_err(),
        CodecError::InvalidLength { unit: 2, actual: 161 }
    );
}

#[test]
fn test_factory_codec_matches_byte_helpers() {
    let samples = generate_test_signal(80, 700.0, 9000.0);
    let mut codec = CodecFactory::create(CodecConfig::pcmu()).unwrap();
    let encoded = codec.encode(&samples).unwrap();
    assert_eq!(encoded, pcm_to_ulaw(&samples_to_le_bytes(&samples)).unwrap());
}
