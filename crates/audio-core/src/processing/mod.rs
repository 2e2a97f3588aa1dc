//! Audio signal processing module
//!
//! Sample-level operations on 16-bit PCM. Everything here is pure: no state
//! survives between calls.

pub mod mixer;

pub use mixer::{AudioMixer, mix, mix_pcm_bytes};
