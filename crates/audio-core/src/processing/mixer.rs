//! Multi-stream audio mixer
//!
//! Streams are summed sample by sample in a wide accumulator and the sum is
//! clamped to the 16-bit range once. No per-stream gain, no automatic gain
//! control: a single stream passes through unchanged.

use crate::error::{AudioError, AudioResult};
use crate::types::AudioFrame;
use tracing::{debug, trace};
use voxlane_codec_core::codecs::l16::{samples_from_le_bytes, samples_to_le_bytes};

/// Stateless saturating mixer for equal-length streams
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AudioMixer {
    sample_rate: u32,
}

impl AudioMixer {
    /// Create a mixer for streams at `sample_rate`
    pub fn new(sample_rate: u32) -> AudioResult<Self> {
        if sample_rate == 0 {
            return Err(AudioError::InvalidSampleRate { rate: sample_rate });
        }
        Ok(Self { sample_rate })
    }

    /// Sample rate of the mixed output
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Mix `streams` into a new frame.
    pub fn mix(&self, streams: &[&[i16]]) -> AudioResult<AudioFrame> {
        let mut samples = Vec::new();
        self.mix_into(streams, &mut samples)?;
        Ok(AudioFrame::new(samples, self.sample_rate))
    }

    /// Mix `streams` into `out`, replacing its contents.
    ///
    /// Returns the number of output samples that had to be clipped. On error
    /// `out` is left untouched.
    pub fn mix_into(&self, streams: &[&[i16]], out: &mut Vec<i16>) -> AudioResult<usize> {
        let len = validate_streams(streams)?;

        out.clear();
        out.reserve(len);
        let mut clipped = 0;
        for n in 0..len {
            let sum: i64 = streams.iter().map(|stream| stream[n] as i64).sum();
            let sample = sum.clamp(i16::MIN as i64, i16::MAX as i64);
            if sample != sum {
                clipped += 1;
            }
            out.push(sample as i16);
        }

        if clipped > 0 {
            trace!(streams = streams.len(), samples = len, clipped, "Mixed with clipping");
        }
        Ok(clipped)
    }

    /// Mix streams of little-endian PCM bytes into little-endian PCM bytes.
    pub fn mix_pcm_bytes(&self, streams: &[&[u8]]) -> AudioResult<Vec<u8>> {
        if streams.is_empty() {
            return Err(AudioError::EmptyInput);
        }
        let decoded = streams
            .iter()
            .map(|bytes| samples_from_le_bytes(bytes))
            .collect::<Result<Vec<_>, _>>()?;
        let views: Vec<&[i16]> = decoded.iter().map(Vec::as_slice).collect();
        let frame = self.mix(&views)?;
        Ok(samples_to_le_bytes(&frame.samples))
    }
}

/// Check the stream set and return the common length.
fn validate_streams(streams: &[&[i16]]) -> AudioResult<usize> {
    let first = streams.first().ok_or(AudioError::EmptyInput)?;
    let expected = first.len();
    for (index, stream) in streams.iter().enumerate().skip(1) {
        if stream.len() != expected {
            debug!(index, expected, actual = stream.len(), "Rejected mixer input");
            return Err(AudioError::LengthMismatch {
                index,
                expected,
                actual: stream.len(),
            });
        }
    }
    Ok(expected)
}

/// Mix equal-length sample streams at `sample_rate`.
pub fn mix(streams: &[&[i16]], sample_rate: u32) -> AudioResult<AudioFrame> {
    AudioMixer::new(sample_rate)?.mix(streams)
}

/// Mix equal-length little-endian PCM byte streams at `sample_rate`.
pub fn mix_pcm_bytes(streams: &[&[u8]], sample_rate: u32) -> AudioResult<Vec<u8>> {
    AudioMixer::new(sample_rate)?.mix_pcm_bytes(streams)
}
