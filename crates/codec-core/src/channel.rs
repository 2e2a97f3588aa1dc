//! Stateful CELP channels
//!
//! A [`Channel`] owns one encoder and one decoder. The two sides adapt
//! independently: encoding never touches decoder state and vice versa.
//! Every mutating call takes `&mut self`, so a channel has a single writer at
//! any time, and distinct channels share no mutable state.
//!
//! ```text
//! OPEN --encode/decode/conceal/reset--> OPEN
//! OPEN --close--> CLOSED
//! CLOSED --any operation--> Err(ClosedChannel)
//! ```
//!
//! # Example
//!
//! ```rust
//! use voxlane_codec_core::{Channel, CodecError, PCM_FRAME_SAMPLES};
//!
//! let mut channel = Channel::open()?;
//! let frame = channel.encode(&[0i16; PCM_FRAME_SAMPLES])?;
//! let pcm = channel.decode(frame.as_bytes())?;
//! assert_eq!(pcm.len(), PCM_FRAME_SAMPLES);
//!
//! channel.close()?;
//! assert_eq!(channel.close(), Err(CodecError::ClosedChannel));
//! # Ok::<(), CodecError>(())
//! ```

use crate::codecs::celp::{
    COMPRESSED_FRAME_BYTES, CelpDecoder, CelpEncoder, DEFAULT_MUTE_AFTER, PCM_FRAME_SAMPLES,
};
use crate::codecs::l16::{samples_from_le_bytes, samples_to_le_bytes};
use crate::error::{CodecError, Result};
use crate::types::{AudioCodec, CodecConfig, CodecInfo, CodecType, CompressedFrame};
use crate::utils::{validate_compressed_frame, validate_pcm_bytes, validate_pcm_frame};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, trace, warn};

static NEXT_CHANNEL_ID: AtomicU64 = AtomicU64::new(1);

/// Per-channel codec settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelConfig {
    /// Remove DC from encoder input
    pub highpass: bool,
    /// Consecutive concealed frames before the decoder mutes
    pub conceal_mute_after: u32,
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            highpass: true,
            conceal_mute_after: DEFAULT_MUTE_AFTER,
        }
    }
}

impl ChannelConfig {
    /// Enable or disable the encoder high-pass filter
    pub fn with_highpass(mut self, highpass: bool) -> Self {
        self.highpass = highpass;
        self
    }

    /// Set the concealment length before muting
    pub fn with_conceal_mute_after(mut self, frames: u32) -> Self {
        self.conceal_mute_after = frames;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.conceal_mute_after == 0 {
            return Err(CodecError::invalid_config(
                "conceal_mute_after must be at least 1 frame",
            ));
        }
        Ok(())
    }
}

impl From<&CodecConfig> for ChannelConfig {
    fn from(config: &CodecConfig) -> Self {
        Self {
            highpass: config.highpass,
            conceal_mute_after: config.conceal_mute_after,
        }
    }
}

/// Frame counters of one channel
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChannelStats {
    /// Frames passed through the encoder
    pub frames_encoded: u64,
    /// Frames passed through the decoder
    pub frames_decoded: u64,
    /// Lost frames replaced by concealment
    pub frames_concealed: u64,
}

#[derive(Debug)]
struct ChannelState {
    encoder: CelpEncoder,
    decoder: CelpDecoder,
    stats: ChannelStats,
}

/// A CELP encode/decode channel
#[derive(Debug)]
pub struct Channel {
    id: u64,
    config: ChannelConfig,
    state: Option<Box<ChannelState>>,
}

impl Channel {
    /// Open a channel with the default configuration
    pub fn open() -> Result<Self> {
        Self::with_config(ChannelConfig::default())
    }

    /// Open a channel with zero-initialized encoder and decoder state
    ///
    /// The synthesis history buffers are reserved fallibly and a failure is
    /// reported as [`CodecError::AllocationFailed`]. The fixed-size state box
    /// itself goes through the global allocator and aborts on exhaustion.
    pub fn with_config(config: ChannelConfig) -> Result<Self> {
        config.validate()?;
        let state = ChannelState {
            encoder: CelpEncoder::with_highpass(config.highpass)?,
            decoder: CelpDecoder::with_mute_after(config.conceal_mute_after)?,
            stats: ChannelStats::default(),
        };
        let id = NEXT_CHANNEL_ID.fetch_add(1, Ordering::Relaxed);
        debug!(channel_id = id, ?config, "Opened channel");
        Ok(Self {
            id,
            config,
            state: Some(Box::new(state)),
        })
    }

    /// Process-unique channel identifier, used in log records
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Configuration the channel was opened with
    pub fn config(&self) -> &ChannelConfig {
        &self.config
    }

    /// True until [`close`](Self::close) succeeds
    pub fn is_open(&self) -> bool {
        self.state.is_some()
    }

    fn state_mut(&mut self) -> Result<&mut ChannelState> {
        match self.state.as_deref_mut() {
            Some(state) => Ok(state),
            None => {
                warn!(channel_id = self.id, "Operation on closed channel");
                Err(CodecError::ClosedChannel)
            }
        }
    }

    /// Encode one 80-sample frame. Advances only the encoder.
    pub fn encode(&mut self, pcm: &[i16]) -> Result<CompressedFrame> {
        let id = self.id;
        let state = self.state_mut()?;
        let frame: &[i16; PCM_FRAME_SAMPLES] = validate_pcm_frame(pcm).inspect_err(|_| {
            warn!(channel_id = id, len = pcm.len(), "Rejected PCM frame");
        })?;

        let bits = state.encoder.encode_frame(frame);
        state.stats.frames_encoded += 1;
        trace!(channel_id = id, frame = state.stats.frames_encoded, "Encoded frame");
        Ok(CompressedFrame::from_bytes(bits))
    }

    /// Encode one frame given as 160 little-endian PCM bytes.
    pub fn encode_bytes(&mut self, pcm: &[u8]) -> Result<CompressedFrame> {
        self.state_mut()?;
        validate_pcm_bytes(pcm)?;
        let samples = samples_from_le_bytes(pcm)?;
        self.encode(&samples)
    }

    /// Decode one 10-byte frame into 80 samples. Advances only the decoder.
    pub fn decode(&mut self, data: &[u8]) -> Result<Vec<i16>> {
        let id = self.id;
        let state = self.state_mut()?;
        let frame: &[u8; COMPRESSED_FRAME_BYTES] =
            validate_compressed_frame(data).inspect_err(|_| {
                warn!(channel_id = id, len = data.len(), "Rejected compressed frame");
            })?;

        let pcm = state.decoder.decode_frame(frame);
        state.stats.frames_decoded += 1;
        trace!(channel_id = id, frame = state.stats.frames_decoded, "Decoded frame");
        Ok(pcm.to_vec())
    }

    /// Decode one frame into 160 little-endian PCM bytes.
    pub fn decode_to_bytes(&mut self, data: &[u8]) -> Result<Vec<u8>> {
        let samples = self.decode(data)?;
        Ok(samples_to_le_bytes(&samples))
    }

    /// Synthesize a replacement for a lost frame.
    pub fn conceal(&mut self) -> Result<Vec<i16>> {
        let id = self.id;
        let state = self.state_mut()?;
        let pcm = state.decoder.conceal_frame();
        state.stats.frames_concealed += 1;
        trace!(
            channel_id = id,
            erasures = state.decoder.consecutive_erasures(),
            "Concealed frame"
        );
        Ok(pcm.to_vec())
    }

    /// Return encoder and decoder to their freshly opened state.
    pub fn reset(&mut self) -> Result<()> {
        let id = self.id;
        let state = self.state_mut()?;
        state.encoder.reset();
        state.decoder.reset();
        state.stats = ChannelStats::default();
        debug!(channel_id = id, "Reset channel");
        Ok(())
    }

    /// Frame counters since open or the last reset
    pub fn stats(&self) -> Result<ChannelStats> {
        self.state
            .as_ref()
            .map(|state| state.stats)
            .ok_or(CodecError::ClosedChannel)
    }

    /// Release the channel state. Fails with `ClosedChannel` if already closed.
    pub fn close(&mut self) -> Result<()> {
        let state = self.state.take().ok_or_else(|| {
            warn!(channel_id = self.id, "Channel closed twice");
            CodecError::ClosedChannel
        })?;
        debug!(channel_id = self.id, stats = ?state.stats, "Closed channel");
        Ok(())
    }
}

impl Drop for Channel {
    fn drop(&mut self) {
        if self.state.is_some() {
            debug!(channel_id = self.id, "Dropping open channel");
        }
    }
}

impl AudioCodec for Channel {
    fn encode(&mut self, samples: &[i16]) -> Result<Vec<u8>> {
        Ok(Channel::encode(self, samples)?.as_ref().to_vec())
    }

    fn decode(&mut self, data: &[u8]) -> Result<Vec<i16>> {
        Channel::decode(self, data)
    }

    fn info(&self) -> CodecInfo {
        CodecInfo {
            name: CodecType::Celp8k.name(),
            sample_rate: 8000,
            channels: 1,
            bitrate: CodecType::Celp8k.bitrate(),
            frame_size: PCM_FRAME_SAMPLES,
        }
    }

    fn reset(&mut self) -> Result<()> {
        Channel::reset(self)
    }

    fn frame_size(&self) -> usize {
        PCM_FRAME_SAMPLES
    }
}
