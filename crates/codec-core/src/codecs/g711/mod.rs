//! G.711 μ-law (PCMU) and A-law (PCMA) companding
//!
//! Byte-level conversions operate on little-endian 16-bit PCM. The PCM side
//! must hold a whole number of samples; the law side may have any length.

mod reference;
mod tables;

pub use reference::{alaw_compress, alaw_expand, ulaw_compress, ulaw_expand};
pub use tables::{
    alaw_compress_table, alaw_expand_table, init_tables, ulaw_compress_table, ulaw_expand_table,
};

use crate::codecs::l16::check_sample_bytes;
use crate::error::Result;
use crate::types::{AudioCodec, CodecInfo, CodecType};

/// Companding law
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Law {
    /// μ-law (North America, Japan)
    Ulaw,
    /// A-law (Europe, rest of world)
    Alaw,
}

impl Law {
    /// Compress one sample
    #[inline]
    pub fn compress(self, sample: i16) -> u8 {
        match self {
            Self::Ulaw => ulaw_compress_table(sample),
            Self::Alaw => alaw_compress_table(sample),
        }
    }

    /// Expand one code
    #[inline]
    pub fn expand(self, code: u8) -> i16 {
        match self {
            Self::Ulaw => ulaw_expand_table(code),
            Self::Alaw => alaw_expand_table(code),
        }
    }

    fn codec_type(self) -> CodecType {
        match self {
            Self::Ulaw => CodecType::Pcmu,
            Self::Alaw => CodecType::Pcma,
        }
    }
}

fn compress_pcm(pcm: &[u8], law: Law) -> Result<Vec<u8>> {
    check_sample_bytes(pcm)?;
    Ok(pcm
        .chunks_exact(2)
        .map(|pair| law.compress(i16::from_le_bytes([pair[0], pair[1]])))
        .collect())
}

fn expand_to_pcm(encoded: &[u8], law: Law) -> Vec<u8> {
    let mut pcm = Vec::with_capacity(encoded.len() * 2);
    for &code in encoded {
        pcm.extend_from_slice(&law.expand(code).to_le_bytes());
    }
    pcm
}

/// PCM bytes to A-law bytes (half the length).
pub fn pcm_to_alaw(pcm: &[u8]) -> Result<Vec<u8>> {
    compress_pcm(pcm, Law::Alaw)
}

/// A-law bytes to PCM bytes (twice the length).
pub fn alaw_to_pcm(alaw: &[u8]) -> Vec<u8> {
    expand_to_pcm(alaw, Law::Alaw)
}

/// PCM bytes to μ-law bytes (half the length).
pub fn pcm_to_ulaw(pcm: &[u8]) -> Result<Vec<u8>> {
    compress_pcm(pcm, Law::Ulaw)
}

/// μ-law bytes to PCM bytes (twice the length).
pub fn ulaw_to_pcm(ulaw: &[u8]) -> Vec<u8> {
    expand_to_pcm(ulaw, Law::Ulaw)
}

/// Stateless G.711 codec
#[derive(Debug, Clone)]
pub struct G711Codec {
    law: Law,
}

impl G711Codec {
    /// Create a PCMU codec
    pub fn new_pcmu() -> Self {
        Self { law: Law::Ulaw }
    }

    /// Create a PCMA codec
    pub fn new_pcma() -> Self {
        Self { law: Law::Alaw }
    }

    /// Companding law of this codec
    pub fn law(&self) -> Law {
        self.law
    }
}

impl AudioCodec for G711Codec {
    fn encode(&mut self, samples: &[i16]) -> Result<Vec<u8>> {
        Ok(samples.iter().map(|&s| self.law.compress(s)).collect())
    }

    fn decode(&mut self, data: &[u8]) -> Result<Vec<i16>> {
        Ok(data.iter().map(|&code| self.law.expand(code)).collect())
    }

    fn info(&self) -> CodecInfo {
        let codec_type = self.law.codec_type();
        CodecInfo {
            name: codec_type.name(),
            sample_rate: 8000,
            channels: 1,
            bitrate: codec_type.bitrate(),
            frame_size: codec_type.frame_size(),
        }
    }

    fn reset(&mut self) -> Result<()> {
        Ok(())
    }

    fn frame_size(&self) -> usize {
        self.law.codec_type().frame_size()
    }

    fn supports_variable_frame_size(&self) -> bool {
        true
    }
}
