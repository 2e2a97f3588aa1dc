//! L16 linear PCM and byte-level sample helpers
//!
//! Internally PCM bytes are little-endian signed 16-bit samples. L16 is the
//! same sample data with an explicit byte order tag; RFC 3551 L16 is
//! big-endian, which is the [`ByteOrder`] default.

use crate::error::{CodecError, Result};
use crate::types::{AudioCodec, ByteOrder, CodecInfo, CodecType};

/// Reject byte input that is not a whole number of 16-bit samples.
#[inline]
pub fn check_sample_bytes(bytes: &[u8]) -> Result<()> {
    if bytes.len() % 2 != 0 {
        return Err(CodecError::odd_sample_bytes(bytes.len()));
    }
    Ok(())
}

/// Parse little-endian PCM bytes into samples.
pub fn samples_from_le_bytes(pcm: &[u8]) -> Result<Vec<i16>> {
    samples_from_bytes(pcm, ByteOrder::LittleEndian)
}

/// Serialize samples as little-endian PCM bytes.
pub fn samples_to_le_bytes(samples: &[i16]) -> Vec<u8> {
    samples_to_bytes(samples, ByteOrder::LittleEndian)
}

/// Parse 16-bit samples stored in `order`.
pub fn samples_from_bytes(bytes: &[u8], order: ByteOrder) -> Result<Vec<i16>> {
    check_sample_bytes(bytes)?;
    let samples = bytes
        .chunks_exact(2)
        .map(|pair| {
            let pair = [pair[0], pair[1]];
            match order {
                ByteOrder::LittleEndian => i16::from_le_bytes(pair),
                ByteOrder::BigEndian => i16::from_be_bytes(pair),
            }
        })
        .collect();
    Ok(samples)
}

/// Serialize samples in `order`.
pub fn samples_to_bytes(samples: &[i16], order: ByteOrder) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(samples.len() * 2);
    for &sample in samples {
        let pair = match order {
            ByteOrder::LittleEndian => sample.to_le_bytes(),
            ByteOrder::BigEndian => sample.to_be_bytes(),
        };
        bytes.extend_from_slice(&pair);
    }
    bytes
}

/// Convert internal PCM bytes to L16 in the given byte order.
pub fn pcm_to_l16(pcm: &[u8], order: ByteOrder) -> Result<Vec<u8>> {
    match order {
        ByteOrder::LittleEndian => {
            check_sample_bytes(pcm)?;
            Ok(pcm.to_vec())
        }
        ByteOrder::BigEndian => swap_endianness(pcm),
    }
}

/// Convert L16 bytes in the given byte order back to internal PCM bytes.
pub fn l16_to_pcm(l16: &[u8], order: ByteOrder) -> Result<Vec<u8>> {
    // the swap is its own inverse
    pcm_to_l16(l16, order)
}

/// Reverse the bytes of every 16-bit sample.
pub fn swap_endianness(pcm: &[u8]) -> Result<Vec<u8>> {
    check_sample_bytes(pcm)?;
    let mut swapped = Vec::with_capacity(pcm.len());
    for pair in pcm.chunks_exact(2) {
        swapped.push(pair[1]);
        swapped.push(pair[0]);
    }
    Ok(swapped)
}

/// Little-endian PCM to big-endian PCM.
pub fn pcm_le_to_be(pcm: &[u8]) -> Result<Vec<u8>> {
    swap_endianness(pcm)
}

/// Stateless L16 codec: samples in, tagged bytes out.
#[derive(Debug, Clone)]
pub struct L16Codec {
    byte_order: ByteOrder,
}

impl L16Codec {
    /// Create an L16 codec writing `byte_order`
    pub fn new(byte_order: ByteOrder) -> Self {
        Self { byte_order }
    }

    /// Wire byte order of this codec
    pub fn byte_order(&self) -> ByteOrder {
        self.byte_order
    }
}

impl AudioCodec for L16Codec {
    fn encode(&mut self, samples: &[i16]) -> Result<Vec<u8>> {
        Ok(samples_to_bytes(samples, self.byte_order))
    }

    fn decode(&mut self, data: &[u8]) -> Result<Vec<i16>> {
        samples_from_bytes(data, self.byte_order)
    }

    fn info(&self) -> CodecInfo {
        CodecInfo {
            name: CodecType::L16.name(),
            sample_rate: 8000,
            channels: 1,
            bitrate: CodecType::L16.bitrate(),
            frame_size: CodecType::L16.frame_size(),
        }
    }

    fn reset(&mut self) -> Result<()> {
        Ok(())
    }

    fn frame_size(&self) -> usize {
        CodecType::L16.frame_size()
    }

    fn supports_variable_frame_size(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_swap_endianness() {
        let pcm = [0x01, 0x02, 0x03, 0x04];
        assert_eq!(swap_endianness(&pcm).unwrap(), vec![0x02, 0x01, 0x04, 0x03]);
        assert_eq!(swap_endianness(&[]).unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn test_odd_length_rejected() {
        let odd = [0u8; 3];
        let expected = CodecError::InvalidLength { unit: 2, actual: 3 };
        assert_eq!(swap_endianness(&odd).unwrap_err(), expected);
        assert_eq!(pcm_to_l16(&odd, ByteOrder::LittleEndian).unwrap_err(), expected);
        assert_eq!(l16_to_pcm(&odd, ByteOrder::BigEndian).unwrap_err(), expected);
        assert_eq!(samples_from_le_bytes(&odd).unwrap_err(), expected);
    }

    #[test]
    fn test_l16_big_endian_layout() {
        let pcm = samples_to_le_bytes(&[0x1234, -2]);
        assert_eq!(pcm, vec![0x34, 0x12, 0xfe, 0xff]);
        let l16 = pcm_to_l16(&pcm, ByteOrder::BigEndian).unwrap();
        assert_eq!(l16, vec![0x12, 0x34, 0xff, 0xfe]);
        assert_eq!(l16_to_pcm(&l16, ByteOrder::BigEndian).unwrap(), pcm);
    }

    #[test]
    fn test_little_endian_passthrough() {
        let pcm = samples_to_le_bytes(&[1, -1, 300]);
        assert_eq!(pcm_to_l16(&pcm, ByteOrder::LittleEndian).unwrap(), pcm);
    }

    #[test]
    fn test_l16_codec_trait() {
        let mut codec = L16Codec::new(ByteOrder::BigEndian);
        let samples = vec![0i16, 1000, -1000, i16::MAX, i16::MIN];
        let encoded = codec.encode(&samples).unwrap();
        assert_eq!(encoded.len(), samples.len() * 2);
        assert_eq!(codec.decode(&encoded).unwrap(), samples);
        assert_eq!(codec.info().name, "L16");
    }
}
