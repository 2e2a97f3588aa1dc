//! G.711 Lookup Tables
//!
//! Pre-computed tables for μ-law and A-law. Encode tables cover the full
//! 16-bit input range (64 KiB each), decode tables all 256 codes.
//! Tables are built from the reference transforms on first use and shared
//! read-only for the life of the process.

use super::reference::{alaw_compress, alaw_expand, ulaw_compress, ulaw_expand};
use std::sync::LazyLock;

static ULAW_ENCODE_TABLE: LazyLock<Box<[u8; 65536]>> =
    LazyLock::new(|| build_encode_table(ulaw_compress));

static ULAW_DECODE_TABLE: LazyLock<[i16; 256]> = LazyLock::new(|| build_decode_table(ulaw_expand));

static ALAW_ENCODE_TABLE: LazyLock<Box<[u8; 65536]>> =
    LazyLock::new(|| build_encode_table(alaw_compress));

static ALAW_DECODE_TABLE: LazyLock<[i16; 256]> = LazyLock::new(|| build_decode_table(alaw_expand));

fn build_encode_table(compress: fn(i16) -> u8) -> Box<[u8; 65536]> {
    let mut table = Box::new([0u8; 65536]);
    for (index, entry) in table.iter_mut().enumerate() {
        *entry = compress(sample_for_index(index));
    }
    table
}

fn build_decode_table(expand: fn(u8) -> i16) -> [i16; 256] {
    let mut table = [0i16; 256];
    for (code, entry) in table.iter_mut().enumerate() {
        *entry = expand(code as u8);
    }
    table
}

/// Table index 0 holds -32768, index 65535 holds 32767.
#[inline]
fn sample_for_index(index: usize) -> i16 {
    (index as u16).wrapping_sub(32768) as i16
}

#[inline]
fn index_for_sample(sample: i16) -> usize {
    (sample as u16).wrapping_add(32768) as usize
}

/// Force construction of all four tables.
pub fn init_tables() {
    LazyLock::force(&ULAW_ENCODE_TABLE);
    LazyLock::force(&ULAW_DECODE_TABLE);
    LazyLock::force(&ALAW_ENCODE_TABLE);
    LazyLock::force(&ALAW_DECODE_TABLE);
}

/// μ-law compression using the lookup table
#[inline]
pub fn ulaw_compress_table(sample: i16) -> u8 {
    ULAW_ENCODE_TABLE[index_for_sample(sample)]
}

/// μ-law expansion using the lookup table
#[inline]
pub fn ulaw_expand_table(code: u8) -> i16 {
    ULAW_DECODE_TABLE[code as usize]
}

/// A-law compression using the lookup table
#[inline]
pub fn alaw_compress_table(sample: i16) -> u8 {
    ALAW_ENCODE_TABLE[index_for_sample(sample)]
}

/// A-law expansion using the lookup table
#[inline]
pub fn alaw_expand_table(code: u8) -> i16 {
    ALAW_DECODE_TABLE[code as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_mapping() {
        assert_eq!(index_for_sample(i16::MIN), 0);
        assert_eq!(index_for_sample(0), 32768);
        assert_eq!(index_for_sample(i16::MAX), 65535);
        for index in [0usize, 1, 32767, 32768, 65535] {
            assert_eq!(index_for_sample(sample_for_index(index)), index);
        }
    }

    #[test]
    fn test_tables_match_reference_over_full_range() {
        for sample in i16::MIN..=i16::MAX {
            assert_eq!(ulaw_compress_table(sample), ulaw_compress(sample), "μ-law {}", sample);
            assert_eq!(alaw_compress_table(sample), alaw_compress(sample), "A-law {}", sample);
        }
        for code in 0..=255u8 {
            assert_eq!(ulaw_expand_table(code), ulaw_expand(code));
            assert_eq!(alaw_expand_table(code), alaw_expand(code));
        }
    }
}
