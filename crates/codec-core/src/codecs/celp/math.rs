//! Fixed-point helpers for the CELP engine
//!
//! All signal arithmetic is integer. Accumulators are `i64` (or `i128` where
//! products of correlations are compared) and results saturate rather than
//! wrap.

use super::types::POW2_FRAC_Q15;

/// Largest magnitude kept for filtered codebook vectors
pub const FILTERED_LIMIT: i64 = 1 << 18;

/// Largest magnitude kept for impulse response taps (Q12)
pub const IMPULSE_LIMIT: i64 = 1 << 24;

/// Limit a wide value to the 16-bit range
#[inline]
pub fn saturate(value: i64) -> i16 {
    value.clamp(i16::MIN as i64, i16::MAX as i64) as i16
}

/// Arithmetic right shift with rounding to nearest
#[inline]
pub fn round_shift(value: i64, shift: u32) -> i64 {
    if shift == 0 {
        value
    } else {
        (value + (1 << (shift - 1))) >> shift
    }
}

/// Symmetric clamp to `[-limit, limit]`
#[inline]
pub fn clamp_magnitude(value: i64, limit: i64) -> i64 {
    value.clamp(-limit, limit)
}

/// Dot product of two equal-length vectors
#[inline]
pub fn dot(x: &[i64], y: &[i64]) -> i64 {
    x.iter().zip(y).map(|(a, b)| a * b).sum()
}

/// Innovation amplitude for a gain index: 0 for index 0, else 2^(index/16)
/// saturated to the 16-bit range.
pub fn gain_from_index(index: u8) -> i32 {
    if index == 0 {
        return 0;
    }
    let fraction = POW2_FRAC_Q15[(index & 0x0F) as usize];
    let integer = (index >> 4) as u32;
    round_shift(fraction << integer, 15).min(i16::MAX as i64) as i32
}

/// Nearest gain index for an amplitude. Ties resolve to the lower index.
pub fn quantize_gain(amplitude: i64) -> u8 {
    let mut best_index = 0u8;
    let mut best_error = amplitude.abs();
    for index in 1..=u8::MAX {
        let error = (gain_from_index(index) as i64 - amplitude).abs();
        if error < best_error {
            best_index = index;
            best_error = error;
        }
    }
    best_index
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_saturate() {
        assert_eq!(saturate(40000), i16::MAX);
        assert_eq!(saturate(-40000), i16::MIN);
        assert_eq!(saturate(-123), -123);
    }

    #[test]
    fn test_round_shift() {
        assert_eq!(round_shift(4096, 12), 1);
        assert_eq!(round_shift(2048, 12), 1);
        assert_eq!(round_shift(2047, 12), 0);
        assert_eq!(round_shift(-2049, 12), -1);
        assert_eq!(round_shift(7, 0), 7);
    }

    #[test]
    fn test_gain_table_is_monotonic() {
        assert_eq!(gain_from_index(0), 0);
        assert_eq!(gain_from_index(16), 2);
        assert_eq!(gain_from_index(160), 1024);
        assert_eq!(gain_from_index(255), i16::MAX as i32);
        for index in 1..u8::MAX {
            assert!(gain_from_index(index) <= gain_from_index(index + 1));
        }
    }

    #[test]
    fn test_quantize_gain() {
        assert_eq!(quantize_gain(0), 0);
        assert_eq!(gain_from_index(quantize_gain(1024)), 1024);
        assert_eq!(gain_from_index(quantize_gain(1_000_000)), i16::MAX as i32);
        let amplitude = 5000;
        let error = (gain_from_index(quantize_gain(amplitude)) as i64 - amplitude).abs();
        // adjacent indices differ by about 4.4%
        assert!(error < amplitude / 20, "error {}", error);
    }
}
