//! G.711 sample transforms
//!
//! Per-sample μ-law and A-law companding following the ITU-T G.711 reference
//! algorithms (STL `g711.c`).
//!
//! ## Algorithm Details
//!
//! ### A-law
//! - Uses the 13 most significant bits of the input
//! - 1's complement for negative values
//! - Even bits toggled on output (XOR 0x55)
//!
//! ### μ-law
//! - Uses the 14 most significant bits of the input
//! - Bias of 33 added before segment search
//! - Output is bit-inverted

/// Compress one linear sample to A-law.
pub fn alaw_compress(sample: i16) -> u8 {
    // 1's complement keeps -32768 in range
    let mut magnitude = if sample < 0 {
        ((!sample) as u16 >> 4) as i16
    } else {
        sample >> 4
    };

    if magnitude > 15 {
        let mut exponent = 1;
        while magnitude > 16 + 15 {
            magnitude >>= 1;
            exponent += 1;
        }
        magnitude -= 16;
        magnitude += exponent << 4;
    }

    if sample >= 0 {
        magnitude |= 0x0080;
    }

    (magnitude ^ 0x0055) as u8
}

/// Expand one A-law code to a linear sample.
pub fn alaw_expand(code: u8) -> i16 {
    let toggled = ((code ^ 0x55) & 0x7F) as i16;
    let exponent = toggled >> 4;
    let mut mantissa = toggled & 0x0F;

    if exponent > 0 {
        mantissa += 16;
    }
    mantissa = (mantissa << 4) + 0x0008;
    if exponent > 1 {
        mantissa <<= exponent - 1;
    }

    if code > 127 { mantissa } else { -mantissa }
}

/// Compress one linear sample to μ-law.
pub fn ulaw_compress(sample: i16) -> u8 {
    let biased = if sample < 0 {
        ((!sample) as u16 >> 2) as i16 + 33
    } else {
        (sample >> 2) + 33
    };
    let biased = biased.min(0x1FFF);

    let mut segment = 1;
    let mut rest = biased >> 6;
    while rest != 0 {
        segment += 1;
        rest >>= 1;
    }

    let high_nibble = 0x0008 - segment;
    let low_nibble = 0x000F - ((biased >> segment) & 0x000F);
    let mut code = (high_nibble << 4) | low_nibble;
    if sample >= 0 {
        code |= 0x0080;
    }

    code as u8
}

/// Expand one μ-law code to a linear sample.
pub fn ulaw_expand(code: u8) -> i16 {
    let sign: i16 = if code < 0x80 { -1 } else { 1 };
    let inverted = (!code) as i16;
    let exponent = (inverted >> 4) & 0x07;
    let mantissa = inverted & 0x0F;
    let step = 4 << (exponent + 1);

    sign * ((0x0080 << exponent) + step * mantissa + step / 2 - 4 * 33)
}
