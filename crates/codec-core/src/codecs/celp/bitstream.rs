//! Bitstream packing and unpacking for CELP frames
//!
//! Fields are written most significant bit first in this order:
//! gain delta (8), then per subframe lag (6), pitch gain (2) and for each
//! track a sign bit followed by a 4-bit position.

use super::types::{
    COMPRESSED_FRAME_BYTES, FRAME_BITS, FrameParams, N_SUBFR, NB_TRACKS, Pulse, SubframeParams,
};

/// Pack frame parameters into an 80-bit (10-byte) frame
pub fn pack_frame(params: &FrameParams) -> [u8; COMPRESSED_FRAME_BYTES] {
    let mut packed = [0u8; COMPRESSED_FRAME_BYTES];
    let mut bit_pos = 0;

    write_bits(&mut packed, &mut bit_pos, params.gain_delta as u32, 8);
    for subframe in &params.subframes {
        write_bits(&mut packed, &mut bit_pos, subframe.lag_index as u32, 6);
        write_bits(&mut packed, &mut bit_pos, subframe.pitch_gain_index as u32, 2);
        for pulse in &subframe.pulses {
            write_bits(&mut packed, &mut bit_pos, pulse.negative as u32, 1);
            write_bits(&mut packed, &mut bit_pos, pulse.position as u32, 4);
        }
    }

    debug_assert_eq!(bit_pos, FRAME_BITS);
    packed
}

/// Unpack an 80-bit frame. Every bit pattern yields valid parameters.
pub fn unpack_frame(packed: &[u8; COMPRESSED_FRAME_BYTES]) -> FrameParams {
    let mut bit_pos = 0;

    let gain_delta = read_bits(packed, &mut bit_pos, 8) as u8;
    let mut subframes = [SubframeParams::default(); N_SUBFR];
    for subframe in subframes.iter_mut() {
        subframe.lag_index = read_bits(packed, &mut bit_pos, 6) as u8;
        subframe.pitch_gain_index = read_bits(packed, &mut bit_pos, 2) as u8;
        let mut pulses = [Pulse::default(); NB_TRACKS];
        for pulse in pulses.iter_mut() {
            pulse.negative = read_bits(packed, &mut bit_pos, 1) == 1;
            pulse.position = read_bits(packed, &mut bit_pos, 4) as u8;
        }
        subframe.pulses = pulses;
    }

    FrameParams { gain_delta, subframes }
}

/// Write `num_bits` of `value`, MSB first
fn write_bits(packed: &mut [u8], bit_pos: &mut usize, value: u32, num_bits: usize) {
    for i in 0..num_bits {
        let bit = (value >> (num_bits - 1 - i)) & 1;
        let byte_idx = *bit_pos / 8;
        let bit_idx = 7 - (*bit_pos % 8);

        if let Some(byte) = packed.get_mut(byte_idx) {
            if bit == 1 {
                *byte |= 1 << bit_idx;
            } else {
                *byte &= !(1 << bit_idx);
            }
        }

        *bit_pos += 1;
    }
}

/// Read `num_bits`, MSB first
fn read_bits(packed: &[u8], bit_pos: &mut usize, num_bits: usize) -> u32 {
    let mut value = 0u32;

    for _ in 0..num_bits {
        let byte_idx = *bit_pos / 8;
        let bit_idx = 7 - (*bit_pos % 8);
        let bit = packed.get(byte_idx).map_or(0, |byte| (byte >> bit_idx) & 1);
        value = (value << 1) | bit as u32;
        *bit_pos += 1;
    }

    value
}
