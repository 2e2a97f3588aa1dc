//! Backward-adaptive LPC analysis and the filters built on it
//!
//! Coefficients are derived from previously reconstructed speech only, so the
//! encoder's local decoder and the remote decoder compute identical filters
//! without transmitting them.

use super::math::{FILTERED_LIMIT, IMPULSE_LIMIT, clamp_magnitude, round_shift, saturate};
use super::types::{L_HISTORY, L_SUBFR, M, MP1};

/// 1.0 in Q12
const ONE_Q12: i32 = 1 << 12;

/// 1.0 in Q24
const ONE_Q24: i64 = 1 << 24;

/// Reflection coefficient magnitude above which recursion stops (0.999 in Q24)
const MAX_REFLECTION_Q24: i64 = 16_760_438;

/// Bandwidth expansion factor (0.98 in Q15)
const GAMMA_Q15: i64 = 32113;

/// Gaussian lag window (60 Hz at 8 kHz) in Q15
const LAG_WINDOW_Q15: [i64; M] = [
    32728, 32619, 32438, 32187, 31867, 31480, 31029, 30517, 29946, 29321,
];

/// Parabolic analysis window in Q15
const ANALYSIS_WINDOW: [i64; L_HISTORY] = analysis_window();

const fn analysis_window() -> [i64; L_HISTORY] {
    let mut window = [0i64; L_HISTORY];
    let peak = (L_HISTORY / 2) * (L_HISTORY / 2 + 1);
    let mut n = 0;
    while n < L_HISTORY {
        window[n] = ((n + 1) * (L_HISTORY - n) * 32767 / peak) as i64;
        n += 1;
    }
    window
}

/// Direct-form LPC filter and its reflection coefficients
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LpcCoefficients {
    /// A(z) coefficients in Q12, `a[0]` is always 1.0
    pub a: [i32; MP1],
    /// Reflection coefficients in Q15
    pub rc: [i32; M],
}

impl Default for LpcCoefficients {
    fn default() -> Self {
        let mut a = [0; MP1];
        a[0] = ONE_Q12;
        Self { a, rc: [0; M] }
    }
}

impl LpcCoefficients {
    /// Run the full analysis chain over the reconstructed history.
    pub fn analyze(history: &[i16]) -> Self {
        let mut r = autocorrelation(history);
        apply_lag_window(&mut r);
        let (a_q24, rc) = levinson(&r);
        Self { a: bandwidth_expand(&a_q24), rc }
    }

    /// True if every coefficient after `a[0]` is zero
    pub fn is_flat(&self) -> bool {
        self.a[1..].iter().all(|&c| c == 0)
    }
}

/// Windowed autocorrelation with a -30 dB white noise floor on `r[0]`.
pub fn autocorrelation(history: &[i16]) -> [i64; MP1] {
    let mut windowed = [0i64; L_HISTORY];
    for (n, (out, &sample)) in windowed.iter_mut().zip(history).enumerate() {
        *out = (sample as i64 * ANALYSIS_WINDOW[n]) >> 15;
    }

    let mut r = [0i64; MP1];
    for (k, r_k) in r.iter_mut().enumerate() {
        *r_k = (k..L_HISTORY).map(|n| windowed[n] * windowed[n - k]).sum();
    }
    r[0] += (r[0] >> 10) + 1;
    r
}

/// Multiply lags 1..=M by the lag window.
pub fn apply_lag_window(r: &mut [i64; MP1]) {
    for (r_k, &w) in r[1..].iter_mut().zip(LAG_WINDOW_Q15.iter()) {
        *r_k = (*r_k * w) >> 15;
    }
}

/// Levinson-Durbin recursion in Q24.
///
/// Returns A(z) in Q24 and the reflection coefficients in Q15. The recursion
/// stops early, keeping the last stable order, if a reflection coefficient
/// reaches 0.999 or the prediction error vanishes.
pub fn levinson(r: &[i64; MP1]) -> ([i64; MP1], [i32; M]) {
    let mut a = [0i64; MP1];
    a[0] = ONE_Q24;
    let mut rc = [0i32; M];
    if r[0] <= 0 {
        return (a, rc);
    }

    let rn: [i64; MP1] =
        std::array::from_fn(|k| (r[k] as i128 * ONE_Q24 as i128 / r[0] as i128) as i64);
    let mut err = rn[0];

    for i in 1..=M {
        let acc: i128 = (0..i).map(|j| a[j] as i128 * rn[i - j] as i128).sum();
        let k = -(acc / err as i128);
        if k.abs() >= MAX_REFLECTION_Q24 as i128 {
            break;
        }
        let k = k as i64;

        let mut next = a;
        for j in 1..i {
            next[j] = a[j] + ((k as i128 * a[i - j] as i128) >> 24) as i64;
        }
        next[i] = k;
        a = next;
        rc[i - 1] = (k >> 9) as i32;

        let shrink = ONE_Q24 as i128 - ((k as i128 * k as i128) >> 24);
        err = ((err as i128 * shrink) >> 24) as i64;
        if err <= 0 {
            break;
        }
    }

    (a, rc)
}

/// Scale `a[j]` by gamma^j and convert from Q24 to Q12.
pub fn bandwidth_expand(a_q24: &[i64; MP1]) -> [i32; MP1] {
    let mut a = [0i32; MP1];
    a[0] = ONE_Q12;
    let mut factor: i64 = 1 << 15;
    for j in 1..MP1 {
        factor = (factor * GAMMA_Q15) >> 15;
        let scaled = ((a_q24[j] as i128 * factor as i128) >> 15) as i64;
        a[j] = round_shift(scaled, 12) as i32;
    }
    a
}

/// Synthesis filter 1/A(z).
///
/// `mem` holds the last `M` outputs, oldest first, and is updated in place.
pub fn synthesis_filter(a: &[i32; MP1], excitation: &[i16], mem: &mut [i16; M], out: &mut [i16]) {
    let len = excitation.len().min(out.len());
    for n in 0..len {
        let mut acc = (excitation[n] as i64) << 12;
        for j in 1..MP1 {
            let past = if n >= j { out[n - j] } else { mem[M + n - j] };
            acc -= a[j] as i64 * past as i64;
        }
        out[n] = saturate(round_shift(acc, 12));
    }
    update_memory(mem, &out[..len]);
}

/// Inverse filter A(z). `mem` holds the last `M` inputs, oldest first.
pub fn residual(a: &[i32; MP1], input: &[i16], mem: &mut [i16; M], out: &mut [i64]) {
    let len = input.len().min(out.len());
    for n in 0..len {
        let mut acc = (input[n] as i64) << 12;
        for j in 1..MP1 {
            let past = if n >= j { input[n - j] } else { mem[M + n - j] };
            acc += a[j] as i64 * past as i64;
        }
        out[n] = round_shift(acc, 12);
    }
    update_memory(mem, &input[..len]);
}

fn update_memory(mem: &mut [i16; M], recent: &[i16]) {
    let len = recent.len();
    if len >= M {
        mem.copy_from_slice(&recent[len - M..]);
    } else {
        mem.rotate_left(len);
        mem[M - len..].copy_from_slice(recent);
    }
}

/// Impulse response of 1/A(z) over one subframe, Q12.
pub fn impulse_response(a: &[i32; MP1]) -> [i64; L_SUBFR] {
    let mut h = [0i64; L_SUBFR];
    h[0] = ONE_Q12 as i64;
    for n in 1..L_SUBFR {
        let mut acc = 0i64;
        for j in 1..=n.min(M) {
            acc -= a[j] as i64 * h[n - j];
        }
        h[n] = clamp_magnitude(round_shift(acc, 12), IMPULSE_LIMIT);
    }
    h
}

/// Filter a codebook vector through the impulse response (zero state).
pub fn convolve(h: &[i64; L_SUBFR], vector: &[i64; L_SUBFR]) -> [i64; L_SUBFR] {
    let mut out = [0i64; L_SUBFR];
    for (n, y) in out.iter_mut().enumerate() {
        let acc: i64 = (0..=n).map(|k| h[k] * vector[n - k]).sum();
        *y = clamp_magnitude(round_shift(acc, 12), FILTERED_LIMIT);
    }
    out
}
