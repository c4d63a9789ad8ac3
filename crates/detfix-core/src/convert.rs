// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Conversions between `Fix64` and primitive integers and floats.
//!
//! Float conversions decode and assemble IEEE-754 bit patterns in integer
//! space, so they never depend on the host FPU's rounding mode.
//!
//! Semantics:
//! - `from_int` scales with a wrapping multiply; integers outside
//!   `[-2^31, 2^31)` wrap modulo `2^64` exactly like the raw scale multiply.
//! - `from_f64`/`from_f32` round half away from zero at the Q32.32 boundary.
//!   `NaN` maps to zero, `±∞` saturate, finite values outside the range wrap.
//! - `to_f64`/`to_f32` round to nearest, ties to even.

use crate::fixed::Fix64;
use crate::format::{FRAC_BITS, ONE_RAW, TOTAL_BITS};
use crate::wide::round_shift_right_u64;

const F64_MANT_BITS: u32 = 52;
const F64_EXP_BIAS: i32 = 1023;
const F32_MANT_BITS: u32 = 23;
const F32_EXP_BIAS: i32 = 127;

/// Rounds `value >> shift` to nearest, ties away from zero.
fn round_shift_right_half_away(value: u64, shift: u32) -> u64 {
    if shift == 0 {
        return value;
    }
    if shift >= u64::BITS {
        return u64::from(shift == u64::BITS && value >> (u64::BITS - 1) == 1);
    }
    let q = value >> shift;
    let r = value & ((1_u64 << shift) - 1);
    if r >= 1_u64 << (shift - 1) {
        q + 1
    } else {
        q
    }
}

/// Significand with the implicit bit and exponent of `|raw| / 2^32`, rounded
/// to `mant_bits` fractional bits.
///
/// Returns `(significand, exponent)` with `significand` in
/// `[2^mant_bits, 2^(mant_bits + 1))`.
fn normalize(abs: u64, mant_bits: u32) -> (u64, i32) {
    let top = TOTAL_BITS - 1 - abs.leading_zeros();
    #[allow(clippy::cast_possible_wrap)]
    let mut exp = top as i32 - FRAC_BITS as i32;
    let mut sig = if top > mant_bits {
        round_shift_right_u64(abs, top - mant_bits)
    } else {
        abs << (mant_bits - top)
    };
    // 1.111.. can round up to 10.000..
    if sig >> (mant_bits + 1) != 0 {
        sig >>= 1;
        exp += 1;
    }
    (sig, exp)
}

impl Fix64 {
    /// Converts an integer, wrapping on overflow of the scale multiply.
    ///
    /// Exact for every `i` in `[-2^31, 2^31)`.
    pub const fn from_int(i: i64) -> Self {
        Self::from_raw(i.wrapping_mul(ONE_RAW))
    }

    /// Integer part, rounded towards negative infinity.
    pub const fn to_int(self) -> i64 {
        self.raw() >> FRAC_BITS
    }

    /// Converts an `f64`, rounding half away from zero.
    pub fn from_f64(value: f64) -> Self {
        if value.is_nan() {
            return Self::ZERO;
        }
        if value.is_infinite() {
            return if value.is_sign_positive() {
                Self::MAX
            } else {
                Self::MIN
            };
        }

        let bits = value.to_bits();
        let negative = (bits >> 63) != 0;
        #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
        let exp_field = ((bits >> F64_MANT_BITS) & 0x7ff) as i32;
        let mant = bits & ((1_u64 << F64_MANT_BITS) - 1);

        let (mantissa, unbiased) = if exp_field == 0 {
            // subnormal: no implicit bit, exponent pinned at 1 - bias
            (mant, 1 - F64_EXP_BIAS)
        } else {
            (mant | (1_u64 << F64_MANT_BITS), exp_field - F64_EXP_BIAS)
        };

        // value * 2^32 = mantissa * 2^shift
        #[allow(clippy::cast_possible_wrap)]
        let shift = unbiased + FRAC_BITS as i32 - F64_MANT_BITS as i32;
        let magnitude = if shift >= 0 {
            // wraps modulo 2^64; any shift past the width leaves zero bits
            mantissa.checked_shl(shift.unsigned_abs()).unwrap_or(0)
        } else {
            round_shift_right_half_away(mantissa, shift.unsigned_abs())
        };

        #[allow(clippy::cast_possible_wrap)]
        let raw = magnitude as i64;
        Self::from_raw(if negative { raw.wrapping_neg() } else { raw })
    }

    /// Converts an `f32`, rounding half away from zero.
    ///
    /// Widening to `f64` is exact, so this shares the `f64` decoder.
    pub fn from_f32(value: f32) -> Self {
        Self::from_f64(f64::from(value))
    }

    /// Nearest `f64`, ties to even. `MAX` rounds up to `2^31`.
    pub fn to_f64(self) -> f64 {
        let raw = self.raw();
        if raw == 0 {
            return 0.0;
        }
        let (sig, exp) = normalize(raw.unsigned_abs(), F64_MANT_BITS);
        #[allow(clippy::cast_sign_loss)]
        let exp_field = (exp + F64_EXP_BIAS) as u64;
        let bits = (u64::from(raw < 0) << 63)
            | (exp_field << F64_MANT_BITS)
            | (sig & ((1_u64 << F64_MANT_BITS) - 1));
        f64::from_bits(bits)
    }

    /// Nearest `f32`, ties to even.
    ///
    /// Rounded directly from the raw bits rather than through `f64`, which
    /// would round twice.
    pub fn to_f32(self) -> f32 {
        let raw = self.raw();
        if raw == 0 {
            return 0.0;
        }
        let (sig, exp) = normalize(raw.unsigned_abs(), F32_MANT_BITS);
        #[allow(clippy::cast_sign_loss)]
        let exp_field = (exp + F32_EXP_BIAS) as u32;
        #[allow(clippy::cast_possible_truncation)]
        let mantissa = (sig as u32) & ((1_u32 << F32_MANT_BITS) - 1);
        let bits = (u32::from(raw < 0) << 31) | (exp_field << F32_MANT_BITS) | mantissa;
        f32::from_bits(bits)
    }
}

impl From<i32> for Fix64 {
    fn from(value: i32) -> Self {
        Self::from_int(i64::from(value))
    }
}

impl From<i16> for Fix64 {
    fn from(value: i16) -> Self {
        Self::from_int(i64::from(value))
    }
}

impl From<u16> for Fix64 {
    fn from(value: u16) -> Self {
        Self::from_int(i64::from(value))
    }
}
