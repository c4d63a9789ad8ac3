// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Multiplication engine.
//!
//! The 128-bit product is never materialised. Each operand is split into a
//! signed high half and an unsigned low half, and the four partial products
//! are summed directly at the result scale:
//!
//! ```text
//! x*y / 2^32 = (hihi << 32) + lohi + hilo + (lolo >> 32)
//! ```
//!
//! Overflow is tracked per addition and cross-checked against the bits of
//! `hihi` that fall off the top.

use core::ops::{Mul, MulAssign};

use crate::fixed::Fix64;
use crate::format::{FRAC_BITS, HALF_BITS, HALF_MASK, ONE_RAW};

const SIGN_BIT: i64 = i64::MIN;

/// Partial products of `x * y`, split at the half-width boundary.
struct Partials {
    lolo: u64,
    lohi: i64,
    hilo: i64,
    hihi: i64,
}

#[allow(clippy::cast_possible_wrap)]
fn partials(x: i64, y: i64) -> Partials {
    #[allow(clippy::cast_sign_loss)]
    let xlo = (x as u64) & HALF_MASK;
    let xhi = x >> HALF_BITS;
    #[allow(clippy::cast_sign_loss)]
    let ylo = (y as u64) & HALF_MASK;
    let yhi = y >> HALF_BITS;

    // xlo/ylo are < 2^32 so their casts to i64 are exact; the signed products
    // of a 32-bit unsigned half and a 32-bit signed half fit an i64.
    Partials {
        lolo: xlo * ylo,
        lohi: (xlo as i64) * yhi,
        hilo: xhi * (ylo as i64),
        hihi: xhi * yhi,
    }
}

/// Low column rescaled to the result, with the first dropped bit rounded
/// half-up. At most `2^32`, so it always fits an `i64`.
#[allow(clippy::cast_possible_wrap)]
fn rounded_low_column(lolo: u64) -> i64 {
    let round_bit = (lolo >> (FRAC_BITS - 1)) & 1;
    ((lolo >> FRAC_BITS) + round_bit) as i64
}

/// `x + y`, OR-ing into `overflow` whenever the carry reaches the sign bit.
fn add_overflow_helper(x: i64, y: i64, overflow: &mut bool) -> i64 {
    let sum = x.wrapping_add(y);
    *overflow |= ((x ^ y ^ sum) & SIGN_BIT) != 0;
    sum
}

impl Fix64 {
    /// Saturating multiplication, rounded half-up at the fractional boundary.
    ///
    /// For operands whose exact product is representable the result is within
    /// one raw unit of the correctly rounded product; otherwise it is the
    /// correctly signed saturation bound.
    pub fn saturating_mul(self, rhs: Self) -> Self {
        let xl = self.raw();
        let yl = rhs.raw();
        let p = partials(xl, yl);

        let lo_result = rounded_low_column(p.lolo);
        let hi_result = p.hihi.wrapping_shl(HALF_BITS);

        let mut overflow = false;
        let mut sum = add_overflow_helper(lo_result, p.lohi, &mut overflow);
        sum = add_overflow_helper(sum, p.hilo, &mut overflow);
        sum = add_overflow_helper(sum, hi_result, &mut overflow);

        let op_signs_equal = ((xl ^ yl) & SIGN_BIT) == 0;

        // Same-signed operands produce a non-negative product, opposite-signed
        // ones a non-positive product; a sign mismatch means the sum wrapped.
        if op_signs_equal {
            if sum < 0 || (overflow && xl > 0) {
                return Self::MAX;
            }
        } else if sum > 0 {
            return Self::MIN;
        }

        // The top half of hihi is discarded by the requantisation; anything
        // other than a sign extension there means the product did not fit.
        let top_carry = p.hihi >> HALF_BITS;
        if top_carry != 0 && top_carry != -1 {
            return if op_signs_equal { Self::MAX } else { Self::MIN };
        }

        // Opposite signs, both magnitudes above one, and a result above the
        // negative operand: the product wrapped past MIN.
        if !op_signs_equal {
            let (pos_op, neg_op) = if xl > yl { (xl, yl) } else { (yl, xl) };
            if sum > neg_op && neg_op < -ONE_RAW && pos_op > ONE_RAW {
                return Self::MIN;
            }
        }

        Self::from_raw(sum)
    }

    /// Multiplication without overflow detection; out-of-range products wrap.
    ///
    /// Uses the same partial-product decomposition and rounding as
    /// [`Fix64::saturating_mul`].
    pub fn fast_mul(self, rhs: Self) -> Self {
        let p = partials(self.raw(), rhs.raw());
        let sum = rounded_low_column(p.lolo)
            .wrapping_add(p.lohi)
            .wrapping_add(p.hilo)
            .wrapping_add(p.hihi.wrapping_shl(HALF_BITS));
        Self::from_raw(sum)
    }
}

impl Mul for Fix64 {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        self.saturating_mul(rhs)
    }
}

impl MulAssign for Fix64 {
    fn mul_assign(&mut self, rhs: Self) {
        *self = self.saturating_mul(rhs);
    }
}
