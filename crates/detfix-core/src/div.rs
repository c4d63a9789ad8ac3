// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Division engine: shift-subtract long division over the operand magnitudes.
//!
//! The quotient is accumulated with one guard bit below the Q32.32 boundary
//! (bit position `FRAC_BITS + 1` stands for `1.0`), then rounded to nearest by
//! incrementing and dropping the guard bit.

use core::ops::{Div, DivAssign, Rem, RemAssign};

use crate::error::{FixedError, Op};
use crate::fixed::Fix64;
use crate::format::FRAC_BITS;
use crate::wide::{mul_u64_wide, shr_wide};

const SIGN_BIT: i64 = i64::MIN;

/// Divisors with any of these bits set take the coarse-estimate kick-start.
const KICKSTART_MASK: u64 = 0xFFF0_0000_0000_0000;

/// Bit position that represents `1.0` in the guarded quotient.
const GUARD_POS: u32 = FRAC_BITS + 1;

fn saturate_for_signs(xl: i64, yl: i64) -> Fix64 {
    if ((xl ^ yl) & SIGN_BIT) == 0 {
        Fix64::MAX
    } else {
        Fix64::MIN
    }
}

impl Fix64 {
    /// Saturating division, rounded to nearest.
    ///
    /// Returns [`FixedError::DivideByZero`] when `rhs` is zero. Quotients
    /// outside the representable range saturate by the sign of the operands.
    pub fn checked_div(self, rhs: Self) -> Result<Self, FixedError> {
        let xl = self.raw();
        let yl = rhs.raw();
        if yl == 0 {
            return Err(FixedError::DivideByZero { op: Op::Div });
        }

        let mut remainder = xl.unsigned_abs();
        let mut divider = yl.unsigned_abs();
        let mut quotient = 0_u64;
        let mut bit_pos = GUARD_POS;

        // Kick-start for large divisors: a lower estimate of the quotient from
        // remainder / (divider >> GUARD_POS + 1), then continue on the residue.
        if divider & KICKSTART_MASK != 0 {
            let shifted_div = (divider >> GUARD_POS) + 1;
            quotient = remainder / shifted_div;
            let (hi, lo) = mul_u64_wide(quotient, divider);
            remainder -= shr_wide(hi, lo, GUARD_POS);
        }

        // If the divider is divisible by 2^n, take advantage of it.
        while divider & 0xF == 0 && bit_pos >= 4 {
            divider >>= 4;
            bit_pos -= 4;
        }

        loop {
            if remainder == 0 {
                break;
            }
            // Shift remainder as much as we can without overflowing.
            let shift = remainder.leading_zeros().min(bit_pos);
            remainder <<= shift;
            bit_pos -= shift;

            let digit = remainder / divider;
            remainder %= divider;

            // The digit must fit in the bits still available above bit_pos.
            if digit & !(u64::MAX >> bit_pos) != 0 {
                return Ok(saturate_for_signs(xl, yl));
            }
            quotient = match quotient.checked_add(digit << bit_pos) {
                Some(q) => q,
                None => return Ok(saturate_for_signs(xl, yl)),
            };

            if bit_pos == 0 {
                break;
            }
            remainder <<= 1;
            bit_pos -= 1;
        }

        // Round to nearest through the guard bit.
        let Some(rounded) = quotient.checked_add(1) else {
            return Ok(saturate_for_signs(xl, yl));
        };
        let magnitude = rounded >> 1;

        if ((xl ^ yl) & SIGN_BIT) != 0 {
            if magnitude > i64::MIN.unsigned_abs() {
                return Ok(Self::MIN);
            }
            // magnitude <= 2^63, so the wrapping negation lands in range.
            #[allow(clippy::cast_possible_wrap)]
            let raw = (magnitude as i64).wrapping_neg();
            Ok(Self::from_raw(raw))
        } else {
            match i64::try_from(magnitude) {
                Ok(raw) => Ok(Self::from_raw(raw)),
                Err(_) => Ok(Self::MAX),
            }
        }
    }

    /// Remainder of truncated division: `x - trunc(x / y) * y`, computed
    /// exactly on the raw values.
    ///
    /// Returns [`FixedError::DivideByZero`] when `rhs` is zero.
    pub fn checked_rem(self, rhs: Self) -> Result<Self, FixedError> {
        if rhs.raw() == 0 {
            return Err(FixedError::DivideByZero { op: Op::Rem });
        }
        // MIN % -PRECISION wraps to 0, which is also the exact remainder.
        Ok(Self::from_raw(self.raw().wrapping_rem(rhs.raw())))
    }
}

/// # Panics
///
/// Panics when dividing by zero, like primitive integer division. Use
/// [`Fix64::checked_div`] to handle the error instead.
impl Div for Fix64 {
    type Output = Self;

    #[allow(clippy::panic)]
    fn div(self, rhs: Self) -> Self {
        match self.checked_div(rhs) {
            Ok(q) => q,
            Err(err) => panic!("{err}"),
        }
    }
}

/// # Panics
///
/// Panics when the divisor is zero. Use [`Fix64::checked_rem`] to handle the
/// error instead.
impl Rem for Fix64 {
    type Output = Self;

    #[allow(clippy::panic)]
    fn rem(self, rhs: Self) -> Self {
        match self.checked_rem(rhs) {
            Ok(r) => r,
            Err(err) => panic!("{err}"),
        }
    }
}

impl DivAssign for Fix64 {
    fn div_assign(&mut self, rhs: Self) {
        *self = *self / rhs;
    }
}

impl RemAssign for Fix64 {
    fn rem_assign(&mut self, rhs: Self) {
        *self = *self % rhs;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_integer_quotient() {
        let q = Fix64::from_raw(15 << 32).checked_div(Fix64::from_raw(5 << 32));
        assert_eq!(q, Ok(Fix64::from_raw(3 << 32)));
    }

    #[test]
    fn kickstart_path_matches_plain_quotient() {
        // divisor with top bits set forces the coarse estimate
        let y = Fix64::from_raw(0x7ff0_0000_0000_0001);
        let x = Fix64::from_raw(0x7000_0000_0000_0000);
        let q = x.checked_div(y).map(Fix64::raw);
        // 0x7000.../0x7ff0... * 2^32 = 3_759_932_288.43...
        assert_eq!(q, Ok(3_759_932_288));
    }

    #[test]
    fn min_over_minus_one_saturates() {
        assert_eq!(Fix64::MIN.checked_div(-Fix64::ONE), Ok(Fix64::MAX));
        assert_eq!(Fix64::MIN.checked_div(Fix64::ONE), Ok(Fix64::MIN));
    }

    #[test]
    fn rem_of_min_by_minus_precision_is_zero() {
        let r = Fix64::MIN.checked_rem(Fix64::from_raw(-1));
        assert_eq!(r, Ok(Fix64::ZERO));
    }
}
