// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Digit-by-digit square root.
//!
//! `sqrt(raw / 2^32) * 2^32 = sqrt(raw * 2^32)`, a 96-bit radicand. Instead of
//! widening, the classic two-bits-per-step extraction runs twice: first over
//! the raw value for the high bits of the root, then again after rescaling
//! the partial remainder and root by `2^32` for the fractional bits.

use crate::error::FixedError;
use crate::fixed::Fix64;
use crate::format::{FRAC_BITS, HALF_RAW, TOTAL_BITS};

/// Runs the two-bits-per-step extraction until `bit` is exhausted.
fn extract(num: &mut u64, result: &mut u64, mut bit: u64) {
    while bit != 0 {
        if *num >= *result + bit {
            *num -= *result + bit;
            *result = (*result >> 1) + bit;
        } else {
            *result >>= 1;
        }
        bit >>= 2;
    }
}

impl Fix64 {
    /// Square root, correctly rounded to within one raw unit.
    ///
    /// Returns [`FixedError::NegativeSqrt`] for negative operands.
    pub fn sqrt(self) -> Result<Self, FixedError> {
        let raw = self.raw();
        let Ok(mut num) = u64::try_from(raw) else {
            return Err(FixedError::NegativeSqrt { raw });
        };
        let mut result = 0_u64;

        // second-to-top bit
        let mut bit = 1_u64 << (TOTAL_BITS - 2);
        while bit > num {
            bit >>= 2;
        }

        // First pass: integer-scale bits of the root.
        extract(&mut num, &mut result, bit);

        // Rescale by 2^32. A remainder too wide for the shift takes the next
        // root bit (one half) by hand first.
        #[allow(clippy::cast_sign_loss)]
        let half = HALF_RAW as u64;
        if num > (1_u64 << FRAC_BITS) - 1 {
            num -= result;
            num = (num << FRAC_BITS) - half;
            result = (result << FRAC_BITS) + half;
        } else {
            num <<= FRAC_BITS;
            result <<= FRAC_BITS;
        }

        // Second pass: fractional bits of the root.
        extract(&mut num, &mut result, 1_u64 << (FRAC_BITS - 2));

        // If the next bit would have been 1, round the result upwards.
        if num > result {
            result += 1;
        }

        #[allow(clippy::cast_possible_wrap)]
        Ok(Self::from_raw(result as i64))
    }
}
