// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Base-2 logarithm and exponential.
//!
//! `log2` takes the integer exponent from the highest set bit and builds the
//! fraction one bit per squaring of the Q2.62 mantissa. `pow2` runs the same
//! construction backwards: each set fraction bit multiplies in a tabulated
//! `2^(2^-i)`, and the integer part becomes a shift. Both loops are bounded
//! by `FRAC_BITS` iterations.

use crate::error::{FixedError, Op};
use crate::fixed::Fix64;
use crate::format::{FRAC_BITS, FRAC_MASK, HP_FRAC_BITS, HP_ONE, HP_SHIFT, TOTAL_BITS};
use crate::wide::{mul_q62, mul_q62_round, round_shift_right_u64};

/// `2^(2^-i)` for `i = 1..=32` in Q2.62, rounded to nearest.
const POW2_FRAC: [u64; FRAC_BITS as usize] = [
    0x5A82_7999_FCEF_3242,
    0x4C1B_F828_C6DC_54B8,
    0x45CA_E0F1_F545_EB73,
    0x42D5_61B3_E624_3D8A,
    0x4166_C34C_5615_D0EC,
    0x40B2_68F9_DE01_83BA,
    0x4058_F6A7_ECCC_D5B6,
    0x402C_6BE9_6AF2_FB58,
    0x4016_321B_6870_27A8,
    0x400B_1817_8BA3_3B14,
    0x4005_8BCE_4101_47E8,
    0x4002_C5D7_BFF7_1DAF,
    0x4001_62E8_07EE_7E5B,
    0x4000_B173_0DF6_A524,
    0x4000_58B9_497B_8152,
    0x4000_2C5C_955D_D701,
    0x4000_162E_46D6_F26C,
    0x4000_0B17_2275_7B1B,
    0x4000_058B_90FD_3E0C,
    0x4000_02C5_C86F_3F26,
    0x4000_0162_E433_C79B,
    0x4000_00B1_7218_EDD0,
    0x4000_0058_B90C_3968,
    0x4000_002C_5C86_0D54,
    0x4000_0016_2E43_02D2,
    0x4000_000B_1721_8073,
    0x4000_0005_8B90_BFFC,
    0x4000_0002_C5C8_5FEF,
    0x4000_0001_62E4_2FF3,
    0x4000_0000_B172_17F9,
    0x4000_0000_58B9_0BFC,
    0x4000_0000_2C5C_85FE,
];

impl Fix64 {
    /// Base-2 logarithm, within one raw unit.
    ///
    /// Returns [`FixedError::OutOfDomain`] for `x <= 0`.
    pub fn log2(self) -> Result<Self, FixedError> {
        let raw = self.raw();
        if raw <= 0 {
            return Err(FixedError::OutOfDomain { op: Op::Log2, raw });
        }

        let top = TOTAL_BITS - 1 - raw.leading_zeros();
        let mut y = (i64::from(top) - i64::from(FRAC_BITS)) << FRAC_BITS;

        // mantissa in [1, 2)
        #[allow(clippy::cast_sign_loss)]
        let mut m = (raw as u64) << (HP_FRAC_BITS - top);
        let mut b = 1_i64 << (FRAC_BITS - 1);
        for _ in 0..FRAC_BITS {
            m = mul_q62(m, m);
            if m >= 2 * HP_ONE {
                m >>= 1;
                y += b;
            }
            b >>= 1;
        }
        Ok(Self::from_raw(y))
    }

    /// Natural logarithm, `log2(x) · ln 2`.
    ///
    /// Returns [`FixedError::OutOfDomain`] for `x <= 0`.
    pub fn ln(self) -> Result<Self, FixedError> {
        self.log2()
            .map(|l| l * Self::LN2)
            .map_err(|_| FixedError::OutOfDomain {
                op: Op::Ln,
                raw: self.raw(),
            })
    }

    /// `2^x`, saturating to [`Fix64::MAX`] from [`Fix64::LOG2_MAX`] up.
    ///
    /// Very negative exponents underflow to zero.
    pub fn pow2(self) -> Self {
        let raw = self.raw();
        if raw == 0 {
            return Self::ONE;
        }
        let int = raw >> FRAC_BITS;
        if int >= Self::LOG2_MAX.to_int() {
            return Self::MAX;
        }

        let frac = raw & FRAC_MASK;
        let mut m = HP_ONE;
        for (i, factor) in POW2_FRAC.iter().enumerate() {
            if frac & (1_i64 << (FRAC_BITS as usize - 1 - i)) != 0 {
                m = mul_q62_round(m, *factor);
            }
        }

        // m * 2^int in Q2.62 moved to Q32.32; int <= 30 keeps the shift
        // non-negative
        let shift = u32::try_from(i64::from(HP_SHIFT) - int).unwrap_or(u32::MAX);
        let magnitude = round_shift_right_u64(m, shift);
        Self::from_raw(i64::try_from(magnitude).unwrap_or(i64::MAX))
    }

    /// `base^exp` as `pow2(exp · log2(base))`.
    ///
    /// - `exp == 0` gives `ONE` for every base, zero included.
    /// - A negative base is [`FixedError::OutOfDomain`].
    /// - A zero base with a negative exponent is [`FixedError::DivideByZero`];
    ///   with a positive exponent the result is zero.
    pub fn pow(self, exp: Self) -> Result<Self, FixedError> {
        if exp.is_zero() {
            return Ok(Self::ONE);
        }
        if self.is_negative() {
            return Err(FixedError::OutOfDomain {
                op: Op::Pow,
                raw: self.raw(),
            });
        }
        if self.is_zero() {
            return if exp.is_negative() {
                Err(FixedError::DivideByZero { op: Op::Pow })
            } else {
                Ok(Self::ZERO)
            };
        }
        if self == Self::ONE {
            return Ok(Self::ONE);
        }
        Ok((exp * self.log2()?).pow2())
    }
}
