// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Bit layout of the Q32.32 encoding.
//!
//! Every algorithm in the crate derives its widths from the constants below
//! instead of spelling out `32`/`64` literals, so a narrower or wider
//! instantiation only has to change this module (plus the precomputed
//! constant tables, which are generated for the active layout).
//!
//! The representation is an `i64` storing an integer scaled by `2^32`:
//! `real_value = raw / 2^32`.

/// Total width of the raw storage integer.
pub(crate) const TOTAL_BITS: u32 = i64::BITS;

/// Number of fractional bits in the Q32.32 encoding.
pub(crate) const FRAC_BITS: u32 = 32;

/// Width of one half of the raw integer, used by the split multiplier.
pub(crate) const HALF_BITS: u32 = TOTAL_BITS / 2;

/// Mask selecting the low half of a raw value.
pub(crate) const HALF_MASK: u64 = (1_u64 << HALF_BITS) - 1;

/// Mask selecting the fractional bits of a raw value.
pub(crate) const FRAC_MASK: i64 = (1_i64 << FRAC_BITS) - 1;

/// The raw integer value corresponding to `1.0`.
pub(crate) const ONE_RAW: i64 = 1_i64 << FRAC_BITS;

/// Raw value of one half, the rounding threshold at the fractional boundary.
pub(crate) const HALF_RAW: i64 = ONE_RAW >> 1;

/// Fractional bits of the internal high-precision mantissa format (Q2.62 in a `u64`).
///
/// Used by the table generator and by `log2`/`pow2`, whose operands stay in
/// `[0, 4)` and therefore fit two integer bits.
pub(crate) const HP_FRAC_BITS: u32 = 62;

/// `1.0` in the internal Q2.62 format.
pub(crate) const HP_ONE: u64 = 1_u64 << HP_FRAC_BITS;

/// Distance between the Q2.62 and Q32.32 binary points.
pub(crate) const HP_SHIFT: u32 = HP_FRAC_BITS - FRAC_BITS;

/// Stride of the sine table, as a power of two in raw units.
///
/// One sample per `2^15` raw units (~7.6e-6 rad) keeps linear interpolation
/// error below half a raw unit.
pub(crate) const LUT_SHIFT: u32 = 15;
