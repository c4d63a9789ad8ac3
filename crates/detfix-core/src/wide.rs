// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Portable double-width helpers built from half-width partial products.
//!
//! Nothing here relies on `u128`: products are assembled from four
//! `u32 × u32` pieces so the carry behaviour is identical on every target.

use crate::format::{HALF_BITS, HALF_MASK, HP_FRAC_BITS};

/// Full 128-bit product of two `u64`, returned as `(hi, lo)`.
pub(crate) fn mul_u64_wide(a: u64, b: u64) -> (u64, u64) {
    let a_lo = a & HALF_MASK;
    let a_hi = a >> HALF_BITS;
    let b_lo = b & HALF_MASK;
    let b_hi = b >> HALF_BITS;

    let lolo = a_lo * b_lo;
    let lohi = a_lo * b_hi;
    let hilo = a_hi * b_lo;
    let hihi = a_hi * b_hi;

    // Middle column: at most three 32-bit quantities, cannot overflow a u64.
    let mid = (lolo >> HALF_BITS) + (lohi & HALF_MASK) + (hilo & HALF_MASK);
    let lo = (lolo & HALF_MASK) | (mid << HALF_BITS);
    let hi = hihi + (lohi >> HALF_BITS) + (hilo >> HALF_BITS) + (mid >> HALF_BITS);
    (hi, lo)
}

/// `(hi:lo) >> shift` for `shift` in `1..64`, keeping the low 64 bits.
pub(crate) fn shr_wide(hi: u64, lo: u64, shift: u32) -> u64 {
    debug_assert!(shift > 0 && shift < u64::BITS);
    (hi << (u64::BITS - shift)) | (lo >> shift)
}

/// Q2.62 multiply, truncating. Callers keep operands in `[0, 4)` and the
/// product below 4.
pub(crate) fn mul_q62(a: u64, b: u64) -> u64 {
    let (hi, lo) = mul_u64_wide(a, b);
    shr_wide(hi, lo, HP_FRAC_BITS)
}

/// Q2.62 multiply, rounding to nearest (ties to even).
pub(crate) fn mul_q62_round(a: u64, b: u64) -> u64 {
    let (hi, lo) = mul_u64_wide(a, b);
    let q = shr_wide(hi, lo, HP_FRAC_BITS);
    let mask = (1_u64 << HP_FRAC_BITS) - 1;
    let r = lo & mask;
    let half = 1_u64 << (HP_FRAC_BITS - 1);
    if r > half || (r == half && (q & 1) == 1) {
        q + 1
    } else {
        q
    }
}

/// Rounds `value >> shift` to nearest, ties to even.
pub(crate) fn round_shift_right_u64(value: u64, shift: u32) -> u64 {
    if shift == 0 {
        return value;
    }
    if shift >= u64::BITS {
        return 0;
    }

    let q = value >> shift;
    let mask = (1_u64 << shift) - 1;
    let r = value & mask;
    let half = 1_u64 << (shift - 1);

    if r > half {
        q + 1
    } else if r < half {
        q
    } else if (q & 1) == 1 {
        q + 1
    } else {
        q
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference(a: u64, b: u64) -> (u64, u64) {
        // Schoolbook check via explicit 16-bit limbs.
        let limbs = |v: u64| [v & 0xffff, (v >> 16) & 0xffff, (v >> 32) & 0xffff, v >> 48];
        let (x, y) = (limbs(a), limbs(b));
        let mut acc = [0_u64; 8];
        for (i, xi) in x.iter().enumerate() {
            for (j, yj) in y.iter().enumerate() {
                acc[i + j] += xi * yj;
            }
        }
        let mut carry = 0_u64;
        let mut out = [0_u64; 8];
        for k in 0..8 {
            let v = acc[k] + carry;
            out[k] = v & 0xffff;
            carry = v >> 16;
        }
        let lo = out[0] | (out[1] << 16) | (out[2] << 32) | (out[3] << 48);
        let hi = out[4] | (out[5] << 16) | (out[6] << 32) | (out[7] << 48);
        (hi, lo)
    }

    #[test]
    fn wide_product_matches_limb_reference() {
        let samples = [
            0_u64,
            1,
            0xffff_ffff,
            0x1_0000_0000,
            0xdead_beef_cafe_babe,
            u64::MAX,
            u64::MAX - 1,
            0x8000_0000_0000_0000,
            0x0123_4567_89ab_cdef,
        ];
        for a in samples {
            for b in samples {
                assert_eq!(mul_u64_wide(a, b), reference(a, b), "a={a:#x} b={b:#x}");
            }
        }
    }

    #[test]
    fn q62_one_is_identity() {
        let one = crate::format::HP_ONE;
        let x = 0x5A82_7999_FCEF_3242_u64;
        assert_eq!(mul_q62(one, x), x);
        assert_eq!(mul_q62_round(x, one), x);
    }

    #[test]
    fn rounding_shift_ties_to_even() {
        assert_eq!(round_shift_right_u64(0b1010, 2), 0b10);
        assert_eq!(round_shift_right_u64(0b1110, 2), 0b100);
        assert_eq!(round_shift_right_u64(0b1011, 2), 0b11);
        assert_eq!(round_shift_right_u64(u64::MAX, 64), 0);
        assert_eq!(round_shift_right_u64(7, 0), 7);
    }
}
