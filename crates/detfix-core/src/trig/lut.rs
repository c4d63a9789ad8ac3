// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Quarter-wave sine table.
//!
//! Samples `sin` on `[0, π/2]` every `2^LUT_SHIFT` raw units. The table is
//! generated on first use with integer arithmetic only (a Taylor series in
//! Q2.62), so every machine builds the same bytes; [`sin_table_digest`]
//! exposes a BLAKE3 hash of them for cross-machine checks.

use std::sync::LazyLock;

use tracing::debug;

use crate::fixed::Fix64;
use crate::format::{HP_SHIFT, LUT_SHIFT, ONE_RAW};
use crate::wide::mul_q62;

/// Number of samples: one per stride up to `π/2`, plus a guard sample so the
/// interpolation always has a right-hand neighbour.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub(crate) const TABLE_LEN: usize = (Fix64::PI_OVER_2.raw() >> LUT_SHIFT) as usize + 2;

static SIN_TABLE: LazyLock<Box<[i64]>> = LazyLock::new(|| {
    let table = build_table();
    debug!(
        entries = table.len(),
        digest = %hex::encode(digest_of(&table)),
        "sine table generated"
    );
    table
});

/// `sin(theta)` for `theta` in Q2.62, `0 <= theta < 2`, rounded to Q32.32.
#[allow(clippy::cast_possible_wrap)]
fn sin_taylor(theta: u64) -> i64 {
    let theta_sq = mul_q62(theta, theta);
    let mut term = theta;
    let mut sum = theta;
    let mut k = 1_u64;
    // Terms shrink monotonically for theta < 2; the alternating partial sums
    // stay within [0, theta].
    loop {
        term = mul_q62(term, theta_sq) / ((2 * k) * (2 * k + 1));
        if term == 0 {
            break;
        }
        if k % 2 == 1 {
            sum -= term;
        } else {
            sum += term;
        }
        k += 1;
    }
    ((sum + (1_u64 << (HP_SHIFT - 1))) >> HP_SHIFT) as i64
}

fn build_table() -> Box<[i64]> {
    (0..TABLE_LEN)
        .map(|i| {
            let theta = (i as u64) << (LUT_SHIFT + HP_SHIFT);
            sin_taylor(theta)
        })
        .collect()
}

fn digest_of(table: &[i64]) -> [u8; 32] {
    let mut hasher = blake3::Hasher::new();
    for sample in table {
        hasher.update(&sample.to_le_bytes());
    }
    hasher.finalize().into()
}

/// The process-wide table, generated on first access.
pub(crate) fn sin_table() -> &'static [i64] {
    &SIN_TABLE
}

/// BLAKE3 digest of the sine table, little-endian `i64` samples in order.
///
/// Two machines that report the same digest produce bit-identical results
/// from every table-driven trigonometric function.
pub fn sin_table_digest() -> [u8; 32] {
    digest_of(sin_table())
}

/// Interpolated sine of a reduced angle `0 <= raw`, clamped to `ONE` at and
/// beyond `π/2`.
pub(crate) fn sin_quadrant(raw: i64) -> i64 {
    if raw >= Fix64::PI_OVER_2.raw() {
        return ONE_RAW;
    }
    let table = sin_table();
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let index = (raw >> LUT_SHIFT) as usize;
    let frac = raw & ((1_i64 << LUT_SHIFT) - 1);
    let (Some(&y0), Some(&y1)) = (table.get(index), table.get(index + 1)) else {
        return ONE_RAW;
    };
    y0 + (((y1 - y0) * frac + (1_i64 << (LUT_SHIFT - 1))) >> LUT_SHIFT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_endpoints() {
        let table = sin_table();
        assert_eq!(table.len(), TABLE_LEN);
        assert_eq!(table[0], 0);
        // the last full stride lands just short of pi/2
        let last = table[TABLE_LEN - 2];
        assert!(ONE_RAW - last < 1 << 8, "last sample {last:#x}");
        assert!(table[TABLE_LEN - 1] <= ONE_RAW);
    }

    #[test]
    fn table_is_monotonic() {
        let table = sin_table();
        assert!(table.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn quadrant_clamps_at_right_angle() {
        assert_eq!(sin_quadrant(Fix64::PI_OVER_2.raw()), ONE_RAW);
        assert_eq!(sin_quadrant(i64::MAX), ONE_RAW);
        assert_eq!(sin_quadrant(0), 0);
    }

    #[test]
    fn digest_is_stable_across_calls() {
        assert_eq!(sin_table_digest(), sin_table_digest());
    }
}
