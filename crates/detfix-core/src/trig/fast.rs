// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Closed-form sine approximation; no table access.

use super::reduce_turn;
use crate::fixed::Fix64;

/// `4/π`
const FOUR_DIV_PI: Fix64 = Fix64::from_raw(0x1_45F3_06DD);
/// `-4/π²`
const FOUR_DIV_PI2: Fix64 = Fix64::from_raw(-0x67C0_BD89);
/// Weight of the quartic correction, `0.225`.
const X4_CORRECTION: Fix64 = Fix64::from_raw(0x3999_999A);

impl Fix64 {
    /// Parabolic sine for angles already in `[-π, π]`.
    ///
    /// Evaluates `4/π·x - 4/π²·x·|x|`, which meets `sin` at `0`, `±π/2` and
    /// `±π` up to rounding, then adds `0.225·(y·|y| - y)` to pull the curve
    /// towards `sin` between those points. Absolute error stays below
    /// `0.0011`. Outside `[-π, π]` the result is meaningless; use
    /// [`Fix64::fast_sin`] for unreduced angles.
    pub fn sin_parabola(self) -> Self {
        let y = FOUR_DIV_PI * self + FOUR_DIV_PI2 * self * self.abs();
        y + X4_CORRECTION * (y * y.abs() - y)
    }

    /// Approximate sine: range reduction followed by [`Fix64::sin_parabola`].
    pub fn fast_sin(self) -> Self {
        let mut r = reduce_turn(self);
        if r > Self::PI.raw() {
            r -= Self::PI_TIMES_2.raw();
        }
        Self::from_raw(r).sin_parabola()
    }

    /// Approximate cosine, `fast_sin(x + π/2)` after range reduction.
    pub fn fast_cos(self) -> Self {
        Self::from_raw(reduce_turn(self) + Self::PI_OVER_2.raw()).fast_sin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coefficients_match_their_closed_forms() {
        let tol = 1e-9;
        assert!((FOUR_DIV_PI.to_f64() - 4.0 / core::f64::consts::PI).abs() < tol);
        let pi_sq = core::f64::consts::PI * core::f64::consts::PI;
        assert!((FOUR_DIV_PI2.to_f64() + 4.0 / pi_sq).abs() < tol);
        assert!((X4_CORRECTION.to_f64() - 0.225).abs() < tol);
    }

    #[test]
    fn parabola_pins_zero() {
        assert_eq!(Fix64::ZERO.sin_parabola(), Fix64::ZERO);
        assert_eq!(Fix64::ZERO.fast_sin(), Fix64::ZERO);
    }
}
