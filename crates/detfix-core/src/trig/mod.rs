// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Table-driven `sin`/`cos`/`tan`.
//!
//! Strategy:
//! - reduce to `[0, 2π)` with `rem_euclid` on the raw value
//! - fold into the first quadrant (sign flip past `π`, mirror past `π/2`)
//! - interpolate the quarter-wave table
//!
//! `PI_TIMES_2`, `PI` and `PI_OVER_2` are exact shifts of one another, so the
//! folds are exact: `sin(π/2) = 1`, `sin(π) = 0`, `cos(π) = -1` and
//! `sin(-x) = -sin(x)` hold bit for bit.

mod fast;
pub(crate) mod lut;

use crate::error::{FixedError, Op};
use crate::fixed::Fix64;

use lut::sin_quadrant;

/// Reduces `angle` into `[0, 2π)`.
pub(crate) const fn reduce_turn(angle: Fix64) -> i64 {
    angle.raw().rem_euclid(Fix64::PI_TIMES_2.raw())
}

/// Sine of an angle already reduced to `[0, 2π)`.
fn sin_reduced(turn: i64) -> Fix64 {
    let (mut r, negate) = if turn >= Fix64::PI.raw() {
        (turn - Fix64::PI.raw(), true)
    } else {
        (turn, false)
    };
    if r > Fix64::PI_OVER_2.raw() {
        r = Fix64::PI.raw() - r;
    }
    let value = sin_quadrant(r);
    Fix64::from_raw(if negate { -value } else { value })
}

impl Fix64 {
    /// Table-driven sine of an angle in radians.
    ///
    /// Within two raw units of the correctly rounded result over one period.
    pub fn sin(self) -> Self {
        sin_reduced(reduce_turn(self))
    }

    /// Table-driven cosine, `sin(x + π/2)` after range reduction.
    pub fn cos(self) -> Self {
        // < 2π + π/2, so the shifted angle cannot overflow
        sin_reduced((reduce_turn(self) + Self::PI_OVER_2.raw()).rem_euclid(Self::PI_TIMES_2.raw()))
    }

    /// Tangent as `sin / cos`.
    ///
    /// Near the asymptotes the quotient saturates. Returns
    /// [`FixedError::DivideByZero`] if the cosine is exactly zero.
    pub fn tan(self) -> Result<Self, FixedError> {
        let turn = reduce_turn(self);
        let sin = sin_reduced(turn);
        let cos = sin_reduced((turn + Self::PI_OVER_2.raw()).rem_euclid(Self::PI_TIMES_2.raw()));
        sin.checked_div(cos).map_err(|_| FixedError::DivideByZero { op: Op::Tan })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reduction_is_euclidean() {
        assert_eq!(reduce_turn(-Fix64::PI), Fix64::PI.raw());
        assert_eq!(reduce_turn(Fix64::PI_TIMES_2), 0);
        assert_eq!(reduce_turn(Fix64::from_raw(-1)), Fix64::PI_TIMES_2.raw() - 1);
    }

    #[test]
    fn tan_at_right_angle_is_divide_by_zero() {
        assert_eq!(
            Fix64::PI_OVER_2.tan(),
            Err(FixedError::DivideByZero { op: Op::Tan })
        );
    }
}
