// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Inverse trigonometry from a cubic minimax `atan2`.
//!
//! The angle is measured from the diagonal nearest the input:
//!
//! ```text
//! x >= 0:  r = (x - |y|) / (x + |y|),  angle = π/4  - c1·r + c3·r³
//! x <  0:  r = (x + |y|) / (|y| - x),  angle = 3π/4 - c1·r + c3·r³
//! ```
//!
//! with `r` in `[-1, 1]`. `c1 = π/4 + c3`, so `r = ±1` lands exactly on the
//! axes and `atan2` is exact at `0`, `±π/2` and `π`. Absolute error elsewhere
//! stays below `0.0102` rad.

use crate::error::{FixedError, Op};
use crate::fixed::Fix64;

/// Cubic coefficient, `≈ 0.1963`.
const C3: Fix64 = Fix64::from_raw(0x3240_B780);
/// Linear coefficient, `π/4 + c3` (`≈ 0.9817`).
const C1: Fix64 = Fix64::from_raw(Fix64::PI_OVER_4.raw() + C3.raw());

impl Fix64 {
    /// Four-quadrant arctangent of `self / x` (`self` is the `y` coordinate),
    /// in `[-π, π]`. `atan2(0, 0)` is zero.
    pub fn atan2(self, x: Self) -> Self {
        let (mut y, mut x) = (self, x);
        if y.is_zero() && x.is_zero() {
            return Self::ZERO;
        }
        // The ratio is scale-free; halving keeps x ± |y| from saturating.
        let half_max = Self::MAX.raw() >> 1;
        if y.abs().raw() > half_max || x.abs().raw() > half_max {
            y = y >> 1;
            x = x >> 1;
        }

        let abs_y = y.abs();
        // Both denominators are strictly positive here.
        let (r, base) = if x.raw() >= 0 {
            ((x - abs_y).checked_div(x + abs_y), Self::PI_OVER_4)
        } else {
            ((x + abs_y).checked_div(abs_y - x), Self::THREE_PI_OVER_4)
        };
        let r = r.unwrap_or(Self::ZERO);

        let angle = C3 * (r * r * r) - C1 * r + base;
        if y.is_negative() {
            -angle
        } else {
            angle
        }
    }

    /// Arctangent, `atan2(self, ONE)`.
    pub fn atan(self) -> Self {
        self.atan2(Self::ONE)
    }

    /// Arcsine in `[-π/2, π/2]`, computed as `atan(x / sqrt(1 - x²))`.
    ///
    /// Returns [`FixedError::OutOfDomain`] outside `[-1, 1]`. `asin(±1)` is
    /// exactly `±π/2`.
    pub fn asin(self) -> Result<Self, FixedError> {
        if self.abs() > Self::ONE {
            return Err(FixedError::OutOfDomain {
                op: Op::Asin,
                raw: self.raw(),
            });
        }
        if self == Self::ONE {
            return Ok(Self::PI_OVER_2);
        }
        if self == -Self::ONE {
            return Ok(-Self::PI_OVER_2);
        }
        // |x| < 1 leaves 1 - x² at least two raw units, so the root is nonzero.
        let cos = (Self::ONE - self * self).sqrt()?;
        Ok(self.checked_div(cos)?.atan())
    }

    /// Arccosine in `[0, π]`, `π/2 - asin(x)`.
    ///
    /// Returns [`FixedError::OutOfDomain`] outside `[-1, 1]`. `acos(1)` is
    /// exactly zero and `acos(-1)` exactly `π`.
    pub fn acos(self) -> Result<Self, FixedError> {
        if self.abs() > Self::ONE {
            return Err(FixedError::OutOfDomain {
                op: Op::Acos,
                raw: self.raw(),
            });
        }
        Ok(Self::PI_OVER_2 - self.asin()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_coefficient_closes_the_octant() {
        // r = 1 must evaluate to exactly zero from the pi/4 base
        assert_eq!(C3 - C1 + Fix64::PI_OVER_4, Fix64::ZERO);
        assert_eq!(C1.raw(), 0xFB50_9222);
    }

    #[test]
    fn origin_is_zero() {
        assert_eq!(Fix64::ZERO.atan2(Fix64::ZERO), Fix64::ZERO);
    }
}
