// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Saturating linear arithmetic: add, sub, neg, abs and the rounding family.

use core::iter::Sum;
use core::ops::{Add, AddAssign, Neg, Shl, Shr, Sub, SubAssign};

use crate::fixed::Fix64;
use crate::format::{FRAC_MASK, HALF_RAW, ONE_RAW, TOTAL_BITS};

/// Sign bit of the raw integer.
const SIGN_BIT: i64 = i64::MIN;

impl Fix64 {
    /// Saturating addition.
    ///
    /// Overflow is only possible when both operands share a sign, and shows up
    /// as a sum whose sign differs from theirs; the result then clamps to
    /// [`Fix64::MAX`] or [`Fix64::MIN`] following the operands' sign.
    pub const fn saturating_add(self, rhs: Self) -> Self {
        let x = self.raw();
        let y = rhs.raw();
        let sum = x.wrapping_add(y);
        if ((x ^ y) & SIGN_BIT) == 0 && ((sum ^ x) & SIGN_BIT) != 0 {
            return if x > 0 { Self::MAX } else { Self::MIN };
        }
        Self::from_raw(sum)
    }

    /// Saturating subtraction.
    ///
    /// Overflow is only possible when the operands' signs differ, and shows up
    /// as a difference whose sign differs from the minuend's.
    pub const fn saturating_sub(self, rhs: Self) -> Self {
        let x = self.raw();
        let y = rhs.raw();
        let diff = x.wrapping_sub(y);
        if ((x ^ y) & SIGN_BIT) != 0 && ((diff ^ x) & SIGN_BIT) != 0 {
            // x == 0 can only overflow against MIN, which is a positive overflow
            return if x >= 0 { Self::MAX } else { Self::MIN };
        }
        Self::from_raw(diff)
    }

    /// Wrapping addition without overflow detection.
    pub const fn fast_add(self, rhs: Self) -> Self {
        Self::from_raw(self.raw().wrapping_add(rhs.raw()))
    }

    /// Wrapping subtraction without overflow detection.
    pub const fn fast_sub(self, rhs: Self) -> Self {
        Self::from_raw(self.raw().wrapping_sub(rhs.raw()))
    }

    /// Saturating negation: `-MIN` has no positive counterpart and becomes
    /// [`Fix64::MAX`].
    pub const fn saturating_neg(self) -> Self {
        if self.raw() == i64::MIN {
            Self::MAX
        } else {
            Self::from_raw(-self.raw())
        }
    }

    /// Two's-complement negation; `-MIN` stays `MIN`.
    pub const fn fast_neg(self) -> Self {
        Self::from_raw(self.raw().wrapping_neg())
    }

    /// Absolute value. `abs(MIN)` saturates to [`Fix64::MAX`].
    pub const fn abs(self) -> Self {
        if self.raw() == i64::MIN {
            return Self::MAX;
        }
        self.fast_abs()
    }

    /// Branchless absolute value without the `MIN` special case.
    ///
    /// For every input except [`Fix64::MIN`] this equals [`Fix64::abs`];
    /// `fast_abs(MIN)` returns `MIN` unchanged.
    pub const fn fast_abs(self) -> Self {
        // branchless: mask is all ones for negative input, zero otherwise
        let mask = self.raw() >> (TOTAL_BITS - 1);
        Self::from_raw(self.raw().wrapping_add(mask) ^ mask)
    }

    /// Returns `-1`, `0` or `1` following the sign of the value.
    pub const fn sign(self) -> i32 {
        if self.raw() < 0 {
            -1
        } else if self.raw() > 0 {
            1
        } else {
            0
        }
    }

    /// Largest integer value less than or equal to `self`.
    pub const fn floor(self) -> Self {
        Self::from_raw(self.raw() & !FRAC_MASK)
    }

    /// Smallest integer value greater than or equal to `self`, saturating at
    /// [`Fix64::MAX`].
    pub const fn ceil(self) -> Self {
        if self.raw() & FRAC_MASK != 0 {
            self.floor().saturating_add(Self::ONE)
        } else {
            self
        }
    }

    /// Rounds to the nearest integer; halfway values go to the even neighbour.
    /// Saturates at [`Fix64::MAX`].
    pub const fn round(self) -> Self {
        let frac = self.raw() & FRAC_MASK;
        let floor = self.floor();
        if frac < HALF_RAW {
            return floor;
        }
        if frac > HALF_RAW {
            return floor.saturating_add(Self::ONE);
        }
        if floor.raw() & ONE_RAW == 0 {
            floor
        } else {
            floor.saturating_add(Self::ONE)
        }
    }

    /// Returns the lesser of two values.
    pub const fn min(self, other: Self) -> Self {
        if self.raw() < other.raw() {
            self
        } else {
            other
        }
    }

    /// Returns the greater of two values.
    pub const fn max(self, other: Self) -> Self {
        if self.raw() > other.raw() {
            self
        } else {
            other
        }
    }

    /// Restricts `self` to `[lo, hi]`. When `lo > hi` the result is `hi`.
    pub const fn clamp(self, lo: Self, hi: Self) -> Self {
        self.max(lo).min(hi)
    }

    /// `self + ONE`, saturating. Counterpart of a prefix increment.
    pub const fn inc(self) -> Self {
        self.saturating_add(Self::ONE)
    }

    /// `self - ONE`, saturating. Counterpart of a prefix decrement.
    pub const fn dec(self) -> Self {
        self.saturating_sub(Self::ONE)
    }
}

impl Add for Fix64 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        self.saturating_add(rhs)
    }
}

impl Sub for Fix64 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        self.saturating_sub(rhs)
    }
}

impl Neg for Fix64 {
    type Output = Self;

    fn neg(self) -> Self::Output {
        self.saturating_neg()
    }
}

impl AddAssign for Fix64 {
    fn add_assign(&mut self, rhs: Self) {
        *self = self.saturating_add(rhs);
    }
}

impl SubAssign for Fix64 {
    fn sub_assign(&mut self, rhs: Self) {
        *self = self.saturating_sub(rhs);
    }
}

/// Shifts the raw bits left, wrapping like the underlying integer.
impl Shl<u32> for Fix64 {
    type Output = Self;

    fn shl(self, rhs: u32) -> Self {
        Self::from_raw(self.raw().wrapping_shl(rhs))
    }
}

/// Arithmetic right shift of the raw bits.
impl Shr<u32> for Fix64 {
    type Output = Self;

    fn shr(self, rhs: u32) -> Self {
        Self::from_raw(self.raw().wrapping_shr(rhs))
    }
}

impl Sum for Fix64 {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Self::saturating_add)
    }
}

impl<'a> Sum<&'a Fix64> for Fix64 {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, |acc, v| acc.saturating_add(*v))
    }
}
