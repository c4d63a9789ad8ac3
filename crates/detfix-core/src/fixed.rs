// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! The `Fix64` value type and its named constants.

use core::fmt;

use crate::format::{FRAC_BITS, ONE_RAW};

/// Deterministic fixed-point scalar with Q32.32 encoding stored in an `i64`.
///
/// The underlying integer stores the value scaled by `2^32`:
///
/// ```text
/// real_value = raw / 2^32
/// ```
///
/// # Determinism contract
///
/// - Every operation is computed in integer space; no result is ever taken
///   from the platform FPU, so the same inputs give the same bits everywhere.
/// - Add/sub/mul/div/pow2 saturate to [`Fix64::MAX`]/[`Fix64::MIN`] on
///   overflow instead of wrapping.
/// - Domain violations (zero divisors, negative square roots, logs of
///   non-positive values) are reported as [`crate::FixedError`]; there is no
///   NaN encoding.
#[derive(Copy, Clone, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct Fix64 {
    raw: i64,
}

impl Fix64 {
    /// The fixed-point zero value.
    pub const ZERO: Self = Self { raw: 0 };

    /// The fixed-point one value.
    pub const ONE: Self = Self { raw: ONE_RAW };

    /// Largest representable value, `2^31 - 2^-32`.
    pub const MAX: Self = Self { raw: i64::MAX };

    /// Smallest representable value, `-2^31`.
    pub const MIN: Self = Self { raw: i64::MIN };

    /// Smallest positive increment, `2^-32`.
    pub const PRECISION: Self = Self { raw: 1 };

    /// `π`, truncated to 32 fractional bits.
    ///
    /// Kept even so that `PI_OVER_2`, `PI_OVER_4` and `PI_TIMES_2` are exact
    /// shifts of it; quadrant folding depends on those relations holding bit
    /// for bit.
    pub const PI: Self = Self { raw: 0x3_243F_6A88 };

    /// `2π`, exactly `PI << 1`.
    pub const PI_TIMES_2: Self = Self {
        raw: Self::PI.raw << 1,
    };

    /// `π/2`, exactly `PI >> 1`.
    pub const PI_OVER_2: Self = Self {
        raw: Self::PI.raw >> 1,
    };

    /// `π/4`, exactly `PI >> 2`.
    pub const PI_OVER_4: Self = Self {
        raw: Self::PI.raw >> 2,
    };

    /// `3π/4`, exactly `PI - PI_OVER_4`.
    pub const THREE_PI_OVER_4: Self = Self {
        raw: Self::PI.raw - Self::PI_OVER_4.raw,
    };

    /// Euler's number `e`, rounded to nearest.
    pub const E: Self = Self { raw: 0x2_B7E1_5163 };

    /// `ln(2)`, rounded to nearest.
    pub const LN2: Self = Self { raw: 0xB172_17F8 };

    /// Smallest exponent for which `pow2` saturates to [`Fix64::MAX`] (`31.0`).
    pub const LOG2_MAX: Self = Self {
        raw: 31 << FRAC_BITS,
    };

    /// Constructs a fixed-point value from a raw Q32.32 integer.
    ///
    /// This is an exact conversion (no scaling or rounding). `raw` is
    /// interpreted as `real_value = raw / 2^32`.
    #[must_use]
    pub const fn from_raw(raw: i64) -> Self {
        Self { raw }
    }

    /// Returns the underlying Q32.32 raw storage value.
    pub const fn raw(self) -> i64 {
        self.raw
    }

    /// Returns `true` if the value is strictly below zero.
    pub const fn is_negative(self) -> bool {
        self.raw < 0
    }

    /// Returns `true` if the value is strictly above zero.
    pub const fn is_positive(self) -> bool {
        self.raw > 0
    }

    /// Returns `true` if the value is exactly zero.
    pub const fn is_zero(self) -> bool {
        self.raw == 0
    }
}

impl fmt::Debug for Fix64 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fix64({self} raw={:#x})", self.raw)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Fix64 {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.raw.serialize(serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Fix64 {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = i64::deserialize(deserializer)?;
        Ok(Self::from_raw(raw))
    }
}
