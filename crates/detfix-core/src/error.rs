// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Error types for rejected fixed-point operations.
//!
//! Range overflow is never an error: arithmetic saturates. An error means a
//! precondition of the operation was violated and no value was produced.

use thiserror::Error;

/// Operation that rejected its operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    /// `x / y`
    Div,
    /// `x % y`
    Rem,
    /// `sqrt(x)`
    Sqrt,
    /// `tan(x)`
    Tan,
    /// `asin(x)`
    Asin,
    /// `acos(x)`
    Acos,
    /// `log2(x)`
    Log2,
    /// `ln(x)`
    Ln,
    /// `pow(b, e)`
    Pow,
}

impl core::fmt::Display for Op {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let name = match self {
            Self::Div => "div",
            Self::Rem => "rem",
            Self::Sqrt => "sqrt",
            Self::Tan => "tan",
            Self::Asin => "asin",
            Self::Acos => "acos",
            Self::Log2 => "log2",
            Self::Ln => "ln",
            Self::Pow => "pow",
        };
        f.write_str(name)
    }
}

/// Errors produced by fallible `Fix64` operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum FixedError {
    /// The divisor (or an intermediate divisor) was exactly zero.
    #[error("{op}: division by zero")]
    DivideByZero {
        /// Operation that divided.
        op: Op,
    },
    /// `sqrt` was called with a negative operand.
    #[error("sqrt: negative argument (raw {raw:#x})")]
    NegativeSqrt {
        /// Raw bits of the rejected operand.
        raw: i64,
    },
    /// The operand lies outside the function's mathematical domain.
    #[error("{op}: argument out of domain (raw {raw:#x})")]
    OutOfDomain {
        /// Operation whose domain was violated.
        op: Op,
        /// Raw bits of the rejected operand.
        raw: i64,
    },
}

/// Errors produced when parsing decimal text into a `Fix64`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum ParseFixedError {
    /// The input contained no digits.
    #[error("cannot parse fixed-point value from empty string")]
    Empty,
    /// A character that is not a decimal digit (or a single leading sign /
    /// single decimal point) was found.
    #[error("invalid digit at byte {index}")]
    InvalidDigit {
        /// Byte offset of the offending character.
        index: usize,
    },
    /// The value does not fit the Q32.32 range.
    #[error("fixed-point literal out of range")]
    OutOfRange,
}
