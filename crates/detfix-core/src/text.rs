// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Locale-invariant decimal text.
//!
//! Every Q32.32 value has a finite decimal expansion (at most 32 fractional
//! digits), so `Display` prints it exactly and `FromStr` reads decimal text
//! back with a single rounding step. Neither direction goes through a float.

use core::fmt;
use core::str::FromStr;

use crate::error::ParseFixedError;
use crate::fixed::Fix64;
use crate::format::{FRAC_BITS, FRAC_MASK, TOTAL_BITS};

/// Upper bound on the fractional digits of any Q32.32 value.
const MAX_FRAC_DIGITS: usize = FRAC_BITS as usize;

/// Fractional digits kept while parsing. Every multiple of `2^-33` has at
/// most 33 decimal places, so digits past this never change the rounding.
const PARSE_FRAC_DIGITS: usize = 40;

/// Exact decimal digits of a magnitude split into integer and fraction.
struct Decimal {
    int: u64,
    frac: [u8; MAX_FRAC_DIGITS],
    len: usize,
}

impl Decimal {
    fn from_magnitude(abs: u64) -> Self {
        #[allow(clippy::cast_sign_loss)]
        let mask = FRAC_MASK as u64;
        let mut rest = abs & mask;
        let mut frac = [0_u8; MAX_FRAC_DIGITS];
        let mut len = 0;
        while rest != 0 {
            rest *= 10;
            #[allow(clippy::cast_possible_truncation)]
            let digit = (rest >> FRAC_BITS) as u8;
            frac[len] = digit;
            len += 1;
            rest &= mask;
        }
        Self {
            int: abs >> FRAC_BITS,
            frac,
            len,
        }
    }

    /// Rounds half away from zero to `digits` fractional places.
    fn round_to(&mut self, digits: usize) {
        if digits >= self.len {
            return;
        }
        let round_up = self.frac[digits] >= 5;
        self.len = digits;
        if !round_up {
            return;
        }
        for d in self.frac[..digits].iter_mut().rev() {
            if *d == 9 {
                *d = 0;
            } else {
                *d += 1;
                return;
            }
        }
        self.int += 1;
    }

    fn render(&self, out: &mut String, min_digits: usize) {
        out.push_str(&self.int.to_string());
        let shown = self.len.max(min_digits);
        if shown == 0 {
            return;
        }
        out.push('.');
        for i in 0..shown {
            let d = if i < self.len { self.frac[i] } else { 0 };
            out.push(char::from(b'0' + d));
        }
    }
}

/// Prints the exact decimal value; trailing fractional zeros are omitted.
///
/// With a precision (`{:.3}`) the value is rounded half away from zero to that
/// many places and padded with zeros. Width, fill and sign flags behave as for
/// integers.
impl fmt::Display for Fix64 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut dec = Decimal::from_magnitude(self.raw().unsigned_abs());
        let min_digits = match f.precision() {
            Some(p) => {
                dec.round_to(p);
                p
            }
            None => 0,
        };
        let mut body = String::with_capacity(48);
        dec.render(&mut body, min_digits);
        // Rounding can reach zero; never print "-0".
        let is_zero = dec.int == 0 && dec.frac[..dec.len].iter().all(|&d| d == 0);
        f.pad_integral(self.raw() >= 0 || is_zero, "", &body)
    }
}

/// Parses `[+-]digits[.digits]`, rounding half away from zero to the nearest
/// representable value.
///
/// ```
/// use detfix_core::Fix64;
/// let half: Fix64 = "-0.5".parse().unwrap_or_default();
/// assert_eq!(half.raw(), -(1 << 31));
/// ```
impl FromStr for Fix64 {
    type Err = ParseFixedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.as_bytes();
        let (negative, start) = match bytes.first() {
            Some(b'-') => (true, 1),
            Some(b'+') => (false, 1),
            _ => (false, 0),
        };

        let mut point = None;
        let mut digits = 0_usize;
        for (index, &b) in bytes.iter().enumerate().skip(start) {
            match b {
                b'0'..=b'9' => digits += 1,
                b'.' if point.is_none() => point = Some(index),
                _ => return Err(ParseFixedError::InvalidDigit { index }),
            }
        }
        if digits == 0 {
            return Err(ParseFixedError::Empty);
        }

        let end = bytes.len();
        let int_digits = &bytes[start..point.unwrap_or(end)];
        let frac_digits = point.map_or(&[][..], |p| &bytes[p + 1..end]);

        // Integer parts above 2^31 are out of range whatever the sign.
        let int_limit = 1_u64 << (TOTAL_BITS - FRAC_BITS - 1);
        let mut int = 0_u64;
        for &b in int_digits {
            int = int * 10 + u64::from(b - b'0');
            if int > int_limit {
                return Err(ParseFixedError::OutOfRange);
            }
        }

        let magnitude = (int << FRAC_BITS) + fraction_bits(frac_digits);
        let limit = if negative {
            i64::MIN.unsigned_abs()
        } else {
            i64::MAX.unsigned_abs()
        };
        if magnitude > limit {
            return Err(ParseFixedError::OutOfRange);
        }
        #[allow(clippy::cast_possible_wrap)]
        let raw = magnitude as i64;
        Ok(Self::from_raw(if negative { raw.wrapping_neg() } else { raw }))
    }
}

/// Converts decimal fraction digits to `round(frac * 2^32)`, half away from
/// zero. The result is at most `2^32`, which carries into the integer part.
fn fraction_bits(digits: &[u8]) -> u64 {
    let mut dec = [0_u8; PARSE_FRAC_DIGITS];
    let kept = digits.len().min(PARSE_FRAC_DIGITS);
    for (slot, &b) in dec.iter_mut().zip(&digits[..kept]) {
        *slot = b - b'0';
    }

    // Doubling the decimal fraction shifts one binary digit out of the top.
    let mut bits = 0_u64;
    for _ in 0..=FRAC_BITS {
        let mut carry = 0;
        for d in dec[..kept].iter_mut().rev() {
            let twice = *d * 2 + carry;
            *d = twice % 10;
            carry = twice / 10;
        }
        bits = (bits << 1) | u64::from(carry);
    }
    // one guard bit
    (bits + 1) >> 1
}
