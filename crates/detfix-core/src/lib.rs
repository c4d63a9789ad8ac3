// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! detfix-core: deterministic Q32.32 fixed-point arithmetic.
//!
//! [`Fix64`] stores `raw / 2^32` in an `i64`. Every operation, including
//! `sqrt`, the trigonometric functions and `log2`/`pow2`, is evaluated with
//! integer arithmetic only, so results are bit-identical across machines,
//! compilers and targets. Overflow saturates; rejected operands are reported
//! through [`FixedError`].
//!
//! ```
//! use detfix_core::Fix64;
//!
//! let half = Fix64::ONE >> 1;
//! assert_eq!(Fix64::from_int(3) * half, Fix64::from_raw(3 << 31));
//! assert_eq!(Fix64::PI_OVER_2.sin(), Fix64::ONE);
//! assert_eq!(Fix64::from_int(4).sqrt(), Ok(Fix64::from_int(2)));
//! ```
#![forbid(unsafe_code)]
#![deny(missing_docs, rust_2018_idioms, unused_must_use)]
#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    clippy::cargo,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,
    clippy::dbg_macro,
    clippy::print_stdout,
    clippy::print_stderr
)]
#![allow(
    clippy::must_use_candidate,
    clippy::return_self_not_must_use,
    clippy::unreadable_literal,
    clippy::missing_const_for_fn,
    clippy::suboptimal_flops,
    clippy::redundant_pub_crate,
    clippy::many_single_char_names,
    clippy::module_name_repetitions,
    clippy::use_self
)]

mod arith;
mod atan;
mod cache;
mod convert;
mod div;
mod error;
mod fixed;
mod format;
mod log;
mod mul;
mod sqrt;
mod text;
mod trig;
mod wide;

/// Bounded `atan2` memoisation.
pub use cache::{Atan2Cache, CacheStats, DEFAULT_SLOTS_LOG2, MAX_SLOTS_LOG2};
/// Error types for rejected operands and malformed text.
pub use error::{FixedError, Op, ParseFixedError};
/// The fixed-point value type.
pub use fixed::Fix64;
/// Identity check for the trigonometric table.
pub use trig::lut::sin_table_digest;
