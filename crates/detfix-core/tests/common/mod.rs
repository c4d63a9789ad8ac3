// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![allow(dead_code)]

use detfix_core::Fix64;

/// Raw operands exercised by the grid tests: small and tiny values, integers,
/// binary fractions, carry-sensitive patterns, both bounds and large random
/// magnitudes.
pub const CASES: &[i64] = &[
    // small
    0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, -1, -2, -3, -4, -5, -6, -7, -8, -9, -10,
    // integers
    0x1_0000_0000, -0x1_0000_0000, 0x2_0000_0000, -0x2_0000_0000, 0x3_0000_0000,
    -0x3_0000_0000, 0x4_0000_0000, -0x4_0000_0000, 0x5_0000_0000, -0x5_0000_0000,
    0x6_0000_0000, -0x6_0000_0000,
    // 1/2, 1/4, 1/8
    0x8000_0000, -0x8000_0000, 0x4000_0000, -0x4000_0000, 0x2000_0000, -0x2000_0000,
    // carry-sensitive
    0xFFFF_FFFF, -0xFFFF_FFFF, 0x1_FFFF_FFFF, -0x1_FFFF_FFFF, 0x3_FFFF_FFFF, -0x3_FFFF_FFFF,
    // bounds
    i64::MAX, i64::MIN,
    // large
    6791302811978701836, -8192141831180282065, 6222617001063736300, -7871200276881732034,
    8249382838880205112, -7679310892959748444, 7708113189940799513, -5281862979887936768,
    8220231180772321456, -5204203381295869580, 6860614387764479339, -9080626825133349457,
    6658610233456189347, -6558014273345705245, 6700571222183426493,
    // small random
    -436730658, -2259913246, 329347474, 2565801981, 3398143698, 137497017, 1060347500,
    -3457686027, 1923669753, 2891618613, 2418874813, 2899594950, 2265950765, -1962365447,
    3077934393,
    // tiny
    -171, -359, 491, 844, 158, -413, -422, -737, -575, -330, -376, 435, -311, 116, 715,
    -1024, -487, 59, 724, 993,
];

/// The grid as values.
pub fn cases() -> impl Iterator<Item = Fix64> {
    CASES.iter().copied().map(Fix64::from_raw)
}

/// One raw unit as an `f64` (`2^-32`).
pub const ULP: f64 = 1.0 / 4_294_967_296.0;

/// Absolute distance between a fixed-point result and an `f64` oracle.
pub fn abs_err(actual: Fix64, expected: f64) -> f64 {
    (actual.to_f64() - expected).abs()
}

/// `start, start + step, ...` up to and including `end`, as `f64`.
pub fn sweep(start: f64, end: f64, step: f64) -> impl Iterator<Item = f64> {
    let n = ((end - start) / step).floor() as u64;
    (0..=n).map(move |i| start + step * i as f64)
}
