// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

#![allow(missing_docs)]
#![cfg(feature = "serde")]

use detfix_core::Fix64;

fn to_cbor(value: Fix64) -> Vec<u8> {
    let mut out = Vec::new();
    ciborium::into_writer(&value, &mut out).expect("encode");
    out
}

#[test]
fn values_encode_as_their_raw_integer() {
    // CBOR major type 1 (negative) vs 0 (unsigned), 8-byte argument
    assert_eq!(to_cbor(Fix64::ONE), vec![0x1B, 0, 0, 0, 1, 0, 0, 0, 0]);
    assert_eq!(to_cbor(Fix64::ZERO), vec![0x00]);
    assert_eq!(to_cbor(Fix64::from_raw(-1)), vec![0x20]);
}

#[test]
fn decoding_restores_the_exact_bits() {
    for value in [Fix64::MIN, Fix64::MAX, Fix64::PI, -Fix64::E, Fix64::PRECISION] {
        let bytes = to_cbor(value);
        let back: Fix64 = ciborium::from_reader(bytes.as_slice()).expect("decode");
        assert_eq!(back, value);
    }
}

#[test]
fn wider_integers_are_rejected() {
    // 2^64 does not fit the raw i64
    let bytes = [0xC2, 0x49, 0x01, 0, 0, 0, 0, 0, 0, 0, 0];
    let back: Result<Fix64, _> = ciborium::from_reader(&bytes[..]);
    assert!(back.is_err());
}
