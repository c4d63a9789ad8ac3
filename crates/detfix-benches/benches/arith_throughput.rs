// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![allow(missing_docs)]
//! Benchmark: multiply, divide, sqrt and log2/pow2 over a fixed operand set.
//!
//! Operands mix small fractions with large magnitudes so the division
//! kick-start and the saturation checks are both exercised.
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use detfix_core::Fix64;
use std::{hint::black_box, time::Duration};

const N: usize = 1_024;

/// Deterministic operands from a 64-bit LCG (Knuth's MMIX constants).
fn operands(seed: u64) -> Vec<Fix64> {
    let mut state = seed;
    (0..N)
        .map(|i| {
            state = state
                .wrapping_mul(6_364_136_223_846_793_005)
                .wrapping_add(1_442_695_040_888_963_407);
            // alternate between full-range and |x| < 2^16 operands
            let shift = if i % 2 == 0 { 0 } else { 16 };
            Fix64::from_raw((state as i64) >> shift)
        })
        .collect()
}

fn bench_arith(c: &mut Criterion) {
    let xs = operands(0x42);
    let ys = operands(0x1234_5678);
    let mut group = c.benchmark_group("arith");
    group
        .warm_up_time(Duration::from_secs(2))
        .measurement_time(Duration::from_secs(5))
        .throughput(Throughput::Elements(N as u64));

    group.bench_function(BenchmarkId::new("mul", N), |b| {
        b.iter(|| {
            xs.iter()
                .zip(&ys)
                .map(|(x, y)| *x * *y)
                .fold(Fix64::ZERO, Fix64::fast_add)
        });
    });
    group.bench_function(BenchmarkId::new("fast_mul", N), |b| {
        b.iter(|| {
            xs.iter()
                .zip(&ys)
                .map(|(x, y)| x.fast_mul(*y))
                .fold(Fix64::ZERO, Fix64::fast_add)
        });
    });
    group.bench_function(BenchmarkId::new("div", N), |b| {
        b.iter(|| {
            xs.iter()
                .zip(&ys)
                .filter_map(|(x, y)| x.checked_div(*y).ok())
                .fold(Fix64::ZERO, Fix64::fast_add)
        });
    });
    group.bench_function(BenchmarkId::new("sqrt", N), |b| {
        b.iter(|| {
            xs.iter()
                .filter_map(|x| x.abs().sqrt().ok())
                .fold(Fix64::ZERO, Fix64::fast_add)
        });
    });
    group.bench_function(BenchmarkId::new("log2_pow2", N), |b| {
        b.iter(|| {
            xs.iter()
                .filter_map(|x| x.abs().log2().ok())
                .map(Fix64::pow2)
                .fold(Fix64::ZERO, Fix64::fast_add)
        });
    });
    group.finish();
    black_box((xs, ys));
}

criterion_group!(benches, bench_arith);
criterion_main!(benches);
