// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![allow(missing_docs)]
//! Benchmark: table-driven sine/cosine against the parabolic approximation.
//!
//! The table is generated before timing starts. Run with `RUST_LOG=debug` to
//! see the table digest logged by the generator.
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use detfix_core::Fix64;
use std::{hint::black_box, time::Duration};
use tracing_subscriber::EnvFilter;

/// Angles spread over several turns in both directions.
fn angles(n: usize) -> Vec<Fix64> {
    let step = Fix64::PI_TIMES_2.raw() * 8 / n as i64;
    (0..n as i64)
        .map(|i| Fix64::from_raw(i * step - Fix64::PI_TIMES_2.raw() * 4))
        .collect()
}

fn bench_trig(c: &mut Criterion) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init();
    // Build the table outside the timed region.
    black_box(detfix_core::sin_table_digest());

    let mut group = c.benchmark_group("trig");
    group
        .warm_up_time(Duration::from_secs(2))
        .measurement_time(Duration::from_secs(5));
    for &n in &[256usize, 4_096] {
        let input = angles(n);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::new("sin_table", n), &input, |b, input| {
            b.iter(|| input.iter().map(|a| a.sin()).sum::<Fix64>());
        });
        group.bench_with_input(BenchmarkId::new("cos_table", n), &input, |b, input| {
            b.iter(|| input.iter().map(|a| a.cos()).sum::<Fix64>());
        });
        group.bench_with_input(BenchmarkId::new("sin_parabola", n), &input, |b, input| {
            b.iter(|| input.iter().map(|a| a.fast_sin()).sum::<Fix64>());
        });
        group.bench_with_input(BenchmarkId::new("tan", n), &input, |b, input| {
            b.iter(|| {
                input
                    .iter()
                    .filter_map(|a| a.tan().ok())
                    .fold(Fix64::ZERO, |acc, t| acc.fast_add(t))
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_trig);
criterion_main!(benches);
