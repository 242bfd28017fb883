//! Criterion benchmarks for payoff evaluation and curve sampling.
//!
//! Measures single-settlement profit/loss and full curve collection across
//! grid densities.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use txo_core::{sample_curve, CurveConfig, OptionType, PayoffModel};

/// Benchmark a single profit/loss evaluation for both sides.
fn bench_profit_loss(c: &mut Criterion) {
    let model = PayoffModel::default();
    let mut group = c.benchmark_group("profit_loss");

    for side in [OptionType::Call, OptionType::Put] {
        group.bench_with_input(BenchmarkId::new("single", side), &side, |b, &side| {
            b.iter(|| {
                model
                    .profit_loss(black_box(17_300.0), 17_000.0, 150.0, 1, side)
                    .unwrap()
            });
        });
    }

    group.finish();
}

/// Benchmark collecting the comparison curve at increasing density.
fn bench_curve_sampling(c: &mut Criterion) {
    let model = PayoffModel::default();
    let mut group = c.benchmark_group("curve_sampling");

    for step in [10.0, 1.0, 0.1] {
        let config = CurveConfig {
            half_range: 800.0,
            step,
        };
        let curve = sample_curve(&model, 17_000.0, 150.0, 60.0, 1, OptionType::Call, &config)
            .unwrap();

        group.bench_with_input(
            BenchmarkId::new("collect", curve.len()),
            &curve,
            |b, curve| {
                b.iter(|| black_box(curve.points()));
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_profit_loss, bench_curve_sampling);
criterion_main!(benches);
