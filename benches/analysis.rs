//! Benchmarks for the trend analysis steps.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use registration_trends::core::{MonthlySeries, YearMonth};
use registration_trends::detection::{find_peaks, OutlierBand};
use registration_trends::models::linear_forecast;
use registration_trends::pipeline::trend::TrendReport;
use registration_trends::seasonality::ClassicalDecomposition;

fn generate_monthly(n: usize) -> Vec<f64> {
    (0..n)
        .map(|i| {
            1000.0
                + 3.0 * i as f64
                + 150.0 * (2.0 * std::f64::consts::PI * i as f64 / 12.0).sin()
                + 40.0 * ((i * 7919) % 13) as f64 / 13.0
        })
        .collect()
}

fn bench_steps(c: &mut Criterion) {
    let mut group = c.benchmark_group("trend_steps");

    for size in [60, 240, 1200].iter() {
        let values = generate_monthly(*size);
        let series = MonthlySeries::contiguous(YearMonth::new(2000, 1).unwrap(), values.clone());

        group.bench_with_input(BenchmarkId::new("winsorize", size), size, |b, _| {
            b.iter(|| {
                let band = OutlierBand::p1_p99(black_box(&values)).unwrap();
                band.winsorize(&values)
            })
        });

        group.bench_with_input(BenchmarkId::new("find_peaks", size), size, |b, _| {
            b.iter(|| find_peaks(black_box(&values), 6))
        });

        group.bench_with_input(BenchmarkId::new("decompose", size), size, |b, _| {
            let decomposition = ClassicalDecomposition::monthly();
            b.iter(|| decomposition.decompose(black_box(&values)))
        });

        group.bench_with_input(BenchmarkId::new("linear_forecast", size), size, |b, _| {
            b.iter(|| linear_forecast(black_box(&series), 24, 12))
        });

        group.bench_with_input(BenchmarkId::new("full_report", size), size, |b, _| {
            b.iter(|| TrendReport::analyze(black_box(&series)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_steps);
criterion_main!(benches);
