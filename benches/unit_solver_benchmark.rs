// ============================================================================
// Unit Solver Benchmarks
// ============================================================================
//
// Benchmark Categories:
// 1. Solver - End-to-end unit calculation for growing baskets
// 2. Tolerance - Cost of extra refinement passes
// 3. Decimal Resolution - Sequential vs scoped-thread fan-out
// ============================================================================

use basket_units::prelude::*;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rust_decimal::Decimal;

fn basket(size: usize) -> (Vec<TokenAddress>, Vec<u8>, Vec<Decimal>, Vec<Decimal>) {
    let components: Vec<TokenAddress> = (0..size)
        .map(|i| {
            let mut bytes = [0u8; 20];
            bytes[..8].copy_from_slice(&(i as u64 + 1).to_be_bytes());
            TokenAddress::from_bytes(bytes)
        })
        .collect();
    let decimals = (0..size).map(|i| if i % 3 == 0 { 6 } else { 18 }).collect();
    let prices = (0..size)
        .map(|i| Decimal::new(1_000 + 37 * i as i64, 3))
        .collect();

    // Equal weights in basis points, remainder on the first component
    let share = 10_000 / size as i64;
    let mut proportions: Vec<Decimal> = (0..size).map(|_| Decimal::new(share, 4)).collect();
    proportions[0] += Decimal::new(10_000 - share * size as i64, 4);

    (components, decimals, prices, proportions)
}

fn benchmark_solver(c: &mut Criterion) {
    let mut group = c.benchmark_group("unit_solver");

    for size in [2usize, 8, 32, 64].iter() {
        let (components, decimals, prices, proportions) = basket(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| {
                black_box(calculate_units(
                    &components,
                    &decimals,
                    &prices,
                    &proportions,
                    Decimal::ONE_HUNDRED,
                    Decimal::TEN,
                ))
            });
        });
    }

    group.finish();
}

fn benchmark_tolerance(c: &mut Criterion) {
    let mut group = c.benchmark_group("tolerance");
    let (components, decimals, prices, proportions) = basket(8);

    for percent in ["10", "1", "0.01", "0.0001"].iter() {
        let percent_error: Decimal = percent.parse().unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(percent), &percent_error, |b, p| {
            b.iter(|| {
                black_box(calculate_units(
                    &components,
                    &decimals,
                    &prices,
                    &proportions,
                    Decimal::ONE_HUNDRED,
                    *p,
                ))
            });
        });
    }

    group.finish();
}

fn benchmark_decimal_resolution(c: &mut Criterion) {
    let mut group = c.benchmark_group("decimal_resolution");
    let (components, decimals, _, _) = basket(32);
    let reader: StaticDecimalReader = components.iter().copied().zip(decimals).collect();
    let resolver = DecimalResolver::default();

    group.bench_function("sequential", |b| {
        b.iter(|| black_box(resolver.resolve(&reader, &components)))
    });
    group.bench_function("concurrent", |b| {
        b.iter(|| black_box(resolver.resolve_concurrent(&reader, &components)))
    });

    group.finish();
}

criterion_group!(
    benches,
    benchmark_solver,
    benchmark_tolerance,
    benchmark_decimal_resolution
);
criterion_main!(benches);
