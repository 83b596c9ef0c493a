use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::prelude::*;
use rand_xoshiro::Xoshiro256PlusPlus;
use ranksum::*;
use std::hint::black_box;

fn xrng() -> Xoshiro256PlusPlus {
    Xoshiro256PlusPlus::seed_from_u64(42)
}

/// Distinct values split at random between two groups.
fn untied(nx: usize, ny: usize) -> (Vec<f64>, Vec<f64>) {
    let mut values: Vec<f64> = (0..nx + ny).map(|i| i as f64).collect();
    values.shuffle(&mut xrng());
    let y = values.split_off(nx);
    (values, y)
}

/// Small-integer values, heavily tied.
fn tied(nx: usize, ny: usize) -> (Vec<f64>, Vec<f64>) {
    let mut rng = xrng();
    let mut draw = |n: usize| -> Vec<f64> {
        (0..n).map(|_| f64::from(rng.gen_range(0_u8..5))).collect()
    };
    let x = draw(nx);
    let y = draw(ny);
    (x, y)
}

/// 1. RANKING (shared by both engines)
fn bench_statistics(c: &mut Criterion) {
    let mut group = c.benchmark_group("ustat/new");
    for &size in &[100, 1_000, 10_000] {
        let (x, y) = tied(size, size);
        group.throughput(Throughput::Elements((2 * size) as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &(x, y), |b, (x, y)| {
            b.iter(|| black_box(UStatistics::new(black_box(x), black_box(y))))
        });
    }
    group.finish();
}

/// 2. EXACT WITHOUT TIES (closed-form distribution)
fn bench_exact_untied(c: &mut Criterion) {
    let mut group = c.benchmark_group("exact/untied");
    for &size in &[5, 15, 25] {
        let (x, y) = untied(size, size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &(x, y), |b, (x, y)| {
            b.iter(|| {
                let t = exact_mann_whitney_u_test(black_box(x), black_box(y)).unwrap();
                black_box(t.pvalue(Tail::Both))
            })
        });
    }
    group.finish();
}

/// 3. EXACT WITH TIES (subset enumeration)
fn bench_exact_tied(c: &mut Criterion) {
    let mut group = c.benchmark_group("exact/tied");
    group.sample_size(20);
    for &(nx, ny) in &[(3, 7), (5, 5), (8, 8), (10, 10)] {
        let (x, y) = tied(nx, ny);
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{nx}x{ny}")),
            &(x, y),
            |b, (x, y)| {
                b.iter(|| {
                    let t = exact_mann_whitney_u_test(black_box(x), black_box(y)).unwrap();
                    black_box(t.pvalue(Tail::Both))
                })
            },
        );
    }
    group.finish();
}

/// 4. NORMAL APPROXIMATION
fn bench_approximate(c: &mut Criterion) {
    distribution::init();
    let (x, y) = tied(1_000, 1_000);

    c.bench_function("approximate/1000x1000", |b| {
        b.iter(|| {
            let t = approximate_mann_whitney_u_test(black_box(&x), black_box(&y)).unwrap();
            black_box(t.pvalue(Tail::Both))
        })
    });
}

criterion_group!(
    benches,
    bench_statistics,
    bench_exact_untied,
    bench_exact_tied,
    bench_approximate
);
criterion_main!(benches);
