//! Criterion benchmarks for RandGen hot paths.
//!
//! Benchmarks:
//! 1. Distribution build (validation + merge + cumulative) at several sizes
//! 2. Single-draw binary search at several sizes
//! 3. Batch sampling, sequential vs rayon-parallel

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;

use randgen_core::{
    sample_batch, sample_batch_parallel, Distribution, SeedHierarchy, DEFAULT_CHUNK_SIZE,
};

// ── Helpers ──────────────────────────────────────────────────────────

/// `n` distinct values with equal mass, every value duplicated once.
fn make_entries(n: usize) -> (Vec<i64>, Vec<f64>) {
    let numbers: Vec<i64> = (0..n as i64).map(|i| i / 2).collect();
    let probabilities = vec![1.0 / n as f64; n];
    (numbers, probabilities)
}

// ── 1. Build ─────────────────────────────────────────────────────────

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");
    for n in [10usize, 100, 1000] {
        let (numbers, probabilities) = make_entries(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter(|| Distribution::build(black_box(&numbers), black_box(&probabilities)))
        });
    }
    group.finish();
}

// ── 2. Single draw ───────────────────────────────────────────────────

fn bench_sample(c: &mut Criterion) {
    let mut group = c.benchmark_group("sample");
    for n in [10usize, 100, 1000] {
        let (numbers, probabilities) = make_entries(n);
        let dist = Distribution::build(&numbers, &probabilities).expect("valid entries");
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter(|| dist.sample(black_box(0.618_034)))
        });
    }
    group.finish();
}

// ── 3. Batch ─────────────────────────────────────────────────────────

fn bench_batch(c: &mut Criterion) {
    let (numbers, probabilities) = make_entries(1000);
    let dist = Distribution::build(&numbers, &probabilities).expect("valid entries");
    let seeds = SeedHierarchy::new(42);
    let n = 100_000;

    let mut group = c.benchmark_group("batch");
    group.bench_function("sequential", |b| {
        b.iter(|| {
            let mut rng = StdRng::seed_from_u64(42);
            sample_batch(&dist, &mut rng, black_box(n))
        })
    });
    group.bench_function("parallel", |b| {
        b.iter(|| sample_batch_parallel(&dist, &seeds, black_box(n), DEFAULT_CHUNK_SIZE))
    });
    group.finish();
}

criterion_group!(benches, bench_build, bench_sample, bench_batch);
criterion_main!(benches);
