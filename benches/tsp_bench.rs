//! Criterion benchmarks for u-tsp.
//!
//! Uses seeded uniform random instances so every run measures the same
//! work.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::Rng;
use u_tsp::aco::{AcoConfig, AcoRunner};
use u_tsp::ga::{GaConfig, GaRunner};
use u_tsp::geometry::ProblemInstance;
use u_tsp::local_search::two_opt;
use u_tsp::random::create_rng;
use u_tsp::tour::Tour;

fn random_instance(n: usize, seed: u64) -> ProblemInstance {
    let mut rng = create_rng(seed);
    ProblemInstance::from_points(
        (0..n).map(|_| (rng.random_range(0.0..1000.0), rng.random_range(0.0..1000.0))),
    )
    .unwrap()
}

// ===========================================================================
// Building blocks
// ===========================================================================

fn bench_distance_table(c: &mut Criterion) {
    let mut group = c.benchmark_group("distance_table");
    for &n in &[50, 200, 500] {
        let points = random_instance(n, 1).points().to_vec();
        group.bench_with_input(BenchmarkId::from_parameter(n), &points, |b, pts| {
            b.iter(|| ProblemInstance::from_points(black_box(pts.iter().copied())))
        });
    }
    group.finish();
}

fn bench_two_opt(c: &mut Criterion) {
    let mut group = c.benchmark_group("two_opt");
    group.sample_size(20);
    for &n in &[20, 50, 100] {
        let instance = random_instance(n, 2);
        let tour = Tour::random(n, &mut create_rng(3));
        group.bench_with_input(BenchmarkId::from_parameter(n), &(instance, tour), |b, (i, t)| {
            b.iter(|| black_box(two_opt(black_box(t), i.distances())))
        });
    }
    group.finish();
}

// ===========================================================================
// Strategies
// ===========================================================================

fn bench_ga(c: &mut Criterion) {
    let mut group = c.benchmark_group("ga");
    group.sample_size(10);
    for &n in &[20, 50] {
        let instance = random_instance(n, 4);
        let config = GaConfig::fast()
            .with_max_generations(50)
            .with_stagnation_limit(0)
            .with_seed(42);
        group.bench_with_input(
            BenchmarkId::from_parameter(n),
            &(instance, config),
            |b, (i, c)| {
                b.iter(|| {
                    let result = GaRunner::run(black_box(i), black_box(c));
                    black_box(result)
                })
            },
        );
    }
    group.finish();
}

fn bench_aco(c: &mut Criterion) {
    let mut group = c.benchmark_group("aco");
    group.sample_size(10);
    for &n in &[20, 50] {
        let instance = random_instance(n, 5);
        let config = AcoConfig::auto_select(n)
            .with_max_iterations(20)
            .with_seed(42);
        group.bench_with_input(
            BenchmarkId::from_parameter(n),
            &(instance, config),
            |b, (i, c)| {
                b.iter(|| {
                    let result = AcoRunner::run(black_box(i), black_box(c));
                    black_box(result)
                })
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_distance_table, bench_two_opt, bench_ga, bench_aco);
criterion_main!(benches);
