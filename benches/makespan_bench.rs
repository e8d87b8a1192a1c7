//! Criterion benchmarks for the makespan branch-and-bound.
//!
//! Instances are drawn from a seeded RNG so runs are comparable.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use u_makespan::makespan::{bounds, JobOrder, MakespanSolver, ModelBuilder, SolverConfig};

fn random_jobs(n: usize, seed: u64) -> Vec<u64> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n).map(|_| rng.random_range(1..100)).collect()
}

fn bench_solve(c: &mut Criterion) {
    let mut group = c.benchmark_group("makespan_solve");

    for &n in &[10usize, 14, 18] {
        let job_times = random_jobs(n, 42);
        let model = ModelBuilder::new(&job_times, 3).build().unwrap();

        for (label, order) in [("index", JobOrder::Index), ("longest_first", JobOrder::LongestFirst)] {
            let config = SolverConfig::default()
                .with_job_order(order)
                .with_node_limit(2_000_000);
            group.bench_with_input(BenchmarkId::new(label, n), &model, |b, model| {
                b.iter(|| MakespanSolver::solve(black_box(model), &config).unwrap())
            });
        }
    }

    group.finish();
}

fn bench_parallel(c: &mut Criterion) {
    let job_times = random_jobs(22, 7);
    let model = ModelBuilder::new(&job_times, 4).build().unwrap();
    let mut group = c.benchmark_group("makespan_workers");
    group.sample_size(10);

    for &workers in &[1usize, 2, 4] {
        let config = SolverConfig::default()
            .with_job_order(JobOrder::LongestFirst)
            .with_num_workers(workers)
            .with_node_limit(5_000_000);
        group.bench_with_input(BenchmarkId::from_parameter(workers), &model, |b, model| {
            b.iter(|| MakespanSolver::solve(black_box(model), &config).unwrap())
        });
    }

    group.finish();
}

fn bench_model_build(c: &mut Criterion) {
    let job_times = random_jobs(100, 1);
    c.bench_function("model_build_100x10", |b| {
        b.iter(|| ModelBuilder::new(black_box(&job_times), 10).build().unwrap())
    });
}

fn bench_lpt(c: &mut Criterion) {
    let job_times = random_jobs(1_000, 3);
    c.bench_function("lpt_1000x16", |b| {
        b.iter(|| bounds::lpt(black_box(&job_times), 16))
    });
}

criterion_group!(benches, bench_solve, bench_parallel, bench_model_build, bench_lpt);
criterion_main!(benches);
