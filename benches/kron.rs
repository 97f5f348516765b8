//! Benchmarks for the structured Kronecker product kernels.
//!
//! Compares `kron_eye` / `eye_kron` against the general `kron` fed an
//! explicit identity, and the portable block copy against the rayon one.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use kronly::{
    eye_kron, eye_kron_with, kron, kron_eye, kron_with, linalg::eye::eye, ParallelCopy,
};
use rand::{rngs::ThreadRng, Rng};

// Helper to generate a column-major matrix as Vec<f64>
fn gen_col_major_vec(rows: usize, cols: usize, rng: &mut ThreadRng) -> Vec<f64> {
    (0..rows * cols)
        .map(|_| rng.random_range(-1.0_f64..1.0_f64))
        .collect()
}

/// Specialized identity kernels against `kron` with a materialized identity.
fn bench_identity_variants(c: &mut Criterion) {
    let mut group = c.benchmark_group("identity_variants");
    let mut rng = rand::rng();

    for n in [4, 16, 64] {
        let size = 16;
        let a = gen_col_major_vec(size, size, &mut rng);
        let mut i_n = vec![0.0; n * n];
        eye(n, &mut i_n);
        let mut dst = vec![0.0; size * n * size * n];

        group.throughput(Throughput::Elements(dst.len() as u64));

        group.bench_with_input(BenchmarkId::new("kron_eye", n), &n, |bench, &n| {
            bench.iter(|| kron_eye(black_box(&a), size, size, n, black_box(&mut dst)))
        });

        group.bench_with_input(BenchmarkId::new("kron_a_eye", n), &n, |bench, &n| {
            bench.iter(|| kron(black_box(&a), size, size, &i_n, n, n, black_box(&mut dst)))
        });

        group.bench_with_input(BenchmarkId::new("eye_kron", n), &n, |bench, &n| {
            bench.iter(|| eye_kron(black_box(&a), size, size, n, black_box(&mut dst)))
        });

        group.bench_with_input(BenchmarkId::new("kron_eye_a", n), &n, |bench, &n| {
            bench.iter(|| kron(&i_n, n, n, black_box(&a), size, size, black_box(&mut dst)))
        });
    }

    group.finish();
}

/// Portable against rayon block copies for growing `B`.
fn bench_copy_backends(c: &mut Criterion) {
    let mut group = c.benchmark_group("copy_backends");
    let mut rng = rand::rng();
    let parallel = ParallelCopy { threshold: 1 << 14 };

    for size in [32, 128, 512] {
        let a = gen_col_major_vec(2, 2, &mut rng);
        let b = gen_col_major_vec(size, size, &mut rng);
        let mut dst = vec![0.0; 4 * size * size];

        group.throughput(Throughput::Elements(dst.len() as u64));

        group.bench_with_input(BenchmarkId::new("kron_portable", size), &size, |bench, &s| {
            bench.iter(|| kron(black_box(&a), 2, 2, black_box(&b), s, s, black_box(&mut dst)))
        });

        group.bench_with_input(BenchmarkId::new("kron_parallel", size), &size, |bench, &s| {
            bench.iter(|| {
                kron_with(&parallel, black_box(&a), 2, 2, black_box(&b), s, s, black_box(&mut dst))
            })
        });

        group.bench_with_input(BenchmarkId::new("eye_kron_parallel", size), &size, |bench, &s| {
            bench.iter(|| eye_kron_with(&parallel, black_box(&b), s, s, 2, black_box(&mut dst)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_identity_variants, bench_copy_backends);

criterion_main!(benches);
