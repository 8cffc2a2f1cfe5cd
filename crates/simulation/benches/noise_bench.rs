//! Criterion benchmarks for Improved Perlin noise sampling.
//!
//! Benchmarks:
//!   - a single `sample` at a fixed non-lattice point
//!   - a 64x64 row-major sweep at the coarsest heightmap octave
//!
//! Run with: cargo bench -p simulation --bench noise_bench

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use simulation::improved_noise::ImprovedNoise;

fn bench_single_sample(c: &mut Criterion) {
    let mut group = c.benchmark_group("noise_sample");
    group.sample_size(1000);

    let noise = ImprovedNoise::new();
    group.bench_function("point", |b| {
        b.iter(|| noise.sample(black_box(3.7), black_box(1.2), black_box(0.5)));
    });

    group.finish();
}

fn bench_sweep(c: &mut Criterion) {
    let mut group = c.benchmark_group("noise_sweep");

    let noise = ImprovedNoise::new();
    group.bench_function("64x64", |b| {
        b.iter(|| {
            let mut acc = 0.0;
            for y in 0..64 {
                for x in 0..64 {
                    acc += noise.sample(x as f64 / 5.0, y as f64 / 5.0, black_box(42.5));
                }
            }
            black_box(acc)
        });
    });

    group.finish();
}

criterion_group!(benches, bench_single_sample, bench_sweep);
criterion_main!(benches);
