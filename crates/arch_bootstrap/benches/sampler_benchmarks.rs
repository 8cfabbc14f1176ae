//! Criterion benchmarks for the bootstrap samplers.
//!
//! Measures single-array draws per scheme and the parallel replication
//! helper across data lengths.

use arch_bootstrap::replicate::par_index_arrays;
use arch_bootstrap::rng::SeededStream;
use arch_bootstrap::{BootstrapConfig, BootstrapScheme, IndexSampler};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn schemes() -> Vec<(&'static str, BootstrapScheme)> {
    vec![
        ("independent", BootstrapScheme::Independent),
        ("moving_block", BootstrapScheme::MovingBlock { block_length: 10 }),
        ("circular_block", BootstrapScheme::CircularBlock { block_length: 10 }),
        ("stationary", BootstrapScheme::Stationary { probability: 0.1 }),
    ]
}

/// Benchmark one draw per scheme.
fn bench_single_draw(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_draw");

    for size in [100, 1000, 10000] {
        for (label, scheme) in schemes() {
            let config = BootstrapConfig::builder()
                .scheme(scheme)
                .data_length(size)
                .build()
                .unwrap();
            let mut sampler = IndexSampler::new(config, SeededStream::from_seed(42)).unwrap();
            let mut buffer = vec![0; size];
            group.bench_function(BenchmarkId::new(label, size), |b| {
                b.iter(|| sampler.draw_into(black_box(&mut buffer)).unwrap());
            });
        }
    }

    group.finish();
}

/// Benchmark parallel replication.
fn bench_parallel_replications(c: &mut Criterion) {
    let mut group = c.benchmark_group("par_index_arrays");
    group.sample_size(20);

    for replications in [100, 1000] {
        let config = BootstrapConfig::builder()
            .scheme(BootstrapScheme::Stationary { probability: 0.05 })
            .data_length(2500)
            .replications(replications)
            .build()
            .unwrap();
        group.bench_with_input(
            BenchmarkId::new("stationary_2500", replications),
            &config,
            |b, config| {
                b.iter(|| par_index_arrays(black_box(config), 7).unwrap());
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_single_draw, bench_parallel_replications);
criterion_main!(benches);
