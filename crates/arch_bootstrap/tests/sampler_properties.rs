//! Integration tests for the bootstrap samplers.
//!
//! Property tests for range, block structure and reproducibility of every
//! scheme, driven through the public API only.

use arch_bootstrap::replicate::{mix_seed, par_index_arrays, resample};
use arch_bootstrap::rng::{RandomStream, SeededStream};
use arch_bootstrap::{sample_indices, BootstrapConfig, BootstrapScheme, IndexSampler};
use arch_core::types::ErrorKind;
use proptest::prelude::*;

fn scheme_strategy(n: usize) -> impl Strategy<Value = BootstrapScheme> {
    prop_oneof![
        Just(BootstrapScheme::Independent),
        (1..=n).prop_map(|block_length| BootstrapScheme::MovingBlock { block_length }),
        (1..=n).prop_map(|block_length| BootstrapScheme::CircularBlock { block_length }),
        (0.01f64..=1.0).prop_map(|probability| BootstrapScheme::Stationary { probability }),
    ]
}

fn case_strategy() -> impl Strategy<Value = (BootstrapScheme, usize)> {
    (1usize..300).prop_flat_map(|n| (scheme_strategy(n), Just(n)))
}

fn build(scheme: BootstrapScheme, n: usize) -> BootstrapConfig {
    BootstrapConfig::builder()
        .scheme(scheme)
        .data_length(n)
        .replications(4)
        .build()
        .unwrap()
}

#[test]
fn test_invalid_configs_report_invalid_config() {
    let cases = [
        BootstrapConfig::builder().data_length(0).build(),
        BootstrapConfig::builder()
            .scheme(BootstrapScheme::MovingBlock { block_length: 0 })
            .data_length(10)
            .build(),
        BootstrapConfig::builder()
            .scheme(BootstrapScheme::Stationary { probability: 0.0 })
            .data_length(10)
            .build(),
        BootstrapConfig::builder()
            .scheme(BootstrapScheme::Stationary { probability: 1.5 })
            .data_length(10)
            .build(),
    ];
    for result in cases {
        assert_eq!(result.unwrap_err().kind(), ErrorKind::InvalidConfig);
    }
}

#[test]
fn test_stationary_tiny_probability_is_one_circular_block() {
    let config = build(BootstrapScheme::Stationary { probability: 1e-17 }, 100);
    let indices = sample_indices(&config, &mut SeededStream::from_seed(1)).unwrap();

    assert_eq!(indices.len(), 100);
    for pair in indices.windows(2) {
        assert_eq!(pair[1], (pair[0] + 1) % 100);
    }
}

#[test]
fn test_resampled_series_reuses_observations() {
    let data: Vec<f64> = (0..40).map(|i| (i as f64).sin()).collect();
    let config = build(BootstrapScheme::CircularBlock { block_length: 6 }, data.len());
    let indices = sample_indices(&config, &mut SeededStream::from_seed(10)).unwrap();
    let sample = resample(&data, &indices).unwrap();
    for (value, &index) in sample.iter().zip(&indices) {
        assert_eq!(*value, data[index]);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Every index lies in [0, n) and the array has length n.
    #[test]
    fn prop_indices_in_range((scheme, n) in case_strategy(), seed in any::<u64>()) {
        let config = build(scheme, n);
        let indices = sample_indices(&config, &mut SeededStream::from_seed(seed)).unwrap();
        prop_assert_eq!(indices.len(), n);
        prop_assert!(indices.iter().all(|&i| i < n));
    }

    /// Same seed, same sequence of arrays.
    #[test]
    fn prop_seeded_samplers_agree((scheme, n) in case_strategy(), seed in any::<u64>()) {
        let mut a = IndexSampler::new(build(scheme, n), SeededStream::from_seed(seed)).unwrap();
        let mut b = IndexSampler::new(build(scheme, n), SeededStream::from_seed(seed)).unwrap();
        let left: Vec<Vec<usize>> = a.replications().collect();
        let right: Vec<Vec<usize>> = b.replications().collect();
        prop_assert_eq!(left, right);
    }

    /// Moving blocks are contiguous runs that never wrap.
    #[test]
    fn prop_moving_block_runs(n in 2usize..200, l in 1usize..20, seed in any::<u64>()) {
        let l = l.min(n);
        let config = build(BootstrapScheme::MovingBlock { block_length: l }, n);
        let indices = sample_indices(&config, &mut SeededStream::from_seed(seed)).unwrap();
        for block in indices.chunks(l) {
            prop_assert!(block[0] + l <= n);
            for pair in block.windows(2) {
                prop_assert_eq!(pair[1], pair[0] + 1);
            }
        }
    }

    /// Circular blocks are contiguous modulo n.
    #[test]
    fn prop_circular_block_runs(n in 2usize..200, l in 1usize..20, seed in any::<u64>()) {
        let l = l.min(n);
        let config = build(BootstrapScheme::CircularBlock { block_length: l }, n);
        let indices = sample_indices(&config, &mut SeededStream::from_seed(seed)).unwrap();
        for block in indices.chunks(l) {
            for pair in block.windows(2) {
                prop_assert_eq!(pair[1], (pair[0] + 1) % n);
            }
        }
    }

    /// Parallel arrays are reproducible and match per-replication replay.
    #[test]
    fn prop_parallel_reproducible((scheme, n) in case_strategy(), seed in any::<u64>()) {
        let config = BootstrapConfig::builder()
            .scheme(scheme)
            .data_length(n)
            .replications(80)
            .build()
            .unwrap();
        let arrays = par_index_arrays(&config, seed).unwrap();
        prop_assert_eq!(&arrays, &par_index_arrays(&config, seed).unwrap());

        let last = arrays.len() - 1;
        let mut stream = SeededStream::from_seed(mix_seed(seed, last));
        prop_assert_eq!(&arrays[last], &sample_indices(&config, &mut stream).unwrap());
    }
}

/// Stream wrapper counting every draw.
struct CountingStream {
    inner: SeededStream,
    draws: usize,
}

impl RandomStream for CountingStream {
    fn next_uniform(&mut self) -> f64 {
        self.draws += 1;
        self.inner.next_uniform()
    }

    fn next_index(&mut self, n: usize) -> usize {
        self.draws += 1;
        self.inner.next_index(n)
    }

    fn next_geometric(&mut self, p: f64) -> usize {
        self.draws += 1;
        self.inner.next_geometric(p)
    }
}

#[test]
fn test_moving_block_draw_count() {
    let config = build(BootstrapScheme::MovingBlock { block_length: 5 }, 23);
    let mut stream = CountingStream {
        inner: SeededStream::from_seed(4),
        draws: 0,
    };
    sample_indices(&config, &mut stream).unwrap();
    // ceil(23 / 5) blocks, one start each.
    assert_eq!(stream.draws, 5);
}

#[test]
fn test_independent_draw_count() {
    let config = build(BootstrapScheme::Independent, 17);
    let mut stream = CountingStream {
        inner: SeededStream::from_seed(4),
        draws: 0,
    };
    sample_indices(&config, &mut stream).unwrap();
    assert_eq!(stream.draws, 17);
}
