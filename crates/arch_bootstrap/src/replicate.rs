//! Parallel replication helpers.
//!
//! Every replication owns a [`SeededStream`] seeded with
//! [`mix_seed`]`(base_seed, index)`, so the arrays produced for a given
//! `(config, base_seed)` are identical whether they run on one thread or
//! many, and in whatever order rayon schedules them.

use rayon::prelude::*;
use tracing::debug;

use crate::config::BootstrapConfig;
use crate::error::{BootstrapError, BootstrapResult};
use crate::rng::SeededStream;
use crate::sampler::fill_indices;

/// Golden-ratio multiplier used to spread consecutive seeds.
pub const GOLDEN_RATIO_SEED_MIX: u64 = 0x9E37_79B9_7F4A_7C15;

/// Replication counts below this run sequentially.
pub const PARALLEL_THRESHOLD: usize = 64;

/// Derives the seed of replication `index` from a base seed.
///
/// # Examples
///
/// ```
/// use arch_bootstrap::replicate::mix_seed;
///
/// assert_eq!(mix_seed(42, 3), mix_seed(42, 3));
/// assert_ne!(mix_seed(42, 3), mix_seed(42, 4));
/// ```
#[inline]
pub fn mix_seed(base_seed: u64, index: usize) -> u64 {
    base_seed
        .wrapping_mul(GOLDEN_RATIO_SEED_MIX)
        .wrapping_add(index as u64)
        .rotate_left(17)
}

/// Draws one index array for replication `index` of a validated config.
fn replication_indices(config: &BootstrapConfig, base_seed: u64, index: usize) -> Vec<usize> {
    let mut stream = SeededStream::from_seed(mix_seed(base_seed, index));
    let mut indices = vec![0; config.data_length()];
    fill_indices(config.scheme(), &mut indices, &mut stream);
    indices
}

/// Produces `config.replications()` index arrays in parallel.
///
/// # Errors
///
/// Returns the configuration's validation error before any work starts.
///
/// # Examples
///
/// ```
/// use arch_bootstrap::replicate::par_index_arrays;
/// use arch_bootstrap::{BootstrapConfig, BootstrapScheme};
///
/// let config = BootstrapConfig::builder()
///     .scheme(BootstrapScheme::MovingBlock { block_length: 4 })
///     .data_length(32)
///     .replications(200)
///     .build()
///     .unwrap();
///
/// let first = par_index_arrays(&config, 42).unwrap();
/// let second = par_index_arrays(&config, 42).unwrap();
/// assert_eq!(first.len(), 200);
/// assert_eq!(first, second);
/// ```
pub fn par_index_arrays(
    config: &BootstrapConfig,
    base_seed: u64,
) -> BootstrapResult<Vec<Vec<usize>>> {
    config.validate()?;
    let replications = config.replications();

    if replications < PARALLEL_THRESHOLD {
        debug!(replications, scheme = config.scheme().name(), "sequential index arrays");
        return Ok((0..replications)
            .map(|index| replication_indices(config, base_seed, index))
            .collect());
    }

    debug!(
        replications,
        scheme = config.scheme().name(),
        threads = rayon::current_num_threads(),
        "parallel index arrays"
    );
    Ok((0..replications)
        .into_par_iter()
        .map(|index| replication_indices(config, base_seed, index))
        .collect())
}

/// Evaluates `statistic` on every resampled series, in parallel.
///
/// The `i`-th output is the statistic of `data` resampled with the `i`-th
/// array of [`par_index_arrays`].
///
/// # Errors
///
/// - configuration errors, as for [`par_index_arrays`]
/// - `BufferLength` if `data.len()` differs from the configured data length
pub fn par_bootstrap_statistic<F>(
    config: &BootstrapConfig,
    base_seed: u64,
    data: &[f64],
    statistic: F,
) -> BootstrapResult<Vec<f64>>
where
    F: Fn(&[f64]) -> f64 + Send + Sync,
{
    config.validate()?;
    if data.len() != config.data_length() {
        return Err(BootstrapError::BufferLength {
            expected: config.data_length(),
            got: data.len(),
        });
    }

    let evaluate = |index: usize| {
        let indices = replication_indices(config, base_seed, index);
        let sample: Vec<f64> = indices.iter().map(|&i| data[i]).collect();
        statistic(&sample)
    };

    let replications = config.replications();
    debug!(replications, n = data.len(), "bootstrap statistic");
    if replications < PARALLEL_THRESHOLD {
        Ok((0..replications).map(evaluate).collect())
    } else {
        Ok((0..replications).into_par_iter().map(evaluate).collect())
    }
}

/// Applies an index array to a series.
///
/// # Errors
///
/// Returns `IndexOutOfRange` for the first index not below `data.len()`.
///
/// # Examples
///
/// ```
/// use arch_bootstrap::replicate::resample;
///
/// let data = [10.0, 20.0, 30.0];
/// assert_eq!(resample(&data, &[2, 2, 0]).unwrap(), vec![30.0, 30.0, 10.0]);
/// assert!(resample(&data, &[3]).is_err());
/// ```
pub fn resample<T: Copy>(data: &[T], indices: &[usize]) -> BootstrapResult<Vec<T>> {
    indices
        .iter()
        .map(|&index| {
            data.get(index)
                .copied()
                .ok_or(BootstrapError::IndexOutOfRange {
                    index,
                    len: data.len(),
                })
        })
        .collect()
}
