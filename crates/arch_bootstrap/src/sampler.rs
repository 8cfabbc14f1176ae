//! Bootstrap index sampler.
//!
//! [`IndexSampler`] turns a validated [`BootstrapConfig`] and a caller-owned
//! [`RandomStream`] into index arrays of length `n`. Each draw is
//! self-contained: the sampler keeps no state between draws except the
//! stream, so stopping early needs no cleanup.
//!
//! ## Draw order
//!
//! The stream is consumed in a fixed order so that a seed reproduces the
//! same arrays bit for bit:
//!
//! | Scheme | Per block |
//! |--------|-----------|
//! | Independent | one `next_index(n)` per position |
//! | Moving block | `next_index(n - L + 1)` |
//! | Circular block | `next_index(n)` |
//! | Stationary | `next_index(n)`, then `next_geometric(p)` |

use crate::config::{BootstrapConfig, BootstrapScheme};
use crate::error::{BootstrapError, BootstrapResult};
use crate::rng::{RandomStream, SeededStream};

/// Index array sampler for one replication run.
///
/// # Examples
///
/// ```rust
/// use arch_bootstrap::rng::SeededStream;
/// use arch_bootstrap::{BootstrapConfig, BootstrapScheme, IndexSampler};
///
/// let config = BootstrapConfig::builder()
///     .scheme(BootstrapScheme::Stationary { probability: 0.1 })
///     .data_length(100)
///     .replications(5)
///     .build()
///     .unwrap();
///
/// let mut sampler = IndexSampler::new(config, SeededStream::from_seed(7)).unwrap();
/// let arrays: Vec<Vec<usize>> = sampler.replications().collect();
///
/// assert_eq!(arrays.len(), 5);
/// assert!(arrays.iter().all(|a| a.len() == 100 && a.iter().all(|&i| i < 100)));
/// ```
#[derive(Clone, Debug)]
pub struct IndexSampler<S> {
    config: BootstrapConfig,
    stream: S,
}

impl IndexSampler<SeededStream> {
    /// Creates a sampler whose stream is seeded from `config.seed()`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if the configuration has no seed, or the
    /// configuration's validation error.
    pub fn from_config(config: BootstrapConfig) -> BootstrapResult<Self> {
        let seed = config.seed().ok_or_else(|| BootstrapError::InvalidParameter {
            name: "seed",
            reason: "must be specified to seed the stream".to_string(),
        })?;
        Self::new(config, SeededStream::from_seed(seed))
    }
}

impl<S: RandomStream> IndexSampler<S> {
    /// Creates a sampler, validating the configuration.
    ///
    /// # Errors
    ///
    /// Returns the configuration's validation error, if any.
    pub fn new(config: BootstrapConfig, stream: S) -> BootstrapResult<Self> {
        config.validate()?;
        Ok(Self { config, stream })
    }

    /// Returns the configuration.
    #[inline]
    pub fn config(&self) -> &BootstrapConfig {
        &self.config
    }

    /// Returns the stream.
    #[inline]
    pub fn stream(&self) -> &S {
        &self.stream
    }

    /// Consumes the sampler and returns the stream in its advanced state.
    pub fn into_stream(self) -> S {
        self.stream
    }

    /// Draws one index array of length `n`.
    pub fn draw(&mut self) -> Vec<usize> {
        let mut indices = vec![0; self.config.data_length()];
        fill_indices(self.config.scheme(), &mut indices, &mut self.stream);
        indices
    }

    /// Draws one index array into a caller buffer.
    ///
    /// # Errors
    ///
    /// Returns `BufferLength` if `out.len()` differs from the data length;
    /// the stream is not advanced in that case.
    pub fn draw_into(&mut self, out: &mut [usize]) -> BootstrapResult<()> {
        if out.len() != self.config.data_length() {
            return Err(BootstrapError::BufferLength {
                expected: self.config.data_length(),
                got: out.len(),
            });
        }
        fill_indices(self.config.scheme(), out, &mut self.stream);
        Ok(())
    }

    /// Iterator yielding exactly `config.replications()` draws.
    pub fn replications(&mut self) -> Replications<'_, S> {
        let remaining = self.config.replications();
        Replications {
            sampler: self,
            remaining,
        }
    }
}

/// Iterator over the configured number of draws.
///
/// Created by [`IndexSampler::replications`].
#[derive(Debug)]
pub struct Replications<'a, S> {
    sampler: &'a mut IndexSampler<S>,
    remaining: usize,
}

impl<S: RandomStream> Iterator for Replications<'_, S> {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        Some(self.sampler.draw())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<S: RandomStream> ExactSizeIterator for Replications<'_, S> {}

/// Draws a single index array for `config` from `stream`.
///
/// # Errors
///
/// Returns `InvalidConfig`-kind errors if the configuration is invalid; no
/// draws are consumed in that case.
///
/// # Examples
///
/// ```rust
/// use arch_bootstrap::rng::SeededStream;
/// use arch_bootstrap::{sample_indices, BootstrapConfig};
///
/// let config = BootstrapConfig::builder().data_length(1000).build().unwrap();
/// let indices = sample_indices(&config, &mut SeededStream::from_seed(1)).unwrap();
/// assert_eq!(indices.len(), 1000);
/// assert!(indices.iter().all(|&i| i < 1000));
/// ```
pub fn sample_indices<S: RandomStream>(
    config: &BootstrapConfig,
    stream: &mut S,
) -> BootstrapResult<Vec<usize>> {
    config.validate()?;
    let mut indices = vec![0; config.data_length()];
    fill_indices(config.scheme(), &mut indices, stream);
    Ok(indices)
}

/// Fills `out` (length `n`) according to `scheme`.
pub(crate) fn fill_indices<S: RandomStream>(
    scheme: BootstrapScheme,
    out: &mut [usize],
    stream: &mut S,
) {
    match scheme {
        BootstrapScheme::Independent => fill_independent(out, stream),
        BootstrapScheme::MovingBlock { block_length } => {
            fill_moving_block(out, block_length, stream)
        }
        BootstrapScheme::CircularBlock { block_length } => {
            fill_circular_block(out, block_length, stream)
        }
        BootstrapScheme::Stationary { probability } => fill_stationary(out, probability, stream),
    }
}

fn fill_independent<S: RandomStream>(out: &mut [usize], stream: &mut S) {
    let n = out.len();
    for slot in out.iter_mut() {
        *slot = stream.next_index(n);
    }
}

/// Blocks start in `[0, n - L]`; the last block is truncated.
fn fill_moving_block<S: RandomStream>(out: &mut [usize], block_length: usize, stream: &mut S) {
    let n = out.len();
    let starts = n - block_length + 1;
    let mut pos = 0;
    while pos < n {
        let start = stream.next_index(starts);
        let take = block_length.min(n - pos);
        for (k, slot) in out[pos..pos + take].iter_mut().enumerate() {
            *slot = start + k;
        }
        pos += take;
    }
}

fn fill_circular_block<S: RandomStream>(out: &mut [usize], block_length: usize, stream: &mut S) {
    let n = out.len();
    let mut pos = 0;
    while pos < n {
        let start = stream.next_index(n);
        let take = block_length.min(n - pos);
        fill_wrapped(&mut out[pos..pos + take], start, n);
        pos += take;
    }
}

fn fill_stationary<S: RandomStream>(out: &mut [usize], probability: f64, stream: &mut S) {
    let n = out.len();
    let mut pos = 0;
    while pos < n {
        let start = stream.next_index(n);
        let take = stream.next_geometric(probability).min(n - pos);
        fill_wrapped(&mut out[pos..pos + take], start, n);
        pos += take;
    }
}

#[inline]
fn fill_wrapped(block: &mut [usize], start: usize, n: usize) {
    let mut index = start;
    for slot in block.iter_mut() {
        *slot = index;
        index += 1;
        if index == n {
            index = 0;
        }
    }
}
