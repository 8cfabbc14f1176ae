//! Bootstrap configuration.
//!
//! This module provides the resampling scheme and the immutable
//! configuration consumed by [`IndexSampler`](crate::sampler::IndexSampler).

use crate::error::{BootstrapError, BootstrapResult};

/// Replication count used when the builder is not given one.
pub const DEFAULT_REPLICATIONS: usize = 1000;

/// Maximum number of replications allowed.
pub const MAX_REPLICATIONS: usize = 10_000_000;

/// Resampling scheme for one index array.
///
/// # Schemes
///
/// - `Independent`: i.i.d. uniform positions, no dependence preserved
/// - `MovingBlock`: contiguous blocks of fixed length, no wraparound
/// - `CircularBlock`: contiguous blocks of fixed length, wrapping modulo `n`
/// - `Stationary`: geometric block lengths with mean `1 / probability`,
///   wrapping modulo `n`
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "scheme", rename_all = "snake_case")
)]
pub enum BootstrapScheme {
    /// Independent uniform resampling.
    #[default]
    Independent,
    /// Moving-block bootstrap.
    MovingBlock {
        /// Block length `L >= 1`, at most the data length
        block_length: usize,
    },
    /// Circular-block bootstrap.
    CircularBlock {
        /// Block length `L >= 1`, at most the data length
        block_length: usize,
    },
    /// Stationary bootstrap.
    Stationary {
        /// Per-position probability of starting a new block, in `(0, 1]`
        probability: f64,
    },
}

impl BootstrapScheme {
    /// Stationary scheme with a validated probability.
    pub fn stationary(probability: f64) -> BootstrapResult<Self> {
        validate_probability(probability)?;
        Ok(BootstrapScheme::Stationary { probability })
    }

    /// Stationary scheme with expected block length `b`, i.e. `p = 1 / b`.
    ///
    /// # Examples
    ///
    /// ```
    /// use arch_bootstrap::BootstrapScheme;
    ///
    /// let scheme = BootstrapScheme::stationary_with_mean_block(4.0).unwrap();
    /// assert_eq!(scheme, BootstrapScheme::Stationary { probability: 0.25 });
    /// assert!(BootstrapScheme::stationary_with_mean_block(0.5).is_err());
    /// ```
    pub fn stationary_with_mean_block(mean_block_length: f64) -> BootstrapResult<Self> {
        Self::stationary(1.0 / mean_block_length)
    }

    /// Short scheme name.
    pub fn name(&self) -> &'static str {
        match self {
            BootstrapScheme::Independent => "independent",
            BootstrapScheme::MovingBlock { .. } => "moving-block",
            BootstrapScheme::CircularBlock { .. } => "circular-block",
            BootstrapScheme::Stationary { .. } => "stationary",
        }
    }

    /// Expected length of one block.
    pub fn expected_block_length(&self) -> f64 {
        match self {
            BootstrapScheme::Independent => 1.0,
            BootstrapScheme::MovingBlock { block_length }
            | BootstrapScheme::CircularBlock { block_length } => *block_length as f64,
            BootstrapScheme::Stationary { probability } => 1.0 / probability,
        }
    }

    /// Validates the scheme against a data length.
    ///
    /// # Errors
    ///
    /// - `InvalidDataLength` if `data_length == 0`
    /// - `InvalidBlockLength` for a zero fixed block length
    /// - `BlockLengthExceedsData` for a fixed block longer than the data
    /// - `InvalidProbability` for a probability outside `(0, 1]`
    pub fn validate(&self, data_length: usize) -> BootstrapResult<()> {
        if data_length == 0 {
            return Err(BootstrapError::InvalidDataLength(data_length));
        }
        match *self {
            BootstrapScheme::Independent => Ok(()),
            BootstrapScheme::MovingBlock { block_length }
            | BootstrapScheme::CircularBlock { block_length } => {
                if block_length == 0 {
                    Err(BootstrapError::InvalidBlockLength(block_length))
                } else if block_length > data_length {
                    Err(BootstrapError::BlockLengthExceedsData {
                        block_length,
                        data_length,
                    })
                } else {
                    Ok(())
                }
            }
            BootstrapScheme::Stationary { probability } => validate_probability(probability),
        }
    }
}

fn validate_probability(probability: f64) -> BootstrapResult<()> {
    // Written so that NaN fails.
    if probability > 0.0 && probability <= 1.0 {
        Ok(())
    } else {
        Err(BootstrapError::InvalidProbability(probability))
    }
}

/// Bootstrap configuration.
///
/// Immutable configuration specifying the scheme, the length of the series
/// being resampled and the number of replications. Use
/// [`BootstrapConfigBuilder`] to construct instances.
///
/// # Examples
///
/// ```rust
/// use arch_bootstrap::{BootstrapConfig, BootstrapScheme};
///
/// let config = BootstrapConfig::builder()
///     .scheme(BootstrapScheme::MovingBlock { block_length: 5 })
///     .data_length(250)
///     .replications(999)
///     .seed(42)
///     .build()
///     .expect("valid configuration");
///
/// assert_eq!(config.data_length(), 250);
/// assert_eq!(config.replications(), 999);
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BootstrapConfig {
    /// Resampling scheme.
    scheme: BootstrapScheme,
    /// Length `n` of every index array.
    data_length: usize,
    /// Number of index arrays per run.
    replications: usize,
    /// Optional seed for reproducibility.
    seed: Option<u64>,
}

impl BootstrapConfig {
    /// Creates a new configuration builder.
    #[inline]
    pub fn builder() -> BootstrapConfigBuilder {
        BootstrapConfigBuilder::default()
    }

    /// Returns the resampling scheme.
    #[inline]
    pub fn scheme(&self) -> BootstrapScheme {
        self.scheme
    }

    /// Returns the data length `n`.
    #[inline]
    pub fn data_length(&self) -> usize {
        self.data_length
    }

    /// Returns the number of replications.
    #[inline]
    pub fn replications(&self) -> usize {
        self.replications
    }

    /// Returns the optional seed.
    ///
    /// [`IndexSampler::from_config`](crate::IndexSampler::from_config) seeds
    /// its stream from it. [`par_index_arrays`](crate::replicate::par_index_arrays)
    /// takes its base seed explicitly and does not read this value.
    #[inline]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Validates the configuration.
    ///
    /// Configurations from the builder are already valid; deserialised ones
    /// are checked again when a sampler is constructed.
    ///
    /// # Errors
    ///
    /// Returns `BootstrapError` if the scheme is invalid for the data length
    /// or `replications` is 0 or greater than 10,000,000.
    pub fn validate(&self) -> BootstrapResult<()> {
        self.scheme.validate(self.data_length)?;
        if self.replications == 0 || self.replications > MAX_REPLICATIONS {
            return Err(BootstrapError::InvalidReplications(self.replications));
        }
        Ok(())
    }
}

/// Builder for [`BootstrapConfig`].
///
/// `data_length` is required; the scheme defaults to independent resampling
/// and the replication count to [`DEFAULT_REPLICATIONS`].
#[derive(Clone, Debug, Default)]
pub struct BootstrapConfigBuilder {
    scheme: BootstrapScheme,
    data_length: Option<usize>,
    replications: Option<usize>,
    seed: Option<u64>,
}

impl BootstrapConfigBuilder {
    /// Sets the resampling scheme.
    #[inline]
    pub fn scheme(mut self, scheme: BootstrapScheme) -> Self {
        self.scheme = scheme;
        self
    }

    /// Sets the data length `n`.
    #[inline]
    pub fn data_length(mut self, data_length: usize) -> Self {
        self.data_length = Some(data_length);
        self
    }

    /// Sets the number of replications.
    #[inline]
    pub fn replications(mut self, replications: usize) -> Self {
        self.replications = Some(replications);
        self
    }

    /// Sets the seed for reproducibility.
    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns `BootstrapError` if `data_length` is not set or any field is
    /// out of range.
    pub fn build(self) -> BootstrapResult<BootstrapConfig> {
        let data_length = self.data_length.ok_or(BootstrapError::InvalidParameter {
            name: "data_length",
            reason: "must be specified".to_string(),
        })?;

        let config = BootstrapConfig {
            scheme: self.scheme,
            data_length,
            replications: self.replications.unwrap_or(DEFAULT_REPLICATIONS),
            seed: self.seed,
        };

        config.validate()?;
        Ok(config)
    }
}
