//! CLI configuration management
//!
//! Loads the `[model]`, `[bounds]` and `[bootstrap]` sections from a TOML
//! file and applies environment overrides.
//!
//! ```toml
//! [model]
//! variant = "gjr-garch"
//! p = 1
//! o = 1
//! q = 1
//! params = [0.02, 0.05, 0.10, 0.85]
//!
//! [bootstrap]
//! scheme = "stationary"
//! mean_block_length = 10.0
//! replications = 999
//! seed = 42
//! ```

use std::path::Path;
use std::str::FromStr;

use arch_bootstrap::{BootstrapConfig, BootstrapError, BootstrapScheme};
use arch_core::types::{Bounds, KernelResult};
use arch_models::{ModelSpec, RawOrders};
use serde::Deserialize;
use thiserror::Error;

/// Environment variable overriding `bootstrap.seed`.
pub const SEED_ENV: &str = "ARCHK_SEED";

/// Environment variable setting the log filter when `RUST_LOG` is unset.
pub const LOG_ENV: &str = "ARCHK_LOG";

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File could not be read or parsed.
    #[error("Configuration file error: {0}")]
    FileError(String),

    /// Environment variable could not be parsed.
    #[error("Environment variable error: {0}")]
    EnvError(String),

    /// Unrecognised bootstrap scheme name.
    #[error("Invalid bootstrap scheme: {0}. Must be one of: independent, moving-block, circular-block, stationary")]
    InvalidScheme(String),

    /// Scheme requires a field that is absent.
    #[error("Missing bootstrap parameter '{field}' for scheme {scheme}")]
    MissingParameter {
        /// Scheme name
        scheme: &'static str,
        /// Field name
        field: &'static str,
    },
}

/// Scheme names accepted in the `[bootstrap]` section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SchemeName {
    /// `independent`, `iid`
    #[default]
    Independent,
    /// `moving-block`, `mbb`
    MovingBlock,
    /// `circular-block`, `cbb`
    CircularBlock,
    /// `stationary`
    Stationary,
}

impl FromStr for SchemeName {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "independent" | "iid" => Ok(SchemeName::Independent),
            "moving-block" | "mbb" => Ok(SchemeName::MovingBlock),
            "circular-block" | "cbb" => Ok(SchemeName::CircularBlock),
            "stationary" => Ok(SchemeName::Stationary),
            _ => Err(ConfigError::InvalidScheme(s.to_string())),
        }
    }
}

fn deserialize_scheme<'de, D>(deserializer: D) -> Result<SchemeName, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    SchemeName::from_str(&s).map_err(serde::de::Error::custom)
}

/// `[model]` section.
///
/// Orders and lags are signed so that negative values reach model dispatch
/// and are reported as `UnknownVariant`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ModelSection {
    /// Variant tag, e.g. `garch`, `gjr-garch`, `egarch`
    pub variant: String,
    /// Lagged residual terms
    pub p: i64,
    /// Asymmetric terms
    pub o: i64,
    /// Lagged variance terms
    pub q: i64,
    /// Power exponent for the GARCH family
    pub power: Option<f64>,
    /// HARCH lag windows
    pub lags: Vec<i64>,
    /// Parameter vector in layout order
    pub params: Vec<f64>,
    /// Fixed backcast; computed from the residuals when absent
    pub backcast: Option<f64>,
}

impl Default for ModelSection {
    fn default() -> Self {
        Self {
            variant: "garch".to_string(),
            p: 1,
            o: 0,
            q: 1,
            power: None,
            lags: Vec::new(),
            params: Vec::new(),
            backcast: None,
        }
    }
}

impl ModelSection {
    /// Builds the model specification.
    pub fn spec(&self) -> KernelResult<ModelSpec> {
        let mut orders = RawOrders::new(self.p, self.o, self.q).with_lags(self.lags.clone());
        if let Some(power) = self.power {
            orders = orders.with_power(power);
        }
        ModelSpec::from_tag(&self.variant, &orders)
    }
}

/// `[bounds]` section; both fields must be present to override the
/// residual-derived bounds.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct BoundsSection {
    /// Lower variance bound
    pub lower: f64,
    /// Upper variance bound
    pub upper: f64,
}

impl BoundsSection {
    /// Validated bounds.
    pub fn bounds(&self) -> KernelResult<Bounds> {
        Bounds::new(self.lower, self.upper)
    }
}

/// `[bootstrap]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BootstrapSection {
    /// Resampling scheme
    #[serde(deserialize_with = "deserialize_scheme")]
    pub scheme: SchemeName,
    /// Fixed block length for the block schemes
    pub block_length: Option<i64>,
    /// Stationary block probability
    pub probability: Option<f64>,
    /// Stationary expected block length, used when `probability` is absent
    pub mean_block_length: Option<f64>,
    /// Number of replications
    pub replications: usize,
    /// Base seed
    pub seed: Option<u64>,
}

impl Default for BootstrapSection {
    fn default() -> Self {
        Self {
            scheme: SchemeName::Independent,
            block_length: None,
            probability: None,
            mean_block_length: None,
            replications: arch_bootstrap::config::DEFAULT_REPLICATIONS,
            seed: None,
        }
    }
}

impl BootstrapSection {
    /// Resolves the scheme with its parameters.
    pub fn scheme(&self) -> crate::Result<BootstrapScheme> {
        let scheme = match self.scheme {
            SchemeName::Independent => BootstrapScheme::Independent,
            SchemeName::MovingBlock => BootstrapScheme::MovingBlock {
                block_length: self.block_length("moving-block")?,
            },
            SchemeName::CircularBlock => BootstrapScheme::CircularBlock {
                block_length: self.block_length("circular-block")?,
            },
            SchemeName::Stationary => match (self.probability, self.mean_block_length) {
                (Some(p), _) => BootstrapScheme::stationary(p)?,
                (None, Some(b)) => BootstrapScheme::stationary_with_mean_block(b)?,
                (None, None) => {
                    return Err(ConfigError::MissingParameter {
                        scheme: "stationary",
                        field: "probability",
                    }
                    .into())
                }
            },
        };
        Ok(scheme)
    }

    fn block_length(&self, scheme: &'static str) -> crate::Result<usize> {
        let raw = self.block_length.ok_or(ConfigError::MissingParameter {
            scheme,
            field: "block_length",
        })?;
        // Zero and negative lengths are both reported as a zero block.
        Ok(usize::try_from(raw).map_err(|_| BootstrapError::InvalidBlockLength(0))?)
    }

    /// Builds a validated configuration for a series of length `n`.
    pub fn config(&self, data_length: usize) -> crate::Result<BootstrapConfig> {
        let mut builder = BootstrapConfig::builder()
            .scheme(self.scheme()?)
            .data_length(data_length)
            .replications(self.replications);
        if let Some(seed) = self.seed {
            builder = builder.seed(seed);
        }
        Ok(builder.build()?)
    }
}

/// Complete CLI configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ArchkConfig {
    /// Model section
    pub model: ModelSection,
    /// Optional explicit bounds
    pub bounds: Option<BoundsSection>,
    /// Bootstrap section
    pub bootstrap: BootstrapSection,
}

impl FromStr for ArchkConfig {
    type Err = ConfigError;

    fn from_str(content: &str) -> Result<Self, Self::Err> {
        toml::from_str(content)
            .map_err(|e| ConfigError::FileError(format!("Failed to parse TOML: {}", e)))
    }
}

impl ArchkConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileError(format!("Failed to read config file: {}", e)))?;
        content.parse()
    }

    /// Loads `path` if it exists, otherwise the defaults, then applies
    /// environment overrides.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let mut config = if path.exists() {
            Self::from_file(path)?
        } else {
            Self::default()
        };
        config.apply_env()?;
        Ok(config)
    }

    /// Applies `ARCHK_SEED`.
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        if let Ok(seed) = std::env::var(SEED_ENV) {
            self.apply_seed_override(&seed)?;
        }
        Ok(())
    }

    fn apply_seed_override(&mut self, value: &str) -> Result<(), ConfigError> {
        let seed = value
            .trim()
            .parse()
            .map_err(|_| ConfigError::EnvError(format!("{}={} is not a u64", SEED_ENV, value)))?;
        self.bootstrap.seed = Some(seed);
        Ok(())
    }
}
