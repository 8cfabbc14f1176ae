//! Model specifications for conditional variance processes.
//!
//! A [`ModelSpec`] fixes the variant family, its orders and (for the power
//! family) the exponent. It is immutable once built and determines both the
//! parameter layout and the recursion formula.
//!
//! ## Order convention
//!
//! - `p`: lagged (transformed) residual terms
//! - `o`: asymmetric terms, active when the lagged residual is negative
//! - `q`: lagged variance terms
//!
//! ## Example
//!
//! ```
//! use arch_models::spec::{ModelSpec, RawOrders};
//!
//! let gjr = ModelSpec::from_tag("gjr-garch", &RawOrders::new(1, 1, 1)).unwrap();
//! assert_eq!(gjr, ModelSpec::gjr(1, 1, 1));
//! assert_eq!(gjr.num_params(), 4);
//!
//! assert!(ModelSpec::from_tag("garch", &RawOrders::new(-1, 0, 1)).is_err());
//! ```

use std::str::FromStr;

use arch_core::types::{KernelError, KernelResult};

use crate::layout::ParameterLayout;

/// Default power exponent (squared residuals).
pub const DEFAULT_POWER: f64 = 2.0;

#[cfg(feature = "serde")]
fn default_power() -> f64 {
    DEFAULT_POWER
}

/// Model family tags accepted by [`ModelSpec::from_tag`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum VariantTag {
    /// Constant variance
    Constant,
    /// ARCH(p)
    Arch,
    /// GARCH(p, o, q) with optional power
    Garch,
    /// GJR-GARCH(p, o, q), power fixed at 2
    GjrGarch,
    /// TARCH/ZARCH(p, o, q), power fixed at 1
    Tarch,
    /// EGARCH(p, o, q) on the log-variance scale
    Egarch,
    /// Heterogeneous ARCH over lag windows
    Harch,
    /// Exponentially weighted moving average (RiskMetrics)
    Ewma,
}

impl VariantTag {
    /// Canonical tag string.
    pub fn as_str(&self) -> &'static str {
        match self {
            VariantTag::Constant => "constant",
            VariantTag::Arch => "arch",
            VariantTag::Garch => "garch",
            VariantTag::GjrGarch => "gjr-garch",
            VariantTag::Tarch => "tarch",
            VariantTag::Egarch => "egarch",
            VariantTag::Harch => "harch",
            VariantTag::Ewma => "ewma",
        }
    }
}

impl FromStr for VariantTag {
    type Err = KernelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalised = s.trim().to_lowercase().replace('_', "-");
        match normalised.as_str() {
            "constant" | "constant-variance" => Ok(VariantTag::Constant),
            "arch" => Ok(VariantTag::Arch),
            "garch" | "power-garch" => Ok(VariantTag::Garch),
            "gjr-garch" | "gjr" => Ok(VariantTag::GjrGarch),
            "tarch" | "zarch" => Ok(VariantTag::Tarch),
            "egarch" => Ok(VariantTag::Egarch),
            "harch" => Ok(VariantTag::Harch),
            "ewma" | "riskmetrics" => Ok(VariantTag::Ewma),
            _ => Err(KernelError::UnknownVariant(s.to_string())),
        }
    }
}

impl std::fmt::Display for VariantTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Untrusted orders as they arrive from configuration files or bindings.
///
/// Orders are signed so that negative values reach dispatch and are
/// rejected there rather than wrapping or failing in a parser.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RawOrders {
    /// Residual order
    pub p: i64,
    /// Asymmetric order
    pub o: i64,
    /// Variance order
    pub q: i64,
    /// Power exponent; `None` selects the variant default
    pub power: Option<f64>,
    /// HARCH lag windows
    pub lags: Vec<i64>,
}

impl RawOrders {
    /// Orders `(p, o, q)` with default power and no lags.
    pub fn new(p: i64, o: i64, q: i64) -> Self {
        Self {
            p,
            o,
            q,
            power: None,
            lags: Vec::new(),
        }
    }

    /// Sets the power exponent.
    pub fn with_power(mut self, power: f64) -> Self {
        self.power = Some(power);
        self
    }

    /// Sets the HARCH lag windows.
    pub fn with_lags(mut self, lags: Vec<i64>) -> Self {
        self.lags = lags;
        self
    }
}

/// Conditional variance model specification.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "variant", rename_all = "snake_case")
)]
pub enum ModelSpec {
    /// `σ²_t = σ²`
    Constant,
    /// `σ²_t = ω + Σ α_i r²_{t-i}`
    Arch {
        /// Residual order
        p: usize,
    },
    /// `σ^δ_t = ω + Σ α_i |r_{t-i}|^δ + Σ γ_i |r_{t-i}|^δ 1[r_{t-i}<0] + Σ β_j σ^δ_{t-j}`
    Garch {
        /// Residual order
        p: usize,
        /// Asymmetric order
        o: usize,
        /// Variance order
        q: usize,
        /// Power exponent δ
        #[cfg_attr(feature = "serde", serde(default = "default_power"))]
        power: f64,
    },
    /// `ln σ²_t = ω + Σ α_i (|z_{t-i}| - √(2/π)) + Σ γ_i z_{t-i} + Σ β_j ln σ²_{t-j}`
    Egarch {
        /// Magnitude order
        p: usize,
        /// Sign order
        o: usize,
        /// Log-variance order
        q: usize,
    },
    /// `σ²_t = ω + Σ_i α_i · mean(r²_{t-1}, …, r²_{t-lag_i})`
    Harch {
        /// Lag window lengths
        lags: Vec<usize>,
    },
    /// `σ²_t = (1-λ) r²_{t-1} + λ σ²_{t-1}`
    Ewma,
}

impl ModelSpec {
    /// Symmetric GARCH(p, q).
    pub fn garch(p: usize, q: usize) -> Self {
        ModelSpec::Garch {
            p,
            o: 0,
            q,
            power: DEFAULT_POWER,
        }
    }

    /// GJR-GARCH(p, o, q).
    pub fn gjr(p: usize, o: usize, q: usize) -> Self {
        ModelSpec::Garch {
            p,
            o,
            q,
            power: DEFAULT_POWER,
        }
    }

    /// TARCH/ZARCH(p, o, q): recursion on the conditional standard deviation.
    pub fn tarch(p: usize, o: usize, q: usize) -> Self {
        ModelSpec::Garch {
            p,
            o,
            q,
            power: 1.0,
        }
    }

    /// GARCH(p, o, q) with a general power exponent.
    ///
    /// # Errors
    ///
    /// Returns `KernelError::InvalidPower` unless `power` is positive and finite.
    pub fn power_garch(p: usize, o: usize, q: usize, power: f64) -> KernelResult<Self> {
        validate_power(power)?;
        Ok(ModelSpec::Garch { p, o, q, power })
    }

    /// EGARCH(p, o, q).
    pub fn egarch(p: usize, o: usize, q: usize) -> Self {
        ModelSpec::Egarch { p, o, q }
    }

    /// HARCH with the given lag windows.
    ///
    /// # Errors
    ///
    /// Returns `KernelError::InvalidLags` if `lags` is empty or contains 0.
    pub fn harch(lags: Vec<usize>) -> KernelResult<Self> {
        validate_lags(&lags)?;
        Ok(ModelSpec::Harch { lags })
    }

    /// Maps a tag and untrusted orders to a specification.
    ///
    /// Orders not used by the variant are still checked for sign so that a
    /// malformed configuration is never silently accepted.
    ///
    /// # Errors
    ///
    /// - `UnknownVariant` for an unrecognised tag
    /// - `NegativeOrder` for any negative order or lag
    /// - `InvalidPower` / `InvalidLags` for an unusable exponent or window set
    pub fn from_tag(tag: &str, orders: &RawOrders) -> KernelResult<Self> {
        let tag = VariantTag::from_str(tag)?;
        let p = non_negative("p", orders.p)?;
        let o = non_negative("o", orders.o)?;
        let q = non_negative("q", orders.q)?;
        let lags = orders
            .lags
            .iter()
            .map(|&lag| non_negative("lags", lag))
            .collect::<KernelResult<Vec<_>>>()?;

        let spec = match tag {
            VariantTag::Constant => ModelSpec::Constant,
            VariantTag::Arch => ModelSpec::Arch { p },
            VariantTag::Garch => {
                ModelSpec::power_garch(p, o, q, orders.power.unwrap_or(DEFAULT_POWER))?
            }
            VariantTag::GjrGarch => ModelSpec::gjr(p, o, q),
            VariantTag::Tarch => ModelSpec::tarch(p, o, q),
            VariantTag::Egarch => ModelSpec::egarch(p, o, q),
            VariantTag::Harch => ModelSpec::harch(lags)?,
            VariantTag::Ewma => ModelSpec::Ewma,
        };
        Ok(spec)
    }

    /// Validates invariants that the enum cannot express.
    ///
    /// Specifications built with the struct-variant syntax (or deserialised)
    /// bypass the checking constructors; dispatch calls this first.
    pub fn validate(&self) -> KernelResult<()> {
        match self {
            ModelSpec::Garch { power, .. } => validate_power(*power),
            ModelSpec::Harch { lags } => validate_lags(lags),
            _ => Ok(()),
        }
    }

    /// Family name used in diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            ModelSpec::Constant => "Constant Variance",
            ModelSpec::Arch { .. } => "ARCH",
            ModelSpec::Garch { o, power, .. } => {
                if *power == DEFAULT_POWER {
                    if *o > 0 {
                        "GJR-GARCH"
                    } else {
                        "GARCH"
                    }
                } else if *power == 1.0 {
                    "TARCH/ZARCH"
                } else {
                    "Power GARCH"
                }
            }
            ModelSpec::Egarch { .. } => "EGARCH",
            ModelSpec::Harch { .. } => "HARCH",
            ModelSpec::Ewma => "EWMA/RiskMetrics",
        }
    }

    /// Canonical tag of this specification.
    pub fn tag(&self) -> VariantTag {
        match self {
            ModelSpec::Constant => VariantTag::Constant,
            ModelSpec::Arch { .. } => VariantTag::Arch,
            ModelSpec::Garch { o, power, .. } => {
                if *power == DEFAULT_POWER && *o > 0 {
                    VariantTag::GjrGarch
                } else if *power == 1.0 {
                    VariantTag::Tarch
                } else {
                    VariantTag::Garch
                }
            }
            ModelSpec::Egarch { .. } => VariantTag::Egarch,
            ModelSpec::Harch { .. } => VariantTag::Harch,
            ModelSpec::Ewma => VariantTag::Ewma,
        }
    }

    /// Number of parameters required by this specification.
    pub fn num_params(&self) -> usize {
        match self {
            ModelSpec::Constant | ModelSpec::Ewma => 1,
            ModelSpec::Arch { p } => 1 + p,
            ModelSpec::Garch { p, o, q, .. } | ModelSpec::Egarch { p, o, q } => 1 + p + o + q,
            ModelSpec::Harch { lags } => 1 + lags.len(),
        }
    }

    /// Largest lag the recursion reads.
    pub fn max_lag(&self) -> usize {
        match self {
            ModelSpec::Constant => 0,
            ModelSpec::Arch { p } => *p,
            ModelSpec::Garch { p, o, q, .. } | ModelSpec::Egarch { p, o, q } => {
                *p.max(o).max(q)
            }
            ModelSpec::Harch { lags } => lags.iter().copied().max().unwrap_or(0),
            ModelSpec::Ewma => 1,
        }
    }

    /// Parameter layout (names and positions).
    pub fn layout(&self) -> ParameterLayout {
        ParameterLayout::for_spec(self)
    }
}

fn non_negative(name: &'static str, value: i64) -> KernelResult<usize> {
    usize::try_from(value).map_err(|_| KernelError::NegativeOrder { name, value })
}

fn validate_power(power: f64) -> KernelResult<()> {
    if power.is_finite() && power > 0.0 {
        Ok(())
    } else {
        Err(KernelError::InvalidPower(power))
    }
}

fn validate_lags(lags: &[usize]) -> KernelResult<()> {
    if lags.is_empty() || lags.contains(&0) {
        Err(KernelError::InvalidLags(lags.to_vec()))
    } else {
        Ok(())
    }
}
