//! Static dispatch enum for variance recursions.
//!
//! This module provides `VarianceModelEnum`, the bound form of a
//! [`ModelSpec`]: the variant dispatch maps a specification to exactly one
//! recursion, and the enum drives that recursion over a residual series.
//!
//! ## Design Philosophy
//!
//! - **Static dispatch**: All recursion dispatch via `match` expressions
//! - **Zero-cost abstraction**: No vtable overhead in the per-step loop
//! - **One step, three drivers**: full path, in-place path and one-step
//!   forecast all call the same `step`
//!
//! ## Example
//!
//! ```
//! use arch_core::types::Bounds;
//! use arch_models::models::VarianceModelEnum;
//! use arch_models::spec::ModelSpec;
//!
//! let model = VarianceModelEnum::from_spec(&ModelSpec::garch(1, 1)).unwrap();
//! assert_eq!(model.name(), "GARCH");
//! assert_eq!(model.num_params(), 3);
//!
//! let resids = [0.0, 1.0, -1.0, 2.0];
//! let params = [0.01, 0.08, 0.90];
//! let sigma2 = model
//!     .compute_variance(&params, &resids, 1.0, Bounds::new(1e-8, 1e8).unwrap())
//!     .unwrap();
//! assert!((sigma2[0] - 0.99).abs() < 1e-12);
//! assert!((sigma2[1] - 0.901).abs() < 1e-12);
//! ```

use arch_core::types::{Bounds, KernelError, KernelResult};

use crate::layout::ParameterLayout;
use crate::recursions::{
    ConstantVariance, EgarchRecursion, EwmaRecursion, GarchRecursion, HarchRecursion, History,
    VarianceRecursion,
};
use crate::spec::{ModelSpec, DEFAULT_POWER};

/// Static dispatch enum over all variance recursions.
///
/// # Supported Models
///
/// - `Constant`: constant variance
/// - `Garch`: ARCH, GARCH, GJR-GARCH, TARCH/ZARCH and power GARCH
/// - `Egarch`: exponential GARCH
/// - `Harch`: heterogeneous ARCH
/// - `Ewma`: RiskMetrics exponential smoothing
#[derive(Clone, Debug, PartialEq)]
pub enum VarianceModelEnum {
    /// Constant variance
    Constant(ConstantVariance),
    /// GARCH family on the power scale
    Garch(GarchRecursion),
    /// Log-variance recursion
    Egarch(EgarchRecursion),
    /// Lag-window recursion
    Harch(HarchRecursion),
    /// Exponential smoothing
    Ewma(EwmaRecursion),
}

/// Binds a specification to its parameter layout and recursion.
///
/// # Errors
///
/// Returns an `UnknownVariant`-kind error if the specification fails
/// [`ModelSpec::validate`].
pub fn dispatch(spec: &ModelSpec) -> KernelResult<(ParameterLayout, VarianceModelEnum)> {
    let model = VarianceModelEnum::from_spec(spec)?;
    Ok((spec.layout(), model))
}

impl VarianceModelEnum {
    /// Selects the recursion for a specification.
    pub fn from_spec(spec: &ModelSpec) -> KernelResult<Self> {
        spec.validate()?;
        let model = match spec {
            ModelSpec::Constant => VarianceModelEnum::Constant(ConstantVariance),
            ModelSpec::Arch { p } => VarianceModelEnum::Garch(GarchRecursion::new(
                spec.name(),
                *p,
                0,
                0,
                DEFAULT_POWER,
            )),
            ModelSpec::Garch { p, o, q, power } => {
                VarianceModelEnum::Garch(GarchRecursion::new(spec.name(), *p, *o, *q, *power))
            }
            ModelSpec::Egarch { p, o, q } => {
                VarianceModelEnum::Egarch(EgarchRecursion::new(*p, *o, *q))
            }
            ModelSpec::Harch { lags } => VarianceModelEnum::Harch(HarchRecursion::new(lags.clone())),
            ModelSpec::Ewma => VarianceModelEnum::Ewma(EwmaRecursion),
        };
        Ok(model)
    }

    /// Get the model name.
    pub fn name(&self) -> &'static str {
        match self {
            VarianceModelEnum::Constant(m) => m.name(),
            VarianceModelEnum::Garch(m) => m.name(),
            VarianceModelEnum::Egarch(m) => m.name(),
            VarianceModelEnum::Harch(m) => m.name(),
            VarianceModelEnum::Ewma(m) => m.name(),
        }
    }

    /// Number of parameters required.
    pub fn num_params(&self) -> usize {
        match self {
            VarianceModelEnum::Constant(m) => m.num_params(),
            VarianceModelEnum::Garch(m) => m.num_params(),
            VarianceModelEnum::Egarch(m) => m.num_params(),
            VarianceModelEnum::Harch(m) => m.num_params(),
            VarianceModelEnum::Ewma(m) => m.num_params(),
        }
    }

    /// Largest lag read by the recursion.
    pub fn max_lag(&self) -> usize {
        match self {
            VarianceModelEnum::Constant(m) => m.max_lag(),
            VarianceModelEnum::Garch(m) => m.max_lag(),
            VarianceModelEnum::Egarch(m) => m.max_lag(),
            VarianceModelEnum::Harch(m) => m.max_lag(),
            VarianceModelEnum::Ewma(m) => m.max_lag(),
        }
    }

    /// One clamped step at `history.time()`.
    #[inline]
    pub fn step(&self, params: &[f64], history: &History<'_>, bounds: &Bounds) -> f64 {
        match self {
            VarianceModelEnum::Constant(m) => m.step(params, history, bounds),
            VarianceModelEnum::Garch(m) => m.step(params, history, bounds),
            VarianceModelEnum::Egarch(m) => m.step(params, history, bounds),
            VarianceModelEnum::Harch(m) => m.step(params, history, bounds),
            VarianceModelEnum::Ewma(m) => m.step(params, history, bounds),
        }
    }

    /// Computes the conditional variance path into a new vector.
    ///
    /// # Errors
    ///
    /// - `ParameterCount` if `params` does not match the layout
    /// - `EmptyResiduals` if `resids` is empty
    pub fn compute_variance(
        &self,
        params: &[f64],
        resids: &[f64],
        backcast: f64,
        bounds: Bounds,
    ) -> KernelResult<Vec<f64>> {
        let mut sigma2 = vec![0.0; resids.len()];
        self.compute_variance_into(params, resids, backcast, bounds, &mut sigma2)?;
        Ok(sigma2)
    }

    /// Computes the conditional variance path into a caller buffer.
    ///
    /// On error the buffer is left untouched.
    ///
    /// # Errors
    ///
    /// As [`compute_variance`](Self::compute_variance), plus `LengthMismatch`
    /// if `out.len() != resids.len()`.
    pub fn compute_variance_into(
        &self,
        params: &[f64],
        resids: &[f64],
        backcast: f64,
        bounds: Bounds,
        out: &mut [f64],
    ) -> KernelResult<()> {
        self.check_inputs(params, resids)?;
        if out.len() != resids.len() {
            return Err(KernelError::LengthMismatch {
                name: "variance buffer",
                expected: resids.len(),
                got: out.len(),
            });
        }

        for t in 0..resids.len() {
            let history = History::new(&resids[..t], &out[..t], backcast);
            let value = self.step(params, &history, &bounds);
            out[t] = value;
        }
        Ok(())
    }

    /// Variance one step beyond the sample, `σ²_T`.
    ///
    /// `variance` is the in-sample path previously computed with the same
    /// parameters, backcast and bounds.
    ///
    /// # Errors
    ///
    /// - `ParameterCount` if `params` does not match the layout
    /// - `EmptyResiduals` if `resids` is empty
    /// - `LengthMismatch` if `variance.len() != resids.len()`
    pub fn forecast_step(
        &self,
        params: &[f64],
        resids: &[f64],
        variance: &[f64],
        backcast: f64,
        bounds: Bounds,
    ) -> KernelResult<f64> {
        self.check_inputs(params, resids)?;
        if variance.len() != resids.len() {
            return Err(KernelError::LengthMismatch {
                name: "variance",
                expected: resids.len(),
                got: variance.len(),
            });
        }
        let history = History::new(resids, variance, backcast);
        Ok(self.step(params, &history, &bounds))
    }

    fn check_inputs(&self, params: &[f64], resids: &[f64]) -> KernelResult<()> {
        if params.len() != self.num_params() {
            return Err(KernelError::parameter_count(
                self.name(),
                self.num_params(),
                params.len(),
            ));
        }
        if resids.is_empty() {
            return Err(KernelError::EmptyResiduals);
        }
        Ok(())
    }
}
