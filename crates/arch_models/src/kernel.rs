//! Specification-level entry points.
//!
//! These functions bind a [`ModelSpec`] and run one driver. Callers that
//! evaluate the same model many times (an optimiser, for instance) should
//! bind once with [`VarianceModelEnum::from_spec`] and reuse the enum.

use arch_core::types::{Bounds, KernelResult};

use crate::models::VarianceModelEnum;
use crate::spec::ModelSpec;

/// Conditional variance path `σ²_0..σ²_{n-1}` for `resids`.
///
/// # Errors
///
/// - `UnknownVariant` kind if the specification is invalid
/// - `InputMismatch` kind for a wrong parameter count or empty residuals
///
/// # Examples
///
/// ```
/// use arch_core::types::Bounds;
/// use arch_models::{compute_variance, ModelSpec};
///
/// let sigma2 = compute_variance(
///     &ModelSpec::Arch { p: 1 },
///     &[0.25, 0.5],
///     &[1.0, -2.0, 0.5],
///     1.0,
///     Bounds::default(),
/// )
/// .unwrap();
/// assert_eq!(sigma2, vec![0.75, 0.75, 2.25]);
/// ```
pub fn compute_variance(
    spec: &ModelSpec,
    params: &[f64],
    resids: &[f64],
    backcast: f64,
    bounds: Bounds,
) -> KernelResult<Vec<f64>> {
    VarianceModelEnum::from_spec(spec)?.compute_variance(params, resids, backcast, bounds)
}

/// As [`compute_variance`], writing into `out`.
pub fn compute_variance_into(
    spec: &ModelSpec,
    params: &[f64],
    resids: &[f64],
    backcast: f64,
    bounds: Bounds,
    out: &mut [f64],
) -> KernelResult<()> {
    VarianceModelEnum::from_spec(spec)?.compute_variance_into(params, resids, backcast, bounds, out)
}

/// One-step-ahead variance `σ²_T` given the in-sample path.
pub fn forecast_step(
    spec: &ModelSpec,
    params: &[f64],
    resids: &[f64],
    variance: &[f64],
    backcast: f64,
    bounds: Bounds,
) -> KernelResult<f64> {
    VarianceModelEnum::from_spec(spec)?.forecast_step(params, resids, variance, backcast, bounds)
}
