//! Exponentially weighted moving average (RiskMetrics) variance.
//!
//! ```text
//! σ²_t = (1 - λ) r²_{t-1} + λ σ²_{t-1}
//! ```
//! Both pre-sample terms are the backcast, so `σ²_0 = backcast` for any `λ`.

use arch_core::types::Bounds;

use super::{History, VarianceRecursion};

/// RiskMetrics smoothing parameter.
pub const RISKMETRICS_LAMBDA: f64 = 0.94;

/// EWMA recursion with a single smoothing parameter `λ`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EwmaRecursion;

impl VarianceRecursion for EwmaRecursion {
    fn name(&self) -> &'static str {
        "EWMA/RiskMetrics"
    }

    fn num_params(&self) -> usize {
        1
    }

    fn max_lag(&self) -> usize {
        1
    }

    fn step(&self, params: &[f64], history: &History<'_>, bounds: &Bounds) -> f64 {
        let lam = params[0];
        let value = (1.0 - lam) * history.squared_resid_or_backcast(1)
            + lam * history.variance_or_backcast(1);
        bounds.clamp(value)
    }
}
