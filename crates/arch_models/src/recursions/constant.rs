//! Constant conditional variance.

use arch_core::types::Bounds;

use super::{History, VarianceRecursion};

/// `σ²_t = σ²` for every `t`; the history is ignored.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ConstantVariance;

impl VarianceRecursion for ConstantVariance {
    fn name(&self) -> &'static str {
        "Constant Variance"
    }

    fn num_params(&self) -> usize {
        1
    }

    fn max_lag(&self) -> usize {
        0
    }

    fn step(&self, params: &[f64], _history: &History<'_>, bounds: &Bounds) -> f64 {
        bounds.clamp(params[0])
    }
}
