//! Heterogeneous ARCH (HARCH) recursion.
//!
//! Each parameter loads on the average squared residual over its own lag
//! window:
//! ```text
//! σ²_t = ω + Σ_i (α_i / l_i) · Σ_{j=1..l_i} r²_{t-j}
//! ```
//! A window with `l_i = 1` is an ARCH(1) term; windows of 5 and 22 give the
//! weekly and monthly components of the usual daily specification. Squared
//! residuals before the sample are replaced by the backcast.

use arch_core::types::Bounds;

use super::{History, VarianceRecursion};

/// HARCH recursion over a set of lag windows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HarchRecursion {
    lags: Vec<usize>,
}

impl HarchRecursion {
    /// Creates the recursion. Every lag must be at least 1.
    pub fn new(lags: Vec<usize>) -> Self {
        Self { lags }
    }

    /// Lag window lengths.
    pub fn lags(&self) -> &[usize] {
        &self.lags
    }
}

impl VarianceRecursion for HarchRecursion {
    fn name(&self) -> &'static str {
        "HARCH"
    }

    fn num_params(&self) -> usize {
        1 + self.lags.len()
    }

    fn max_lag(&self) -> usize {
        self.lags.iter().copied().max().unwrap_or(0)
    }

    fn step(&self, params: &[f64], history: &History<'_>, bounds: &Bounds) -> f64 {
        debug_assert_eq!(params.len(), self.num_params());
        let mut value = params[0];
        for (alpha, &window) in params[1..].iter().zip(&self.lags) {
            let weight = alpha / window as f64;
            // Lags past the start of the sample all read the backcast.
            let observed = window.min(history.time());
            let observed_sum: f64 = (1..=observed)
                .map(|lag| history.squared_resid_or_backcast(lag))
                .sum();
            let presample = (window - observed) as f64 * history.backcast();
            value += weight * (observed_sum + presample);
        }
        bounds.clamp(value)
    }
}
