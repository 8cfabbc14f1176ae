//! EGARCH recursion on the log-variance scale.
//!
//! ```text
//! ln σ²_t = ω + Σ_{i=1..p} α_i (|z_{t-i}| - √(2/π))
//!             + Σ_{i=1..o} γ_i z_{t-i}
//!             + Σ_{j=1..q} β_j ln σ²_{t-j}
//! z_t     = r_t / σ_t
//! ```
//!
//! Before the sample the shock terms take their expected value (zero) and the
//! log-variance lags take `ln backcast`. The log-variance is capped below
//! `ln f64::MAX` before exponentiation; the result is then clamped on the
//! natural scale and later steps read `ln` of the clamped value.

use arch_core::types::Bounds;

use super::{History, VarianceRecursion};

/// `E|z|` for a standard normal `z`: `√(2/π)`.
pub const NORM_CONST: f64 = 0.797_884_560_802_865_4;

/// Largest log-variance passed to `exp`, `ln(f64::MAX) - 0.1`.
pub const LN_SIGMA2_MAX: f64 = 709.682_712_893_384;

/// EGARCH(p, o, q) recursion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EgarchRecursion {
    p: usize,
    o: usize,
    q: usize,
}

impl EgarchRecursion {
    /// Creates the recursion.
    pub fn new(p: usize, o: usize, q: usize) -> Self {
        Self { p, o, q }
    }
}

impl VarianceRecursion for EgarchRecursion {
    fn name(&self) -> &'static str {
        "EGARCH"
    }

    fn num_params(&self) -> usize {
        1 + self.p + self.o + self.q
    }

    fn max_lag(&self) -> usize {
        self.p.max(self.o).max(self.q)
    }

    fn step(&self, params: &[f64], history: &History<'_>, bounds: &Bounds) -> f64 {
        debug_assert_eq!(params.len(), self.num_params());
        let ln_backcast = history.backcast().max(f64::MIN_POSITIVE).ln();

        let mut ln_sigma2 = params[0];
        let mut loc = 1;
        for lag in 1..=self.p {
            if let Some(z) = history.standardized_resid(lag) {
                ln_sigma2 += params[loc] * (z.abs() - NORM_CONST);
            }
            loc += 1;
        }
        for lag in 1..=self.o {
            if let Some(z) = history.standardized_resid(lag) {
                ln_sigma2 += params[loc] * z;
            }
            loc += 1;
        }
        for lag in 1..=self.q {
            let term = history
                .variance(lag)
                .map_or(ln_backcast, |v| v.max(f64::MIN_POSITIVE).ln());
            ln_sigma2 += params[loc] * term;
            loc += 1;
        }

        // f64::min discards NaN, so a NaN log-variance also lands on the cap.
        bounds.clamp(ln_sigma2.min(LN_SIGMA2_MAX).exp())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn run(params: &[f64], resids: &[f64], backcast: f64, bounds: Bounds) -> Vec<f64> {
        let model = EgarchRecursion::new(1, 1, 1);
        let mut out = Vec::with_capacity(resids.len());
        for t in 0..resids.len() {
            let value = model.step(params, &History::new(&resids[..t], &out, backcast), &bounds);
            out.push(value);
        }
        out
    }

    #[test]
    fn test_norm_constants() {
        assert_relative_eq!(NORM_CONST, (2.0 / std::f64::consts::PI).sqrt(), epsilon = 1e-15);
        assert_relative_eq!(LN_SIGMA2_MAX, f64::MAX.ln() - 0.1, epsilon = 1e-9);
    }

    #[test]
    fn test_egarch_chain() {
        let params = [0.0, 0.1, -0.05, 0.95];
        let resids = [-1.0, 0.5];
        let sigma2 = run(&params, &resids, 2.0, Bounds::default());

        let ln0 = 0.0 + 0.95 * 2.0_f64.ln();
        let s0 = ln0.exp();
        let z0 = -1.0 / s0.sqrt();
        let ln1 = 0.1 * (z0.abs() - NORM_CONST) - 0.05 * z0 + 0.95 * s0.ln();
        assert_relative_eq!(sigma2[0], s0, epsilon = 1e-14);
        assert_relative_eq!(sigma2[1], ln1.exp(), epsilon = 1e-12);
    }

    #[test]
    fn test_overflow_capped_then_clamped() {
        let params = [1e6, 0.0, 0.0, 0.0];
        let sigma2 = run(&params, &[1.0, 1.0], 1.0, Bounds::default());
        assert_eq!(sigma2, vec![1e8, 1e8]);

        let infinite_upper = Bounds::new(1e-8, f64::INFINITY).unwrap();
        let sigma2 = run(&params, &[1.0], 1.0, infinite_upper);
        assert!(sigma2[0].is_finite());
    }

    #[test]
    fn test_underflow_clamped_to_lower() {
        let params = [-1e6, 0.0, 0.0, 0.0];
        let sigma2 = run(&params, &[1.0, -1.0], 1.0, Bounds::default());
        assert_eq!(sigma2, vec![1e-8, 1e-8]);
    }

    #[test]
    fn test_nan_parameters_stay_bounded() {
        let params = [f64::NAN, 0.1, 0.1, 0.5];
        let sigma2 = run(&params, &[1.0, -1.0, 0.5], 1.0, Bounds::default());
        assert!(sigma2.iter().all(|v| Bounds::default().contains(*v)));
    }
}
