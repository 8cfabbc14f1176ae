//! GARCH family recursion (ARCH, GARCH, GJR-GARCH, TARCH, power GARCH).
//!
//! The recursion runs on the `δ`-th power of the conditional volatility:
//! ```text
//! σ^δ_t = ω + Σ_{i=1..p} α_i |r_{t-i}|^δ
//!           + Σ_{i=1..o} γ_i |r_{t-i}|^δ 1[r_{t-i} < 0]
//!           + Σ_{j=1..q} β_j σ^δ_{t-j}
//! σ²_t  = (σ^δ_t)^(2/δ)
//! ```
//! With `δ = 2` this is the usual variance recursion. Clamping is applied to
//! `σ²_t`, and the clamped value is what later steps read back.

use arch_core::types::Bounds;

use super::{History, VarianceRecursion};

/// GARCH(p, o, q) recursion with power exponent `δ`.
#[derive(Clone, Debug, PartialEq)]
pub struct GarchRecursion {
    name: &'static str,
    p: usize,
    o: usize,
    q: usize,
    power: f64,
}

impl GarchRecursion {
    /// Creates the recursion. `power` must be positive and finite.
    pub fn new(name: &'static str, p: usize, o: usize, q: usize, power: f64) -> Self {
        Self {
            name,
            p,
            o,
            q,
            power,
        }
    }

    /// Power exponent `δ`.
    pub fn power(&self) -> f64 {
        self.power
    }

    #[inline]
    fn is_squared(&self) -> bool {
        self.power == 2.0
    }

    /// `|r|^δ`
    #[inline]
    fn magnitude(&self, r: f64) -> f64 {
        if self.is_squared() {
            r * r
        } else {
            r.abs().powf(self.power)
        }
    }

    /// Natural-scale variance to the `δ` scale.
    #[inline]
    fn to_power_scale(&self, variance: f64) -> f64 {
        if self.is_squared() {
            variance
        } else {
            variance.powf(self.power / 2.0)
        }
    }

    /// `δ` scale back to natural-scale variance. Non-positive values map to 0
    /// and are lifted by the lower bound.
    #[inline]
    fn to_natural_scale(&self, value: f64) -> f64 {
        if self.is_squared() {
            value
        } else if value > 0.0 {
            value.powf(2.0 / self.power)
        } else if value.is_nan() {
            value
        } else {
            0.0
        }
    }
}

impl VarianceRecursion for GarchRecursion {
    fn name(&self) -> &'static str {
        self.name
    }

    fn num_params(&self) -> usize {
        1 + self.p + self.o + self.q
    }

    fn max_lag(&self) -> usize {
        self.p.max(self.o).max(self.q)
    }

    fn step(&self, params: &[f64], history: &History<'_>, bounds: &Bounds) -> f64 {
        debug_assert_eq!(params.len(), self.num_params());
        let backcast = self.to_power_scale(history.backcast());

        let mut value = params[0];
        let mut loc = 1;
        for lag in 1..=self.p {
            let term = history
                .resid(lag)
                .map_or(backcast, |r| self.magnitude(r));
            value += params[loc] * term;
            loc += 1;
        }
        for lag in 1..=self.o {
            let term = history.resid(lag).map_or(0.5 * backcast, |r| {
                if r < 0.0 {
                    self.magnitude(r)
                } else {
                    0.0
                }
            });
            value += params[loc] * term;
            loc += 1;
        }
        for lag in 1..=self.q {
            let term = history
                .variance(lag)
                .map_or(backcast, |v| self.to_power_scale(v));
            value += params[loc] * term;
            loc += 1;
        }

        bounds.clamp(self.to_natural_scale(value))
    }
}
