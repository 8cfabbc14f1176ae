//! Variance bounds applied to every recursion step.
//!
//! [`Bounds`] keeps the conditional variance inside `[lower, upper]` while an
//! external optimiser explores infeasible parameter regions. Clamping happens
//! on the natural variance scale, immediately after each step, so a clamped
//! value is also what later steps see as history.

use super::error::{KernelError, KernelResult};
use crate::math::moments::{max_square, variance};

/// Divisor applied to the sample variance for the data-driven lower bound.
pub const LOWER_BOUND_DIVISOR: f64 = 1e8;

/// Multiplier applied to `1 + max r²` for the data-driven upper bound.
pub const UPPER_BOUND_MULTIPLIER: f64 = 1e7;

/// Lower/upper clamp for conditional variances.
///
/// # Invariants
/// - `0.0 <= lower <= upper`
/// - `lower` is finite; `upper` may be `f64::INFINITY`
///
/// # Examples
/// ```
/// use arch_core::types::Bounds;
///
/// let bounds = Bounds::new(1e-8, 1e8).unwrap();
/// assert_eq!(bounds.clamp(-3.0), 1e-8);
/// assert_eq!(bounds.clamp(2.5), 2.5);
/// assert_eq!(bounds.clamp(f64::INFINITY), 1e8);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds {
    lower: f64,
    upper: f64,
}

impl Bounds {
    /// Creates validated bounds.
    ///
    /// # Errors
    ///
    /// Returns `KernelError::InvalidBounds` if either bound is NaN, `lower` is
    /// negative or infinite, or `lower > upper`.
    pub fn new(lower: f64, upper: f64) -> KernelResult<Self> {
        let ordered = lower <= upper;
        if lower.is_nan() || upper.is_nan() || !lower.is_finite() || lower < 0.0 || !ordered {
            return Err(KernelError::InvalidBounds { lower, upper });
        }
        Ok(Self { lower, upper })
    }

    /// Derives bounds from a residual series.
    ///
    /// - lower: sample variance / 1e8, floored at `f64::MIN_POSITIVE`
    /// - upper: 1e7 · (1 + max r²)
    ///
    /// # Errors
    ///
    /// Returns `KernelError::EmptyResiduals` for an empty series.
    ///
    /// # Examples
    /// ```
    /// use arch_core::types::Bounds;
    ///
    /// let bounds = Bounds::from_residuals(&[1.0, -1.0, 1.0, -1.0]).unwrap();
    /// assert!((bounds.lower() - 1e-8).abs() < 1e-20);
    /// assert!((bounds.upper() - 2e7).abs() < 1e-6);
    /// ```
    pub fn from_residuals(resids: &[f64]) -> KernelResult<Self> {
        if resids.is_empty() {
            return Err(KernelError::EmptyResiduals);
        }
        let lower = (variance(resids) / LOWER_BOUND_DIVISOR).max(f64::MIN_POSITIVE);
        let upper = UPPER_BOUND_MULTIPLIER * (1.0 + max_square(resids));
        Self::new(lower, upper)
    }

    /// Returns the lower bound.
    #[inline]
    pub fn lower(&self) -> f64 {
        self.lower
    }

    /// Returns the upper bound.
    #[inline]
    pub fn upper(&self) -> f64 {
        self.upper
    }

    /// Clamps a variance into `[lower, upper]`.
    ///
    /// NaN maps to `upper`: a diverged recursion is treated as blow-up.
    #[inline]
    pub fn clamp(&self, value: f64) -> f64 {
        if value.is_nan() {
            self.upper
        } else {
            value.max(self.lower).min(self.upper)
        }
    }

    /// Returns `true` if `value` lies inside the bounds.
    #[inline]
    pub fn contains(&self, value: f64) -> bool {
        value >= self.lower && value <= self.upper
    }
}

impl Default for Bounds {
    /// `[1e-8, 1e8]`
    fn default() -> Self {
        Self {
            lower: 1e-8,
            upper: 1e8,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_bounds_new_valid() {
        let bounds = Bounds::new(0.0, 10.0).unwrap();
        assert_eq!(bounds.lower(), 0.0);
        assert_eq!(bounds.upper(), 10.0);

        let degenerate = Bounds::new(1.0, 1.0).unwrap();
        assert_eq!(degenerate.clamp(5.0), 1.0);

        assert!(Bounds::new(1e-8, f64::INFINITY).is_ok());
    }

    #[test]
    fn test_bounds_new_invalid() {
        assert!(Bounds::new(2.0, 1.0).is_err());
        assert!(Bounds::new(-1.0, 1.0).is_err());
        assert!(Bounds::new(f64::NAN, 1.0).is_err());
        assert!(Bounds::new(0.0, f64::NAN).is_err());
        assert!(Bounds::new(f64::INFINITY, f64::INFINITY).is_err());
    }

    #[test]
    fn test_clamp_extremes() {
        let bounds = Bounds::default();
        assert_eq!(bounds.clamp(f64::NEG_INFINITY), 1e-8);
        assert_eq!(bounds.clamp(f64::INFINITY), 1e8);
        assert_eq!(bounds.clamp(f64::NAN), 1e8);
        assert_eq!(bounds.clamp(0.5), 0.5);
        assert!(bounds.contains(bounds.clamp(-1e300)));
    }

    #[test]
    fn test_from_residuals() {
        let resids = [0.5, -1.5, 2.0, -0.5, 1.0];
        let bounds = Bounds::from_residuals(&resids).unwrap();

        let mean = resids.iter().sum::<f64>() / 5.0;
        let var = resids.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / 5.0;
        assert_relative_eq!(bounds.lower(), var / 1e8, max_relative = 1e-12);
        assert_relative_eq!(bounds.upper(), 1e7 * 5.0, max_relative = 1e-12);
    }

    #[test]
    fn test_from_residuals_constant_series() {
        let bounds = Bounds::from_residuals(&[0.0, 0.0, 0.0]).unwrap();
        assert_eq!(bounds.lower(), f64::MIN_POSITIVE);
        assert_relative_eq!(bounds.upper(), 1e7);
    }

    #[test]
    fn test_from_residuals_empty() {
        assert_eq!(
            Bounds::from_residuals(&[]),
            Err(KernelError::EmptyResiduals)
        );
    }
}
