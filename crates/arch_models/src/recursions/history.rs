//! Causal history accessor for one recursion step.
//!
//! [`History`] borrows the residuals and variances strictly before the time
//! being computed. Lags that reach before the sample return `None`, and the
//! variant substitutes its backcast convention. Because the slices end at
//! `t`, a step cannot read `r_t` or anything later.

/// Observations and variances available when computing time `t`.
///
/// # Examples
///
/// ```
/// use arch_models::recursions::History;
///
/// let resids = [0.5, -1.0];
/// let variance = [1.1, 1.2];
/// let history = History::new(&resids, &variance, 0.9);
///
/// assert_eq!(history.time(), 2);
/// assert_eq!(history.resid(1), Some(-1.0));
/// assert_eq!(history.resid(3), None);
/// assert_eq!(history.variance_or_backcast(3), 0.9);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct History<'a> {
    resids: &'a [f64],
    variance: &'a [f64],
    backcast: f64,
}

impl<'a> History<'a> {
    /// Creates a history ending just before `t = resids.len()`.
    ///
    /// `resids` and `variance` must have the same length.
    #[inline]
    pub fn new(resids: &'a [f64], variance: &'a [f64], backcast: f64) -> Self {
        debug_assert_eq!(resids.len(), variance.len());
        Self {
            resids,
            variance,
            backcast,
        }
    }

    /// Time index of the step this history feeds.
    #[inline]
    pub fn time(&self) -> usize {
        self.resids.len()
    }

    /// Pre-sample variance level.
    #[inline]
    pub fn backcast(&self) -> f64 {
        self.backcast
    }

    /// Residual `r_{t-lag}`, or `None` before the sample. `lag` starts at 1.
    #[inline]
    pub fn resid(&self, lag: usize) -> Option<f64> {
        lagged(self.resids, lag)
    }

    /// Variance `σ²_{t-lag}`, or `None` before the sample. `lag` starts at 1.
    #[inline]
    pub fn variance(&self, lag: usize) -> Option<f64> {
        lagged(self.variance, lag)
    }

    /// `r²_{t-lag}`, or the backcast before the sample.
    #[inline]
    pub fn squared_resid_or_backcast(&self, lag: usize) -> f64 {
        self.resid(lag).map_or(self.backcast, |r| r * r)
    }

    /// `σ²_{t-lag}`, or the backcast before the sample.
    #[inline]
    pub fn variance_or_backcast(&self, lag: usize) -> f64 {
        self.variance(lag).unwrap_or(self.backcast)
    }

    /// Standardised residual `r_{t-lag} / σ_{t-lag}`, or `None` before the sample.
    #[inline]
    pub fn standardized_resid(&self, lag: usize) -> Option<f64> {
        let r = self.resid(lag)?;
        let v = self.variance(lag)?;
        Some(r / v.max(f64::MIN_POSITIVE).sqrt())
    }
}

#[inline]
fn lagged(series: &[f64], lag: usize) -> Option<f64> {
    let t = series.len();
    if lag == 0 || lag > t {
        None
    } else {
        Some(series[t - lag])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_history_returns_backcast() {
        let history = History::new(&[], &[], 2.0);
        assert_eq!(history.time(), 0);
        assert_eq!(history.resid(1), None);
        assert_eq!(history.squared_resid_or_backcast(1), 2.0);
        assert_eq!(history.variance_or_backcast(1), 2.0);
        assert_eq!(history.standardized_resid(1), None);
    }

    #[test]
    fn test_lag_zero_is_never_visible() {
        let history = History::new(&[1.0], &[1.0], 0.5);
        assert_eq!(history.resid(0), None);
        assert_eq!(history.variance(0), None);
    }

    #[test]
    fn test_lag_ordering_newest_first() {
        let resids = [1.0, 2.0, 3.0];
        let variance = [4.0, 5.0, 6.0];
        let history = History::new(&resids, &variance, 0.0);
        assert_eq!(history.resid(1), Some(3.0));
        assert_eq!(history.resid(3), Some(1.0));
        assert_eq!(history.variance(2), Some(5.0));
        assert_eq!(history.squared_resid_or_backcast(2), 4.0);
    }

    #[test]
    fn test_standardized_resid() {
        let history = History::new(&[-2.0], &[4.0], 1.0);
        assert_eq!(history.standardized_resid(1), Some(-1.0));

        let degenerate = History::new(&[1.0], &[0.0], 1.0);
        assert!(degenerate.standardized_resid(1).unwrap().is_finite());
    }
}
