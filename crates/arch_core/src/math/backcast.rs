//! Backcast computation.
//!
//! The backcast is the pre-sample variance level that seeds a recursion at
//! `t = 0`. It is an exponentially weighted average of the first squared
//! residuals, which tracks the level at the start of the sample more closely
//! than the full-sample variance.
//!
//! ```text
//! tau      = min(75, T)
//! w_i      = 0.94^i / Σ_{j<tau} 0.94^j,   i = 0..tau
//! backcast = Σ_{i<tau} w_i · r_i²
//! ```
//!
//! The kernels treat the backcast as an opaque natural-scale variance; any
//! variant-specific transform (power, log) is applied inside the variant.

use crate::types::{KernelError, KernelResult};

/// Maximum number of leading observations used by the backcast.
pub const BACKCAST_WINDOW: usize = 75;

/// Exponential decay of the backcast weights.
pub const BACKCAST_DECAY: f64 = 0.94;

/// Normalised exponential weights `decay^i / Σ decay^j` for `i = 0..len`.
///
/// # Examples
/// ```
/// use arch_core::math::backcast::ewma_weights;
///
/// let w = ewma_weights(3, 0.5);
/// assert!((w.iter().sum::<f64>() - 1.0).abs() < 1e-15);
/// assert!((w[0] - 4.0 / 7.0).abs() < 1e-15);
/// ```
pub fn ewma_weights(len: usize, decay: f64) -> Vec<f64> {
    let mut weights = Vec::with_capacity(len);
    let mut w = 1.0;
    for _ in 0..len {
        weights.push(w);
        w *= decay;
    }
    let total: f64 = weights.iter().sum();
    if total > 0.0 {
        for w in weights.iter_mut() {
            *w /= total;
        }
    }
    weights
}

/// Computes the default backcast for a residual series.
///
/// # Errors
///
/// Returns `KernelError::EmptyResiduals` for an empty series.
///
/// # Examples
/// ```
/// use arch_core::math::backcast::compute_backcast;
///
/// // A constant-magnitude series backcasts to its square.
/// let backcast = compute_backcast(&[2.0, -2.0, 2.0]).unwrap();
/// assert!((backcast - 4.0).abs() < 1e-12);
/// ```
pub fn compute_backcast(resids: &[f64]) -> KernelResult<f64> {
    if resids.is_empty() {
        return Err(KernelError::EmptyResiduals);
    }
    let tau = resids.len().min(BACKCAST_WINDOW);
    let weights = ewma_weights(tau, BACKCAST_DECAY);
    Ok(weights
        .iter()
        .zip(resids)
        .map(|(w, r)| w * r * r)
        .sum())
}
