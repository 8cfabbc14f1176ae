//! Per-variant conditional variance recursions.
//!
//! Every variant implements [`VarianceRecursion`]: one step of the recursion
//! computed from a [`History`] of strictly earlier observations. The full
//! path, the in-place variant and the one-step forecast are all loops over
//! this single step (see [`crate::models::VarianceModelEnum`]).
//!
//! ## Design Philosophy
//!
//! - **Static dispatch**: variants are selected through an enum, never `Box<dyn>`
//! - **Causal by construction**: a step only sees slices ending before `t`
//! - **Total over parameter space**: every step returns a value clamped into
//!   [`Bounds`]; infeasible parameters are not errors
//!
//! ## Backcast conventions
//!
//! | Variant | Missing residual term | Missing variance term |
//! |---------|-----------------------|-----------------------|
//! | GARCH family | `backcast^(δ/2)` | `backcast^(δ/2)` |
//! | GARCH asymmetric term | `0.5 · backcast^(δ/2)` | n/a |
//! | EGARCH | `0` (expected value) | `ln backcast` |
//! | HARCH | `backcast` | n/a |
//! | EWMA | `backcast` | `backcast` |

mod constant;
mod egarch;
mod ewma;
mod garch;
mod harch;
mod history;

pub use constant::ConstantVariance;
pub use egarch::{EgarchRecursion, LN_SIGMA2_MAX, NORM_CONST};
pub use ewma::{EwmaRecursion, RISKMETRICS_LAMBDA};
pub use garch::GarchRecursion;
pub use harch::HarchRecursion;
pub use history::History;

use arch_core::types::Bounds;

/// One step of a conditional variance recursion.
///
/// # Contract
///
/// - `params.len() == self.num_params()` (checked by the caller)
/// - the returned value is on the natural variance scale and lies in `bounds`
/// - the result depends only on `params`, `history` and `bounds`
pub trait VarianceRecursion {
    /// Family name used in diagnostics.
    fn name(&self) -> &'static str;

    /// Number of parameters read by [`step`](Self::step).
    fn num_params(&self) -> usize;

    /// Largest lag read from the history.
    fn max_lag(&self) -> usize;

    /// Computes the clamped conditional variance at `history.time()`.
    fn step(&self, params: &[f64], history: &History<'_>, bounds: &Bounds) -> f64;
}
