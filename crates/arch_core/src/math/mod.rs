//! Numeric utilities shared by the recursions.
//!
//! - [`backcast`]: pre-sample variance level from leading residuals
//! - [`moments`]: sample mean, variance and extremes

pub mod backcast;
pub mod moments;

pub use backcast::compute_backcast;
