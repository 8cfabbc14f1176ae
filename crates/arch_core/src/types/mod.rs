//! Shared types for volatility kernels.
//!
//! This module provides:
//! - Error types: `KernelError`, `ErrorKind` (`error`)
//! - Variance clamp: `Bounds` (`bounds`)

pub mod bounds;
pub mod error;

pub use bounds::Bounds;
pub use error::{ErrorKind, KernelError, KernelResult};
