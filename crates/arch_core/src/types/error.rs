//! Error types for structured error handling.
//!
//! This module provides:
//! - `ErrorKind`: The three failure categories surfaced to callers
//! - `KernelError`: Errors from variance recursions and model dispatch
//!
//! Numerically degenerate parameter regions are never reported here. The
//! recursions clamp those values into [`Bounds`](crate::types::Bounds) so that
//! an optimiser always receives a defined variance path.

use thiserror::Error;

/// Failure category shared by every error in the workspace.
///
/// All categories are deterministic functions of the input, so none of them
/// is retried internally.
///
/// # Examples
/// ```
/// use arch_core::types::{ErrorKind, KernelError};
///
/// let err = KernelError::EmptyResiduals;
/// assert_eq!(err.kind(), ErrorKind::InputMismatch);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Parameter count or shape disagreement, or zero-length input.
    InputMismatch,
    /// Unrecognised model tag or invalid orders.
    UnknownVariant,
    /// Resampling configuration out of its valid range.
    InvalidConfig,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::InputMismatch => write!(f, "InputMismatch"),
            ErrorKind::UnknownVariant => write!(f, "UnknownVariant"),
            ErrorKind::InvalidConfig => write!(f, "InvalidConfig"),
        }
    }
}

/// Errors raised by the variance kernels and the variant dispatch.
///
/// # Variants
/// - `ParameterCount`, `EmptyResiduals`, `LengthMismatch`, `InvalidBounds`:
///   caller supplied inputs whose shape does not fit the model
/// - `UnknownVariant`, `NegativeOrder`, `InvalidPower`, `InvalidLags`:
///   the model description itself cannot be dispatched
///
/// # Examples
/// ```
/// use arch_core::types::KernelError;
///
/// let err = KernelError::ParameterCount { model: "GARCH", expected: 3, got: 2 };
/// assert_eq!(
///     format!("{}", err),
///     "Input mismatch: GARCH requires 3 parameters, got 2"
/// );
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum KernelError {
    /// Parameter vector length differs from the layout of the model.
    #[error("Input mismatch: {model} requires {expected} parameters, got {got}")]
    ParameterCount {
        /// Model name
        model: &'static str,
        /// Number of parameters required by the layout
        expected: usize,
        /// Number of parameters supplied
        got: usize,
    },

    /// Residual series has no observations.
    #[error("Input mismatch: residual series is empty")]
    EmptyResiduals,

    /// Two series that must be aligned have different lengths.
    #[error("Input mismatch: {name} has length {got}, expected {expected}")]
    LengthMismatch {
        /// Name of the offending series or buffer
        name: &'static str,
        /// Required length
        expected: usize,
        /// Supplied length
        got: usize,
    },

    /// Bounds are not an ordered pair of numbers.
    #[error("Input mismatch: invalid bounds [{lower}, {upper}]")]
    InvalidBounds {
        /// Lower bound
        lower: f64,
        /// Upper bound
        upper: f64,
    },

    /// Model tag is not recognised.
    #[error("Unknown variant: {0}")]
    UnknownVariant(String),

    /// An order (p, o or q) is negative.
    #[error("Unknown variant: order {name} = {value} is negative")]
    NegativeOrder {
        /// Order name
        name: &'static str,
        /// Supplied value
        value: i64,
    },

    /// Power exponent is not a positive finite number.
    #[error("Unknown variant: power {0} must be positive and finite")]
    InvalidPower(f64),

    /// HARCH lag windows are empty or contain a zero-length window.
    #[error("Unknown variant: invalid HARCH lags {0:?}")]
    InvalidLags(Vec<usize>),
}

impl KernelError {
    /// Returns the failure category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            KernelError::ParameterCount { .. }
            | KernelError::EmptyResiduals
            | KernelError::LengthMismatch { .. }
            | KernelError::InvalidBounds { .. } => ErrorKind::InputMismatch,
            KernelError::UnknownVariant(_)
            | KernelError::NegativeOrder { .. }
            | KernelError::InvalidPower(_)
            | KernelError::InvalidLags(_) => ErrorKind::UnknownVariant,
        }
    }

    /// Create a parameter count error.
    pub fn parameter_count(model: &'static str, expected: usize, got: usize) -> Self {
        KernelError::ParameterCount {
            model,
            expected,
            got,
        }
    }
}

/// Result alias for kernel operations.
pub type KernelResult<T> = Result<T, KernelError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_mismatch_kinds() {
        assert_eq!(
            KernelError::parameter_count("ARCH", 2, 3).kind(),
            ErrorKind::InputMismatch
        );
        assert_eq!(KernelError::EmptyResiduals.kind(), ErrorKind::InputMismatch);
        assert_eq!(
            KernelError::LengthMismatch {
                name: "variance",
                expected: 4,
                got: 3
            }
            .kind(),
            ErrorKind::InputMismatch
        );
        assert_eq!(
            KernelError::InvalidBounds {
                lower: 1.0,
                upper: 0.0
            }
            .kind(),
            ErrorKind::InputMismatch
        );
    }

    #[test]
    fn test_unknown_variant_kinds() {
        assert_eq!(
            KernelError::UnknownVariant("figarch".to_string()).kind(),
            ErrorKind::UnknownVariant
        );
        assert_eq!(
            KernelError::NegativeOrder {
                name: "p",
                value: -1
            }
            .kind(),
            ErrorKind::UnknownVariant
        );
        assert_eq!(
            KernelError::InvalidPower(0.0).kind(),
            ErrorKind::UnknownVariant
        );
        assert_eq!(
            KernelError::InvalidLags(vec![]).kind(),
            ErrorKind::UnknownVariant
        );
    }

    #[test]
    fn test_error_display() {
        let err = KernelError::NegativeOrder {
            name: "q",
            value: -2,
        };
        assert_eq!(
            err.to_string(),
            "Unknown variant: order q = -2 is negative"
        );

        let err = KernelError::LengthMismatch {
            name: "variance",
            expected: 10,
            got: 9,
        };
        assert!(err.to_string().contains("variance has length 9"));
    }

    #[test]
    fn test_error_kind_display() {
        assert_eq!(ErrorKind::InvalidConfig.to_string(), "InvalidConfig");
    }
}
