//! Error types for the bootstrap engine.
//!
//! Configuration errors are raised when a config is built or a sampler is
//! constructed, never part-way through a draw, so no partial index array is
//! ever returned.

use arch_core::types::ErrorKind;
use thiserror::Error;

/// Errors from bootstrap configuration, sampling and resampling.
///
/// # Examples
/// ```
/// use arch_bootstrap::BootstrapError;
/// use arch_core::types::ErrorKind;
///
/// let err = BootstrapError::InvalidProbability(1.5);
/// assert_eq!(err.kind(), ErrorKind::InvalidConfig);
/// assert_eq!(
///     err.to_string(),
///     "Invalid config: block probability 1.5 must lie in (0, 1]"
/// );
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BootstrapError {
    /// Block length of zero.
    #[error("Invalid config: block length {0} must be at least 1")]
    InvalidBlockLength(usize),

    /// Fixed block longer than the series.
    #[error("Invalid config: block length {block_length} exceeds data length {data_length}")]
    BlockLengthExceedsData {
        /// Configured block length
        block_length: usize,
        /// Length of the series being resampled
        data_length: usize,
    },

    /// Series length of zero.
    #[error("Invalid config: data length {0} must be at least 1")]
    InvalidDataLength(usize),

    /// Stationary block probability outside `(0, 1]`.
    #[error("Invalid config: block probability {0} must lie in (0, 1]")]
    InvalidProbability(f64),

    /// Replication count of zero or above the maximum.
    #[error("Invalid config: replication count {0} must lie in [1, 10_000_000]")]
    InvalidReplications(usize),

    /// Required builder field not supplied.
    #[error("Invalid config: '{name}' {reason}")]
    InvalidParameter {
        /// Field name
        name: &'static str,
        /// What is wrong with it
        reason: String,
    },

    /// Output buffer does not match the configured data length.
    #[error("Input mismatch: index buffer has length {got}, expected {expected}")]
    BufferLength {
        /// Configured data length
        expected: usize,
        /// Supplied buffer length
        got: usize,
    },

    /// Index array refers past the end of the data being resampled.
    #[error("Input mismatch: index {index} out of range for data of length {len}")]
    IndexOutOfRange {
        /// Offending index
        index: usize,
        /// Data length
        len: usize,
    },
}

impl BootstrapError {
    /// Failure category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            BootstrapError::BufferLength { .. } | BootstrapError::IndexOutOfRange { .. } => {
                ErrorKind::InputMismatch
            }
            _ => ErrorKind::InvalidConfig,
        }
    }
}

/// Result type for bootstrap operations.
pub type BootstrapResult<T> = Result<T, BootstrapError>;
