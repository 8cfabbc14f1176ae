//! CLI error types.

use arch_bootstrap::BootstrapError;
use arch_core::types::KernelError;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors surfaced by the `archk` commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Input file does not exist.
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// Command line argument could not be used.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Configuration file or environment problem.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Variance kernel rejected its inputs.
    #[error("{} [{}]", .0, .0.kind())]
    Kernel(#[from] KernelError),

    /// Bootstrap configuration or sampling failed.
    #[error("{} [{}]", .0, .0.kind())]
    Bootstrap(#[from] BootstrapError),

    /// I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV read or write failure.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialisation failure.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for CLI commands.
pub type Result<T> = std::result::Result<T, CliError>;
