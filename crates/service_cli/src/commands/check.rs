//! Check command implementation
//!
//! Validates the configuration without reading residuals: the model must
//! dispatch, the parameter vector (if given) must fit its layout, and the
//! bootstrap scheme must be valid for the given series length.

use arch_models::dispatch;
use tracing::{info, warn};

use crate::config::ArchkConfig;
use crate::{CliError, Result};

/// Findings of a configuration check.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckReport {
    /// Model family name
    pub model: &'static str,
    /// Parameter layout
    pub layout: Vec<String>,
    /// Number of parameters configured
    pub configured_params: usize,
    /// Bootstrap scheme name
    pub scheme: &'static str,
    /// Expected block length of the scheme
    pub expected_block_length: f64,
}

/// Validates `config` for a series of length `n`.
pub fn check(config: &ArchkConfig, n: usize) -> Result<CheckReport> {
    let spec = config.model.spec()?;
    let (layout, model) = dispatch(&spec)?;

    let configured_params = config.model.params.len();
    if configured_params != 0 && configured_params != layout.len() {
        return Err(CliError::InvalidArgument(format!(
            "{} expects {} parameters [{}], configuration has {}",
            model.name(),
            layout.len(),
            layout.names().join(", "),
            configured_params
        )));
    }
    if let Some(bounds) = &config.bounds {
        bounds.bounds()?;
    }

    let bootstrap = config.bootstrap.config(n)?;
    Ok(CheckReport {
        model: model.name(),
        layout: layout.names().to_vec(),
        configured_params,
        scheme: bootstrap.scheme().name(),
        expected_block_length: bootstrap.scheme().expected_block_length(),
    })
}

/// Run the check command
pub fn run(config: &ArchkConfig, n: usize) -> Result<()> {
    info!("Checking configuration...");
    let report = check(config, n)?;

    info!("  Model: {} [{}]", report.model, report.layout.join(", "));
    if report.configured_params == 0 {
        warn!("  No parameters configured; pass --params to the variance command");
    }
    info!(
        "  Bootstrap: {} (expected block length {:.2}, n = {})",
        report.scheme, report.expected_block_length, n
    );
    println!("Configuration OK");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use arch_core::types::ErrorKind;

    #[test]
    fn test_default_config_passes() {
        let report = check(&ArchkConfig::default(), 100).unwrap();
        assert_eq!(report.model, "GARCH");
        assert_eq!(report.layout, vec!["omega", "alpha[1]", "beta[1]"]);
        assert_eq!(report.scheme, "independent");
    }

    #[test]
    fn test_param_count_mismatch() {
        let config: ArchkConfig = "[model]\nvariant = \"egarch\"\np = 1\no = 1\nq = 1\nparams = [0.1]\n"
            .parse()
            .unwrap();
        assert!(matches!(check(&config, 100), Err(CliError::InvalidArgument(_))));
    }

    #[test]
    fn test_unknown_variant() {
        let config: ArchkConfig = "[model]\nvariant = \"figarch\"\n".parse().unwrap();
        match check(&config, 100) {
            Err(CliError::Kernel(err)) => assert_eq!(err.kind(), ErrorKind::UnknownVariant),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_invalid_bounds() {
        let config: ArchkConfig = "[bounds]\nlower = 2.0\nupper = 1.0\n".parse().unwrap();
        assert!(matches!(check(&config, 100), Err(CliError::Kernel(_))));
    }

    #[test]
    fn test_stationary_expected_block_length() {
        let config: ArchkConfig = "[bootstrap]\nscheme = \"stationary\"\nprobability = 0.25\n"
            .parse()
            .unwrap();
        let report = check(&config, 100).unwrap();
        assert_eq!(report.expected_block_length, 4.0);
    }
}
