//! Variance command implementation
//!
//! Runs the conditional variance recursion over a residual file and prints
//! the path, optionally extended by the one-step forecast.

use std::io::Write;
use std::path::Path;

use arch_core::math::compute_backcast;
use arch_core::types::Bounds;
use arch_models::dispatch;
use serde::Serialize;
use tracing::{debug, info};

use crate::config::ArchkConfig;
use crate::io::{read_residuals, OutputFormat};
use crate::{CliError, Result};

/// Options collected from the command line.
#[derive(Debug, Clone, Default)]
pub struct VarianceOptions {
    /// Parameter vector overriding `model.params`
    pub params: Option<Vec<f64>>,
    /// Backcast overriding `model.backcast`
    pub backcast: Option<f64>,
    /// Append the one-step-ahead forecast
    pub forecast: bool,
}

/// Named parameter value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NamedParameter {
    /// Layout name
    pub name: String,
    /// Value
    pub value: f64,
}

/// Result of one variance run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VarianceReport {
    /// Model family name
    pub model: String,
    /// Parameters with their layout names
    pub parameters: Vec<NamedParameter>,
    /// Backcast used to seed the recursion
    pub backcast: f64,
    /// Lower variance bound
    pub lower_bound: f64,
    /// Upper variance bound
    pub upper_bound: f64,
    /// Residual series
    pub residuals: Vec<f64>,
    /// Conditional variance path
    pub variance: Vec<f64>,
    /// One-step-ahead variance, when requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forecast: Option<f64>,
}

/// Computes the report for a residual series.
pub fn compute(
    config: &ArchkConfig,
    resids: Vec<f64>,
    options: &VarianceOptions,
) -> Result<VarianceReport> {
    let spec = config.model.spec()?;
    let (layout, model) = dispatch(&spec)?;

    let params = options
        .params
        .clone()
        .unwrap_or_else(|| config.model.params.clone());
    if params.is_empty() {
        return Err(CliError::InvalidArgument(format!(
            "no parameters given; {} expects [{}]",
            model.name(),
            layout.names().join(", ")
        )));
    }

    let backcast = match options.backcast.or(config.model.backcast) {
        Some(value) => value,
        None => compute_backcast(&resids)?,
    };
    let bounds = match &config.bounds {
        Some(section) => section.bounds()?,
        None => Bounds::from_residuals(&resids)?,
    };
    debug!(
        model = model.name(),
        backcast,
        lower = bounds.lower(),
        upper = bounds.upper(),
        "variance inputs"
    );

    let variance = model.compute_variance(&params, &resids, backcast, bounds)?;
    let forecast = if options.forecast {
        Some(model.forecast_step(&params, &resids, &variance, backcast, bounds)?)
    } else {
        None
    };

    let parameters = layout
        .names()
        .iter()
        .zip(&params)
        .map(|(name, &value)| NamedParameter {
            name: name.clone(),
            value,
        })
        .collect();

    Ok(VarianceReport {
        model: model.name().to_string(),
        parameters,
        backcast,
        lower_bound: bounds.lower(),
        upper_bound: bounds.upper(),
        residuals: resids,
        variance,
        forecast,
    })
}

/// Writes the report in the requested format.
pub fn write_report<W: Write>(report: &VarianceReport, format: OutputFormat, out: W) -> Result<()> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(out, report)?;
        }
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(out);
            writer.write_record(["t", "residual", "variance"])?;
            for (t, (r, v)) in report.residuals.iter().zip(&report.variance).enumerate() {
                writer.write_record([t.to_string(), r.to_string(), v.to_string()])?;
            }
            if let Some(f) = report.forecast {
                writer.write_record([report.residuals.len().to_string(), String::new(), f.to_string()])?;
            }
            writer.flush()?;
        }
        OutputFormat::Table => {
            let mut out = out;
            writeln!(out, "Model: {}", report.model)?;
            for p in &report.parameters {
                writeln!(out, "  {:<10} {:>14.8}", p.name, p.value)?;
            }
            writeln!(
                out,
                "Backcast: {:.8}  Bounds: [{:.3e}, {:.3e}]",
                report.backcast, report.lower_bound, report.upper_bound
            )?;
            writeln!(out, "{:>8} {:>14} {:>14}", "t", "residual", "variance")?;
            for (t, (r, v)) in report.residuals.iter().zip(&report.variance).enumerate() {
                writeln!(out, "{:>8} {:>14.6} {:>14.8}", t, r, v)?;
            }
            if let Some(f) = report.forecast {
                writeln!(out, "{:>8} {:>14} {:>14.8}", report.residuals.len(), "-", f)?;
            }
        }
    }
    Ok(())
}

/// Run the variance command
pub fn run(
    config: &ArchkConfig,
    residuals: &Path,
    options: &VarianceOptions,
    format: OutputFormat,
) -> Result<()> {
    info!("Computing conditional variance...");
    info!("  Residuals: {}", residuals.display());
    info!("  Model: {}", config.model.variant);

    let resids = read_residuals(residuals)?;
    let report = compute(config, resids, options)?;
    info!("  Observations: {}", report.variance.len());

    let stdout = std::io::stdout();
    write_report(&report, format, stdout.lock())?;
    info!("Variance complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use arch_core::types::ErrorKind;

    fn garch_config() -> ArchkConfig {
        r#"
            [model]
            variant = "garch"
            p = 1
            q = 1
            params = [0.01, 0.08, 0.90]
            backcast = 1.0

            [bounds]
            lower = 1e-8
            upper = 1e8
        "#
        .parse()
        .unwrap()
    }

    #[test]
    fn test_worked_garch_path() {
        let options = VarianceOptions {
            forecast: true,
            ..Default::default()
        };
        let report = compute(&garch_config(), vec![0.0, 1.0, -1.0, 2.0], &options).unwrap();

        assert_eq!(report.model, "GARCH");
        assert_eq!(report.parameters[2].name, "beta[1]");
        assert_relative_eq!(report.variance[0], 0.99, epsilon = 1e-12);
        assert_relative_eq!(report.variance[1], 0.901, epsilon = 1e-12);
        assert_relative_eq!(
            report.forecast.unwrap(),
            0.01 + 0.08 * 4.0 + 0.90 * report.variance[3],
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_overrides_take_precedence() {
        let options = VarianceOptions {
            params: Some(vec![0.1, 0.0, 0.0]),
            backcast: Some(5.0),
            forecast: false,
        };
        let report = compute(&garch_config(), vec![1.0, 2.0], &options).unwrap();
        assert_eq!(report.backcast, 5.0);
        assert!(report.variance.iter().all(|&v| (v - 0.1).abs() < 1e-15));
        assert!(report.forecast.is_none());
    }

    #[test]
    fn test_missing_params() {
        let config = ArchkConfig::default();
        let err = compute(&config, vec![1.0], &VarianceOptions::default()).unwrap_err();
        assert!(err.to_string().contains("omega, alpha[1], beta[1]"));
    }

    #[test]
    fn test_wrong_param_count_is_input_mismatch() {
        let options = VarianceOptions {
            params: Some(vec![0.1, 0.1]),
            ..Default::default()
        };
        match compute(&garch_config(), vec![1.0], &options) {
            Err(CliError::Kernel(err)) => assert_eq!(err.kind(), ErrorKind::InputMismatch),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_empty_residuals() {
        match compute(&garch_config(), Vec::new(), &VarianceOptions::default()) {
            Err(CliError::Kernel(err)) => assert_eq!(err.kind(), ErrorKind::InputMismatch),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_csv_output() {
        let options = VarianceOptions {
            forecast: true,
            ..Default::default()
        };
        let report = compute(&garch_config(), vec![0.0, 1.0], &options).unwrap();
        let mut buffer = Vec::new();
        write_report(&report, OutputFormat::Csv, &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "t,residual,variance");
        assert_eq!(lines.len(), 4);
        assert!(lines[3].starts_with("2,,"));
    }

    #[test]
    fn test_json_output_round_trips_values() {
        let report = compute(&garch_config(), vec![0.5], &VarianceOptions::default()).unwrap();
        let mut buffer = Vec::new();
        write_report(&report, OutputFormat::Json, &mut buffer).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(value["model"], "GARCH");
        assert_eq!(value["variance"].as_array().unwrap().len(), 1);
        assert!(value.get("forecast").is_none());
    }

    #[test]
    fn test_table_output() {
        let report = compute(&garch_config(), vec![0.5, -0.5], &VarianceOptions::default()).unwrap();
        let mut buffer = Vec::new();
        write_report(&report, OutputFormat::Table, &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert!(text.starts_with("Model: GARCH"));
        assert!(text.contains("omega"));
    }
}
