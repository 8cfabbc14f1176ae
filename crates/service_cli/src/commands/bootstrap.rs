//! Bootstrap command implementation
//!
//! Draws bootstrap index arrays for a series, either of a given length or
//! of the length of a residual file. With a residual file the command can
//! also report the bootstrap distribution of a simple statistic.

use std::io::Write;
use std::path::Path;
use std::str::FromStr;

use arch_bootstrap::replicate::{par_bootstrap_statistic, par_index_arrays};
use arch_bootstrap::BootstrapConfig;
use arch_core::math::moments::{mean, variance};
use serde::Serialize;
use tracing::{info, warn};

use crate::config::ArchkConfig;
use crate::io::{read_residuals, OutputFormat};
use crate::{CliError, Result};

/// Seed used when neither the configuration nor the command line sets one.
pub const DEFAULT_SEED: u64 = 0;

/// Statistic evaluated on each resampled series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Statistic {
    /// Sample mean
    Mean,
    /// Population variance
    Variance,
    /// Mean of squares
    MeanSquare,
}

impl FromStr for Statistic {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "mean" => Ok(Statistic::Mean),
            "variance" | "var" => Ok(Statistic::Variance),
            "mean-square" | "ms" => Ok(Statistic::MeanSquare),
            other => Err(CliError::InvalidArgument(format!(
                "Unknown statistic: {}. Supported: mean, variance, mean-square",
                other
            ))),
        }
    }
}

impl Statistic {
    fn evaluate(&self, xs: &[f64]) -> f64 {
        match self {
            Statistic::Mean => mean(xs),
            Statistic::Variance => variance(xs),
            Statistic::MeanSquare => {
                if xs.is_empty() {
                    0.0
                } else {
                    xs.iter().map(|x| x * x).sum::<f64>() / xs.len() as f64
                }
            }
        }
    }
}

/// Where the series length comes from.
#[derive(Debug, Clone)]
pub enum BootstrapInput<'a> {
    /// Explicit length only
    Length(usize),
    /// Residual file
    Data(&'a Path),
}

/// Options collected from the command line.
#[derive(Debug, Clone, Default)]
pub struct BootstrapOptions {
    /// Replication count overriding the configuration
    pub replications: Option<usize>,
    /// Seed overriding the configuration and environment
    pub seed: Option<u64>,
    /// Statistic to summarise instead of printing index arrays
    pub statistic: Option<Statistic>,
}

/// Summary of a bootstrapped statistic.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatisticSummary {
    /// Scheme name
    pub scheme: String,
    /// Number of replications
    pub replications: usize,
    /// Statistic on the original series
    pub estimate: f64,
    /// Mean over replications
    pub bootstrap_mean: f64,
    /// Standard deviation over replications
    pub standard_error: f64,
    /// Per-replication values
    pub values: Vec<f64>,
}

fn resolve_config(
    config: &ArchkConfig,
    n: usize,
    options: &BootstrapOptions,
) -> Result<(BootstrapConfig, u64)> {
    let mut section = config.bootstrap.clone();
    if let Some(replications) = options.replications {
        section.replications = replications;
    }
    if let Some(seed) = options.seed {
        section.seed = Some(seed);
    }
    let resolved = section.config(n)?;
    let seed = match resolved.seed() {
        Some(seed) => seed,
        None => {
            warn!("No seed configured; using {}", DEFAULT_SEED);
            DEFAULT_SEED
        }
    };
    Ok((resolved, seed))
}

/// Draws the index arrays.
pub fn index_arrays(
    config: &ArchkConfig,
    n: usize,
    options: &BootstrapOptions,
) -> Result<Vec<Vec<usize>>> {
    let (resolved, seed) = resolve_config(config, n, options)?;
    Ok(par_index_arrays(&resolved, seed)?)
}

/// Bootstraps a statistic over `data`.
pub fn summarise(
    config: &ArchkConfig,
    data: &[f64],
    statistic: Statistic,
    options: &BootstrapOptions,
) -> Result<StatisticSummary> {
    let (resolved, seed) = resolve_config(config, data.len(), options)?;
    let values = par_bootstrap_statistic(&resolved, seed, data, |xs| statistic.evaluate(xs))?;

    Ok(StatisticSummary {
        scheme: resolved.scheme().name().to_string(),
        replications: resolved.replications(),
        estimate: statistic.evaluate(data),
        bootstrap_mean: mean(&values),
        standard_error: variance(&values).sqrt(),
        values,
    })
}

fn write_arrays<W: Write>(arrays: &[Vec<usize>], format: OutputFormat, out: W) -> Result<()> {
    match format {
        OutputFormat::Json => serde_json::to_writer(out, arrays)?,
        OutputFormat::Csv => {
            let mut writer = csv::WriterBuilder::new().flexible(true).from_writer(out);
            for array in arrays {
                writer.write_record(array.iter().map(|i| i.to_string()))?;
            }
            writer.flush()?;
        }
        OutputFormat::Table => {
            let mut out = out;
            for (r, array) in arrays.iter().enumerate() {
                let row: Vec<String> = array.iter().map(|i| i.to_string()).collect();
                writeln!(out, "{:>6}: {}", r, row.join(" "))?;
            }
        }
    }
    Ok(())
}

fn write_summary<W: Write>(summary: &StatisticSummary, format: OutputFormat, out: W) -> Result<()> {
    match format {
        OutputFormat::Json => serde_json::to_writer_pretty(out, summary)?,
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(out);
            writer.write_record(["replication", "value"])?;
            for (r, v) in summary.values.iter().enumerate() {
                writer.write_record([r.to_string(), v.to_string()])?;
            }
            writer.flush()?;
        }
        OutputFormat::Table => {
            let mut out = out;
            writeln!(out, "Scheme:          {}", summary.scheme)?;
            writeln!(out, "Replications:    {}", summary.replications)?;
            writeln!(out, "Estimate:        {:.8}", summary.estimate)?;
            writeln!(out, "Bootstrap mean:  {:.8}", summary.bootstrap_mean)?;
            writeln!(out, "Standard error:  {:.8}", summary.standard_error)?;
        }
    }
    Ok(())
}

/// Run the bootstrap command
pub fn run(
    config: &ArchkConfig,
    input: BootstrapInput<'_>,
    options: &BootstrapOptions,
    format: OutputFormat,
) -> Result<()> {
    info!("Starting bootstrap...");
    info!("  Scheme: {:?}", config.bootstrap.scheme);

    let stdout = std::io::stdout();
    match (input, options.statistic) {
        (BootstrapInput::Data(path), Some(statistic)) => {
            info!("  Data: {}", path.display());
            let data = read_residuals(path)?;
            let summary = summarise(config, &data, statistic, options)?;
            write_summary(&summary, format, stdout.lock())?;
        }
        (BootstrapInput::Data(path), None) => {
            info!("  Data: {}", path.display());
            let n = read_residuals(path)?.len();
            let arrays = index_arrays(config, n, options)?;
            write_arrays(&arrays, format, stdout.lock())?;
        }
        (BootstrapInput::Length(_), Some(_)) => {
            return Err(CliError::InvalidArgument(
                "--statistic requires --data".to_string(),
            ));
        }
        (BootstrapInput::Length(n), None) => {
            info!("  Length: {}", n);
            let arrays = index_arrays(config, n, options)?;
            write_arrays(&arrays, format, stdout.lock())?;
        }
    }

    info!("Bootstrap complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use arch_core::types::ErrorKind;

    fn block_config() -> ArchkConfig {
        "[bootstrap]\nscheme = \"moving-block\"\nblock_length = 5\nreplications = 10\nseed = 3\n"
            .parse()
            .unwrap()
    }

    #[test]
    fn test_index_arrays_shape() {
        let arrays = index_arrays(&block_config(), 20, &BootstrapOptions::default()).unwrap();
        assert_eq!(arrays.len(), 10);
        for array in &arrays {
            assert_eq!(array.len(), 20);
            for block in array.chunks(5) {
                assert!(block.windows(2).all(|w| w[1] == w[0] + 1));
            }
        }
    }

    #[test]
    fn test_seed_override_changes_draws() {
        let base = index_arrays(&block_config(), 50, &BootstrapOptions::default()).unwrap();
        let same = index_arrays(
            &block_config(),
            50,
            &BootstrapOptions {
                seed: Some(3),
                ..Default::default()
            },
        )
        .unwrap();
        let other = index_arrays(
            &block_config(),
            50,
            &BootstrapOptions {
                seed: Some(4),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(base, same);
        assert_ne!(base, other);
    }

    #[test]
    fn test_block_longer_than_series_is_invalid_config() {
        match index_arrays(&block_config(), 4, &BootstrapOptions::default()) {
            Err(CliError::Bootstrap(err)) => assert_eq!(err.kind(), ErrorKind::InvalidConfig),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_summary_of_constant_series() {
        let data = vec![2.0; 20];
        let summary =
            summarise(&block_config(), &data, Statistic::MeanSquare, &BootstrapOptions::default())
                .unwrap();
        assert_eq!(summary.scheme, "moving-block");
        assert_eq!(summary.values.len(), 10);
        assert_relative_eq!(summary.estimate, 4.0);
        assert_relative_eq!(summary.bootstrap_mean, 4.0, epsilon = 1e-12);
        assert!(summary.standard_error < 1e-12);
    }

    #[test]
    fn test_statistic_parsing() {
        assert_eq!("var".parse::<Statistic>().unwrap(), Statistic::Variance);
        assert_eq!("mean_square".parse::<Statistic>().unwrap(), Statistic::MeanSquare);
        assert!("median".parse::<Statistic>().is_err());
    }

    #[test]
    fn test_csv_arrays() {
        let arrays = vec![vec![0, 1, 2], vec![2, 0, 1]];
        let mut buffer = Vec::new();
        write_arrays(&arrays, OutputFormat::Csv, &mut buffer).unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap(), "0,1,2\n2,0,1\n");
    }
}
