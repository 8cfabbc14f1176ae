//! archk - command line front end for the variance kernel and bootstrap
//!
//! # Commands
//!
//! - `archk variance <residuals>` - Conditional variance path (and forecast)
//! - `archk bootstrap --n <len>` - Bootstrap index arrays
//! - `archk bootstrap --data <file> --statistic mean` - Bootstrap a statistic
//! - `archk check` - Validate the configuration
//!
//! # Architecture
//!
//! As part of the **S**ervice layer, this crate only orchestrates: the
//! numerics live in `arch_models` and `arch_bootstrap`.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;
mod error;
mod io;

pub use error::{CliError, Result};

use commands::bootstrap::{BootstrapInput, BootstrapOptions, Statistic};
use commands::variance::VarianceOptions;
use config::{ArchkConfig, LOG_ENV};
use io::{parse_params, OutputFormat};

/// ARCH-family variance kernel and bootstrap CLI
#[derive(Parser)]
#[command(name = "archk")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = "archk.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the conditional variance path of a residual series
    Variance {
        /// Residual file (first column, optional header)
        residuals: PathBuf,

        /// Comma-separated parameters overriding the configuration
        #[arg(short, long)]
        params: Option<String>,

        /// Pre-sample variance overriding the configuration
        #[arg(short, long)]
        backcast: Option<f64>,

        /// Also print the one-step-ahead forecast
        #[arg(long)]
        forecast: bool,

        /// Output format (table, csv, json)
        #[arg(short, long, default_value = "table")]
        format: String,
    },

    /// Draw bootstrap index arrays
    Bootstrap {
        /// Series length
        #[arg(short, long, conflicts_with = "data")]
        n: Option<usize>,

        /// Residual file whose length (and values) are resampled
        #[arg(short, long)]
        data: Option<PathBuf>,

        /// Number of replications
        #[arg(short, long)]
        replications: Option<usize>,

        /// Base seed
        #[arg(short, long)]
        seed: Option<u64>,

        /// Statistic to bootstrap (mean, variance, mean-square)
        #[arg(long, requires = "data")]
        statistic: Option<String>,

        /// Output format (table, csv, json)
        #[arg(short, long, default_value = "table")]
        format: String,
    },

    /// Validate the configuration
    Check {
        /// Series length used to validate the bootstrap scheme
        #[arg(short, long, default_value = "100")]
        n: usize,
    },
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        "debug".to_string()
    } else {
        std::env::var(LOG_ENV).unwrap_or_else(|_| "info".to_string())
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    debug!("Verbose mode enabled");

    let config = ArchkConfig::load(&cli.config)
        .with_context(|| format!("Failed to load {}", cli.config.display()))?;

    match cli.command {
        Commands::Variance {
            residuals,
            params,
            backcast,
            forecast,
            format,
        } => {
            let options = VarianceOptions {
                params: params.as_deref().map(parse_params).transpose()?,
                backcast,
                forecast,
            };
            let format: OutputFormat = format.parse()?;
            commands::variance::run(&config, &residuals, &options, format)
                .with_context(|| format!("variance failed for {}", residuals.display()))?;
        }
        Commands::Bootstrap {
            n,
            data,
            replications,
            seed,
            statistic,
            format,
        } => {
            let input = match (&data, n) {
                (Some(path), _) => BootstrapInput::Data(path),
                (None, Some(n)) => BootstrapInput::Length(n),
                (None, None) => {
                    return Err(CliError::InvalidArgument(
                        "one of --n or --data is required".to_string(),
                    )
                    .into())
                }
            };
            let options = BootstrapOptions {
                replications,
                seed,
                statistic: statistic.as_deref().map(str::parse::<Statistic>).transpose()?,
            };
            let format: OutputFormat = format.parse()?;
            commands::bootstrap::run(&config, input, &options, format)
                .context("bootstrap failed")?;
        }
        Commands::Check { n } => {
            commands::check::run(&config, n).context("configuration check failed")?;
        }
    }

    Ok(())
}
