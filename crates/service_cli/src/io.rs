//! Residual input and tabular output helpers.

use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use crate::{CliError, Result};

/// Output formats shared by the commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable table
    Table,
    /// Comma-separated values
    Csv,
    /// JSON document
    Json,
}

impl FromStr for OutputFormat {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            other => Err(CliError::InvalidArgument(format!(
                "Unknown format: {}. Supported: json, csv, table",
                other
            ))),
        }
    }
}

/// Reads a residual series from a CSV file.
///
/// The first column of every record is used. A first row that does not
/// parse as a number is treated as a header.
pub fn read_residuals(path: &Path) -> Result<Vec<f64>> {
    if !path.exists() {
        return Err(CliError::FileNotFound(path.display().to_string()));
    }
    let file = std::fs::File::open(path)?;
    parse_residuals(file)
}

/// Parses residuals from any CSV reader.
pub fn parse_residuals<R: Read>(reader: R) -> Result<Vec<f64>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut resids = Vec::new();
    for (row, record) in csv_reader.records().enumerate() {
        let record = record?;
        let Some(field) = record.get(0) else {
            continue;
        };
        if field.is_empty() {
            continue;
        }
        match field.parse::<f64>() {
            Ok(value) => resids.push(value),
            Err(_) if row == 0 => continue,
            Err(_) => {
                return Err(CliError::InvalidArgument(format!(
                    "row {}: '{}' is not a number",
                    row + 1,
                    field
                )))
            }
        }
    }
    Ok(resids)
}

/// Parses a comma-separated parameter list such as `0.01,0.08,0.9`.
pub fn parse_params(text: &str) -> Result<Vec<f64>> {
    text.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<f64>()
                .map_err(|_| CliError::InvalidArgument(format!("'{}' is not a number", s)))
        })
        .collect()
}
