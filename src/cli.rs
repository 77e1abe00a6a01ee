use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::project::{MissingValuesHandling, SamplingMethod};

#[derive(Debug, Parser)]
#[command(author, version, about = "Inspect tabular ML datasets", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Parse a CSV file and report per-column types and statistics
    Inspect(InspectArgs),
    /// Project the expected effect of preprocessing options on a dataset
    Preview(PreviewArgs),
    /// Print the first few rows of a CSV file as a formatted table
    Head(HeadArgs),
}

#[derive(Debug, Args)]
pub struct InspectArgs {
    /// Input CSV file to inspect ('-' reads stdin)
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,
    /// Emit the analysis as JSON on stdout instead of a table
    #[arg(long)]
    pub json: bool,
    /// Write the analysis as JSON to this file
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,
    /// CSV delimiter character (supports ',', 'tab', ';', '|')
    #[arg(long, value_parser = parse_delimiter)]
    pub delimiter: Option<u8>,
    /// Character encoding of the input file (defaults to utf-8)
    #[arg(long = "input-encoding")]
    pub input_encoding: Option<String>,
}

#[derive(Debug, Args)]
pub struct PreviewArgs {
    /// Input CSV file to inspect ('-' reads stdin)
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,
    /// Preprocessing options file (.yml, .yaml, or .json)
    #[arg(long = "options")]
    pub options: Option<PathBuf>,
    /// Missing-value strategy override
    #[arg(long = "missing-values", value_enum)]
    pub missing_values: Option<MissingValuesHandling>,
    /// Project row counts as if exact duplicate rows were removed
    #[arg(long = "drop-duplicates")]
    pub drop_duplicates: bool,
    /// Sampling method override
    #[arg(long = "sampling-method", value_enum)]
    pub sampling_method: Option<SamplingMethod>,
    /// Sampling ratio in (0, 1]
    #[arg(long = "sampling-ratio")]
    pub sampling_ratio: Option<f64>,
    /// Maximum preview rows to retain in the projected dataset
    #[arg(long, default_value_t = 10)]
    pub rows: usize,
    /// Emit the projected analysis as JSON on stdout instead of tables
    #[arg(long)]
    pub json: bool,
    /// CSV delimiter character (supports ',', 'tab', ';', '|')
    #[arg(long, value_parser = parse_delimiter)]
    pub delimiter: Option<u8>,
    /// Character encoding of the input file (defaults to utf-8)
    #[arg(long = "input-encoding")]
    pub input_encoding: Option<String>,
}

#[derive(Debug, Args)]
pub struct HeadArgs {
    /// Input CSV file to preview ('-' reads stdin)
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,
    /// Number of rows to display
    #[arg(long, default_value_t = 10)]
    pub rows: usize,
    /// CSV delimiter character (supports ',', 'tab', ';', '|')
    #[arg(long, value_parser = parse_delimiter)]
    pub delimiter: Option<u8>,
    /// Character encoding of the input file (defaults to utf-8)
    #[arg(long = "input-encoding")]
    pub input_encoding: Option<String>,
}

pub fn parse_delimiter(value: &str) -> Result<u8, String> {
    match value {
        "tab" | "\t" => Ok(b'\t'),
        "comma" | "," => Ok(b','),
        "|" | "pipe" => Ok(b'|'),
        ";" | "semicolon" => Ok(b';'),
        other => {
            let mut chars = other.chars();
            let first = chars
                .next()
                .ok_or_else(|| "Delimiter cannot be empty".to_string())?;
            if chars.next().is_some() {
                return Err("Delimiter must be a single character".to_string());
            }
            if !first.is_ascii() {
                return Err("Delimiter must be ASCII".to_string());
            }
            Ok(first as u8)
        }
    }
}
