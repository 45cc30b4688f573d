//! CLI argument definitions using clap.

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

use sieve::OutputFormat;

/// Sieve: clean tabular data and flag suspicious cells
#[derive(Parser)]
#[command(name = "sieve")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Clean a data file and write the result next to it
    Clean {
        /// Path to the data file (CSV/TSV/JSON/XLSX)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Directory for the cleaned file (default: the input's directory)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Output format (csv, tsv, json, xlsx)
        #[arg(short, long, default_value = "csv", value_parser = parse_output_format)]
        format: OutputFormat,

        /// JSON file with cleaning flags
        #[arg(short, long, value_name = "FLAGS_JSON")]
        config: Option<PathBuf>,

        #[command(flatten)]
        flags: StageFlags,

        /// Enable every flag not set explicitly or in the config file
        #[arg(long)]
        all: bool,

        /// Write the issue list to this JSON file
        #[arg(long, value_name = "PATH")]
        issues: Option<PathBuf>,

        /// Print the outcome as JSON
        #[arg(long)]
        json: bool,
    },

    /// Validate a data file without cleaning it
    Validate {
        /// Path to the data file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,

        /// Maximum number of issues to list
        #[arg(short, long, default_value = "50")]
        limit: usize,
    },

    /// Show a profile of a data file
    Inspect {
        /// Path to the data file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Number of preview rows
        #[arg(short, long, default_value = "5")]
        rows: usize,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Per-stage flags. Unset flags fall back to the config file, then `--all`.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct StageFlags {
    /// Drop duplicate rows
    #[arg(long, value_name = "BOOL")]
    pub remove_duplicates: Option<bool>,

    /// Drop rows with no content
    #[arg(long, value_name = "BOOL")]
    pub remove_empty_rows: Option<bool>,

    /// Drop columns with no content
    #[arg(long, value_name = "BOOL")]
    pub remove_empty_columns: Option<bool>,

    /// Trim surrounding whitespace from text cells
    #[arg(long, value_name = "BOOL")]
    pub trim_whitespace: Option<bool>,

    /// Validate the cleaned data
    #[arg(long, value_name = "BOOL")]
    pub check_validate: Option<bool>,
}

fn parse_output_format(s: &str) -> Result<OutputFormat, String> {
    s.parse::<OutputFormat>().map_err(|e| e.to_string())
}
