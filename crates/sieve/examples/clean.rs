//! Example: Clean and validate a tabular data file with Sieve.
//!
//! Usage:
//!   cargo run --example clean -- <file_path>
//!
//! Example:
//!   cargo run --example clean -- people.csv

use std::env;
use std::path::Path;

use sieve::output::cleaned_path;
use sieve::{write_dataset, CleaningConfig, OutputFormat, Sieve};

fn main() -> sieve::Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: cargo run --example clean -- <file_path>");
        eprintln!("\nExample:");
        eprintln!("  cargo run --example clean -- people.csv");
        std::process::exit(1);
    }

    let file_path = &args[1];
    let path = Path::new(file_path);

    if !path.exists() {
        eprintln!("Error: File not found: {}", file_path);
        std::process::exit(1);
    }

    let separator = "=".repeat(80);
    println!("{}", separator);
    println!("Sieve: {}", file_path);
    println!("{}", separator);
    println!();

    let outcome = Sieve::new().clean_file(path, CleaningConfig::all())?;
    let report = &outcome.result.report;

    let source = &outcome.source;
    println!("Source: {} ({}, {})", source.file, source.format, source.hash);
    println!(
        "Shape: {} x {} -> {} x {}",
        report.input_rows, report.input_columns, report.output_rows, report.output_columns
    );
    println!();

    println!("STAGES");
    println!("{}", "-".repeat(40));
    for stage in &report.stages {
        println!(
            "  {:24} -{} rows, -{} columns",
            stage.stage.description(),
            stage.rows_removed(),
            stage.columns_removed()
        );
    }
    println!();

    println!("ISSUES ({})", outcome.summary.total);
    println!("{}", "-".repeat(40));
    for (kind, count) in &outcome.summary.by_kind {
        println!("  {:28} {}", kind, count);
    }
    for issue in outcome.result.issues.iter().take(10) {
        println!(
            "  row {} [{}] {:?}: {}",
            issue.row,
            issue.column,
            issue.value.as_text(),
            issue.suggestion.as_deref().unwrap_or(issue.issue.as_str())
        );
    }
    println!();

    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let output = cleaned_path(path, dir, OutputFormat::Csv);
    write_dataset(&outcome.result.dataset, OutputFormat::Csv, &output)?;
    println!("Cleaned data written to {}", output.display());

    Ok(())
}
