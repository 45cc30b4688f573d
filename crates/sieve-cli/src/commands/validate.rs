//! Validate command - check every cell without cleaning.

use std::path::PathBuf;

use colored::Colorize;
use sieve::Sieve;

use super::print_issues;

pub fn run(file: PathBuf, json: bool, limit: usize) -> Result<(), Box<dyn std::error::Error>> {
    if !file.exists() {
        return Err(format!("File not found: {}", file.display()).into());
    }

    let outcome = Sieve::new().validate_file(&file)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
        return Ok(());
    }

    println!(
        "{} {} ({} rows, {} columns)",
        "Validated".cyan().bold(),
        file.display().to_string().white(),
        outcome.source.row_count,
        outcome.source.column_count
    );
    println!();
    print_issues(&outcome.issues, &outcome.summary, limit);

    Ok(())
}
