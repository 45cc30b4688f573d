//! Inspect command - show shape, column categories and a preview.

use std::path::PathBuf;

use colored::Colorize;
use sieve::Sieve;

pub fn run(file: PathBuf, rows: usize, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    if !file.exists() {
        return Err(format!("File not found: {}", file.display()).into());
    }

    let outcome = Sieve::new().inspect_file(&file, rows)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
        return Ok(());
    }

    let source = &outcome.source;
    let profile = &outcome.profile;

    println!(
        "{} {} ({})",
        "File".cyan().bold(),
        source.file.white(),
        source.format
    );
    println!(
        "{} rows, {} columns, {} bytes",
        profile.row_count.to_string().white().bold(),
        profile.column_count.to_string().white().bold(),
        source.size_bytes
    );

    println!();
    println!("{}", "Columns:".yellow().bold());
    for col in &profile.columns {
        let kinds: Vec<String> = col
            .kinds
            .iter()
            .map(|(kind, count)| format!("{}={}", kind, count))
            .collect();
        let missing = if col.missing > 0 {
            col.missing.to_string().yellow()
        } else {
            col.missing.to_string().normal()
        };
        println!(
            "  {:24} {:12} missing {:>6}  {}",
            col.name,
            col.category.label(),
            missing,
            kinds.join(" ").dimmed()
        );
    }

    if profile.needs_cleaning() {
        println!();
        if !profile.empty_columns.is_empty() {
            println!(
                "{} empty columns: {}",
                "Note:".yellow(),
                profile.empty_columns.join(", ")
            );
        }
        if profile.blank_rows > 0 {
            println!("{} {} blank rows", "Note:".yellow(), profile.blank_rows);
        }
        if profile.duplicate_rows > 0 {
            println!(
                "{} {} duplicate rows",
                "Note:".yellow(),
                profile.duplicate_rows
            );
        }
    }

    if !profile.preview.is_empty() {
        println!();
        println!("{}", "Preview:".yellow().bold());
        for row in &profile.preview {
            let cells: Vec<String> = row
                .iter()
                .map(|(column, value)| format!("{}={}", column, value))
                .collect();
            println!("  {}", cells.join(", "));
        }
    }

    println!();
    println!(
        "Run {} to clean it",
        format!("sieve clean {} --all", file.display()).cyan().bold()
    );

    Ok(())
}
