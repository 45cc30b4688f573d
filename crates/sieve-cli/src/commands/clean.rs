//! Clean command - run the cleaning pipeline and write the cleaned file.

use std::path::PathBuf;

use colored::Colorize;
use serde_json::json;
use sieve::output::{cleaned_path, write_dataset, write_issues};
use sieve::{CleaningOptions, OutputFormat, Sieve};

use super::print_issues;
use crate::cli::StageFlags;

/// Maximum number of issues listed on the console.
const CONSOLE_ISSUE_LIMIT: usize = 20;

pub struct CleanArgs {
    pub file: PathBuf,
    pub output_dir: Option<PathBuf>,
    pub format: OutputFormat,
    pub config: Option<PathBuf>,
    pub flags: StageFlags,
    pub all: bool,
    pub issues: Option<PathBuf>,
    pub json: bool,
}

impl From<StageFlags> for CleaningOptions {
    fn from(flags: StageFlags) -> Self {
        CleaningOptions {
            remove_duplicates: flags.remove_duplicates,
            remove_empty_rows: flags.remove_empty_rows,
            remove_empty_columns: flags.remove_empty_columns,
            trim_whitespace: flags.trim_whitespace,
            check_validate: flags.check_validate,
        }
    }
}

pub fn run(args: CleanArgs) -> Result<(), Box<dyn std::error::Error>> {
    if !args.file.exists() {
        return Err(format!("File not found: {}", args.file.display()).into());
    }

    // File flags first, explicit flags on top, then --all for the rest
    let mut options = match args.config {
        Some(ref path) => CleaningOptions::from_file(path)?,
        None => CleaningOptions::default(),
    };
    options = options.merge(args.flags.into());
    if args.all {
        options = options.fill(true);
    }
    let config = options.resolve()?;

    if !args.json {
        println!(
            "{} {}",
            "Cleaning".cyan().bold(),
            args.file.display().to_string().white()
        );
    }

    let outcome = Sieve::new().clean_file(&args.file, config)?;

    let output_dir = args.output_dir.unwrap_or_else(|| {
        args.file
            .parent()
            .map(PathBuf::from)
            .unwrap_or_default()
    });
    let output_path = cleaned_path(&args.file, &output_dir, args.format);
    write_dataset(&outcome.result.dataset, args.format, &output_path)?;

    if let Some(ref path) = args.issues {
        write_issues(&outcome.result.issues, path)?;
    }

    if args.json {
        let doc = json!({
            "source": outcome.source,
            "output": output_path,
            "report": outcome.result.report,
            "summary": outcome.summary,
            "issues": outcome.result.issues,
        });
        println!("{}", serde_json::to_string_pretty(&doc)?);
        return Ok(());
    }

    let report = &outcome.result.report;
    println!();
    for stage in &report.stages {
        println!(
            "  {:24} rows {:>6} → {:<6} columns {:>4} → {}",
            stage.stage.description(),
            stage.rows_before,
            stage.rows_after,
            stage.columns_before,
            stage.columns_after
        );
    }
    println!(
        "Rows: {} → {}, columns: {} → {}",
        report.input_rows.to_string().white(),
        report.output_rows.to_string().white().bold(),
        report.input_columns.to_string().white(),
        report.output_columns.to_string().white().bold()
    );

    if report.validated {
        println!();
        print_issues(&outcome.result.issues, &outcome.summary, CONSOLE_ISSUE_LIMIT);
    }

    println!();
    println!(
        "{} {}",
        "Saved to".green().bold(),
        output_path.display().to_string().white()
    );
    if let Some(path) = args.issues {
        println!(
            "{} {}",
            "Issues saved to".green().bold(),
            path.display().to_string().white()
        );
    }

    Ok(())
}
