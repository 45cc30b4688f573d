//! Sieve CLI - tabular data cleaning and validation.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Clean {
            file,
            output_dir,
            format,
            config,
            flags,
            all,
            issues,
            json,
        } => commands::clean::run(commands::clean::CleanArgs {
            file,
            output_dir,
            format,
            config,
            flags,
            all,
            issues,
            json,
        }),

        Commands::Validate { file, json, limit } => commands::validate::run(file, json, limit),

        Commands::Inspect { file, rows, json } => commands::inspect::run(file, rows, json),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
