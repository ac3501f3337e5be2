mod commands;
mod config;
mod input;
mod logging;
mod output;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use serde::{Deserialize, Serialize};

use loan_calc_core::LoanCalculator;

use commands::batch::BatchArgs;
use commands::execute::ExecuteArgs;

/// Fixed-rate annuity loan calculations
#[derive(Parser)]
#[command(
    name = "loancalc",
    version,
    about = "Fixed-rate annuity loan calculations",
    long_about = "Computes monthly payment and total overpayment for a fixed-rate \
                  annuity loan under the base, military or salary program, and keeps \
                  every successful calculation in an in-process result log."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format (overrides the config file)
    #[arg(long, global = true)]
    output: Option<OutputFormat>,

    /// Path to a YAML config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Calculate a single loan
    Execute(ExecuteArgs),
    /// Calculate many loans concurrently and print the result log
    Batch(BatchArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();

    let (config, config_warning) = config::load(cli.config.as_deref());
    logging::init_logger(&config.log, cli.verbose);
    if let Some(warning) = config_warning {
        tracing::warn!("{warning}, using defaults");
    }

    let calculator = LoanCalculator::new();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Execute(args) => commands::execute::run_execute(args, &calculator),
        Commands::Batch(args) => commands::batch::run_batch(args, &calculator, config.batch.workers),
        Commands::Version => {
            println!("loancalc {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    let format = cli.output.unwrap_or(config.output.format);
    match result {
        Ok(value) => {
            output::format_output(&format, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
