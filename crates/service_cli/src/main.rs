//! simctl - Command Line Front End for Batched Monte Carlo Runs
//!
//! # Commands
//!
//! - `simctl run` - Run a batched simulation and summarise the batch means
//! - `simctl replace --values <list> --when <op:value> --with <value>` -
//!   Conditionally replace values in a list
//!
//! # Configuration
//!
//! `--config <file>` loads a TOML file; `SIMCTL_*` environment variables and
//! CLI flags override it in that order. `RUST_LOG` takes precedence over
//! `--log-level` for log filtering.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::{debug, error};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;
mod error;

pub use error::{CliError, Result};

use commands::run::RunArgs;
use config::{FileConfig, LogLevel};

/// Batched Monte Carlo simulation CLI
#[derive(Parser)]
#[command(name = "simctl")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output (debug logging)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "SIMCTL_CONFIG")]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, env = "SIMCTL_LOG_LEVEL")]
    log_level: Option<LogLevel>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a batched simulation
    Run(RunArgs),

    /// Replace values matching a condition
    Replace {
        /// Comma-separated values, e.g. 1,5,9
        #[arg(long, allow_hyphen_values = true)]
        values: String,

        /// Condition as <op>:<value> with op in gt, ge, lt, le, eq
        #[arg(long, allow_hyphen_values = true)]
        when: String,

        /// Replacement value
        #[arg(long, allow_hyphen_values = true)]
        with: f64,
    },
}

fn init_tracing(level: LogLevel) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_filter_str()));

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn execute(cli: Cli, file: FileConfig) -> Result<()> {
    match cli.command {
        Commands::Run(args) => commands::run::run(&args, &file.simulation),
        Commands::Replace { values, when, with } => commands::replace::run(&values, &when, with),
    }
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();

    // The file is read before tracing starts since it may set the log level.
    let file = match cli.config.as_deref().map(FileConfig::from_file).transpose() {
        Ok(file) => file.unwrap_or_default(),
        Err(e) => {
            eprintln!("Error: {}", e);
            return std::process::ExitCode::FAILURE;
        }
    };

    let level = match (cli.log_level, cli.verbose) {
        (Some(level), _) => level,
        (None, true) => LogLevel::Debug,
        (None, false) => file.log_level.unwrap_or_default(),
    };
    init_tracing(level);

    if let Some(path) = &cli.config {
        debug!("Loaded configuration from {}", path.display());
    }

    match execute(cli, file) {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            std::process::ExitCode::FAILURE
        }
    }
}
