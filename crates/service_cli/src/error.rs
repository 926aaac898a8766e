//! CLI error types.

use thiserror::Error;

/// Errors surfaced by `simctl` commands.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Invalid simulation configuration: {0}")]
    Config(#[from] sim_engine::ConfigError),

    #[error("Simulation failed: {0}")]
    Simulation(#[from] sim_engine::SimulationError),

    #[error(transparent)]
    Core(#[from] sim_core::CoreError),

    #[error("Configuration file error: {0}")]
    ConfigFile(String),

    #[error("Invalid environment variable {name}={value}")]
    InvalidEnv { name: String, value: String },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;
