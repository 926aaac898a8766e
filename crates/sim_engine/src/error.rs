//! Error types for the simulation engine.
//!
//! - [`ConfigError`]: invalid configuration detected at build time
//! - [`DistributionError`]: invalid law parameters or cache sizing
//! - [`SimulationError`]: anything that aborts a run
//!
//! There is no recovery path: any error returned from
//! [`SimulationEngine::run`](crate::engine::SimulationEngine::run) means the
//! whole run failed and no partial results are kept.

use sim_core::Precision;
use thiserror::Error;

/// Configuration error for the simulation engine.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ConfigError {
    /// Simulation count outside the valid range.
    #[error("Invalid simulation count {0}: must be in range [1, 100_000_000]")]
    InvalidSimulationCount(usize),

    /// Batch size zero or larger than the simulation count.
    #[error("Invalid batch size {batch_size}: must be in range [1, {n_simulations}]")]
    InvalidBatchSize {
        /// Requested batch size.
        batch_size: usize,
        /// Configured simulation count.
        n_simulations: usize,
    },

    /// Variable count outside the valid range.
    #[error("Invalid variable count {0}: must be in range [1, 1024]")]
    InvalidVariableCount(usize),

    /// Confidence level outside the open interval (0, 1).
    #[error("Invalid confidence level {0}: must be in (0, 1)")]
    InvalidConfidenceLevel(f64),

    /// Invalid parameter value with name and description.
    #[error("Invalid parameter '{name}': {value}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Description of the invalid value.
        value: String,
    },

    /// Engine float type does not match the configured precision.
    #[error("Precision mismatch: configuration requests {configured}, engine stores {engine}")]
    PrecisionMismatch {
        /// Precision named in the configuration.
        configured: Precision,
        /// Precision of the engine's storage type.
        engine: Precision,
    },
}

/// Error constructing a distribution or its sample cache.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum DistributionError {
    /// Location parameter is NaN or infinite.
    #[error("Invalid mean {0}: must be finite")]
    InvalidMean(f64),

    /// Spread parameter is negative, NaN or infinite.
    #[error("Invalid spread {0}: must be finite and non-negative")]
    InvalidSpread(f64),

    /// Cache must hold at least one draw.
    #[error("Invalid cache size 0: must be at least 1")]
    InvalidCacheSize,
}

/// Error aborting a simulation run.
#[derive(Debug, Error)]
pub enum SimulationError {
    /// Invalid configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Invalid distribution parameters.
    #[error(transparent)]
    Distribution(#[from] DistributionError),

    /// The bounded worker pool could not be created.
    #[error("Failed to build worker pool: {0}")]
    Pool(#[from] rayon::ThreadPoolBuildError),

    /// A sampler returned fewer values than a batch column needs.
    #[error("Variable {variable} returned {returned} samples, batch requires {requested}")]
    ShortSample {
        /// Index of the variable whose sampler came up short.
        variable: usize,
        /// Samples requested.
        requested: usize,
        /// Samples returned.
        returned: usize,
    },

    /// A batch reduction was attempted over no values.
    #[error("Batch {0} is empty")]
    EmptyBatch(usize),

    /// Aggregation was attempted over no batch results.
    #[error("Cannot aggregate an empty result list")]
    EmptyResults,
}

/// Result alias for simulation operations.
pub type Result<T> = std::result::Result<T, SimulationError>;
