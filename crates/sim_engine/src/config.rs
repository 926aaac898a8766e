//! Simulation configuration.
//!
//! [`SimulationConfig`] is created once at startup through
//! [`SimulationConfigBuilder`] and is read-only afterwards.

use sim_core::Precision;

use crate::error::ConfigError;

/// Maximum number of simulations allowed.
pub const MAX_SIMULATIONS: usize = 100_000_000;

/// Maximum number of simulated variables allowed.
pub const MAX_VARIABLES: usize = 1_024;

/// Maximum per-variable sample cache size allowed.
pub const MAX_CACHE_SIZE: usize = 100_000_000;

/// Default simulation count.
pub const DEFAULT_SIMULATIONS: usize = 100_000;

/// Default batch size.
pub const DEFAULT_BATCH_SIZE: usize = 1_000;

/// Default number of variables.
pub const DEFAULT_VARIABLES: usize = 4;

/// Default confidence level.
pub const DEFAULT_CONFIDENCE_LEVEL: f64 = 0.95;

/// Default advisory memory budget (1 GiB).
pub const DEFAULT_MEMORY_LIMIT_BYTES: usize = 1 << 30;

/// Default seed.
pub const DEFAULT_SEED: u64 = 42;

/// Default per-variable sample cache size.
pub const DEFAULT_CACHE_SIZE: usize = 10_000;

/// Default worker pool cap.
pub const DEFAULT_MAX_WORKERS: usize = 4;

/// Default progress logging interval in batches.
pub const DEFAULT_LOG_INTERVAL: usize = 10;

/// Batched simulation configuration.
///
/// Immutable configuration; use [`SimulationConfig::builder`] to construct.
///
/// `confidence_level` is carried for reporting only, and `memory_limit_bytes`
/// is advisory: exceeding it logs a warning but never stops a run.
///
/// # Examples
///
/// ```rust
/// use sim_engine::config::SimulationConfig;
/// use sim_core::Precision;
///
/// let config = SimulationConfig::builder()
///     .n_simulations(40_000)
///     .batch_size(1_000)
///     .n_variables(4)
///     .precision(Precision::Single)
///     .seed(42)
///     .build()
///     .expect("valid configuration");
///
/// assert_eq!(config.n_batches(), 40);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct SimulationConfig {
    n_simulations: usize,
    batch_size: usize,
    n_variables: usize,
    confidence_level: f64,
    memory_limit_bytes: usize,
    precision: Precision,
    seed: u64,
    cache_size: usize,
    max_workers: usize,
    log_interval: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            n_simulations: DEFAULT_SIMULATIONS,
            batch_size: DEFAULT_BATCH_SIZE,
            n_variables: DEFAULT_VARIABLES,
            confidence_level: DEFAULT_CONFIDENCE_LEVEL,
            memory_limit_bytes: DEFAULT_MEMORY_LIMIT_BYTES,
            precision: Precision::Single,
            seed: DEFAULT_SEED,
            cache_size: DEFAULT_CACHE_SIZE,
            max_workers: DEFAULT_MAX_WORKERS,
            log_interval: DEFAULT_LOG_INTERVAL,
        }
    }
}

impl SimulationConfig {
    /// Creates a new configuration builder seeded with defaults.
    #[inline]
    pub fn builder() -> SimulationConfigBuilder {
        SimulationConfigBuilder::default()
    }

    /// Total number of simulated samples per variable.
    #[inline]
    pub fn n_simulations(&self) -> usize {
        self.n_simulations
    }

    /// Rows per batch.
    #[inline]
    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Number of simulated variables (batch columns).
    #[inline]
    pub fn n_variables(&self) -> usize {
        self.n_variables
    }

    /// Target confidence level.
    #[inline]
    pub fn confidence_level(&self) -> f64 {
        self.confidence_level
    }

    /// Advisory memory budget in bytes.
    #[inline]
    pub fn memory_limit_bytes(&self) -> usize {
        self.memory_limit_bytes
    }

    /// Storage precision of samples.
    #[inline]
    pub fn precision(&self) -> Precision {
        self.precision
    }

    /// Seed of the shared generator.
    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Number of draws each sampler prefetches per refill.
    #[inline]
    pub fn cache_size(&self) -> usize {
        self.cache_size
    }

    /// Worker pool cap.
    #[inline]
    pub fn max_workers(&self) -> usize {
        self.max_workers
    }

    /// Progress is logged every `log_interval` batches.
    #[inline]
    pub fn log_interval(&self) -> usize {
        self.log_interval
    }

    /// Number of full batches: `floor(n_simulations / batch_size)`.
    ///
    /// Trailing simulations that do not fill a batch are not run.
    #[inline]
    pub fn n_batches(&self) -> usize {
        self.n_simulations / self.batch_size
    }

    /// Estimated resident bytes for one batch buffer plus all sample caches.
    pub fn estimated_memory_bytes(&self) -> usize {
        let batch = self.batch_size.saturating_mul(self.n_variables);
        let caches = self.cache_size.saturating_mul(self.n_variables);
        batch
            .saturating_add(caches)
            .saturating_mul(self.precision.bytes_per_value())
    }

    /// Returns `true` if the estimate exceeds the advisory budget.
    #[inline]
    pub fn exceeds_memory_limit(&self) -> bool {
        self.estimated_memory_bytes() > self.memory_limit_bytes
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - `n_simulations` is 0 or greater than 100,000,000
    /// - `batch_size` is 0 or greater than `n_simulations`
    /// - `n_variables` is 0 or greater than 1,024
    /// - `confidence_level` is not strictly between 0 and 1
    /// - `cache_size` is 0 or greater than 100,000,000
    /// - `max_workers` or `log_interval` is 0
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.n_simulations == 0 || self.n_simulations > MAX_SIMULATIONS {
            return Err(ConfigError::InvalidSimulationCount(self.n_simulations));
        }
        if self.batch_size == 0 || self.batch_size > self.n_simulations {
            return Err(ConfigError::InvalidBatchSize {
                batch_size: self.batch_size,
                n_simulations: self.n_simulations,
            });
        }
        if self.n_variables == 0 || self.n_variables > MAX_VARIABLES {
            return Err(ConfigError::InvalidVariableCount(self.n_variables));
        }
        if !(self.confidence_level > 0.0 && self.confidence_level < 1.0) {
            return Err(ConfigError::InvalidConfidenceLevel(self.confidence_level));
        }
        if self.cache_size == 0 {
            return Err(ConfigError::InvalidParameter {
                name: "cache_size",
                value: "must be at least 1".to_string(),
            });
        }
        if self.cache_size > MAX_CACHE_SIZE {
            return Err(ConfigError::InvalidParameter {
                name: "cache_size",
                value: format!("{} exceeds maximum {}", self.cache_size, MAX_CACHE_SIZE),
            });
        }
        if self.max_workers == 0 {
            return Err(ConfigError::InvalidParameter {
                name: "max_workers",
                value: "must be at least 1".to_string(),
            });
        }
        if self.log_interval == 0 {
            return Err(ConfigError::InvalidParameter {
                name: "log_interval",
                value: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

/// Builder for [`SimulationConfig`].
///
/// Unset fields keep their defaults; validation happens in [`build`](Self::build).
#[derive(Clone, Debug, Default)]
pub struct SimulationConfigBuilder {
    config: SimulationConfig,
}

impl SimulationConfigBuilder {
    /// Sets the total simulation count.
    #[inline]
    pub fn n_simulations(mut self, n_simulations: usize) -> Self {
        self.config.n_simulations = n_simulations;
        self
    }

    /// Sets the batch size.
    #[inline]
    pub fn batch_size(mut self, batch_size: usize) -> Self {
        self.config.batch_size = batch_size;
        self
    }

    /// Sets the number of variables.
    #[inline]
    pub fn n_variables(mut self, n_variables: usize) -> Self {
        self.config.n_variables = n_variables;
        self
    }

    /// Sets the confidence level.
    #[inline]
    pub fn confidence_level(mut self, confidence_level: f64) -> Self {
        self.config.confidence_level = confidence_level;
        self
    }

    /// Sets the advisory memory budget in bytes.
    #[inline]
    pub fn memory_limit_bytes(mut self, memory_limit_bytes: usize) -> Self {
        self.config.memory_limit_bytes = memory_limit_bytes;
        self
    }

    /// Sets the storage precision.
    #[inline]
    pub fn precision(mut self, precision: Precision) -> Self {
        self.config.precision = precision;
        self
    }

    /// Sets the seed of the shared generator.
    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    /// Sets the per-variable sample cache size.
    #[inline]
    pub fn cache_size(mut self, cache_size: usize) -> Self {
        self.config.cache_size = cache_size;
        self
    }

    /// Sets the worker pool cap.
    #[inline]
    pub fn max_workers(mut self, max_workers: usize) -> Self {
        self.config.max_workers = max_workers;
        self
    }

    /// Sets the progress logging interval in batches.
    #[inline]
    pub fn log_interval(mut self, log_interval: usize) -> Self {
        self.config.log_interval = log_interval;
        self
    }

    /// Builds and validates the configuration.
    ///
    /// # Errors
    ///
    /// See [`SimulationConfig::validate`].
    pub fn build(self) -> Result<SimulationConfig, ConfigError> {
        self.config.validate()?;
        Ok(self.config)
    }
}
