//! Batched simulation engine.
//!
//! # Overview
//!
//! [`SimulationEngine`] coordinates:
//! 1. Law parameterisation from the shared generator (at construction)
//! 2. Batch sampling into a reusable [`BatchBuffer`]
//! 3. Per-batch reduction to [`BatchMetrics`]
//!
//! # Execution Model
//!
//! A run executes inside a bounded `rayon` pool of `max_workers` threads,
//! which caps the resources a run may claim. The batch loop itself is
//! sequential: every sampler draws from one shared generator, and drawing
//! in batch-index order is what makes a seed reproduce a run exactly.
//! Results are therefore always in batch-index order.
//!
//! # Examples
//!
//! ```rust
//! use sim_engine::config::SimulationConfig;
//! use sim_engine::engine::SimulationEngine;
//!
//! let config = SimulationConfig::builder()
//!     .n_simulations(4_000)
//!     .batch_size(1_000)
//!     .n_variables(4)
//!     .seed(42)
//!     .build()
//!     .unwrap();
//!
//! let mut engine = SimulationEngine::<f32>::new(config).unwrap();
//! let results = engine.run().unwrap();
//!
//! assert_eq!(results.len(), 4);
//! assert!(results.iter().all(|m| m.is_finite()));
//! ```

mod batch;
mod metrics;

pub use batch::BatchBuffer;
pub use metrics::BatchMetrics;

use sim_core::Moments;
use tracing::{debug, info, warn};

use crate::config::SimulationConfig;
use crate::distribution::{CachedSampler, NormalLaw};
use crate::error::{ConfigError, Result, SimulationError};
use crate::rng::{SampleFloat, SimRng};

/// Range `[low, high)` each variable's mean is drawn from.
pub const MEAN_RANGE: (f64, f64) = (-1.0, 1.0);

/// Range `[low, high)` each variable's standard deviation is drawn from.
pub const STD_DEV_RANGE: (f64, f64) = (0.5, 2.0);

/// Sampler type used for every simulated variable.
pub type VariableSampler<T> = CachedSampler<NormalLaw<T>>;

/// Batched Monte Carlo simulation engine.
///
/// Owns the configuration, the single shared generator, one cached normal
/// sampler per variable, and the batch buffer reused across batches.
///
/// # Type Parameters
///
/// * `T` - Sample storage type; must match `config.precision()`
pub struct SimulationEngine<T: SampleFloat> {
    config: SimulationConfig,
    rng: SimRng,
    samplers: Vec<VariableSampler<T>>,
    batch: BatchBuffer<T>,
}

impl<T: SampleFloat> SimulationEngine<T> {
    /// Creates an engine from a validated configuration.
    ///
    /// The generator is seeded from `config.seed()`. For each variable in
    /// order, a mean is drawn from [`MEAN_RANGE`] and then a standard
    /// deviation from [`STD_DEV_RANGE`].
    ///
    /// # Errors
    ///
    /// - [`ConfigError::PrecisionMismatch`] if `T` does not match the configured precision
    /// - Any validation error of the configuration
    /// - [`DistributionError`](crate::error::DistributionError) from sampler construction
    pub fn new(config: SimulationConfig) -> Result<Self> {
        config.validate()?;

        if config.precision() != T::PRECISION {
            return Err(ConfigError::PrecisionMismatch {
                configured: config.precision(),
                engine: T::PRECISION,
            }
            .into());
        }

        if config.exceeds_memory_limit() {
            warn!(
                estimated_bytes = config.estimated_memory_bytes(),
                limit_bytes = config.memory_limit_bytes(),
                "Estimated memory exceeds advisory budget"
            );
        }

        let mut rng = SimRng::from_seed(config.seed());
        let mut samplers = Vec::with_capacity(config.n_variables());
        for variable in 0..config.n_variables() {
            let mean = rng.gen_uniform_range(MEAN_RANGE.0, MEAN_RANGE.1);
            let std_dev = rng.gen_uniform_range(STD_DEV_RANGE.0, STD_DEV_RANGE.1);
            debug!(variable, mean, std_dev, "Parameterised variable");

            let law = NormalLaw::new(mean, std_dev)?;
            samplers.push(CachedSampler::new(law, config.cache_size())?);
        }

        let batch = BatchBuffer::new(config.batch_size(), config.n_variables());

        Ok(Self {
            config,
            rng,
            samplers,
            batch,
        })
    }

    /// Returns the configuration.
    #[inline]
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Returns the per-variable samplers, in column order.
    #[inline]
    pub fn samplers(&self) -> &[VariableSampler<T>] {
        &self.samplers
    }

    /// Number of batches a run produces.
    #[inline]
    pub fn n_batches(&self) -> usize {
        self.config.n_batches()
    }

    /// Samples one `batch_size × n_variables` batch.
    ///
    /// Column `j` is filled from sampler `j`'s `sample(batch_size)`.
    ///
    /// # Errors
    ///
    /// [`SimulationError::ShortSample`] if any sampler returns fewer than
    /// `batch_size` values (only possible when `cache_size < batch_size`).
    pub fn sample_batch(&mut self) -> Result<&BatchBuffer<T>> {
        let batch_size = self.config.batch_size();
        self.batch.reset();

        for (variable, sampler) in self.samplers.iter_mut().enumerate() {
            let values = sampler.sample(&mut self.rng, batch_size);
            if values.len() < batch_size {
                return Err(SimulationError::ShortSample {
                    variable,
                    requested: batch_size,
                    returned: values.len(),
                });
            }
            self.batch.set_column(variable, values);
        }

        Ok(&self.batch)
    }

    /// Samples and reduces batch `index`.
    ///
    /// The batch buffer is reset as soon as its moments are computed.
    pub fn run_batch(&mut self, index: usize) -> Result<BatchMetrics> {
        let moments = Moments::from_slice(self.sample_batch()?.as_slice())
            .ok_or(SimulationError::EmptyBatch(index))?;
        self.batch.reset();
        Ok(BatchMetrics::from_moments(index, moments))
    }

    /// Runs all batches and returns their metrics in batch-index order.
    ///
    /// # Errors
    ///
    /// The first error aborts the run; no partial results are returned.
    pub fn run(&mut self) -> Result<Vec<BatchMetrics>> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.config.max_workers())
            .thread_name(|i| format!("sim-worker-{}", i))
            .build()?;

        let n_batches = self.n_batches();
        info!(
            n_batches,
            batch_size = self.config.batch_size(),
            n_variables = self.config.n_variables(),
            precision = %T::PRECISION,
            seed = self.config.seed(),
            max_workers = self.config.max_workers(),
            "Starting simulation"
        );

        let results = pool.install(|| self.run_batches(n_batches))?;

        info!(n_batches = results.len(), "Simulation complete");
        Ok(results)
    }

    fn run_batches(&mut self, n_batches: usize) -> Result<Vec<BatchMetrics>> {
        let log_interval = self.config.log_interval();
        let mut results = Vec::with_capacity(n_batches);

        for index in 0..n_batches {
            let metrics = self.run_batch(index)?;
            if index % log_interval == 0 {
                info!(
                    batch = index,
                    total = n_batches,
                    mean = metrics.mean,
                    std = metrics.std,
                    "Processed batch"
                );
            }
            results.push(metrics);
        }

        Ok(results)
    }
}
