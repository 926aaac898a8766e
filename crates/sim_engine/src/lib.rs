//! # sim_engine: Batched Monte Carlo Simulation (Kernel Layer)
//!
//! ## Kernel Layer Role
//!
//! sim_engine runs a reproducible batched simulation and summarises it:
//! - Seeded random number generation (`rng`)
//! - Parametric laws wrapped with prefetching sample caches (`distribution`)
//! - Immutable run configuration with validation (`config`)
//! - Batch sampling and per-batch reduction (`engine`)
//! - Aggregation and histogram rendering of batch results (`aggregate`)
//!
//! ## Pipeline
//!
//! ```text
//! SimulationConfig ──► SimulationEngine<T>
//!                      ├── SimRng (single shared generator)
//!                      ├── CachedSampler<NormalLaw<T>> × n_variables
//!                      └── BatchBuffer<T> (batch_size × n_variables)
//!                             │
//!                             ▼
//!                      Vec<BatchMetrics> ──► Aggregator
//!                                            ├── AggregateMetrics
//!                                            └── Histogram (batch means)
//! ```
//!
//! ## Usage Example
//!
//! ```rust
//! use sim_engine::aggregate::Aggregator;
//! use sim_engine::config::SimulationConfig;
//! use sim_engine::engine::SimulationEngine;
//!
//! let config = SimulationConfig::builder()
//!     .n_simulations(40_000)
//!     .batch_size(1_000)
//!     .seed(42)
//!     .build()
//!     .unwrap();
//!
//! let mut engine = SimulationEngine::<f32>::new(config).unwrap();
//! let results = engine.run().unwrap();
//! assert_eq!(results.len(), 40);
//!
//! let aggregator = Aggregator::default();
//! let summary = aggregator.compute_aggregate_metrics(&results).unwrap();
//! assert!(summary.min_value <= summary.overall_mean);
//! assert!(summary.overall_mean <= summary.max_value);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: derives `Serialize` for `BatchMetrics`, `AggregateMetrics`
//!   and histogram types

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod aggregate;
pub mod config;
pub mod distribution;
pub mod engine;
pub mod error;
pub mod rng;

// Re-export commonly used items for convenience
pub use aggregate::{compute_aggregate_metrics, AggregateMetrics, Aggregator, Histogram};
pub use config::{SimulationConfig, SimulationConfigBuilder};
pub use engine::{BatchMetrics, SimulationEngine};
pub use error::{ConfigError, DistributionError, SimulationError};
pub use rng::{SampleFloat, SimRng};
