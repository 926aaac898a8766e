//! # Random Number Generation
//!
//! Seeded random number generation for batched simulation.
//!
//! ## Design Rationale
//!
//! - **Reproducibility**: One generator, seeded once, shared by the engine and
//!   every sampler. The same seed always reproduces the same run.
//! - **Efficiency**: Batch draws fill caller-owned `&mut [T]` slices.
//! - **Precision**: Draws are produced directly in the storage precision via
//!   [`SampleFloat`], so `f32` runs never materialise `f64` buffers.
//!
//! ## Module Structure
//!
//! - `prng`: Seeded generator wrapper
//! - `float`: Storage float types that can be sampled
//!
//! ## Usage Example
//!
//! ```rust
//! use sim_engine::rng::SimRng;
//!
//! let mut rng = SimRng::from_seed(42);
//!
//! // Scalar from a uniform range
//! let spread = rng.gen_uniform_range(0.5, 2.0);
//! assert!((0.5..2.0).contains(&spread));
//!
//! // Batch generation into a pre-allocated buffer
//! let mut buffer = vec![0.0_f32; 1000];
//! rng.fill_normal(&mut buffer, 0.0, 1.0);
//! ```

mod float;
mod prng;

pub use float::SampleFloat;
pub use prng::SimRng;
