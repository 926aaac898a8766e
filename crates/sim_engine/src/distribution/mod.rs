//! Parametric laws and cached samplers.
//!
//! A [`Law`] knows how to fill a buffer with draws. A [`CachedSampler`]
//! wraps a law with a fixed-capacity prefetch block so that per-call
//! sampling only slices already-generated values.
//!
//! # Architecture
//!
//! ```text
//! CachedSampler<L>
//! ├── L: Law                 (parameters + fill strategy)
//! └── SampleCache<L::Value>  (one preallocated block + read cursor)
//! ```
//!
//! All dispatch is static; the engine holds a `Vec<CachedSampler<NormalLaw<T>>>`.

mod cached;
mod normal;

pub use cached::{CachedSampler, SampleCache};
pub use normal::NormalLaw;

use crate::rng::{SampleFloat, SimRng};

/// A parametric probability law.
pub trait Law {
    /// Storage type of the draws.
    type Value: SampleFloat;

    /// Overwrites every element of `buffer` with an independent draw.
    fn fill(&self, rng: &mut SimRng, buffer: &mut [Self::Value]);
}
