//! Prefetching sample cache and the sampler built on it.
//!
//! # Refill Policy
//!
//! A request for `size` draws refills the cache when it has never been
//! filled or when fewer than `size` values remain. A refill always
//! generates exactly `capacity` draws, overwriting the whole block, and
//! resets the read cursor. A request is then served from the front of the
//! remaining values and those values are consumed.
//!
//! Consequences worth knowing:
//! - A cache with at least `size` values left is reused no matter how long
//!   ago it was generated.
//! - A request for more than `capacity` draws is served with only
//!   `capacity` values. Callers that need an exact count must check the
//!   returned length.
//!
//! # Memory
//!
//! The block is allocated once at construction. Refills overwrite it in
//! place and sampling hands out borrowed slices, so steady-state sampling
//! performs no heap allocation.

use tracing::{trace, warn};

use super::Law;
use crate::error::DistributionError;
use crate::rng::{SampleFloat, SimRng};

/// Fixed-capacity block of pre-drawn samples with a read cursor.
///
/// # Examples
///
/// ```rust
/// use sim_engine::distribution::SampleCache;
///
/// let mut cache = SampleCache::<f32>::new(4).unwrap();
/// assert!(cache.needs_refill(1));
///
/// cache.refill_with(|block| block.copy_from_slice(&[1.0, 2.0, 3.0, 4.0]));
/// assert_eq!(cache.take(3), &[1.0, 2.0, 3.0]);
/// assert_eq!(cache.remaining(), 1);
/// assert!(cache.needs_refill(2));
/// ```
#[derive(Clone, Debug)]
pub struct SampleCache<T> {
    /// Preallocated block of `capacity` draws.
    block: Vec<T>,
    /// Index of the next unread value.
    cursor: usize,
    /// Whether the block has been filled at least once.
    primed: bool,
    /// Number of refills performed.
    refills: usize,
}

impl<T: SampleFloat> SampleCache<T> {
    /// Allocates an unfilled cache holding `capacity` draws.
    ///
    /// # Errors
    ///
    /// [`DistributionError::InvalidCacheSize`] if `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self, DistributionError> {
        if capacity == 0 {
            return Err(DistributionError::InvalidCacheSize);
        }
        Ok(Self {
            block: vec![T::zero(); capacity],
            cursor: 0,
            primed: false,
            refills: 0,
        })
    }

    /// Number of draws generated per refill.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.block.len()
    }

    /// Unread values left in the block (0 before the first refill).
    #[inline]
    pub fn remaining(&self) -> usize {
        if self.primed {
            self.block.len() - self.cursor
        } else {
            0
        }
    }

    /// Whether the block has been filled at least once.
    #[inline]
    pub fn is_primed(&self) -> bool {
        self.primed
    }

    /// Number of refills performed so far.
    #[inline]
    pub fn refills(&self) -> usize {
        self.refills
    }

    /// Whether a request for `size` values must refill first.
    #[inline]
    pub fn needs_refill(&self, size: usize) -> bool {
        !self.primed || self.remaining() < size
    }

    /// Overwrites the whole block via `fill` and rewinds the cursor.
    pub fn refill_with<F>(&mut self, fill: F)
    where
        F: FnOnce(&mut [T]),
    {
        fill(&mut self.block);
        self.cursor = 0;
        self.primed = true;
        self.refills += 1;
    }

    /// Consumes and returns up to `size` values from the front of the
    /// remaining block.
    pub fn take(&mut self, size: usize) -> &[T] {
        let n = size.min(self.remaining());
        let start = self.cursor;
        self.cursor += n;
        &self.block[start..self.cursor]
    }
}

/// A law wrapped with a prefetching sample cache.
///
/// # Examples
///
/// ```rust
/// use sim_engine::distribution::{CachedSampler, NormalLaw};
/// use sim_engine::rng::SimRng;
///
/// let mut rng = SimRng::from_seed(42);
/// let law = NormalLaw::<f32>::new(0.0, 1.0).unwrap();
/// let mut sampler = CachedSampler::new(law, 10_000).unwrap();
///
/// let batch = sampler.sample(&mut rng, 1_000);
/// assert_eq!(batch.len(), 1_000);
/// assert_eq!(sampler.remaining(), 9_000);
/// ```
#[derive(Clone, Debug)]
pub struct CachedSampler<L: Law> {
    law: L,
    cache: SampleCache<L::Value>,
}

impl<L: Law> CachedSampler<L> {
    /// Wraps `law` with a cache of `cache_size` draws.
    ///
    /// # Errors
    ///
    /// [`DistributionError::InvalidCacheSize`] if `cache_size` is zero.
    pub fn new(law: L, cache_size: usize) -> Result<Self, DistributionError> {
        Ok(Self {
            law,
            cache: SampleCache::new(cache_size)?,
        })
    }

    /// Returns up to `size` draws, refilling the cache first if needed.
    ///
    /// Exactly `size` values are returned whenever `size <= cache_size`.
    /// Larger requests yield `cache_size` values; see the module docs.
    pub fn sample(&mut self, rng: &mut SimRng, size: usize) -> &[L::Value] {
        if self.cache.needs_refill(size) {
            let law = &self.law;
            self.cache.refill_with(|block| law.fill(rng, block));
            trace!(
                capacity = self.cache.capacity(),
                refills = self.cache.refills(),
                "Refilled sample cache"
            );
        }
        if size > self.cache.capacity() {
            warn!(
                requested = size,
                capacity = self.cache.capacity(),
                "Sample request exceeds cache capacity; returning a short sample"
            );
        }
        self.cache.take(size)
    }

    /// The wrapped law.
    #[inline]
    pub fn law(&self) -> &L {
        &self.law
    }

    /// Number of draws generated per refill.
    #[inline]
    pub fn cache_size(&self) -> usize {
        self.cache.capacity()
    }

    /// Unread cached values.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.cache.remaining()
    }

    /// Number of refills performed so far.
    #[inline]
    pub fn refills(&self) -> usize {
        self.cache.refills()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distribution::NormalLaw;

    fn sampler(cache_size: usize) -> CachedSampler<NormalLaw<f32>> {
        CachedSampler::new(NormalLaw::new(0.0, 1.0).unwrap(), cache_size).unwrap()
    }

    #[test]
    fn test_zero_capacity_rejected() {
        assert_eq!(
            SampleCache::<f32>::new(0).unwrap_err(),
            DistributionError::InvalidCacheSize
        );
    }

    #[test]
    fn test_fresh_sample_exact_length() {
        let mut rng = SimRng::from_seed(42);
        let mut s = sampler(100);

        assert_eq!(s.sample(&mut rng, 100).len(), 100);
        assert_eq!(s.remaining(), 0);
        assert_eq!(s.refills(), 1);
    }

    #[test]
    fn test_cache_shrinks_then_refills() {
        let mut rng = SimRng::from_seed(42);
        let mut s = sampler(100);

        s.sample(&mut rng, 30);
        assert_eq!(s.remaining(), 70);
        s.sample(&mut rng, 30);
        s.sample(&mut rng, 30);
        assert_eq!(s.remaining(), 10);
        assert_eq!(s.refills(), 1);

        // 10 left, 30 requested: whole block regenerated, leftovers discarded
        assert_eq!(s.sample(&mut rng, 30).len(), 30);
        assert_eq!(s.refills(), 2);
        assert_eq!(s.remaining(), 70);
    }

    #[test]
    fn test_stale_cache_reused_when_large_enough() {
        let mut rng = SimRng::from_seed(42);
        let mut s = sampler(100);

        let first: Vec<f32> = s.sample(&mut rng, 40).to_vec();
        let second: Vec<f32> = s.sample(&mut rng, 60).to_vec();

        assert_eq!(s.refills(), 1);
        assert_ne!(first, second);
    }

    #[test]
    fn test_consumed_prefix_not_returned_again() {
        let mut cache = SampleCache::<f64>::new(6).unwrap();
        cache.refill_with(|block| {
            for (i, v) in block.iter_mut().enumerate() {
                *v = i as f64;
            }
        });

        assert_eq!(cache.take(2), &[0.0, 1.0]);
        assert_eq!(cache.take(2), &[2.0, 3.0]);
        assert_eq!(cache.take(5), &[4.0, 5.0]);
        assert!(cache.take(1).is_empty());
        assert!(cache.needs_refill(1));
    }

    #[test]
    fn test_oversized_request_returns_short_sample() {
        // Requests beyond the cache capacity are served with one full block only.
        let mut rng = SimRng::from_seed(42);
        let mut s = sampler(50);

        let out = s.sample(&mut rng, 80);
        assert_eq!(out.len(), 50);
        assert_eq!(s.remaining(), 0);
    }

    #[test]
    fn test_zero_size_request_primes_cache() {
        let mut rng = SimRng::from_seed(42);
        let mut s = sampler(10);

        assert!(s.sample(&mut rng, 0).is_empty());
        assert_eq!(s.refills(), 1);
        assert_eq!(s.remaining(), 10);
    }

    #[test]
    fn test_same_seed_same_samples() {
        let mut rng_a = SimRng::from_seed(42);
        let mut rng_b = SimRng::from_seed(42);
        let mut a = sampler(64);
        let mut b = sampler(64);

        for size in [10, 20, 40, 64, 5] {
            assert_eq!(a.sample(&mut rng_a, size), b.sample(&mut rng_b, size));
        }
    }
}
