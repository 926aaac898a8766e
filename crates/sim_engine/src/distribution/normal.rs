//! Normal (Gaussian) law.

use super::Law;
use crate::error::DistributionError;
use crate::rng::{SampleFloat, SimRng};

/// Normal law `N(mean, std_dev²)` with parameters stored in precision `T`.
///
/// # Examples
///
/// ```rust
/// use sim_engine::distribution::NormalLaw;
///
/// let law = NormalLaw::<f32>::new(0.5, 1.5).unwrap();
/// assert_eq!(law.mean(), 0.5);
/// assert_eq!(law.std_dev(), 1.5);
///
/// assert!(NormalLaw::<f32>::new(0.0, -1.0).is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NormalLaw<T> {
    mean: T,
    std_dev: T,
}

impl<T: SampleFloat> NormalLaw<T> {
    /// Creates a normal law.
    ///
    /// # Errors
    ///
    /// - [`DistributionError::InvalidMean`] if `mean` is not finite
    /// - [`DistributionError::InvalidSpread`] if `std_dev` is negative or not finite
    pub fn new(mean: f64, std_dev: f64) -> Result<Self, DistributionError> {
        if !mean.is_finite() {
            return Err(DistributionError::InvalidMean(mean));
        }
        if !std_dev.is_finite() || std_dev < 0.0 {
            return Err(DistributionError::InvalidSpread(std_dev));
        }
        Ok(Self {
            mean: T::narrow(mean),
            std_dev: T::narrow(std_dev),
        })
    }

    /// Location parameter.
    #[inline]
    pub fn mean(&self) -> T {
        self.mean
    }

    /// Spread parameter.
    #[inline]
    pub fn std_dev(&self) -> T {
        self.std_dev
    }
}

impl<T: SampleFloat> Law for NormalLaw<T> {
    type Value = T;

    #[inline]
    fn fill(&self, rng: &mut SimRng, buffer: &mut [T]) {
        rng.fill_normal(buffer, self.mean, self.std_dev);
    }
}
