//! Per-batch summary statistics.

use sim_core::Moments;

#[cfg(feature = "serde")]
use serde::Serialize;

/// Summary statistics of one batch, flattened across all variables.
///
/// `std` and `var` are population statistics (divisor `n`).
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct BatchMetrics {
    /// Zero-based batch index.
    pub index: usize,
    /// Mean of all values in the batch.
    pub mean: f64,
    /// Standard deviation of all values in the batch.
    pub std: f64,
    /// Variance of all values in the batch.
    pub var: f64,
}

impl BatchMetrics {
    /// Builds metrics for batch `index` from its moments.
    #[inline]
    pub fn from_moments(index: usize, moments: Moments) -> Self {
        Self {
            index,
            mean: moments.mean,
            std: moments.std_dev,
            var: moments.variance,
        }
    }

    /// Returns `true` if mean, std and var are all finite.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.mean.is_finite() && self.std.is_finite() && self.var.is_finite()
    }
}
