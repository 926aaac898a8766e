//! Descriptive statistics over sample buffers.
//!
//! Batch reductions use population statistics (divisor `n`), matching the
//! conventional `mean`/`std`/`var` reductions of array libraries. Values of
//! any storage precision are widened to `f64` before accumulation.
//!
//! # Algorithms
//!
//! - **Variance/StdDev**: Welford's online algorithm.
//!   Reference: Welford (1962), "Note on a Method for Calculating
//!   Corrected Sums of Squares and Products", *Technometrics* 4(3).

/// First and second moments of a sample.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Moments {
    /// Arithmetic mean.
    pub mean: f64,
    /// Population variance (divisor `n`).
    pub variance: f64,
    /// Population standard deviation.
    pub std_dev: f64,
}

impl Moments {
    /// Computes population moments of `data`.
    ///
    /// Returns `None` if `data` is empty. Non-finite inputs propagate into
    /// the result rather than being filtered.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sim_core::stats::Moments;
    ///
    /// let m = Moments::from_slice(&[2.0_f32, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
    /// assert!((m.mean - 5.0).abs() < 1e-12);
    /// assert!((m.variance - 4.0).abs() < 1e-12);
    /// assert!((m.std_dev - 2.0).abs() < 1e-12);
    /// ```
    pub fn from_slice<T>(data: &[T]) -> Option<Self>
    where
        T: Copy + Into<f64>,
    {
        if data.is_empty() {
            return None;
        }

        let mut mean = 0.0_f64;
        let mut m2 = 0.0_f64;
        for (i, &value) in data.iter().enumerate() {
            let x: f64 = value.into();
            let delta = x - mean;
            mean += delta / (i + 1) as f64;
            m2 += delta * (x - mean);
        }

        let variance = m2 / data.len() as f64;
        Some(Self {
            mean,
            variance,
            std_dev: variance.sqrt(),
        })
    }
}

/// Arithmetic mean of `data`, or `None` if empty.
pub fn mean(data: &[f64]) -> Option<f64> {
    if data.is_empty() {
        return None;
    }
    Some(data.iter().sum::<f64>() / data.len() as f64)
}

/// Smallest value of `data`, or `None` if empty.
pub fn min(data: &[f64]) -> Option<f64> {
    data.iter().copied().reduce(f64::min)
}

/// Largest value of `data`, or `None` if empty.
pub fn max(data: &[f64]) -> Option<f64> {
    data.iter().copied().reduce(f64::max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_moments_empty() {
        assert!(Moments::from_slice::<f64>(&[]).is_none());
    }

    #[test]
    fn test_moments_single_value() {
        let m = Moments::from_slice(&[3.5_f64]).unwrap();
        assert_eq!(m.mean, 3.5);
        assert_eq!(m.variance, 0.0);
        assert_eq!(m.std_dev, 0.0);
    }

    #[test]
    fn test_moments_population_divisor() {
        // Sample variance would be 2.5; population variance is 2.0
        let m = Moments::from_slice(&[1.0_f64, 2.0, 3.0, 4.0, 5.0]).unwrap();
        assert_relative_eq!(m.mean, 3.0, epsilon = 1e-12);
        assert_relative_eq!(m.variance, 2.0, epsilon = 1e-12);
        assert_relative_eq!(m.std_dev, 2.0_f64.sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn test_moments_f32_input_widened() {
        let data: Vec<f32> = (0..1000).map(|i| i as f32 * 0.1).collect();
        let m = Moments::from_slice(&data).unwrap();
        assert_relative_eq!(m.mean, 49.95, epsilon = 1e-4);
        assert!(m.std_dev.is_finite());
    }

    #[test]
    fn test_moments_propagates_nan() {
        let m = Moments::from_slice(&[1.0_f64, f64::NAN, 3.0]).unwrap();
        assert!(m.mean.is_nan());
        assert!(m.variance.is_nan());
    }

    #[test]
    fn test_mean_min_max() {
        let data = [4.0, -1.0, 2.5, 7.0];
        assert_relative_eq!(mean(&data).unwrap(), 3.125);
        assert_eq!(min(&data), Some(-1.0));
        assert_eq!(max(&data), Some(7.0));

        assert_eq!(mean(&[]), None);
        assert_eq!(min(&[]), None);
        assert_eq!(max(&[]), None);
    }
}
