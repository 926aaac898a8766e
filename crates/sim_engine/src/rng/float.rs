//! Float types usable as sample storage.

use std::fmt;

use num_traits::Float;
use rand::Rng;
use rand_distr::{Distribution, StandardNormal};
use sim_core::Precision;

/// Floating-point type that samples can be drawn and stored in.
///
/// Implemented for `f32` ([`Precision::Single`]) and `f64`
/// ([`Precision::Double`]). Widening to `f64` is lossless for both, which
/// is what statistics accumulate in.
pub trait SampleFloat: Float + Into<f64> + fmt::Debug + fmt::Display + Send + Sync + 'static {
    /// Storage precision this type represents.
    const PRECISION: Precision;

    /// Draws one standard normal variate (mean 0, std 1).
    fn standard_normal<R: Rng + ?Sized>(rng: &mut R) -> Self;

    /// Narrows an `f64` parameter to this type.
    fn narrow(value: f64) -> Self;
}

impl SampleFloat for f32 {
    const PRECISION: Precision = Precision::Single;

    #[inline]
    fn standard_normal<R: Rng + ?Sized>(rng: &mut R) -> Self {
        StandardNormal.sample(rng)
    }

    #[inline]
    fn narrow(value: f64) -> Self {
        value as f32
    }
}

impl SampleFloat for f64 {
    const PRECISION: Precision = Precision::Double;

    #[inline]
    fn standard_normal<R: Rng + ?Sized>(rng: &mut R) -> Self {
        StandardNormal.sample(rng)
    }

    #[inline]
    fn narrow(value: f64) -> Self {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precision_constants() {
        assert_eq!(<f32 as SampleFloat>::PRECISION, Precision::Single);
        assert_eq!(<f64 as SampleFloat>::PRECISION, Precision::Double);
    }

    #[test]
    fn test_narrow() {
        assert_eq!(<f32 as SampleFloat>::narrow(0.5), 0.5_f32);
        assert_eq!(<f64 as SampleFloat>::narrow(0.1), 0.1_f64);
    }
}
