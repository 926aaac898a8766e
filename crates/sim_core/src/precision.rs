//! Numeric precision used for stored samples.
//!
//! Sample buffers dominate the memory footprint of a simulation run, so they
//! are stored in reduced precision (`f32`) by default. Statistics are always
//! accumulated in `f64` regardless of the storage precision.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::CoreError;

/// Floating-point precision of stored samples.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum Precision {
    /// 32-bit IEEE 754 (`f32`).
    #[default]
    Single,
    /// 64-bit IEEE 754 (`f64`).
    Double,
}

impl Precision {
    /// Returns the storage size of one value in bytes.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sim_core::Precision;
    ///
    /// assert_eq!(Precision::Single.bytes_per_value(), 4);
    /// assert_eq!(Precision::Double.bytes_per_value(), 8);
    /// ```
    #[inline]
    pub fn bytes_per_value(&self) -> usize {
        match self {
            Precision::Single => std::mem::size_of::<f32>(),
            Precision::Double => std::mem::size_of::<f64>(),
        }
    }

    /// Returns the canonical short name (`"f32"` or `"f64"`).
    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            Precision::Single => "f32",
            Precision::Double => "f64",
        }
    }
}

impl FromStr for Precision {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "f32" | "single" | "float32" => Ok(Precision::Single),
            "f64" | "double" | "float64" => Ok(Precision::Double),
            _ => Err(CoreError::InvalidPrecision(s.to_string())),
        }
    }
}

impl TryFrom<String> for Precision {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for Precision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precision_default_is_single() {
        assert_eq!(Precision::default(), Precision::Single);
    }

    #[test]
    fn test_precision_parsing() {
        assert_eq!("f32".parse::<Precision>().unwrap(), Precision::Single);
        assert_eq!("Single".parse::<Precision>().unwrap(), Precision::Single);
        assert_eq!("FLOAT64".parse::<Precision>().unwrap(), Precision::Double);
        assert_eq!(" double ".parse::<Precision>().unwrap(), Precision::Double);

        assert!(matches!(
            "f16".parse::<Precision>(),
            Err(CoreError::InvalidPrecision(_))
        ));
    }

    #[test]
    fn test_precision_display_roundtrips_through_parse() {
        for precision in [Precision::Single, Precision::Double] {
            assert_eq!(precision.to_string().parse::<Precision>().unwrap(), precision);
        }
    }

    #[test]
    fn test_precision_bytes() {
        assert_eq!(Precision::Single.bytes_per_value(), 4);
        assert_eq!(Precision::Double.bytes_per_value(), 8);
    }
}
