//! Error types for the foundation layer.

use thiserror::Error;

/// Errors raised while parsing foundation-layer values.
///
/// # Examples
///
/// ```rust
/// use sim_core::CoreError;
///
/// let err = CoreError::InvalidPrecision("f16".to_string());
/// assert!(err.to_string().contains("f16"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// Unrecognised numeric precision name.
    #[error("Invalid precision '{0}': must be one of f32, f64")]
    InvalidPrecision(String),

    /// Unrecognised or malformed replacement condition.
    #[error("Invalid condition '{0}': expected <op>:<value> with op in gt, ge, lt, le, eq")]
    InvalidCondition(String),
}
