//! # sim_core: Numeric Foundation for Batched Simulation
//!
//! ## Foundation Layer Role
//!
//! sim_core is the bottom layer of the workspace, providing:
//! - Numeric precision selection (`precision`)
//! - Descriptive statistics over sample buffers (`stats`)
//! - Conditional element replacement over arrays (`array`)
//! - Error types (`error`)
//!
//! ## Zero Dependency Principle
//!
//! This crate has no dependencies on other workspace crates, with minimal
//! external dependencies:
//! - thiserror: Structured error types
//! - serde: Configuration deserialisation
//!
//! ## Usage Examples
//!
//! ```rust
//! use sim_core::array::{replace_where, Condition};
//! use sim_core::stats::Moments;
//!
//! let mut values = [1.0, 7.0, 3.0, 9.0];
//! let replaced = replace_where(&mut values, |v| Condition::GreaterThan(5.0).matches(*v), 0.0);
//! assert_eq!(replaced, 2);
//! assert_eq!(values, [1.0, 0.0, 3.0, 0.0]);
//!
//! let moments = Moments::from_slice(&values).unwrap();
//! assert!((moments.mean - 1.0).abs() < 1e-12);
//! ```

#![deny(missing_docs)]

pub mod array;
pub mod error;
pub mod precision;
pub mod stats;

pub use error::CoreError;
pub use precision::Precision;
pub use stats::Moments;
