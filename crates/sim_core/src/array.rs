//! Conditional element replacement over numeric arrays.
//!
//! The in-place variant [`replace_where`] overwrites matching entries and
//! reports how many were touched; [`replaced_where`] leaves its input intact
//! and returns a modified copy.
//!
//! # Example
//!
//! ```rust
//! use sim_core::array::{replaced_where, Condition};
//!
//! let cond: Condition<f64> = "lt:0".parse().unwrap();
//! let clipped = replaced_where(&[-2.0, 1.0, -0.5, 3.0], |v| cond.matches(*v), 0.0);
//! assert_eq!(clipped, vec![0.0, 1.0, 0.0, 3.0]);
//! ```

use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// Comparison predicate against a fixed threshold.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Condition<T> {
    /// `value > threshold`
    GreaterThan(T),
    /// `value >= threshold`
    GreaterOrEqual(T),
    /// `value < threshold`
    LessThan(T),
    /// `value <= threshold`
    LessOrEqual(T),
    /// `value == threshold`
    Equal(T),
}

impl<T: PartialOrd + Copy> Condition<T> {
    /// Returns `true` if `value` satisfies the condition.
    ///
    /// NaN never matches.
    #[inline]
    pub fn matches(&self, value: T) -> bool {
        match *self {
            Condition::GreaterThan(t) => value > t,
            Condition::GreaterOrEqual(t) => value >= t,
            Condition::LessThan(t) => value < t,
            Condition::LessOrEqual(t) => value <= t,
            Condition::Equal(t) => value == t,
        }
    }
}

/// Parses `"<op>:<value>"`, e.g. `"gt:5"`, `"le:-1.5"`, `"eq:0"`.
impl<T: FromStr> FromStr for Condition<T> {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CoreError::InvalidCondition(s.to_string());

        let (op, raw) = s.trim().split_once(':').ok_or_else(invalid)?;
        let threshold: T = raw.trim().parse().map_err(|_| invalid())?;

        match op.trim().to_lowercase().as_str() {
            "gt" | ">" => Ok(Condition::GreaterThan(threshold)),
            "ge" | ">=" => Ok(Condition::GreaterOrEqual(threshold)),
            "lt" | "<" => Ok(Condition::LessThan(threshold)),
            "le" | "<=" => Ok(Condition::LessOrEqual(threshold)),
            "eq" | "==" => Ok(Condition::Equal(threshold)),
            _ => Err(invalid()),
        }
    }
}

impl<T: fmt::Display> fmt::Display for Condition<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Condition::GreaterThan(t) => write!(f, "> {}", t),
            Condition::GreaterOrEqual(t) => write!(f, ">= {}", t),
            Condition::LessThan(t) => write!(f, "< {}", t),
            Condition::LessOrEqual(t) => write!(f, "<= {}", t),
            Condition::Equal(t) => write!(f, "== {}", t),
        }
    }
}

/// Sets every entry matching `predicate` to `new_value`, in place.
///
/// Entries that do not match are left untouched. Returns the number of
/// replaced entries; a predicate that matches nothing leaves the slice
/// unchanged and returns 0.
///
/// # Examples
///
/// ```rust
/// use sim_core::array::replace_where;
///
/// let mut data = [1, 2, 3, 4, 5];
/// assert_eq!(replace_where(&mut data, |v| v % 2 == 0, 0), 2);
/// assert_eq!(data, [1, 0, 3, 0, 5]);
/// ```
pub fn replace_where<T, P>(values: &mut [T], mut predicate: P, new_value: T) -> usize
where
    T: Copy,
    P: FnMut(&T) -> bool,
{
    let mut replaced = 0;
    for value in values.iter_mut() {
        if predicate(value) {
            *value = new_value;
            replaced += 1;
        }
    }
    replaced
}

/// Copying variant of [`replace_where`].
pub fn replaced_where<T, P>(values: &[T], predicate: P, new_value: T) -> Vec<T>
where
    T: Copy,
    P: FnMut(&T) -> bool,
{
    let mut out = values.to_vec();
    replace_where(&mut out, predicate, new_value);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replace_where_counts_and_sets() {
        let mut data = [0.5, 6.0, 2.0, 10.0, 5.0];
        let cond = Condition::GreaterThan(5.0);
        let n = replace_where(&mut data, |v| cond.matches(*v), -1.0);

        assert_eq!(n, 2);
        assert_eq!(data, [0.5, -1.0, 2.0, -1.0, 5.0]);
    }

    #[test]
    fn test_replace_where_no_match_is_noop() {
        let mut data = [1.0, 2.0, 3.0];
        let n = replace_where(&mut data, |v| *v > 100.0, 0.0);

        assert_eq!(n, 0);
        assert_eq!(data, [1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_replace_where_empty_slice() {
        let mut data: [f32; 0] = [];
        assert_eq!(replace_where(&mut data, |_| true, 1.0), 0);
    }

    #[test]
    fn test_replaced_where_preserves_input() {
        let data = [3, 8, 1];
        let out = replaced_where(&data, |v| *v == 8, 0);

        assert_eq!(data, [3, 8, 1]);
        assert_eq!(out, vec![3, 0, 1]);
    }

    #[test]
    fn test_condition_matches() {
        assert!(Condition::GreaterOrEqual(2.0).matches(2.0));
        assert!(!Condition::GreaterThan(2.0).matches(2.0));
        assert!(Condition::LessOrEqual(2.0).matches(2.0));
        assert!(!Condition::LessThan(2.0).matches(2.0));
        assert!(Condition::Equal(2.0).matches(2.0));
        assert!(!Condition::Equal(2.0).matches(f64::NAN));
    }

    #[test]
    fn test_condition_parsing() {
        assert_eq!(
            "gt:5".parse::<Condition<f64>>().unwrap(),
            Condition::GreaterThan(5.0)
        );
        assert_eq!(
            "LE: -1.5".parse::<Condition<f64>>().unwrap(),
            Condition::LessOrEqual(-1.5)
        );
        assert_eq!(
            "==:0".parse::<Condition<i64>>().unwrap(),
            Condition::Equal(0)
        );

        assert!("gt5".parse::<Condition<f64>>().is_err());
        assert!("ne:1".parse::<Condition<f64>>().is_err());
        assert!("gt:abc".parse::<Condition<f64>>().is_err());
    }

    #[test]
    fn test_condition_display() {
        assert_eq!(Condition::LessThan(3.0).to_string(), "< 3");
        assert_eq!(Condition::GreaterOrEqual(-1.5).to_string(), ">= -1.5");
    }
}
