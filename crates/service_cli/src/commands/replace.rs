//! Replace command implementation
//!
//! Applies a conditional replacement to a list of values and reports the
//! result.

use std::io::{self, Write};

use sim_core::array::{replace_where, Condition};
use tracing::info;

use crate::{CliError, Result};

/// Outcome of a conditional replacement
#[derive(Debug, Clone, PartialEq)]
pub struct Replacement {
    pub before: Vec<f64>,
    pub after: Vec<f64>,
    pub replaced: usize,
}

/// Parse a comma-separated list of numbers
pub fn parse_values(values: &str) -> Result<Vec<f64>> {
    values
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<f64>()
                .map_err(|_| CliError::InvalidArgument(format!("not a number: '{}'", s)))
        })
        .collect()
}

/// Replace every value matching `condition` with `new_value`
pub fn apply(values: Vec<f64>, condition: &Condition<f64>, new_value: f64) -> Replacement {
    let mut after = values.clone();
    let replaced = replace_where(&mut after, |v| condition.matches(*v), new_value);
    Replacement {
        before: values,
        after,
        replaced,
    }
}

/// Run the replace command
pub fn run(values: &str, when: &str, with: f64) -> Result<()> {
    let condition: Condition<f64> = when.parse()?;
    let values = parse_values(values)?;
    if values.is_empty() {
        return Err(CliError::InvalidArgument("no values given".to_string()));
    }

    info!("Replacing values where x {} with {}", condition, with);
    let replacement = apply(values, &condition, with);

    let stdout = io::stdout();
    write_replacement(&mut stdout.lock(), &replacement, &condition)?;

    info!("Replace complete");
    Ok(())
}

fn write_replacement<W: Write>(
    out: &mut W,
    replacement: &Replacement,
    condition: &Condition<f64>,
) -> io::Result<()> {
    writeln!(out, "Before:   {:?}", replacement.before)?;
    writeln!(out, "After:    {:?}", replacement.after)?;
    writeln!(
        out,
        "Replaced: {} value(s) where x {}",
        replacement.replaced, condition
    )
}
