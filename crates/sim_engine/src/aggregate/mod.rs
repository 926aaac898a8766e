//! Aggregation of per-batch results.
//!
//! [`compute_aggregate_metrics`] reduces the ordered list of
//! [`BatchMetrics`] to a single [`AggregateMetrics`]; [`Aggregator`] adds the
//! histogram view of batch means.
//!
//! # Overall Standard Deviation
//!
//! `overall_std` is the arithmetic mean of the per-batch standard
//! deviations. It is not the standard deviation of the pooled samples and
//! not the spread of the batch means.

mod histogram;

pub use histogram::{Histogram, HistogramBin};

use std::io::{self, Write};

use sim_core::stats;

#[cfg(feature = "serde")]
use serde::Serialize;

use crate::engine::BatchMetrics;
use crate::error::{Result, SimulationError};

/// Default number of histogram bins.
pub const DEFAULT_BINS: usize = 50;

/// Default rendered bar width in characters.
pub const DEFAULT_BAR_WIDTH: usize = 40;

/// Summary over all batches of a run.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct AggregateMetrics {
    /// Mean of the batch means.
    pub overall_mean: f64,
    /// Mean of the batch standard deviations.
    pub overall_std: f64,
    /// Smallest batch mean.
    pub min_value: f64,
    /// Largest batch mean.
    pub max_value: f64,
}

/// Reduces batch results to overall metrics.
///
/// # Errors
///
/// [`SimulationError::EmptyResults`] if `results` is empty.
///
/// # Examples
///
/// ```rust
/// use sim_engine::aggregate::compute_aggregate_metrics;
/// use sim_engine::engine::BatchMetrics;
///
/// let results = [
///     BatchMetrics { index: 0, mean: 0.1, std: 1.0, var: 1.0 },
///     BatchMetrics { index: 1, mean: 0.3, std: 2.0, var: 4.0 },
/// ];
/// let agg = compute_aggregate_metrics(&results).unwrap();
///
/// assert!((agg.overall_mean - 0.2).abs() < 1e-12);
/// assert!((agg.overall_std - 1.5).abs() < 1e-12);
/// assert_eq!(agg.min_value, 0.1);
/// assert_eq!(agg.max_value, 0.3);
/// ```
pub fn compute_aggregate_metrics(results: &[BatchMetrics]) -> Result<AggregateMetrics> {
    let means: Vec<f64> = results.iter().map(|m| m.mean).collect();
    let stds: Vec<f64> = results.iter().map(|m| m.std).collect();

    let overall_mean = stats::mean(&means).ok_or(SimulationError::EmptyResults)?;
    let overall_std = stats::mean(&stds).ok_or(SimulationError::EmptyResults)?;
    let min_value = stats::min(&means).ok_or(SimulationError::EmptyResults)?;
    let max_value = stats::max(&means).ok_or(SimulationError::EmptyResults)?;

    Ok(AggregateMetrics {
        overall_mean,
        overall_std,
        min_value,
        max_value,
    })
}

/// Aggregates batch results and renders the distribution of batch means.
///
/// # Examples
///
/// ```rust
/// use sim_engine::aggregate::Aggregator;
/// use sim_engine::engine::BatchMetrics;
///
/// let results: Vec<BatchMetrics> = (0..20)
///     .map(|i| BatchMetrics { index: i, mean: i as f64 * 0.01, std: 1.0, var: 1.0 })
///     .collect();
///
/// let aggregator = Aggregator::default();
/// let mut out = Vec::new();
/// aggregator.plot_results(&results, &mut out).unwrap();
/// assert!(!out.is_empty());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Aggregator {
    bins: usize,
    bar_width: usize,
}

impl Default for Aggregator {
    fn default() -> Self {
        Self {
            bins: DEFAULT_BINS,
            bar_width: DEFAULT_BAR_WIDTH,
        }
    }
}

impl Aggregator {
    /// Creates an aggregator with custom histogram bins and bar width.
    ///
    /// Zero values fall back to the defaults.
    pub fn new(bins: usize, bar_width: usize) -> Self {
        Self {
            bins: if bins == 0 { DEFAULT_BINS } else { bins },
            bar_width: if bar_width == 0 {
                DEFAULT_BAR_WIDTH
            } else {
                bar_width
            },
        }
    }

    /// Number of histogram bins.
    #[inline]
    pub fn bins(&self) -> usize {
        self.bins
    }

    /// See [`compute_aggregate_metrics`].
    #[inline]
    pub fn compute_aggregate_metrics(&self, results: &[BatchMetrics]) -> Result<AggregateMetrics> {
        compute_aggregate_metrics(results)
    }

    /// Density-normalised histogram of the batch means.
    pub fn histogram(&self, results: &[BatchMetrics]) -> Option<Histogram> {
        let means: Vec<f64> = results.iter().map(|m| m.mean).collect();
        Histogram::density(&means, self.bins)
    }

    /// Renders a histogram of batch means to `out`.
    ///
    /// Visualisation only; nothing numeric is returned. An empty result
    /// list renders a placeholder line.
    pub fn plot_results<W: Write>(&self, results: &[BatchMetrics], out: &mut W) -> io::Result<()> {
        writeln!(
            out,
            "Distribution of batch means ({} batches, {} bins, density)",
            results.len(),
            self.bins
        )?;
        match self.histogram(results) {
            Some(hist) => hist.render(out, self.bar_width),
            None => writeln!(out, "(no batch results)"),
        }
    }
}
