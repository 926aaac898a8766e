//! Density-normalised histograms and their text rendering.

use std::io::{self, Write};

#[cfg(feature = "serde")]
use serde::Serialize;

/// One histogram bin covering `[start, end)` (the last bin is closed).
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct HistogramBin {
    /// Lower edge.
    pub start: f64,
    /// Upper edge.
    pub end: f64,
    /// Number of values in the bin.
    pub count: usize,
    /// `count / (n * width)`; densities integrate to 1 over all bins.
    pub density: f64,
}

/// Equal-width histogram over the range of its input.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Histogram {
    bins: Vec<HistogramBin>,
    total: usize,
}

impl Histogram {
    /// Builds a density-normalised histogram of `values` with `bins` bins.
    ///
    /// Bins span `[min, max]` of the finite inputs; a degenerate range
    /// (all values equal) is widened to `[x - 0.5, x + 0.5]`. Non-finite
    /// values are ignored.
    ///
    /// Returns `None` if `bins == 0` or there are no finite values.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sim_engine::aggregate::Histogram;
    ///
    /// let hist = Histogram::density(&[0.0, 0.25, 0.5, 1.0], 2).unwrap();
    /// assert_eq!(hist.bins()[0].count, 2);
    /// assert_eq!(hist.bins()[1].count, 2);
    ///
    /// let area: f64 = hist.bins().iter().map(|b| b.density * (b.end - b.start)).sum();
    /// assert!((area - 1.0).abs() < 1e-12);
    /// ```
    pub fn density(values: &[f64], bins: usize) -> Option<Self> {
        if bins == 0 {
            return None;
        }

        let finite = || values.iter().copied().filter(|v| v.is_finite());
        let mut lo = finite().reduce(f64::min)?;
        let mut hi = finite().reduce(f64::max)?;
        if lo == hi {
            lo -= 0.5;
            hi += 0.5;
        }

        let width = (hi - lo) / bins as f64;
        let mut counts = vec![0usize; bins];
        let mut total = 0usize;
        for v in finite() {
            let idx = (((v - lo) / width) as usize).min(bins - 1);
            counts[idx] += 1;
            total += 1;
        }

        let norm = total as f64 * width;
        let bin_defs = counts
            .into_iter()
            .enumerate()
            .map(|(i, count)| {
                let start = lo + i as f64 * width;
                let end = if i + 1 == bins {
                    hi
                } else {
                    lo + (i + 1) as f64 * width
                };
                HistogramBin {
                    start,
                    end,
                    count,
                    density: count as f64 / norm,
                }
            })
            .collect();

        Some(Self {
            bins: bin_defs,
            total,
        })
    }

    /// Bins in ascending order.
    #[inline]
    pub fn bins(&self) -> &[HistogramBin] {
        &self.bins
    }

    /// Number of values counted.
    #[inline]
    pub fn total(&self) -> usize {
        self.total
    }

    /// Largest bin density.
    pub fn max_density(&self) -> f64 {
        self.bins.iter().map(|b| b.density).fold(0.0, f64::max)
    }

    /// Renders one line per bin: edges, a bar scaled to `bar_width`, density.
    pub fn render<W: Write>(&self, out: &mut W, bar_width: usize) -> io::Result<()> {
        let peak = self.max_density();
        for bin in &self.bins {
            let len = if peak > 0.0 {
                ((bin.density / peak) * bar_width as f64).round() as usize
            } else {
                0
            };
            writeln!(
                out,
                "[{:>10.5}, {:>10.5}) |{:<width$}| {:.4}",
                bin.start,
                bin.end,
                "#".repeat(len),
                bin.density,
                width = bar_width
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_zero_bins_or_empty() {
        assert!(Histogram::density(&[1.0, 2.0], 0).is_none());
        assert!(Histogram::density(&[], 10).is_none());
        assert!(Histogram::density(&[f64::NAN], 10).is_none());
    }

    #[test]
    fn test_max_value_lands_in_last_bin() {
        let hist = Histogram::density(&[0.0, 1.0, 2.0, 3.0, 4.0], 4).unwrap();
        let counts: Vec<usize> = hist.bins().iter().map(|b| b.count).collect();
        assert_eq!(counts, vec![1, 1, 1, 2]);
        assert_eq!(hist.bins()[3].end, 4.0);
    }

    #[test]
    fn test_density_integrates_to_one() {
        let values: Vec<f64> = (0..997).map(|i| ((i * 37) % 101) as f64 / 7.0).collect();
        let hist = Histogram::density(&values, 50).unwrap();

        let area: f64 = hist
            .bins()
            .iter()
            .map(|b| b.density * (b.end - b.start))
            .sum();
        assert_relative_eq!(area, 1.0, epsilon = 1e-9);
        assert_eq!(hist.total(), 997);
        assert_eq!(hist.bins().len(), 50);
    }

    #[test]
    fn test_degenerate_range_widened() {
        let hist = Histogram::density(&[2.0, 2.0, 2.0], 5).unwrap();
        assert_eq!(hist.bins()[0].start, 1.5);
        assert_eq!(hist.bins()[4].end, 2.5);
        assert_eq!(hist.bins().iter().map(|b| b.count).sum::<usize>(), 3);
    }

    #[test]
    fn test_non_finite_ignored() {
        let hist = Histogram::density(&[1.0, f64::INFINITY, 2.0, f64::NAN], 2).unwrap();
        assert_eq!(hist.total(), 2);
    }

    #[test]
    fn test_render_line_per_bin() {
        let hist = Histogram::density(&[0.0, 0.1, 0.9, 1.0], 4).unwrap();
        let mut out = Vec::new();
        hist.render(&mut out, 20).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), 4);
        assert!(text.lines().next().unwrap().contains(&"#".repeat(20)));
    }
}
