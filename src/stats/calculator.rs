//! Statistics Calculator Module
//! Descriptive summaries and binning used by the distribution charts.

use serde::Serialize;
use statrs::statistics::Statistics;

/// Whisker reach in multiples of the interquartile range.
pub const WHISKER_IQR: f64 = 1.5;

/// Five-number summary plus mean, as drawn by a box inside a violin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoxSummary {
    pub lower_whisker: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub upper_whisker: f64,
    pub mean: f64,
}

/// One histogram bin `[start, end)` with its count.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

impl HistogramBin {
    pub fn center(&self) -> f64 {
        (self.start + self.end) / 2.0
    }

    pub fn width(&self) -> f64 {
        self.end - self.start
    }
}

pub struct StatsCalculator;

impl StatsCalculator {
    /// Summarize `values`; `None` when empty.
    ///
    /// Whiskers end at the most extreme observations within
    /// `WHISKER_IQR * IQR` of the quartiles.
    pub fn box_summary(values: &[f64]) -> Option<BoxSummary> {
        if values.is_empty() {
            return None;
        }

        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        let q1 = Self::percentile(&sorted, 25.0);
        let median = Self::percentile(&sorted, 50.0);
        let q3 = Self::percentile(&sorted, 75.0);
        let iqr = q3 - q1;
        let low_fence = q1 - WHISKER_IQR * iqr;
        let high_fence = q3 + WHISKER_IQR * iqr;

        let lower_whisker = sorted
            .iter()
            .copied()
            .find(|&v| v >= low_fence)
            .unwrap_or(q1);
        let upper_whisker = sorted
            .iter()
            .rev()
            .copied()
            .find(|&v| v <= high_fence)
            .unwrap_or(q3);

        Some(BoxSummary {
            lower_whisker,
            q1,
            median,
            q3,
            upper_whisker,
            mean: values.mean(),
        })
    }

    /// Calculate percentile using linear interpolation (NumPy compatible).
    pub fn percentile(sorted_values: &[f64], p: f64) -> f64 {
        let n = sorted_values.len();
        if n == 0 {
            return f64::NAN;
        }
        if n == 1 {
            return sorted_values[0];
        }

        let rank = (p / 100.0) * (n - 1) as f64;
        let lower = rank.floor() as usize;
        let upper = (rank.ceil() as usize).min(n - 1);
        let frac = rank - lower as f64;

        if lower == upper {
            sorted_values[lower]
        } else {
            sorted_values[lower] * (1.0 - frac) + sorted_values[upper] * frac
        }
    }

    /// Equal-width histogram over the data range.
    ///
    /// The last bin is closed so the maximum is counted.
    pub fn histogram(values: &[f64], bins: usize) -> Vec<HistogramBin> {
        if values.is_empty() || bins == 0 {
            return Vec::new();
        }

        let min = values.min();
        let max = values.max();
        let span = if max > min { max - min } else { 1.0 };
        let width = span / bins as f64;

        let mut counts = vec![0usize; bins];
        for &v in values {
            let idx = (((v - min) / width).floor() as usize).min(bins - 1);
            counts[idx] += 1;
        }

        counts
            .into_iter()
            .enumerate()
            .map(|(i, count)| HistogramBin {
                start: min + i as f64 * width,
                end: min + (i + 1) as f64 * width,
                count,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn percentile_interpolates_like_numpy() {
        let sorted = [1.0, 2.0, 3.0, 4.0];
        assert_relative_eq!(StatsCalculator::percentile(&sorted, 25.0), 1.75);
        assert_relative_eq!(StatsCalculator::percentile(&sorted, 50.0), 2.5);
        assert_relative_eq!(StatsCalculator::percentile(&sorted, 100.0), 4.0);
    }

    #[test]
    fn whiskers_exclude_outliers() {
        let values = [1.0, 2.0, 3.0, 4.0, 5.0, 100.0];
        let summary = StatsCalculator::box_summary(&values).unwrap();
        assert_eq!(summary.lower_whisker, 1.0);
        assert_eq!(summary.upper_whisker, 5.0);
        assert_relative_eq!(summary.median, 3.5);
    }

    #[test]
    fn empty_values_have_no_summary() {
        assert!(StatsCalculator::box_summary(&[]).is_none());
    }

    #[test]
    fn histogram_counts_every_value() {
        let values: Vec<f64> = (0..100).map(f64::from).collect();
        let bins = StatsCalculator::histogram(&values, 7);
        assert_eq!(bins.len(), 7);
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), 100);
        assert_relative_eq!(bins[0].start, 0.0);
        assert_relative_eq!(bins[6].end, 99.0, epsilon = 1e-9);
    }

    #[test]
    fn histogram_of_constant_values_uses_one_bin() {
        let bins = StatsCalculator::histogram(&[5.0, 5.0, 5.0], 4);
        assert_eq!(bins[0].count, 3);
    }
}
