//! Kernel density estimation for violins and the density contour chart.

use super::StatsCalculator;
use rayon::prelude::*;
use serde::Serialize;
use statrs::distribution::{Continuous, Normal};
use statrs::statistics::Statistics;

/// Density of a 2D sample evaluated on a regular grid.
///
/// `z[j][i]` is the density at `(x[i], y[j])`.
#[derive(Debug, Clone, Serialize)]
pub struct DensityGrid {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub z: Vec<Vec<f64>>,
}

impl DensityGrid {
    pub fn max(&self) -> f64 {
        self.z
            .iter()
            .flat_map(|row| row.iter().copied())
            .fold(0.0, f64::max)
    }
}

pub struct DensityEstimator;

impl DensityEstimator {
    fn standard_normal() -> Normal {
        Normal::standard()
    }

    /// Silverman's rule-of-thumb bandwidth.
    ///
    /// Falls back to the standard deviation alone when the IQR is zero, and
    /// to 1.0 for degenerate samples.
    pub fn silverman_bandwidth(values: &[f64]) -> f64 {
        if values.len() < 2 {
            return 1.0;
        }
        let sd = values.std_dev();

        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        let iqr = StatsCalculator::percentile(&sorted, 75.0)
            - StatsCalculator::percentile(&sorted, 25.0);

        let spread = if iqr > 0.0 { sd.min(iqr / 1.349) } else { sd };
        let h = 1.059 * spread * (values.len() as f64).powf(-0.2);
        if h.is_finite() && h > 0.0 {
            h
        } else {
            1.0
        }
    }

    /// Scott's bandwidth for one axis of a 2D sample.
    pub fn scott_bandwidth_2d(values: &[f64]) -> f64 {
        if values.len() < 2 {
            return 1.0;
        }
        let h = values.std_dev() * (values.len() as f64).powf(-1.0 / 6.0);
        if h.is_finite() && h > 0.0 {
            h
        } else {
            1.0
        }
    }

    /// Gaussian KDE of `values` at each point of `at`.
    pub fn kde(values: &[f64], bandwidth: f64, at: &[f64]) -> Vec<f64> {
        if values.is_empty() {
            return vec![0.0; at.len()];
        }
        let kernel = Self::standard_normal();
        let norm = values.len() as f64 * bandwidth;
        at.iter()
            .map(|&x| {
                values
                    .iter()
                    .map(|&v| kernel.pdf((x - v) / bandwidth))
                    .sum::<f64>()
                    / norm
            })
            .collect()
    }

    /// Evenly spaced points spanning the sample padded by `pad` on each side.
    pub fn support(values: &[f64], pad: f64, points: usize) -> Vec<f64> {
        if values.is_empty() || points == 0 {
            return Vec::new();
        }
        let lo = values.min() - pad;
        let hi = values.max() + pad;
        if points == 1 {
            return vec![(lo + hi) / 2.0];
        }
        let step = (hi - lo) / (points - 1) as f64;
        (0..points).map(|i| lo + i as f64 * step).collect()
    }

    /// Product-kernel Gaussian KDE of `(xs, ys)` on a `size` x `size` grid.
    ///
    /// Rows of the grid are evaluated in parallel.
    pub fn kde_2d(xs: &[f64], ys: &[f64], size: usize) -> DensityGrid {
        let hx = Self::scott_bandwidth_2d(xs);
        let hy = Self::scott_bandwidth_2d(ys);
        let grid_x = Self::support(xs, 2.0 * hx, size);
        let grid_y = Self::support(ys, 2.0 * hy, size);

        let kernel = Self::standard_normal();
        let norm = xs.len().max(1) as f64 * hx * hy;

        let z: Vec<Vec<f64>> = grid_y
            .par_iter()
            .map(|&gy| {
                grid_x
                    .iter()
                    .map(|&gx| {
                        xs.iter()
                            .zip(ys)
                            .map(|(&x, &y)| kernel.pdf((gx - x) / hx) * kernel.pdf((gy - y) / hy))
                            .sum::<f64>()
                            / norm
                    })
                    .collect::<Vec<f64>>()
            })
            .collect();

        DensityGrid {
            x: grid_x,
            y: grid_y,
            z,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn kde_integrates_to_one() {
        let values = [1.0, 2.0, 2.5, 3.0, 7.0];
        let h = DensityEstimator::silverman_bandwidth(&values);
        let grid = DensityEstimator::support(&values, 6.0 * h, 2000);
        let density = DensityEstimator::kde(&values, h, &grid);
        let step = grid[1] - grid[0];
        let area: f64 = density.iter().sum::<f64>() * step;
        assert_relative_eq!(area, 1.0, epsilon = 1e-3);
    }

    #[test]
    fn kde_peaks_near_the_cluster() {
        let values = [10.0, 10.1, 9.9, 10.05, 30.0];
        let at = [0.0, 10.0, 20.0];
        let density = DensityEstimator::kde(&values, 1.0, &at);
        assert!(density[1] > density[0]);
        assert!(density[1] > density[2]);
    }

    #[test]
    fn degenerate_samples_get_unit_bandwidth() {
        assert_eq!(DensityEstimator::silverman_bandwidth(&[4.0]), 1.0);
        assert_eq!(DensityEstimator::silverman_bandwidth(&[4.0, 4.0, 4.0]), 1.0);
    }

    #[test]
    fn grid_has_requested_shape() {
        let xs = [1.0, 2.0, 3.0, 4.0];
        let ys = [10.0, 30.0, 20.0, 40.0];
        let grid = DensityEstimator::kde_2d(&xs, &ys, 12);
        assert_eq!(grid.x.len(), 12);
        assert_eq!(grid.y.len(), 12);
        assert_eq!(grid.z.len(), 12);
        assert!(grid.z.iter().all(|row| row.len() == 12));
        assert!(grid.max() > 0.0);
    }
}
