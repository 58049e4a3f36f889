//! Marching-squares iso-lines over a density grid.

use super::DensityGrid;
use serde::Serialize;

/// Line segments tracing one iso-level.
#[derive(Debug, Clone, Serialize)]
pub struct ContourLevel {
    pub level: f64,
    pub segments: Vec<[[f64; 2]; 2]>,
}

// Cell edges: 0 bottom, 1 right, 2 top, 3 left.
const BOTTOM: usize = 0;
const RIGHT: usize = 1;
const TOP: usize = 2;
const LEFT: usize = 3;

pub struct ContourTracer;

impl ContourTracer {
    /// `count` levels evenly spaced strictly between 0 and the grid maximum.
    pub fn levels(grid: &DensityGrid, count: usize) -> Vec<f64> {
        let max = grid.max();
        if max <= 0.0 {
            return Vec::new();
        }
        (1..=count)
            .map(|k| max * k as f64 / (count + 1) as f64)
            .collect()
    }

    /// Trace every level in `levels`.
    pub fn trace_all(grid: &DensityGrid, levels: &[f64]) -> Vec<ContourLevel> {
        levels
            .iter()
            .map(|&level| ContourLevel {
                level,
                segments: Self::trace(grid, level),
            })
            .collect()
    }

    /// Iso-line segments of `grid` at `level`.
    ///
    /// Saddle cells are disambiguated by the mean of their four corners.
    pub fn trace(grid: &DensityGrid, level: f64) -> Vec<[[f64; 2]; 2]> {
        let mut segments = Vec::new();
        if grid.x.len() < 2 || grid.y.len() < 2 {
            return segments;
        }

        for j in 0..grid.y.len() - 1 {
            for i in 0..grid.x.len() - 1 {
                let bl = grid.z[j][i];
                let br = grid.z[j][i + 1];
                let tr = grid.z[j + 1][i + 1];
                let tl = grid.z[j + 1][i];

                let case = (tl >= level) as u8 * 8
                    + (tr >= level) as u8 * 4
                    + (br >= level) as u8 * 2
                    + (bl >= level) as u8;

                let center_above = (bl + br + tr + tl) / 4.0 >= level;
                let pairs: &[(usize, usize)] = match case {
                    1 | 14 => &[(LEFT, BOTTOM)],
                    2 | 13 => &[(BOTTOM, RIGHT)],
                    3 | 12 => &[(LEFT, RIGHT)],
                    4 | 11 => &[(RIGHT, TOP)],
                    6 | 9 => &[(BOTTOM, TOP)],
                    7 | 8 => &[(LEFT, TOP)],
                    5 if center_above => &[(LEFT, TOP), (BOTTOM, RIGHT)],
                    5 => &[(LEFT, BOTTOM), (TOP, RIGHT)],
                    10 if center_above => &[(LEFT, BOTTOM), (TOP, RIGHT)],
                    10 => &[(LEFT, TOP), (BOTTOM, RIGHT)],
                    _ => &[],
                };

                for &(a, b) in pairs {
                    segments.push([
                        Self::edge_point(grid, i, j, a, level),
                        Self::edge_point(grid, i, j, b, level),
                    ]);
                }
            }
        }
        segments
    }

    fn edge_point(grid: &DensityGrid, i: usize, j: usize, edge: usize, level: f64) -> [f64; 2] {
        let ((ai, aj), (bi, bj)) = match edge {
            BOTTOM => ((i, j), (i + 1, j)),
            RIGHT => ((i + 1, j), (i + 1, j + 1)),
            TOP => ((i, j + 1), (i + 1, j + 1)),
            _ => ((i, j), (i, j + 1)),
        };
        let va = grid.z[aj][ai];
        let vb = grid.z[bj][bi];
        let t = if (vb - va).abs() > f64::EPSILON {
            ((level - va) / (vb - va)).clamp(0.0, 1.0)
        } else {
            0.5
        };
        [
            grid.x[ai] + t * (grid.x[bi] - grid.x[ai]),
            grid.y[aj] + t * (grid.y[bj] - grid.y[aj]),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn peak_grid() -> DensityGrid {
        // 3x3 grid with a single peak in the middle
        DensityGrid {
            x: vec![0.0, 1.0, 2.0],
            y: vec![0.0, 1.0, 2.0],
            z: vec![
                vec![0.0, 0.0, 0.0],
                vec![0.0, 1.0, 0.0],
                vec![0.0, 0.0, 0.0],
            ],
        }
    }

    #[test]
    fn peak_is_enclosed_by_four_segments() {
        let segments = ContourTracer::trace(&peak_grid(), 0.5);
        assert_eq!(segments.len(), 4);
        for seg in &segments {
            for p in seg {
                let d = ((p[0] - 1.0).powi(2) + (p[1] - 1.0).powi(2)).sqrt();
                assert!(d <= 0.5 + 1e-9);
            }
        }
    }

    #[test]
    fn edge_points_are_interpolated() {
        let segments = ContourTracer::trace(&peak_grid(), 0.25);
        let xs_on_middle_row: Vec<f64> = segments
            .iter()
            .flat_map(|s| s.iter())
            .filter(|p| (p[1] - 1.0).abs() < 1e-12)
            .map(|p| p[0])
            .collect();
        assert!(xs_on_middle_row.iter().any(|&x| (x - 0.25).abs() < 1e-12));
        assert!(xs_on_middle_row.iter().any(|&x| (x - 1.75).abs() < 1e-12));
    }

    #[test]
    fn levels_exclude_zero_and_max() {
        let levels = ContourTracer::levels(&peak_grid(), 3);
        assert_eq!(levels.len(), 3);
        assert_relative_eq!(levels[0], 0.25);
        assert_relative_eq!(levels[2], 0.75);
    }

    #[test]
    fn flat_grid_has_no_lines() {
        let mut grid = peak_grid();
        grid.z = vec![vec![0.0; 3]; 3];
        assert!(ContourTracer::levels(&grid, 5).is_empty());
        assert!(ContourTracer::trace(&grid, 0.5).is_empty());
    }
}
