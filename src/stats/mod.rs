//! Stats module - distribution summaries, density estimation and contouring

mod calculator;
mod contour;
mod density;

pub use calculator::{BoxSummary, HistogramBin, StatsCalculator};
pub use contour::{ContourLevel, ContourTracer};
pub use density::{DensityEstimator, DensityGrid};
