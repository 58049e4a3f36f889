//! Chart specifications produced by the builders and consumed by the drawers.

use crate::selection::Visualization;
use crate::stats::{BoxSummary, ContourLevel, DensityGrid, HistogramBin};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct FunnelStage {
    pub product: String,
    pub total: f64,
    /// Sales per region, in the order of [`FunnelSpec::regions`].
    pub sales: Vec<f64>,
}

/// Stacked funnel: one stage per Product, one segment per Region.
#[derive(Debug, Clone, Serialize)]
pub struct FunnelSpec {
    pub title: String,
    pub regions: Vec<String>,
    /// Ordered by descending total Sales.
    pub stages: Vec<FunnelStage>,
}

/// Density contours with marginal histograms.
#[derive(Debug, Clone, Serialize)]
pub struct DensitySpec {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub points: Vec<[f64; 2]>,
    pub grid: DensityGrid,
    pub contours: Vec<ContourLevel>,
    pub x_histogram: Vec<HistogramBin>,
    pub y_histogram: Vec<HistogramBin>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Violin {
    pub product: String,
    pub values: Vec<f64>,
    pub support: Vec<f64>,
    pub density: Vec<f64>,
    pub summary: BoxSummary,
}

/// Horizontal violins of Customer_Satisfaction, one per Product.
#[derive(Debug, Clone, Serialize)]
pub struct ViolinSpec {
    pub title: String,
    pub violins: Vec<Violin>,
}

/// Region x Year matrix of summed Sales.
#[derive(Debug, Clone, Serialize)]
pub struct SurfaceSpec {
    pub regions: Vec<String>,
    pub years: Vec<i32>,
    /// `sales[region][year]`
    pub sales: Vec<Vec<f64>>,
}

impl SurfaceSpec {
    pub fn z_range(&self) -> (f64, f64) {
        super::colors::value_range(self.sales.iter().flatten().copied())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GlobePoint {
    pub longitude: f64,
    pub latitude: f64,
    pub sales: f64,
    pub co2_reduction: f64,
    pub satisfaction: f64,
    pub product: String,
    pub region: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct GlobeFrame {
    pub year: i32,
    pub points: Vec<GlobePoint>,
}

/// Animated 3D scatter; ranges are shared by all frames.
#[derive(Debug, Clone, Serialize)]
pub struct GlobeSpec {
    pub title: String,
    pub frames: Vec<GlobeFrame>,
    pub longitude_range: (f64, f64),
    pub latitude_range: (f64, f64),
    pub sales_range: (f64, f64),
    pub co2_range: (f64, f64),
    pub satisfaction_range: (f64, f64),
}

#[derive(Debug, Clone, Serialize)]
pub struct PolarSeries {
    pub product: String,
    pub color: [u8; 3],
    pub r: Vec<f64>,
    /// Degrees, clockwise from the angular origin.
    pub theta: Vec<f64>,
}

/// Grouped polar bars of CO2_Reduction by Year and Product.
#[derive(Debug, Clone, Serialize)]
pub struct PolarSpec {
    pub title: String,
    pub years: Vec<i32>,
    /// Angle of each entry of `years`.
    pub year_thetas: Vec<f64>,
    pub series: Vec<PolarSeries>,
    pub radial_max: f64,
    pub bar_width: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ParallelAxis {
    pub name: String,
    pub values: Vec<f64>,
    pub range: (f64, f64),
}

/// Parallel coordinates colored by an integer region code.
#[derive(Debug, Clone, Serialize)]
pub struct ParallelSpec {
    pub title: String,
    pub axes: Vec<ParallelAxis>,
    /// Region of each line.
    pub regions: Vec<String>,
    /// Color code of each line.
    pub codes: Vec<usize>,
    /// Distinct regions with their code, in first-seen order.
    pub legend: Vec<(String, usize)>,
    pub color_range: (f64, f64),
}

#[derive(Debug, Clone, Serialize)]
pub struct SunburstNode {
    pub label: String,
    pub path: String,
    pub parent: Option<usize>,
    pub depth: usize,
    pub sales: f64,
    pub satisfaction: f64,
    /// Radians, clockwise from twelve o'clock.
    pub start_angle: f64,
    pub sweep: f64,
}

/// Year -> Region -> Product rings sized by Sales.
#[derive(Debug, Clone, Serialize)]
pub struct SunburstSpec {
    pub title: String,
    pub nodes: Vec<SunburstNode>,
    pub max_depth: usize,
    pub color_range: (f64, f64),
}

/// One finished chart, tagged by kind.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChartSpec {
    Funnel(FunnelSpec),
    Density(DensitySpec),
    Violin(ViolinSpec),
    Surface(SurfaceSpec),
    Globe(GlobeSpec),
    Polar(PolarSpec),
    Parallel(ParallelSpec),
    Sunburst(SunburstSpec),
}

impl ChartSpec {
    /// Pretty JSON of the specification, tagged with its `kind`.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// The visualization this chart renders.
    pub fn visualization(&self) -> Visualization {
        match self {
            ChartSpec::Funnel(_) => Visualization::SalesFunnel,
            ChartSpec::Density(_) => Visualization::DensityFlow,
            ChartSpec::Violin(_) => Visualization::CustomerSatisfaction,
            ChartSpec::Surface(_) => Visualization::SalesSurface,
            ChartSpec::Globe(_) => Visualization::InteractiveGlobe,
            ChartSpec::Polar(_) => Visualization::PolarWinds,
            ChartSpec::Parallel(_) => Visualization::EcoBatteries,
            ChartSpec::Sunburst(_) => Visualization::Sunburst,
        }
    }
}
