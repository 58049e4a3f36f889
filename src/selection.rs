//! Selection controller: the closed set of visualizations and their builders.

use crate::charts::{ChartBuilder, ChartError, ChartSpec};
use crate::data::Dataset;
use serde::{Deserialize, Serialize};
use tracing::info;

/// One entry of the sidebar navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Visualization {
    #[default]
    SalesFunnel,
    DensityFlow,
    CustomerSatisfaction,
    SalesSurface,
    InteractiveGlobe,
    PolarWinds,
    EcoBatteries,
    Sunburst,
}

impl Visualization {
    pub const ALL: [Visualization; 8] = [
        Visualization::SalesFunnel,
        Visualization::DensityFlow,
        Visualization::CustomerSatisfaction,
        Visualization::SalesSurface,
        Visualization::InteractiveGlobe,
        Visualization::PolarWinds,
        Visualization::EcoBatteries,
        Visualization::Sunburst,
    ];

    /// Sidebar label.
    pub fn label(self) -> &'static str {
        match self {
            Visualization::SalesFunnel => "Sales Funnel",
            Visualization::DensityFlow => "Density Flow (North America)",
            Visualization::CustomerSatisfaction => "Customer Satisfaction (2023, North America)",
            Visualization::SalesSurface => "Sales Surface Plot",
            Visualization::InteractiveGlobe => "Interactive Globe",
            Visualization::PolarWinds => "Polar Winds",
            Visualization::EcoBatteries => "Eco Batteries (2021)",
            Visualization::Sunburst => "Sunburst Chart",
        }
    }

    /// Heading shown above the chart.
    pub fn subheader(self) -> &'static str {
        match self {
            Visualization::SalesFunnel => "Sales Funnel by Region and Product",
            Visualization::DensityFlow => "Density Flow - North America",
            Visualization::CustomerSatisfaction => {
                "Customer Satisfaction by Product - North America (2023)"
            }
            Visualization::SalesSurface => "Sales Surface Plot by Region and Year",
            Visualization::InteractiveGlobe => "Interactive Globe of Sales and CO2 Reduction",
            Visualization::PolarWinds => "CO2 Reduction Polar Winds by Year and Product",
            Visualization::EcoBatteries => "Eco Batteries in 2021 - Parallel Coordinates",
            Visualization::Sunburst => "EcoTech Sunburst Chart",
        }
    }

    /// Lowercase file-name friendly form of the label.
    pub fn file_stem(self) -> String {
        let mut stem = String::new();
        for c in self.label().chars() {
            if c.is_ascii_alphanumeric() {
                stem.push(c.to_ascii_lowercase());
            } else if !stem.ends_with('_') {
                stem.push('_');
            }
        }
        stem.trim_end_matches('_').to_string()
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.label() == label)
    }

    /// Run the one builder matching this visualization.
    pub fn build(self, ds: &Dataset) -> Result<ChartSpec, ChartError> {
        info!(visualization = self.label(), seed = ds.seed(), "building chart");
        let spec = match self {
            Visualization::SalesFunnel => ChartSpec::Funnel(ChartBuilder::sales_funnel(ds)?),
            Visualization::DensityFlow => ChartSpec::Density(ChartBuilder::density_flow(ds)?),
            Visualization::CustomerSatisfaction => {
                ChartSpec::Violin(ChartBuilder::customer_satisfaction(ds)?)
            }
            Visualization::SalesSurface => ChartSpec::Surface(ChartBuilder::sales_surface(ds)?),
            Visualization::InteractiveGlobe => {
                ChartSpec::Globe(ChartBuilder::interactive_globe(ds)?)
            }
            Visualization::PolarWinds => ChartSpec::Polar(ChartBuilder::polar_winds(ds)?),
            Visualization::EcoBatteries => ChartSpec::Parallel(ChartBuilder::eco_batteries(ds)?),
            Visualization::Sunburst => ChartSpec::Sunburst(ChartBuilder::sunburst(ds)?),
        };
        Ok(spec)
    }
}

impl std::fmt::Display for Visualization {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_are_unique_and_round_trip() {
        for viz in Visualization::ALL {
            assert_eq!(Visualization::from_label(viz.label()), Some(viz));
        }
        let mut labels: Vec<&str> = Visualization::ALL.iter().map(|v| v.label()).collect();
        labels.sort_unstable();
        labels.dedup();
        assert_eq!(labels.len(), 8);
    }

    #[test]
    fn file_stems_are_plain() {
        assert_eq!(
            Visualization::CustomerSatisfaction.file_stem(),
            "customer_satisfaction_2023_north_america"
        );
        assert_eq!(Visualization::SalesFunnel.file_stem(), "sales_funnel");
    }

    #[test]
    fn unknown_label_is_rejected() {
        assert_eq!(Visualization::from_label("Pie Chart"), None);
    }
}
