//! Chart Viewer Widget
//! Central page: title, description, the selected chart and the footer.

use crate::charts::{Camera, ChartCanvas, ChartPlotter, ChartSpec, GlobeAnimation};
use crate::selection::Visualization;
use egui::{Color32, RichText, ScrollArea};

pub const PAGE_TITLE: &str = "EcoTech Analytics Dashboard";
pub const PAGE_DESCRIPTION: &str = "Explore sales, sustainability, and customer satisfaction \
    metrics for EcoTech products across regions and years.";
pub const FOOTER_PRODUCT: &str = "EcoTech Analytics Dashboard";
pub const FOOTER_NOTE: &str =
    " | Powered by egui and egui_plot | Data generated for demonstration purposes.";

/// Per-chart interaction state kept across frames.
pub struct ChartInteraction {
    pub surface_camera: Camera,
    pub globe_camera: Camera,
    pub animation: GlobeAnimation,
}

/// What the page currently shows below the description.
pub enum ChartContent {
    Empty,
    Chart(ChartSpec),
    Failed(String),
}

pub struct ChartViewer {
    pub visualization: Visualization,
    pub content: ChartContent,
    pub interaction: ChartInteraction,
}

impl ChartViewer {
    pub fn new(visualization: Visualization, animation_interval_secs: f64) -> Self {
        Self {
            visualization,
            content: ChartContent::Empty,
            interaction: ChartInteraction {
                surface_camera: Camera::default(),
                globe_camera: Camera::default(),
                animation: GlobeAnimation::new(animation_interval_secs),
            },
        }
    }

    pub fn set_chart(&mut self, visualization: Visualization, spec: ChartSpec) {
        self.visualization = visualization;
        self.content = ChartContent::Chart(spec);
    }

    pub fn set_error(&mut self, visualization: Visualization, error: String) {
        self.visualization = visualization;
        self.content = ChartContent::Failed(error);
    }

    pub fn spec(&self) -> Option<&ChartSpec> {
        match &self.content {
            ChartContent::Chart(spec) => Some(spec),
            _ => None,
        }
    }

    pub fn show(&mut self, ui: &mut egui::Ui) {
        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.label(RichText::new(PAGE_TITLE).size(28.0).strong());
                ui.label(RichText::new(PAGE_DESCRIPTION).size(14.0));
                ui.separator();
                ui.add_space(8.0);

                ui.label(
                    RichText::new(self.visualization.subheader())
                        .size(20.0)
                        .strong(),
                );
                ui.add_space(8.0);

                match &self.content {
                    ChartContent::Empty => {
                        ui.label(RichText::new("No Data").size(20.0));
                    }
                    ChartContent::Failed(error) => {
                        ui.label(
                            RichText::new(format!("Error: {}", error))
                                .size(14.0)
                                .color(Color32::from_rgb(220, 53, 69)),
                        );
                    }
                    ChartContent::Chart(spec) => {
                        Self::draw_chart(ui, spec, &mut self.interaction);
                    }
                }

                ui.add_space(8.0);
                ui.separator();
                ui.horizontal_wrapped(|ui| {
                    ui.spacing_mut().item_spacing.x = 0.0;
                    ui.label(RichText::new(FOOTER_PRODUCT).strong());
                    ui.label(FOOTER_NOTE);
                });
            });
    }

    fn draw_chart(ui: &mut egui::Ui, spec: &ChartSpec, interaction: &mut ChartInteraction) {
        match spec {
            ChartSpec::Funnel(s) => ChartPlotter::draw_funnel(ui, s),
            ChartSpec::Density(s) => ChartPlotter::draw_density(ui, s),
            ChartSpec::Violin(s) => ChartPlotter::draw_violin(ui, s),
            ChartSpec::Surface(s) => {
                ChartCanvas::draw_surface(ui, s, &mut interaction.surface_camera)
            }
            ChartSpec::Globe(s) => ChartCanvas::draw_globe(
                ui,
                s,
                &mut interaction.globe_camera,
                &mut interaction.animation,
            ),
            ChartSpec::Polar(s) => ChartCanvas::draw_polar(ui, s),
            ChartSpec::Parallel(s) => ChartCanvas::draw_parallel(ui, s),
            ChartSpec::Sunburst(s) => ChartCanvas::draw_sunburst(ui, s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Dataset;

    #[test]
    fn spec_only_available_for_built_chart() {
        let mut viewer = ChartViewer::new(Visualization::SalesFunnel, 0.8);
        assert!(viewer.spec().is_none());

        let ds = Dataset::generate(42).unwrap();
        let spec = Visualization::PolarWinds.build(&ds).unwrap();
        viewer.set_chart(Visualization::PolarWinds, spec);
        assert_eq!(viewer.visualization, Visualization::PolarWinds);
        assert!(matches!(viewer.spec(), Some(ChartSpec::Polar(_))));

        viewer.set_error(Visualization::Sunburst, "boom".to_string());
        assert!(viewer.spec().is_none());
    }
}
