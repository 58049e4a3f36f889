//! Control Panel Widget
//! Left sidebar with the visualization selector and dataset settings.

use crate::config::{DashboardSettings, DataPolicy};
use crate::selection::Visualization;
use egui::{Color32, RichText};

/// Size of the current dataset, shown under the settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DatasetSummary {
    pub rows: usize,
    pub aggregate_rows: usize,
    pub seed: u64,
}

/// Left sidebar with navigation and data controls.
pub struct ControlPanel {
    pub selected: Visualization,
    pub seed: u64,
    pub data_policy: DataPolicy,
    pub summary: Option<DatasetSummary>,
    pub status: String,
    pub export_enabled: bool,
}

impl ControlPanel {
    pub fn new(settings: &DashboardSettings) -> Self {
        Self {
            selected: settings.initial_visualization,
            seed: settings.seed,
            data_policy: settings.data_policy,
            summary: None,
            status: "Ready".to_string(),
            export_enabled: false,
        }
    }

    /// Draw the control panel
    pub fn show(&mut self, ui: &mut egui::Ui) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("🌍 EcoTech Analytics")
                    .size(22.0)
                    .color(Color32::from_rgb(0, 204, 150)),
            );
        });
        ui.add_space(5.0);
        ui.label(
            RichText::new("Navigate through the EcoTech data visualizations:")
                .size(12.0)
                .color(Color32::GRAY),
        );
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Navigation =====
        ui.label(RichText::new("📊 Select Visualization").size(14.0).strong());
        ui.add_space(5.0);
        for viz in Visualization::ALL {
            if ui.radio_value(&mut self.selected, viz, viz.label()).clicked() {
                action = ControlPanelAction::Select(viz);
            }
        }

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Data =====
        ui.label(RichText::new("⚙️ Data").size(14.0).strong());
        ui.add_space(5.0);

        ui.horizontal(|ui| {
            ui.add_sized([60.0, 20.0], egui::Label::new("Seed:"));
            let seed = ui.add(egui::DragValue::new(&mut self.seed).speed(1.0));
            if seed.changed() {
                action = ControlPanelAction::SettingsChanged;
            }
        });

        ui.add_space(5.0);
        if ui
            .radio_value(&mut self.data_policy, DataPolicy::Cached, "Generate once")
            .clicked()
        {
            action = ControlPanelAction::SettingsChanged;
        }
        if ui
            .radio_value(
                &mut self.data_policy,
                DataPolicy::RegeneratePerCycle,
                "Regenerate on every selection",
            )
            .clicked()
        {
            action = ControlPanelAction::SettingsChanged;
        }

        if let Some(summary) = self.summary {
            ui.add_space(8.0);
            egui::Frame::none()
                .fill(ui.visuals().widgets.noninteractive.bg_fill)
                .rounding(5.0)
                .inner_margin(8.0)
                .show(ui, |ui| {
                    ui.label(RichText::new(format!("Records: {}", summary.rows)).size(12.0));
                    ui.label(
                        RichText::new(format!("Region/Product groups: {}", summary.aggregate_rows))
                            .size(12.0),
                    );
                    ui.label(RichText::new(format!("Seed: {}", summary.seed)).size(12.0));
                });
        }

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Export =====
        ui.vertical_centered(|ui| {
            ui.add_enabled_ui(self.export_enabled, |ui| {
                let button = egui::Button::new(RichText::new("📄 Export Chart JSON").size(14.0))
                    .min_size(egui::vec2(180.0, 30.0));
                if ui.add(button).clicked() {
                    action = ControlPanelAction::ExportSpec;
                }
            });
        });

        ui.add_space(10.0);
        let status_color = if self.status.contains("Error") {
            Color32::from_rgb(220, 53, 69)
        } else if self.status.contains("Exported") {
            Color32::from_rgb(40, 167, 69)
        } else {
            Color32::GRAY
        };
        ui.label(RichText::new(&self.status).size(11.0).color(status_color));

        action
    }

    pub fn set_status(&mut self, status: &str) {
        self.status = status.to_string();
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    Select(Visualization),
    SettingsChanged,
    ExportSpec,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn panel_starts_from_settings() {
        let settings = DashboardSettings {
            seed: 9,
            data_policy: DataPolicy::RegeneratePerCycle,
            initial_visualization: Visualization::Sunburst,
            ..DashboardSettings::default()
        };
        let panel = ControlPanel::new(&settings);
        assert_eq!(panel.selected, Visualization::Sunburst);
        assert_eq!(panel.seed, 9);
        assert_eq!(panel.data_policy, DataPolicy::RegeneratePerCycle);
        assert!(!panel.export_enabled);
        assert_eq!(panel.status, "Ready");
    }
}
