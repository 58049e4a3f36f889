//! EcoTech Dashboard Main Application
//! Main window with control panel and chart viewer.

use crate::config::{DashboardSettings, DataPolicy, CONFIG_FILE};
use crate::data::Dataset;
use crate::gui::{ChartViewer, ControlPanel, ControlPanelAction, DatasetSummary};
use crate::selection::Visualization;
use egui::SidePanel;
use std::path::Path;
use tracing::{error, info};

/// Main application window.
pub struct EcoTechApp {
    settings: DashboardSettings,
    control_panel: ControlPanel,
    chart_viewer: ChartViewer,
    dataset: Option<Dataset>,
    generations: usize,
}

impl EcoTechApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        cc.egui_ctx.set_visuals(egui::Visuals::dark());
        let settings = DashboardSettings::load_or_default(Path::new(CONFIG_FILE));
        Self::with_settings(settings)
    }

    /// Build the app and run the first display cycle.
    pub fn with_settings(settings: DashboardSettings) -> Self {
        let mut app = Self {
            control_panel: ControlPanel::new(&settings),
            chart_viewer: ChartViewer::new(
                settings.initial_visualization,
                settings.animation_interval_secs(),
            ),
            settings,
            dataset: None,
            generations: 0,
        };
        app.run_cycle(app.settings.initial_visualization);
        app
    }

    /// Number of times the dataset has been generated.
    pub fn generations(&self) -> usize {
        self.generations
    }

    pub fn settings(&self) -> &DashboardSettings {
        &self.settings
    }

    pub fn chart_viewer(&self) -> &ChartViewer {
        &self.chart_viewer
    }

    /// Select a visualization and rebuild its chart.
    pub fn select(&mut self, visualization: Visualization) {
        self.control_panel.selected = visualization;
        self.run_cycle(visualization);
    }

    /// Replace the settings; the next cycle regenerates the dataset.
    pub fn apply_settings(&mut self, settings: DashboardSettings) {
        self.control_panel.seed = settings.seed;
        self.control_panel.data_policy = settings.data_policy;
        self.settings = settings;
        self.dataset = None;
        self.run_cycle(self.control_panel.selected);
    }

    /// Regenerate the dataset when the data policy asks for it.
    fn refresh_dataset(&mut self) {
        let stale = match self.settings.data_policy {
            DataPolicy::Cached => self
                .dataset
                .as_ref()
                .map_or(true, |ds| ds.seed() != self.settings.seed),
            DataPolicy::RegeneratePerCycle => true,
        };

        if stale {
            match Dataset::generate(self.settings.seed) {
                Ok(ds) => {
                    self.generations += 1;
                    self.control_panel.summary = Some(DatasetSummary {
                        rows: ds.records().height(),
                        aggregate_rows: ds.aggregate().height(),
                        seed: ds.seed(),
                    });
                    self.dataset = Some(ds);
                }
                Err(e) => {
                    error!(error = %e, "dataset generation failed");
                    self.dataset = None;
                    self.control_panel.set_status(&format!("Error: {}", e));
                }
            }
        }
    }

    /// One display cycle: obtain the dataset, build the selected chart.
    fn run_cycle(&mut self, visualization: Visualization) {
        self.refresh_dataset();
        let Some(ds) = self.dataset.as_ref() else {
            self.chart_viewer
                .set_error(visualization, "No dataset available".to_string());
            self.control_panel.export_enabled = false;
            return;
        };

        match visualization.build(ds) {
            Ok(spec) => {
                self.chart_viewer.set_chart(visualization, spec);
                self.control_panel.export_enabled = true;
                self.control_panel.set_status("Ready");
            }
            Err(e) => {
                error!(visualization = visualization.label(), error = %e, "chart build failed");
                self.chart_viewer.set_error(visualization, e.to_string());
                self.control_panel.export_enabled = false;
                self.control_panel.set_status(&format!("Error: {}", e));
            }
        }
    }

    fn handle_settings_changed(&mut self) {
        let settings = DashboardSettings {
            seed: self.control_panel.seed,
            data_policy: self.control_panel.data_policy,
            ..self.settings.clone()
        };
        info!(seed = settings.seed, policy = ?settings.data_policy, "settings changed");
        self.apply_settings(settings);
    }

    /// Save the current chart specification as JSON.
    fn handle_export_spec(&mut self) {
        let Some(spec) = self.chart_viewer.spec() else {
            self.control_panel.set_status("No chart to export");
            return;
        };

        let json = match spec.to_json() {
            Ok(json) => json,
            Err(e) => {
                self.control_panel.set_status(&format!("Error: {}", e));
                return;
            }
        };

        let file_name = format!("{}.json", spec.visualization().file_stem());
        let output_path = match rfd::FileDialog::new()
            .add_filter("JSON", &["json"])
            .set_file_name(&file_name)
            .save_file()
        {
            Some(path) => path,
            None => return,
        };

        match std::fs::write(&output_path, json) {
            Ok(()) => {
                info!(path = %output_path.display(), "chart exported");
                self.control_panel
                    .set_status(&format!("Exported {}", output_path.display()));
            }
            Err(e) => {
                error!(path = %output_path.display(), error = %e, "chart export failed");
                self.control_panel.set_status(&format!("Error: {}", e));
            }
        }
    }
}

impl eframe::App for EcoTechApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Left panel - Control Panel
        SidePanel::left("control_panel")
            .min_width(280.0)
            .max_width(340.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    let action = self.control_panel.show(ui);

                    match action {
                        ControlPanelAction::Select(viz) => self.select(viz),
                        ControlPanelAction::SettingsChanged => self.handle_settings_changed(),
                        ControlPanelAction::ExportSpec => self.handle_export_spec(),
                        ControlPanelAction::None => {}
                    }
                });
            });

        // Central panel - Chart Viewer
        egui::CentralPanel::default().show(ctx, |ui| {
            self.chart_viewer.show(ui);
        });
    }
}
