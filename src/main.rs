//! EcoTech Analytics Dashboard - interactive charts over a synthetic product dataset.

use anyhow::anyhow;
use eframe::egui;
use ecotech_dashboard::gui::EcoTechApp;
use ecotech_dashboard::telemetry;

fn main() -> anyhow::Result<()> {
    let _ = telemetry::init_default_tracing();

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 800.0])
            .with_min_inner_size([1200.0, 700.0])
            .with_title("EcoTech Analytics Dashboard"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "EcoTech Analytics Dashboard",
        options,
        Box::new(|cc| Ok(Box::new(EcoTechApp::new(cc)))),
    )
    .map_err(|e| anyhow!(e.to_string()))
}
