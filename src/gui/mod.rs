//! GUI module - User interface components

mod app;
mod chart_viewer;
mod control_panel;

pub use app::EcoTechApp;
pub use chart_viewer::{ChartContent, ChartViewer, PAGE_DESCRIPTION, PAGE_TITLE};
pub use control_panel::{ControlPanel, ControlPanelAction, DatasetSummary};
