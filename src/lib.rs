//! EcoTech Analytics Dashboard
//!
//! Synthetic sales and sustainability dataset for EcoTech products, and the
//! eight interactive visualizations built from it.

pub mod charts;
pub mod config;
pub mod data;
pub mod gui;
pub mod selection;
pub mod stats;
pub mod telemetry;
