//! Charts module - chart specifications, builders and drawing

mod builder;
mod canvas;
pub mod colors;
mod plotter;
mod projection;
mod specs;

pub use builder::{ChartBuilder, BATTERY_PRODUCT, BATTERY_YEAR, FOCUS_REGION, SATISFACTION_YEAR};
pub use canvas::{ChartCanvas, GlobeAnimation};
pub use plotter::ChartPlotter;
pub use projection::{AxisScale, Camera, Projected};
pub use specs::*;

use crate::data::DataError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChartError {
    #[error(transparent)]
    Data(#[from] DataError),
    #[error("{chart}: filtered subset is empty")]
    EmptySubset { chart: &'static str },
}
