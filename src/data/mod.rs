//! Data module - synthetic dataset generation and aggregation

mod aggregator;
mod frame;
mod generator;

pub use aggregator::{Aggregator, PRODUCTION_FACTOR, WEIGHTED_SATISFACTION};
pub use frame::{column_f64, column_i32, column_str};
pub use generator::{DatasetGenerator, Record, RegionSite};

use polars::prelude::*;
use thiserror::Error;
use tracing::info;

/// Column names shared by the generator, the aggregator and the chart builders.
pub const YEAR: &str = "Year";
pub const REGION: &str = "Region";
pub const PRODUCT: &str = "Product";
pub const SALES: &str = "Sales";
pub const SATISFACTION: &str = "Customer_Satisfaction";
pub const CO2_REDUCTION: &str = "CO2_Reduction";
pub const PRODUCTION_COST: &str = "Production_Cost";
pub const LATITUDE: &str = "Latitude";
pub const LONGITUDE: &str = "Longitude";
pub const TOTAL_PRODUCTION: &str = "Total_Production";

pub const YEARS: [i32; 5] = [2020, 2021, 2022, 2023, 2024];

pub const REGIONS: [RegionSite; 5] = [
    RegionSite::new("North America", 40.7, -74.0),
    RegionSite::new("Europe", 51.5, -0.1),
    RegionSite::new("Asia", 35.6, 139.7),
    RegionSite::new("South America", -23.5, -46.6),
    RegionSite::new("Africa", -1.2, 36.8),
];

pub const PRODUCTS: [&str; 4] = [
    "Solar Panels",
    "Wind Turbines",
    "Eco Batteries",
    "Water Purifiers",
];

/// Observations drawn for every (Year, Region, Product) combination.
pub const ROWS_PER_COMBINATION: usize = 10;

pub const DEFAULT_SEED: u64 = 42;

#[derive(Error, Debug)]
pub enum DataError {
    #[error("Polars error: {0}")]
    Polars(#[from] PolarsError),
    #[error("Column '{0}' has missing values")]
    MissingValues(String),
}

/// The record table plus its Region/Product aggregate.
///
/// Both frames are built once by [`Dataset::generate`] and never mutated.
#[derive(Debug, Clone)]
pub struct Dataset {
    seed: u64,
    records: DataFrame,
    aggregate: DataFrame,
}

impl Dataset {
    /// Generate the record table from `seed` and aggregate it.
    pub fn generate(seed: u64) -> Result<Self, DataError> {
        let records = DatasetGenerator::generate(seed)?;
        let aggregate = Aggregator::aggregate(&records)?;
        info!(
            seed,
            rows = records.height(),
            aggregate_rows = aggregate.height(),
            "dataset generated"
        );
        Ok(Self {
            seed,
            records,
            aggregate,
        })
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn records(&self) -> &DataFrame {
        &self.records
    }

    pub fn aggregate(&self) -> &DataFrame {
        &self.aggregate
    }

    /// Rows of the record table matching `predicate`.
    pub fn filter(&self, predicate: Expr) -> Result<DataFrame, DataError> {
        Ok(self.records.clone().lazy().filter(predicate).collect()?)
    }
}
