//! Synthetic Dataset Generator
//! Builds the fixed-shape EcoTech record table from a seeded RNG.

use super::{
    DataError, CO2_REDUCTION, LATITUDE, LONGITUDE, PRODUCT, PRODUCTION_COST, PRODUCTS, REGION,
    REGIONS, ROWS_PER_COMBINATION, SALES, SATISFACTION, YEAR, YEARS,
};
use polars::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

/// A region together with the coordinates every one of its records carries.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegionSite {
    pub name: &'static str,
    pub latitude: f64,
    pub longitude: f64,
}

impl RegionSite {
    pub const fn new(name: &'static str, latitude: f64, longitude: f64) -> Self {
        Self {
            name,
            latitude,
            longitude,
        }
    }
}

/// One synthetic sales/sustainability observation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    pub year: i32,
    pub region: String,
    pub product: String,
    pub sales: i64,
    pub customer_satisfaction: f64,
    pub co2_reduction: f64,
    pub production_cost: f64,
    pub latitude: f64,
    pub longitude: f64,
}

/// Generates the record table.
pub struct DatasetGenerator;

impl DatasetGenerator {
    /// Total rows of the table: years x regions x products x repeats.
    pub const fn row_count() -> usize {
        YEARS.len() * REGIONS.len() * PRODUCTS.len() * ROWS_PER_COMBINATION
    }

    /// Generate the typed records for `seed`.
    ///
    /// Rows are laid out Year-major, then Region, then Product, then repeats.
    /// Random columns are drawn one whole column at a time in the order
    /// Sales, Customer_Satisfaction, CO2_Reduction, Production_Cost.
    pub fn records(seed: u64) -> Vec<Record> {
        let n = Self::row_count();
        let mut rng = StdRng::seed_from_u64(seed);

        let sales: Vec<i64> = (0..n).map(|_| rng.random_range(50..500)).collect();
        let satisfaction: Vec<f64> = (0..n).map(|_| rng.random_range(3.5..5.0)).collect();
        let co2: Vec<f64> = (0..n).map(|_| rng.random_range(100.0..1000.0)).collect();
        let cost: Vec<f64> = (0..n).map(|_| rng.random_range(1000.0..10000.0)).collect();

        let mut records = Vec::with_capacity(n);
        for year in YEARS {
            for site in REGIONS {
                for product in PRODUCTS {
                    for _ in 0..ROWS_PER_COMBINATION {
                        let i = records.len();
                        records.push(Record {
                            year,
                            region: site.name.to_string(),
                            product: product.to_string(),
                            sales: sales[i],
                            customer_satisfaction: satisfaction[i],
                            co2_reduction: co2[i],
                            production_cost: cost[i],
                            latitude: site.latitude,
                            longitude: site.longitude,
                        });
                    }
                }
            }
        }
        records
    }

    /// Generate the record table as a DataFrame.
    pub fn generate(seed: u64) -> Result<DataFrame, DataError> {
        Self::to_frame(&Self::records(seed))
    }

    /// Convert typed records into the column layout the charts read.
    pub fn to_frame(records: &[Record]) -> Result<DataFrame, DataError> {
        let df = DataFrame::new(vec![
            Column::new(YEAR.into(), records.iter().map(|r| r.year).collect::<Vec<_>>()),
            Column::new(
                REGION.into(),
                records.iter().map(|r| r.region.as_str()).collect::<Vec<_>>(),
            ),
            Column::new(
                PRODUCT.into(),
                records.iter().map(|r| r.product.as_str()).collect::<Vec<_>>(),
            ),
            Column::new(SALES.into(), records.iter().map(|r| r.sales).collect::<Vec<_>>()),
            Column::new(
                SATISFACTION.into(),
                records
                    .iter()
                    .map(|r| r.customer_satisfaction)
                    .collect::<Vec<_>>(),
            ),
            Column::new(
                CO2_REDUCTION.into(),
                records.iter().map(|r| r.co2_reduction).collect::<Vec<_>>(),
            ),
            Column::new(
                PRODUCTION_COST.into(),
                records.iter().map(|r| r.production_cost).collect::<Vec<_>>(),
            ),
            Column::new(
                LATITUDE.into(),
                records.iter().map(|r| r.latitude).collect::<Vec<_>>(),
            ),
            Column::new(
                LONGITUDE.into(),
                records.iter().map(|r| r.longitude).collect::<Vec<_>>(),
            ),
        ])?;
        Ok(df)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_is_year_major() {
        let records = DatasetGenerator::records(7);
        let block = REGIONS.len() * PRODUCTS.len() * ROWS_PER_COMBINATION;

        assert_eq!(records[0].year, 2020);
        assert_eq!(records[block - 1].year, 2020);
        assert_eq!(records[block].year, 2021);

        assert_eq!(records[0].region, "North America");
        assert_eq!(records[PRODUCTS.len() * ROWS_PER_COMBINATION].region, "Europe");

        assert_eq!(records[0].product, "Solar Panels");
        assert_eq!(records[ROWS_PER_COMBINATION].product, "Wind Turbines");
    }

    #[test]
    fn values_stay_in_their_ranges() {
        for r in DatasetGenerator::records(3) {
            assert!((50..500).contains(&r.sales));
            assert!((3.5..5.0).contains(&r.customer_satisfaction));
            assert!((100.0..1000.0).contains(&r.co2_reduction));
            assert!((1000.0..10000.0).contains(&r.production_cost));
        }
    }

    #[test]
    fn coordinates_follow_region() {
        for r in DatasetGenerator::records(1) {
            let site = REGIONS.iter().find(|s| s.name == r.region).unwrap();
            assert_eq!(r.latitude, site.latitude);
            assert_eq!(r.longitude, site.longitude);
        }
    }

    #[test]
    fn different_seeds_differ() {
        assert_ne!(DatasetGenerator::records(1), DatasetGenerator::records(2));
    }
}
