//! Aggregator Module
//! Group-by summaries of the record table consumed by the chart builders.

use super::{
    DataError, CO2_REDUCTION, PRODUCT, PRODUCTION_COST, REGION, SALES, SATISFACTION,
    TOTAL_PRODUCTION, YEAR,
};
use polars::prelude::*;

/// Factor applied to summed Sales to derive Total_Production.
pub const PRODUCTION_FACTOR: f64 = 1.2;

/// Weighted satisfaction column produced by [`Aggregator::sales_by_path`].
pub const WEIGHTED_SATISFACTION: &str = "Weighted_Satisfaction";

pub struct Aggregator;

impl Aggregator {
    /// One row per (Region, Product), sorted by both keys.
    ///
    /// Output columns: Region, Product, Sales (sum), Customer_Satisfaction
    /// (mean), CO2_Reduction (sum), Production_Cost (sum), Total_Production.
    pub fn aggregate(df: &DataFrame) -> Result<DataFrame, DataError> {
        let out = df
            .clone()
            .lazy()
            .group_by([col(REGION), col(PRODUCT)])
            .agg([
                col(SALES).sum(),
                col(SATISFACTION).mean(),
                col(CO2_REDUCTION).sum(),
                col(PRODUCTION_COST).sum(),
            ])
            .with_column(
                (col(SALES).cast(DataType::Float64) * lit(PRODUCTION_FACTOR))
                    .alias(TOTAL_PRODUCTION),
            )
            .sort([REGION, PRODUCT], SortMultipleOptions::default())
            .collect()?;
        Ok(out)
    }

    /// Summed Sales per (Region, Year), sorted by Region then Year.
    pub fn sales_by_region_year(df: &DataFrame) -> Result<DataFrame, DataError> {
        let out = df
            .clone()
            .lazy()
            .group_by([col(REGION), col(YEAR)])
            .agg([col(SALES).sum()])
            .sort([REGION, YEAR], SortMultipleOptions::default())
            .collect()?;
        Ok(out)
    }

    /// Summed CO2_Reduction per (Year, Product), sorted by Year then Product.
    pub fn co2_by_year_product(df: &DataFrame) -> Result<DataFrame, DataError> {
        let out = df
            .clone()
            .lazy()
            .group_by([col(YEAR), col(PRODUCT)])
            .agg([col(CO2_REDUCTION).sum()])
            .sort([YEAR, PRODUCT], SortMultipleOptions::default())
            .collect()?;
        Ok(out)
    }

    /// Summed Sales and Sales-weighted satisfaction per (Year, Region, Product).
    ///
    /// The weighted column holds `sum(Sales * Customer_Satisfaction)` so that
    /// parents can be combined by summing before dividing by their Sales.
    pub fn sales_by_path(df: &DataFrame) -> Result<DataFrame, DataError> {
        let out = df
            .clone()
            .lazy()
            .group_by([col(YEAR), col(REGION), col(PRODUCT)])
            .agg([
                col(SALES).sum(),
                (col(SALES).cast(DataType::Float64) * col(SATISFACTION))
                    .sum()
                    .alias(WEIGHTED_SATISFACTION),
            ])
            .sort([YEAR, REGION, PRODUCT], SortMultipleOptions::default())
            .collect()?;
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{column_f64, column_str, DatasetGenerator, PRODUCTS, REGIONS, YEARS};

    fn records() -> DataFrame {
        DatasetGenerator::generate(42).unwrap()
    }

    #[test]
    fn aggregate_is_sorted_by_region_then_product() {
        let agg = Aggregator::aggregate(&records()).unwrap();
        let regions = column_str(&agg, REGION).unwrap();
        let products = column_str(&agg, PRODUCT).unwrap();
        let keys: Vec<(String, String)> = regions.into_iter().zip(products).collect();

        let mut sorted = keys.clone();
        sorted.sort();
        assert_eq!(keys, sorted);
        assert_eq!(keys[0], ("Africa".to_string(), "Eco Batteries".to_string()));
    }

    #[test]
    fn aggregate_sales_sum_matches_records() {
        let df = records();
        let agg = Aggregator::aggregate(&df).unwrap();
        let total: f64 = column_f64(&df, SALES).unwrap().iter().sum();
        let agg_total: f64 = column_f64(&agg, SALES).unwrap().iter().sum();
        assert_eq!(total, agg_total);
    }

    #[test]
    fn region_year_pivot_source_has_one_row_per_cell() {
        let out = Aggregator::sales_by_region_year(&records()).unwrap();
        assert_eq!(out.height(), REGIONS.len() * YEARS.len());
    }

    #[test]
    fn co2_by_year_product_has_one_row_per_pair() {
        let out = Aggregator::co2_by_year_product(&records()).unwrap();
        assert_eq!(out.height(), YEARS.len() * PRODUCTS.len());
    }

    #[test]
    fn weighted_satisfaction_stays_within_range() {
        let out = Aggregator::sales_by_path(&records()).unwrap();
        let sales = column_f64(&out, SALES).unwrap();
        let weighted = column_f64(&out, WEIGHTED_SATISFACTION).unwrap();
        for (s, w) in sales.iter().zip(&weighted) {
            let mean = w / s;
            assert!((3.5..5.0).contains(&mean));
        }
    }
}
