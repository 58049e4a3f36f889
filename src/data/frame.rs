//! Typed column extraction helpers over Polars frames.

use super::DataError;
use polars::prelude::*;

/// Read a numeric column as `f64`, casting integer columns.
pub fn column_f64(df: &DataFrame, name: &str) -> Result<Vec<f64>, DataError> {
    let values = df.column(name)?.cast(&DataType::Float64)?;
    values
        .as_materialized_series()
        .f64()?
        .into_iter()
        .map(|v| v.ok_or_else(|| DataError::MissingValues(name.to_string())))
        .collect()
}

/// Read an integer column as `i32`.
pub fn column_i32(df: &DataFrame, name: &str) -> Result<Vec<i32>, DataError> {
    let values = df.column(name)?.cast(&DataType::Int32)?;
    values
        .as_materialized_series()
        .i32()?
        .into_iter()
        .map(|v| v.ok_or_else(|| DataError::MissingValues(name.to_string())))
        .collect()
}

/// Read a string column.
pub fn column_str(df: &DataFrame, name: &str) -> Result<Vec<String>, DataError> {
    df.column(name)?
        .as_materialized_series()
        .str()?
        .into_iter()
        .map(|v| {
            v.map(str::to_string)
                .ok_or_else(|| DataError::MissingValues(name.to_string()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_columns_read_as_floats() {
        let df = DataFrame::new(vec![Column::new("n".into(), vec![1i64, 2, 3])]).unwrap();
        assert_eq!(column_f64(&df, "n").unwrap(), vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn missing_values_are_reported() {
        let df = DataFrame::new(vec![Column::new("s".into(), vec![Some("a"), None])]).unwrap();
        let err = column_str(&df, "s").unwrap_err();
        assert!(err.to_string().contains("'s'"));
    }

    #[test]
    fn unknown_column_is_a_polars_error() {
        let df = DataFrame::new(vec![Column::new("n".into(), vec![1i32])]).unwrap();
        assert!(matches!(column_i32(&df, "missing"), Err(DataError::Polars(_))));
    }
}
