//! Data preprocessing module
//!
//! Provides the fitted feature transform used at training and prediction time:
//! - Missing value imputation (median, most frequent)
//! - Standard scaling
//! - One-hot encoding of categorical columns
//! - The data transformation stage that fits and persists the preprocessor

mod encoder;
mod imputer;
mod pipeline;
mod scaler;
mod transformation;

pub use encoder::OneHotEncoder;
pub use imputer::{Imputer, ImputeStrategy};
pub use pipeline::DataPreprocessor;
pub use scaler::Scaler;
pub use transformation::{DataTransformation, DataTransformationConfig, TransformationOutput};

use crate::error::{StudentError, Result};
use polars::prelude::*;

/// Label column, present only in training data
pub const TARGET_COLUMN: &str = "math_score";

/// Numeric feature columns
pub const NUMERIC_FEATURES: [&str; 2] = ["reading_score", "writing_score"];

/// Categorical feature columns
pub const CATEGORICAL_FEATURES: [&str; 5] = [
    "gender",
    "race_ethnicity",
    "parental_level_of_education",
    "lunch",
    "test_preparation_course",
];

fn series_of<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Series> {
    df.column(name)
        .map(|c| c.as_materialized_series())
        .map_err(|_| StudentError::FeatureNotFound(name.to_string()))
}

/// Read a column as nullable `f64`; non-numeric text is an error
pub(crate) fn numeric_values(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>> {
    let series = series_of(df, name)?
        .strict_cast(&DataType::Float64)
        .map_err(|e| StudentError::Data(format!("column '{}' is not numeric: {}", name, e)))?;
    let ca = series.f64()?;
    Ok(ca.into_iter().collect())
}

/// Read a column as nullable strings
pub(crate) fn categorical_values(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>> {
    let series = series_of(df, name)?.cast(&DataType::String)?;
    let ca = series.str()?;
    Ok(ca.into_iter().map(|v| v.map(str::to_string)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_values_casts_integers() {
        let df = df!("reading_score" => &[72i64, 90]).unwrap();
        assert_eq!(
            numeric_values(&df, "reading_score").unwrap(),
            vec![Some(72.0), Some(90.0)]
        );
    }

    #[test]
    fn test_numeric_values_rejects_text() {
        let df = df!("reading_score" => &["seventy"]).unwrap();
        assert!(matches!(
            numeric_values(&df, "reading_score"),
            Err(StudentError::Data(_))
        ));
    }

    #[test]
    fn test_missing_column() {
        let df = df!("gender" => &["male"]).unwrap();
        assert!(matches!(
            categorical_values(&df, "lunch"),
            Err(StudentError::FeatureNotFound(_))
        ));
    }
}
