//! Missing value imputation

use crate::error::{StudentError, Result};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::{categorical_values, numeric_values};

/// Strategy for imputing missing values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ImputeStrategy {
    /// Replace with median (numeric only)
    Median,
    /// Replace with the most frequent category; ties go to the smallest value
    MostFrequent,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
enum ImputeValue {
    Numeric(f64),
    String(String),
}

/// Imputer for handling missing values
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Imputer {
    strategy: ImputeStrategy,
    fill_values: HashMap<String, ImputeValue>,
    is_fitted: bool,
}

impl Imputer {
    /// Create a new imputer with the specified strategy
    pub fn new(strategy: ImputeStrategy) -> Self {
        Self {
            strategy,
            fill_values: HashMap::new(),
            is_fitted: false,
        }
    }

    /// Fit the imputer to the given columns
    pub fn fit(&mut self, df: &DataFrame, columns: &[&str]) -> Result<&mut Self> {
        for col_name in columns {
            let value = match self.strategy {
                ImputeStrategy::Median => {
                    let values = numeric_values(df, col_name)?;
                    ImputeValue::Numeric(median(values.into_iter().flatten().collect()))
                }
                ImputeStrategy::MostFrequent => {
                    let values = categorical_values(df, col_name)?;
                    let mode = most_frequent(values.into_iter().flatten()).ok_or_else(|| {
                        StudentError::Data(format!("column '{}' has no values", col_name))
                    })?;
                    ImputeValue::String(mode)
                }
            };
            self.fill_values.insert(col_name.to_string(), value);
        }

        self.is_fitted = true;
        Ok(self)
    }

    /// Numeric column with missing values filled
    pub fn numeric_column(&self, df: &DataFrame, col_name: &str) -> Result<Vec<f64>> {
        let fill = match self.fill_value(col_name)? {
            ImputeValue::Numeric(v) => *v,
            ImputeValue::String(_) => {
                return Err(StudentError::Data(format!(
                    "column '{}' was fitted as categorical",
                    col_name
                )))
            }
        };
        Ok(numeric_values(df, col_name)?
            .into_iter()
            .map(|v| v.unwrap_or(fill))
            .collect())
    }

    /// Categorical column with missing values filled
    pub fn categorical_column(&self, df: &DataFrame, col_name: &str) -> Result<Vec<String>> {
        let fill = match self.fill_value(col_name)? {
            ImputeValue::String(v) => v,
            ImputeValue::Numeric(_) => {
                return Err(StudentError::Data(format!(
                    "column '{}' was fitted as numeric",
                    col_name
                )))
            }
        };
        Ok(categorical_values(df, col_name)?
            .into_iter()
            .map(|v| v.unwrap_or_else(|| fill.clone()))
            .collect())
    }

    fn fill_value(&self, col_name: &str) -> Result<&ImputeValue> {
        if !self.is_fitted {
            return Err(StudentError::ModelNotFitted);
        }
        self.fill_values
            .get(col_name)
            .ok_or_else(|| StudentError::FeatureNotFound(col_name.to_string()))
    }
}

fn median(mut values: Vec<f64>) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.sort_by(|a, b| a.total_cmp(b));
    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        (values[mid - 1] + values[mid]) / 2.0
    } else {
        values[mid]
    }
}

fn most_frequent(values: impl Iterator<Item = String>) -> Option<String> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for v in values {
        *counts.entry(v).or_insert(0) += 1;
    }
    counts
        .into_iter()
        .max_by(|(a_val, a_n), (b_val, b_n)| a_n.cmp(b_n).then_with(|| b_val.cmp(a_val)))
        .map(|(v, _)| v)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame() -> DataFrame {
        DataFrame::new(vec![
            Column::new("score".into(), &[Some(10.0), None, Some(30.0), Some(20.0)]),
            Column::new(
                "lunch".into(),
                &[Some("standard"), Some("free/reduced"), None, Some("standard")],
            ),
        ])
        .unwrap()
    }

    #[test]
    fn test_median_imputation() {
        let df = frame();
        let mut imputer = Imputer::new(ImputeStrategy::Median);
        imputer.fit(&df, &["score"]).unwrap();

        let filled = imputer.numeric_column(&df, "score").unwrap();
        assert_eq!(filled, vec![10.0, 20.0, 30.0, 20.0]);
    }

    #[test]
    fn test_most_frequent_imputation() {
        let df = frame();
        let mut imputer = Imputer::new(ImputeStrategy::MostFrequent);
        imputer.fit(&df, &["lunch"]).unwrap();

        let filled = imputer.categorical_column(&df, "lunch").unwrap();
        assert_eq!(filled[2], "standard");
    }

    #[test]
    fn test_most_frequent_tie_takes_smallest() {
        let mode = most_frequent(["b", "a", "b", "a"].iter().map(|s| s.to_string()));
        assert_eq!(mode.as_deref(), Some("a"));
    }

    #[test]
    fn test_not_fitted() {
        let imputer = Imputer::new(ImputeStrategy::Median);
        assert!(matches!(
            imputer.numeric_column(&frame(), "score"),
            Err(StudentError::ModelNotFitted)
        ));
    }
}
