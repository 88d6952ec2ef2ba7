//! One-hot encoding of categorical columns

use crate::error::{StudentError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// One-hot encoder over a fixed list of columns.
///
/// Categories are sorted per column. A category not seen during fit encodes
/// as an all-zero block.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OneHotEncoder {
    categories: Vec<(String, Vec<String>)>,
    is_fitted: bool,
}

impl OneHotEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Learn categories; `columns` pairs each column name with its values
    pub fn fit(&mut self, columns: &[(&str, Vec<String>)]) -> Result<&mut Self> {
        self.categories = columns
            .iter()
            .map(|(name, values)| {
                let cats: BTreeSet<&String> = values.iter().collect();
                (name.to_string(), cats.into_iter().cloned().collect())
            })
            .collect();
        self.is_fitted = true;
        Ok(self)
    }

    /// Encode into column-major indicator vectors
    pub fn transform(&self, columns: &[(&str, Vec<String>)]) -> Result<Vec<Vec<f64>>> {
        if !self.is_fitted {
            return Err(StudentError::ModelNotFitted);
        }
        if columns.len() != self.categories.len() {
            return Err(StudentError::ShapeError {
                expected: format!("{} categorical columns", self.categories.len()),
                actual: format!("{} categorical columns", columns.len()),
            });
        }

        let mut out = Vec::with_capacity(self.n_outputs());
        for ((name, values), (fitted_name, cats)) in columns.iter().zip(&self.categories) {
            if *name != fitted_name.as_str() {
                return Err(StudentError::FeatureNotFound(fitted_name.clone()));
            }
            for cat in cats {
                out.push(
                    values
                        .iter()
                        .map(|v| if v == cat { 1.0 } else { 0.0 })
                        .collect(),
                );
            }
        }
        Ok(out)
    }

    /// Total number of indicator columns
    pub fn n_outputs(&self) -> usize {
        self.categories.iter().map(|(_, cats)| cats.len()).sum()
    }

    /// Output names as `column_category`
    pub fn feature_names(&self) -> Vec<String> {
        self.categories
            .iter()
            .flat_map(|(name, cats)| cats.iter().map(move |c| format!("{}_{}", name, c)))
            .collect()
    }
}
