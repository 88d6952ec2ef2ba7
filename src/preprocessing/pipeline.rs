//! Column preprocessing pipeline

use crate::error::{StudentError, Result};
use crate::inference::Transformer;
use super::{
    encoder::OneHotEncoder,
    imputer::{Imputer, ImputeStrategy},
    scaler::Scaler,
    CATEGORICAL_FEATURES, NUMERIC_FEATURES,
};
use ndarray::Array2;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Instant;

/// Fitted column transformer for the student dataset.
///
/// Numeric columns: median imputation, then standard scaling.
/// Categorical columns: most-frequent imputation, one-hot encoding, then
/// scaling without centering. Output columns are the numeric features
/// followed by each categorical block.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataPreprocessor {
    numeric_columns: Vec<String>,
    categorical_columns: Vec<String>,
    numeric_imputer: Imputer,
    categorical_imputer: Imputer,
    numeric_scaler: Scaler,
    encoder: OneHotEncoder,
    categorical_scaler: Scaler,
    is_fitted: bool,
    /// Rows seen during fit
    n_samples_seen: usize,
}

impl DataPreprocessor {
    /// Preprocessor over the student feature columns
    pub fn new() -> Self {
        Self::with_columns(&NUMERIC_FEATURES, &CATEGORICAL_FEATURES)
    }

    /// Preprocessor over custom column lists
    pub fn with_columns(numeric: &[&str], categorical: &[&str]) -> Self {
        Self {
            numeric_columns: numeric.iter().map(|s| s.to_string()).collect(),
            categorical_columns: categorical.iter().map(|s| s.to_string()).collect(),
            numeric_imputer: Imputer::new(ImputeStrategy::Median),
            categorical_imputer: Imputer::new(ImputeStrategy::MostFrequent),
            numeric_scaler: Scaler::new(),
            encoder: OneHotEncoder::new(),
            categorical_scaler: Scaler::without_mean(),
            is_fitted: false,
            n_samples_seen: 0,
        }
    }

    fn numeric_refs(&self) -> Vec<&str> {
        self.numeric_columns.iter().map(String::as_str).collect()
    }

    fn categorical_refs(&self) -> Vec<&str> {
        self.categorical_columns.iter().map(String::as_str).collect()
    }

    /// Fit on a frame holding at least the configured feature columns
    pub fn fit(&mut self, df: &DataFrame) -> Result<&mut Self> {
        let start = Instant::now();
        let numeric = self.numeric_refs();
        let categorical = self.categorical_refs();

        let mut numeric_imputer = Imputer::new(ImputeStrategy::Median);
        numeric_imputer.fit(df, &numeric)?;
        let mut categorical_imputer = Imputer::new(ImputeStrategy::MostFrequent);
        categorical_imputer.fit(df, &categorical)?;

        let numeric_cols = numeric
            .iter()
            .map(|c| numeric_imputer.numeric_column(df, c))
            .collect::<Result<Vec<_>>>()?;
        let mut numeric_scaler = Scaler::new();
        numeric_scaler.fit(&numeric_cols)?;

        let categorical_cols = categorical
            .iter()
            .map(|c| categorical_imputer.categorical_column(df, c).map(|v| (*c, v)))
            .collect::<Result<Vec<_>>>()?;
        let mut encoder = OneHotEncoder::new();
        encoder.fit(&categorical_cols)?;
        let onehot = encoder.transform(&categorical_cols)?;
        let mut categorical_scaler = Scaler::without_mean();
        categorical_scaler.fit(&onehot)?;

        self.numeric_imputer = numeric_imputer;
        self.categorical_imputer = categorical_imputer;
        self.numeric_scaler = numeric_scaler;
        self.encoder = encoder;
        self.categorical_scaler = categorical_scaler;
        self.n_samples_seen = df.height();
        self.is_fitted = true;

        tracing::debug!(
            rows = df.height(),
            n_features = self.n_features_out(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Preprocessor fitted"
        );
        Ok(self)
    }

    /// Transform a frame into the numeric feature matrix
    pub fn transform(&self, df: &DataFrame) -> Result<Array2<f64>> {
        if !self.is_fitted {
            return Err(StudentError::ModelNotFitted);
        }

        let mut numeric_cols = self
            .numeric_columns
            .iter()
            .map(|c| self.numeric_imputer.numeric_column(df, c))
            .collect::<Result<Vec<_>>>()?;
        self.numeric_scaler.transform(&mut numeric_cols)?;

        let categorical_cols = self
            .categorical_columns
            .iter()
            .map(|c| {
                self.categorical_imputer
                    .categorical_column(df, c)
                    .map(|v| (c.as_str(), v))
            })
            .collect::<Result<Vec<_>>>()?;
        let mut onehot = self.encoder.transform(&categorical_cols)?;
        self.categorical_scaler.transform(&mut onehot)?;

        let columns: Vec<Vec<f64>> = numeric_cols.into_iter().chain(onehot).collect();
        let n_rows = df.height();
        Ok(Array2::from_shape_fn((n_rows, columns.len()), |(i, j)| columns[j][i]))
    }

    /// Fit and transform in one step
    pub fn fit_transform(&mut self, df: &DataFrame) -> Result<Array2<f64>> {
        self.fit(df)?;
        self.transform(df)
    }

    /// Output column names in matrix order
    pub fn feature_names(&self) -> Vec<String> {
        self.numeric_columns
            .iter()
            .cloned()
            .chain(self.encoder.feature_names())
            .collect()
    }

    /// Number of output columns
    pub fn n_features_out(&self) -> usize {
        self.numeric_columns.len() + self.encoder.n_outputs()
    }

    pub fn is_fitted(&self) -> bool {
        self.is_fitted
    }

    pub fn n_samples_seen(&self) -> usize {
        self.n_samples_seen
    }

    /// Save the fitted preprocessor as a JSON artifact
    pub fn save(&self, path: &Path) -> Result<()> {
        crate::utils::save_object(path, self)
    }

    /// Load a preprocessor artifact
    pub fn load(path: &Path) -> Result<Self> {
        crate::utils::load_object(path)
    }
}

impl Default for DataPreprocessor {
    fn default() -> Self {
        Self::new()
    }
}

impl Transformer for DataPreprocessor {
    fn transform(&self, features: &DataFrame) -> Result<Array2<f64>> {
        DataPreprocessor::transform(self, features)
    }
}
