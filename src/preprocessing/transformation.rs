//! Data transformation stage
//!
//! Fits the preprocessor on the train split, transforms both splits into
//! `[features | target]` arrays and persists the preprocessor artifact.

use crate::error::{ResultExt, Stage, StudentError, Result};
use crate::utils::DataLoader;
use super::{numeric_values, DataPreprocessor, TARGET_COLUMN};
use ndarray::{concatenate, Array1, Array2, Axis};
use polars::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{error, info};

/// Configuration for the data transformation stage
#[derive(Debug, Clone, PartialEq)]
pub struct DataTransformationConfig {
    /// Where the fitted preprocessor is written
    pub preprocessor_path: PathBuf,
}

impl Default for DataTransformationConfig {
    fn default() -> Self {
        Self {
            preprocessor_path: PathBuf::from("artifacts").join("preprocessor.json"),
        }
    }
}

impl DataTransformationConfig {
    /// Place the preprocessor artifact under `dir`
    pub fn with_artifacts_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.preprocessor_path = dir.as_ref().join("preprocessor.json");
        self
    }
}

/// Result of a transformation run
#[derive(Debug, Clone)]
pub struct TransformationOutput {
    /// Transformed train split, target in the last column
    pub train: Array2<f64>,
    /// Transformed test split, target in the last column
    pub test: Array2<f64>,
    pub preprocessor_path: PathBuf,
}

/// Data transformation component
pub struct DataTransformation {
    config: DataTransformationConfig,
    span: tracing::Span,
}

impl DataTransformation {
    pub fn new(config: DataTransformationConfig) -> Self {
        let span = tracing::info_span!("data_transformation");
        Self { config, span }
    }

    /// Fit on `train_path`, transform both splits, save the preprocessor
    pub fn initiate_data_transformation(
        &self,
        train_path: &Path,
        test_path: &Path,
    ) -> Result<TransformationOutput> {
        let _guard = self.span.enter();
        self.run(train_path, test_path)
            .stage(Stage::Transformation)
            .map_err(|e| {
                error!(error = %e, "Error occurred during data transformation");
                e
            })
    }

    fn run(&self, train_path: &Path, test_path: &Path) -> Result<TransformationOutput> {
        let loader = DataLoader::new();
        let train_df = loader.load_csv(train_path)?;
        let test_df = loader.load_csv(test_path)?;
        info!(
            train_rows = train_df.height(),
            test_rows = test_df.height(),
            "Read train and test data"
        );

        let train_y = target_values(&train_df, TARGET_COLUMN)?;
        let test_y = target_values(&test_df, TARGET_COLUMN)?;

        info!("Fitting preprocessing object on training features");
        let mut preprocessor = DataPreprocessor::new();
        let train_x = preprocessor.fit_transform(&train_df)?;
        let test_x = preprocessor.transform(&test_df)?;

        let train = with_target(&train_x, &train_y)?;
        let test = with_target(&test_x, &test_y)?;

        preprocessor.save(&self.config.preprocessor_path)?;
        info!(
            path = %self.config.preprocessor_path.display(),
            n_features = preprocessor.n_features_out(),
            "Saved preprocessing object"
        );

        Ok(TransformationOutput {
            train,
            test,
            preprocessor_path: self.config.preprocessor_path.clone(),
        })
    }
}

fn target_values(df: &DataFrame, target: &str) -> Result<Array1<f64>> {
    numeric_values(df, target)?
        .into_iter()
        .enumerate()
        .map(|(i, v)| match v {
            Some(v) if v.is_finite() => Ok(v),
            Some(v) => Err(StudentError::Data(format!(
                "non-finite '{}' at row {}: {}",
                target, i, v
            ))),
            None => Err(StudentError::Data(format!("missing '{}' at row {}", target, i))),
        })
        .collect()
}

/// Append `y` as the last column of `x`
pub fn with_target(x: &Array2<f64>, y: &Array1<f64>) -> Result<Array2<f64>> {
    let y_col = y.view().insert_axis(Axis(1));
    Ok(concatenate(Axis(1), &[x.view(), y_col])?)
}
