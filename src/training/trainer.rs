//! Model trainer stage
//!
//! Fits every candidate on the transformed train split, keeps the one with
//! the best test R² and writes it as the model artifact.

use crate::error::{ResultExt, Stage, StudentError, Result};
use super::{ModelType, RegressionModel};
use ndarray::{s, Array1, Array2};
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

/// Configuration for the model trainer
#[derive(Debug, Clone, PartialEq)]
pub struct ModelTrainerConfig {
    /// Where the selected model is written
    pub model_path: PathBuf,
    /// Ridge strengths tried in addition to plain least squares
    pub ridge_alphas: Vec<f64>,
    /// Minimum acceptable test R²
    pub min_r2: f64,
}

impl Default for ModelTrainerConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from("artifacts").join("model.json"),
            ridge_alphas: vec![0.1, 1.0, 10.0],
            min_r2: 0.6,
        }
    }
}

impl ModelTrainerConfig {
    /// Place the model artifact under `dir`
    pub fn with_artifacts_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.model_path = dir.as_ref().join("model.json");
        self
    }

    /// Builder method to set the ridge grid
    pub fn with_ridge_alphas(mut self, alphas: Vec<f64>) -> Self {
        self.ridge_alphas = alphas;
        self
    }

    /// Builder method to set the acceptance threshold
    pub fn with_min_r2(mut self, min_r2: f64) -> Self {
        self.min_r2 = min_r2;
        self
    }

    /// Candidate list in evaluation order
    pub fn candidates(&self) -> Vec<ModelType> {
        std::iter::once(ModelType::LinearRegression)
            .chain(self.ridge_alphas.iter().map(|&alpha| ModelType::Ridge { alpha }))
            .collect()
    }
}

/// Outcome of a training run
#[derive(Debug, Clone)]
pub struct TrainerReport {
    pub best_model: ModelType,
    pub best_r2: f64,
    /// Test R² for every candidate, in evaluation order
    pub scores: Vec<(ModelType, f64)>,
    pub model_path: PathBuf,
}

/// Model trainer component
pub struct ModelTrainer {
    config: ModelTrainerConfig,
    span: tracing::Span,
}

/// Split `[features | target]` into `(x, y)`
pub fn split_features_target(data: &Array2<f64>) -> Result<(Array2<f64>, Array1<f64>)> {
    if data.ncols() < 2 {
        return Err(StudentError::ShapeError {
            expected: "at least 2 columns".to_string(),
            actual: format!("{} columns", data.ncols()),
        });
    }
    let last = data.ncols() - 1;
    Ok((data.slice(s![.., ..last]).to_owned(), data.column(last).to_owned()))
}

impl ModelTrainer {
    pub fn new(config: ModelTrainerConfig) -> Self {
        let span = tracing::info_span!("model_trainer");
        Self { config, span }
    }

    /// Train, select and persist the best model
    pub fn initiate_model_trainer(
        &self,
        train: &Array2<f64>,
        test: &Array2<f64>,
    ) -> Result<TrainerReport> {
        let _guard = self.span.enter();
        self.run(train, test).stage(Stage::Training).map_err(|e| {
            error!(error = %e, "Error occurred during model training");
            e
        })
    }

    fn run(&self, train: &Array2<f64>, test: &Array2<f64>) -> Result<TrainerReport> {
        info!("Splitting training and test input data");
        let (x_train, y_train) = split_features_target(train)?;
        let (x_test, y_test) = split_features_target(test)?;

        let mut scores = Vec::new();
        let mut best: Option<RegressionModel> = None;

        for model_type in self.config.candidates() {
            let mut regressor = model_type.build();
            if let Err(e) = regressor.fit(&x_train, &y_train) {
                warn!(model = %model_type, error = %e, "Candidate failed to fit");
                continue;
            }
            let r2 = regressor.score(&x_test, &y_test)?;
            if !r2.is_finite() {
                warn!(model = %model_type, test_r2 = r2, "Candidate scored a non-finite R², skipping");
                continue;
            }
            info!(model = %model_type, test_r2 = r2, "Candidate evaluated");
            scores.push((model_type.clone(), r2));

            if best.as_ref().map_or(true, |b| r2 > b.test_r2) {
                best = Some(RegressionModel { model_type, regressor, test_r2: r2 });
            }
        }

        let best = best.ok_or_else(|| {
            StudentError::Computation("no candidate model could be fitted and scored".to_string())
        })?;

        if best.test_r2 < self.config.min_r2 {
            return Err(StudentError::NoBestModel {
                best_r2: best.test_r2,
                threshold: self.config.min_r2,
            });
        }

        info!(model = %best.model_type, test_r2 = best.test_r2, "Best model found");
        best.save(&self.config.model_path)?;
        info!(path = %self.config.model_path.display(), "Saved model");

        Ok(TrainerReport {
            best_model: best.model_type,
            best_r2: best.test_r2,
            scores,
            model_path: self.config.model_path.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn linear_data(n: usize, offset: f64) -> Array2<f64> {
        Array2::from_shape_fn((n, 3), |(i, j)| {
            let a = i as f64 + offset;
            let b = ((i * 7) % 5) as f64;
            match j {
                0 => a,
                1 => b,
                _ => 2.0 * a - 3.0 * b + 1.0,
            }
        })
    }

    #[test]
    fn test_split_features_target() {
        let data = linear_data(4, 0.0);
        let (x, y) = split_features_target(&data).unwrap();
        assert_eq!(x.dim(), (4, 2));
        assert_eq!(y.len(), 4);
        assert_eq!(y[1], 2.0 * 1.0 - 3.0 * 2.0 + 1.0);
    }

    #[test]
    fn test_candidates_order() {
        let config = ModelTrainerConfig::default().with_ridge_alphas(vec![1.0]);
        assert_eq!(
            config.candidates(),
            vec![ModelType::LinearRegression, ModelType::Ridge { alpha: 1.0 }]
        );
    }

    #[test]
    fn test_trainer_selects_and_saves() {
        let dir = tempfile::tempdir().unwrap();
        let config = ModelTrainerConfig::default().with_artifacts_dir(dir.path());
        let trainer = ModelTrainer::new(config);

        let report = trainer
            .initiate_model_trainer(&linear_data(40, 0.0), &linear_data(10, 40.0))
            .unwrap();

        assert_eq!(report.best_model, ModelType::LinearRegression);
        assert!(report.best_r2 > 0.999);
        assert_eq!(report.scores.len(), 4);
        assert!(report.model_path.exists());
    }

    #[test]
    fn test_trainer_rejects_poor_models() {
        let dir = tempfile::tempdir().unwrap();
        let config = ModelTrainerConfig::default()
            .with_artifacts_dir(dir.path())
            .with_min_r2(1.5);
        let trainer = ModelTrainer::new(config);

        let err = trainer
            .initiate_model_trainer(&linear_data(40, 0.0), &linear_data(10, 40.0))
            .unwrap_err();
        assert_eq!(err.stage(), Some(Stage::Training));
        assert!(matches!(err.root_cause(), StudentError::NoBestModel { .. }));
        assert!(!dir.path().join("model.json").exists());
    }

    #[test]
    fn test_trainer_skips_non_finite_scores() {
        let dir = tempfile::tempdir().unwrap();
        let config = ModelTrainerConfig::default().with_artifacts_dir(dir.path());
        let trainer = ModelTrainer::new(config);

        let mut test = linear_data(10, 40.0);
        test[[3, 2]] = f64::NAN;

        let err = trainer
            .initiate_model_trainer(&linear_data(40, 0.0), &test)
            .unwrap_err();
        assert_eq!(err.stage(), Some(Stage::Training));
        assert!(matches!(err.root_cause(), StudentError::Computation(_)));
        assert!(!dir.path().join("model.json").exists());
    }
}
