//! Persisted regression model

use crate::error::Result;
use crate::inference::Predictor;
use super::LinearRegression;
use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Candidate model family
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ModelType {
    /// Ordinary least squares
    LinearRegression,
    /// L2-regularized least squares
    Ridge { alpha: f64 },
}

impl ModelType {
    /// Unfitted regressor for this family
    pub fn build(&self) -> LinearRegression {
        match self {
            ModelType::LinearRegression => LinearRegression::new(),
            ModelType::Ridge { alpha } => LinearRegression::new().with_alpha(*alpha),
        }
    }
}

impl fmt::Display for ModelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelType::LinearRegression => write!(f, "Linear Regression"),
            ModelType::Ridge { alpha } => write!(f, "Ridge (alpha={})", alpha),
        }
    }
}

/// The model artifact: a fitted regressor plus what it was selected on
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegressionModel {
    pub model_type: ModelType,
    pub regressor: LinearRegression,
    /// R² on the held-out split at selection time
    pub test_r2: f64,
}

impl RegressionModel {
    pub fn predict(&self, x: &Array2<f64>) -> Result<Array1<f64>> {
        self.regressor.predict(x)
    }

    /// Save as a JSON artifact
    pub fn save(&self, path: &Path) -> Result<()> {
        crate::utils::save_object(path, self)
    }

    /// Load a model artifact
    pub fn load(path: &Path) -> Result<Self> {
        crate::utils::load_object(path)
    }
}

impl Predictor for RegressionModel {
    fn predict(&self, x: &Array2<f64>) -> Result<Array1<f64>> {
        self.regressor.predict(x)
    }
}
