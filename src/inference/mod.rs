//! Prediction pipeline module
//!
//! Provides single-record score prediction:
//! - Custom data record built from user input
//! - Artifact loading (preprocessor + model) on every call
//! - Capability traits for the transform and the regressor

mod config;
mod engine;
mod record;

pub use config::PredictPipelineConfig;
pub use engine::{ArtifactLoader, JsonArtifactLoader, PredictPipeline};
pub use record::{check_score, CustomData, FEATURE_COLUMNS, MAX_SCORE};

use crate::error::Result;
use ndarray::{Array1, Array2};
use polars::prelude::DataFrame;

/// Turns raw feature rows into the numeric matrix a [`Predictor`] consumes
pub trait Transformer: Send + Sync {
    fn transform(&self, features: &DataFrame) -> Result<Array2<f64>>;
}

/// Maps a feature matrix to one score per row
pub trait Predictor: Send + Sync {
    fn predict(&self, x: &Array2<f64>) -> Result<Array1<f64>>;
}

/// Anything that can score raw feature rows.
///
/// Implemented by [`PredictPipeline`]; the server holds it as a trait object.
pub trait ScorePredictor: Send + Sync {
    fn predict(&self, features: &DataFrame) -> Result<Vec<f64>>;
}
