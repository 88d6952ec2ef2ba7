//! Student performance predictor
//!
//! Trains a regression model that predicts a student's math score from
//! demographic and test-preparation features, and serves predictions.
//!
//! # Modules
//!
//! ## Pipeline stages
//! - [`ingestion`] - Raw copy and seeded train/test split
//! - [`preprocessing`] - Imputation, scaling, one-hot encoding, transformation stage
//! - [`training`] - Linear/ridge regression and model selection
//! - [`inference`] - Custom data record and prediction pipeline
//!
//! ## Services
//! - [`server`] - Prediction form and JSON API
//! - [`cli`] - Command-line interface
//!
//! ## Support
//! - [`error`] - Error type and stage context
//! - [`logging`] - Console and per-process log file
//! - [`utils`] - Artifact and CSV helpers

// Core error handling
pub mod error;
pub mod logging;

// Pipeline stages
pub mod ingestion;
pub mod preprocessing;
pub mod training;
pub mod inference;

// Utilities
pub mod utils;

// Services
pub mod server;
pub mod cli;

pub use error::{Result, StudentError};

/// Re-export commonly used types
pub mod prelude {
    // Error handling
    pub use crate::error::{Result, ResultExt, Stage, StudentError};

    // Ingestion
    pub use crate::ingestion::{DataIngestion, DataIngestionConfig};

    // Preprocessing
    pub use crate::preprocessing::{DataPreprocessor, DataTransformation, DataTransformationConfig};

    // Training
    pub use crate::training::{LinearRegression, ModelTrainer, ModelTrainerConfig, ModelType, RegressionModel};

    // Inference
    pub use crate::inference::{
        ArtifactLoader, CustomData, JsonArtifactLoader, PredictPipeline, PredictPipelineConfig,
        Predictor, ScorePredictor, Transformer,
    };
}
