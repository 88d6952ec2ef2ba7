//! Model training module
//!
//! Linear models and the trainer stage that selects and persists the model
//! artifact consumed by the prediction pipeline.

pub mod linear_models;
mod models;
mod trainer;

pub use linear_models::LinearRegression;
pub use models::{ModelType, RegressionModel};
pub use trainer::{split_features_target, ModelTrainer, ModelTrainerConfig, TrainerReport};
