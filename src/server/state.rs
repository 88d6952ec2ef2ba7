//! Application state management

use std::sync::Arc;

use crate::inference::{PredictPipeline, PredictPipelineConfig, ScorePredictor};

use super::ServerConfig;

/// Application state shared across handlers
pub struct AppState {
    pub predictor: Arc<dyn ScorePredictor>,
}

impl AppState {
    /// State backed by the JSON artifacts in `config.artifacts_dir`
    pub fn new(config: &ServerConfig) -> Self {
        let pipeline = PredictPipeline::new(PredictPipelineConfig::from_artifacts_dir(
            &config.artifacts_dir,
        ));
        Self::with_predictor(Arc::new(pipeline))
    }

    /// State with an arbitrary predictor
    pub fn with_predictor(predictor: Arc<dyn ScorePredictor>) -> Self {
        Self { predictor }
    }
}
