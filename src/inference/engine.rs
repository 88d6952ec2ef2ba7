//! Prediction pipeline implementation
//!
//! Each call loads the preprocessor and model artifacts, transforms the
//! input rows and predicts. Nothing is cached between calls.

use crate::error::{ResultExt, Stage, Result};
use crate::preprocessing::DataPreprocessor;
use crate::training::RegressionModel;
use super::{PredictPipelineConfig, Predictor, ScorePredictor, Transformer};
use polars::prelude::*;
use std::time::Instant;
use tracing::{debug, error};

/// Source of the fitted transform and regressor
pub trait ArtifactLoader: Send + Sync {
    fn load_transformer(&self) -> Result<Box<dyn Transformer>>;
    fn load_predictor(&self) -> Result<Box<dyn Predictor>>;
}

/// Loads JSON artifacts written by the training stages
#[derive(Debug, Clone, Default)]
pub struct JsonArtifactLoader {
    config: PredictPipelineConfig,
}

impl JsonArtifactLoader {
    pub fn new(config: PredictPipelineConfig) -> Self {
        Self { config }
    }
}

impl ArtifactLoader for JsonArtifactLoader {
    fn load_transformer(&self) -> Result<Box<dyn Transformer>> {
        let preprocessor = DataPreprocessor::load(&self.config.preprocessor_path)?;
        Ok(Box::new(preprocessor))
    }

    fn load_predictor(&self) -> Result<Box<dyn Predictor>> {
        let model = RegressionModel::load(&self.config.model_path)?;
        Ok(Box::new(model))
    }
}

/// Loads artifacts, transforms, predicts
pub struct PredictPipeline<L = JsonArtifactLoader> {
    loader: L,
    span: tracing::Span,
}

impl PredictPipeline<JsonArtifactLoader> {
    /// Pipeline over the JSON artifacts named in `config`
    pub fn new(config: PredictPipelineConfig) -> Self {
        Self::with_loader(JsonArtifactLoader::new(config))
    }
}

impl Default for PredictPipeline<JsonArtifactLoader> {
    fn default() -> Self {
        Self::new(PredictPipelineConfig::default())
    }
}

impl<L: ArtifactLoader> PredictPipeline<L> {
    pub fn with_loader(loader: L) -> Self {
        let span = tracing::info_span!("predict_pipeline");
        Self { loader, span }
    }

    /// One prediction per input row
    pub fn predict(&self, features: &DataFrame) -> Result<Vec<f64>> {
        let _guard = self.span.enter();
        let start = Instant::now();

        let result = self.run(features);
        match &result {
            Ok(preds) => debug!(
                rows = preds.len(),
                elapsed_ms = start.elapsed().as_millis() as u64,
                "Prediction completed"
            ),
            Err(e) => error!(error = %e, "Prediction failed"),
        }
        result
    }

    fn run(&self, features: &DataFrame) -> Result<Vec<f64>> {
        let transformer = self.loader.load_transformer().stage(Stage::ArtifactLoad)?;
        let predictor = self.loader.load_predictor().stage(Stage::ArtifactLoad)?;

        let x = transformer.transform(features).stage(Stage::Transform)?;
        let preds = predictor.predict(&x).stage(Stage::Inference)?;
        Ok(preds.to_vec())
    }
}

impl<L: ArtifactLoader> ScorePredictor for PredictPipeline<L> {
    fn predict(&self, features: &DataFrame) -> Result<Vec<f64>> {
        PredictPipeline::predict(self, features)
    }
}
