//! Prediction pipeline configuration

use std::path::{Path, PathBuf};

/// Artifact locations read by the prediction pipeline
#[derive(Debug, Clone, PartialEq)]
pub struct PredictPipelineConfig {
    /// Fitted preprocessor artifact
    pub preprocessor_path: PathBuf,
    /// Selected model artifact
    pub model_path: PathBuf,
}

impl Default for PredictPipelineConfig {
    fn default() -> Self {
        Self::from_artifacts_dir("artifacts")
    }
}

impl PredictPipelineConfig {
    /// Create a new configuration with default paths
    pub fn new() -> Self {
        Self::default()
    }

    /// Both artifacts under `dir`
    pub fn from_artifacts_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            preprocessor_path: dir.join("preprocessor.json"),
            model_path: dir.join("model.json"),
        }
    }

    /// Builder method to set the preprocessor path
    pub fn with_preprocessor_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.preprocessor_path = path.into();
        self
    }

    /// Builder method to set the model path
    pub fn with_model_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.model_path = path.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PredictPipelineConfig::default();
        assert_eq!(config.preprocessor_path, Path::new("artifacts/preprocessor.json"));
        assert_eq!(config.model_path, Path::new("artifacts/model.json"));
    }

    #[test]
    fn test_builder_pattern() {
        let config = PredictPipelineConfig::from_artifacts_dir("/tmp/run")
            .with_model_path("/tmp/other/model.json");

        assert_eq!(config.preprocessor_path, Path::new("/tmp/run/preprocessor.json"));
        assert_eq!(config.model_path, Path::new("/tmp/other/model.json"));
    }
}
