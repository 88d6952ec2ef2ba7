//! Error types for the student performance pipeline

use std::fmt;
use std::panic::Location;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, StudentError>;

/// Pipeline stage an error originated from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Ingestion,
    Transformation,
    Training,
    ArtifactLoad,
    Transform,
    Inference,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Ingestion => "data ingestion",
            Stage::Transformation => "data transformation",
            Stage::Training => "model training",
            Stage::ArtifactLoad => "artifact loading",
            Stage::Transform => "feature transform",
            Stage::Inference => "model inference",
        };
        f.write_str(name)
    }
}

/// Main error type for the pipeline
#[derive(Error, Debug)]
pub enum StudentError {
    #[error("Data error: {0}")]
    Data(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Invalid shape: expected {expected}, got {actual}")]
    ShapeError { expected: String, actual: String },

    #[error("Feature not found: {0}")]
    FeatureNotFound(String),

    #[error("Model not fitted")]
    ModelNotFitted,

    #[error("Invalid parameter: {name} = {value}, {reason}")]
    InvalidParameter {
        name: String,
        value: String,
        reason: String,
    },

    #[error("Computation error: {0}")]
    Computation(String),

    #[error("Failed to load artifact {}: {source}", path.display())]
    ArtifactLoad {
        path: PathBuf,
        #[source]
        source: Box<StudentError>,
    },

    #[error("No best model found: best R² {best_r2:.4} is below {threshold}")]
    NoBestModel { best_r2: f64, threshold: f64 },

    #[error("Error in {stage} at {location}: {source}")]
    Stage {
        stage: Stage,
        location: String,
        #[source]
        source: Box<StudentError>,
    },
}

impl StudentError {
    /// Wrap an error with the stage it came from and the caller's location
    #[track_caller]
    pub fn at_stage(self, stage: Stage) -> Self {
        let location = Location::caller();
        StudentError::Stage {
            stage,
            location: format!("{}:{}", location.file(), location.line()),
            source: Box::new(self),
        }
    }

    /// Stage of the outermost stage wrapper, if any
    pub fn stage(&self) -> Option<Stage> {
        match self {
            StudentError::Stage { stage, .. } => Some(*stage),
            _ => None,
        }
    }

    /// Innermost error, unwrapping stage and artifact wrappers
    pub fn root_cause(&self) -> &StudentError {
        match self {
            StudentError::Stage { source, .. } | StudentError::ArtifactLoad { source, .. } => {
                source.root_cause()
            }
            other => other,
        }
    }
}

/// Attach stage context to a fallible result
pub trait ResultExt<T> {
    fn stage(self, stage: Stage) -> Result<T>;
}

impl<T, E: Into<StudentError>> ResultExt<T> for std::result::Result<T, E> {
    #[track_caller]
    fn stage(self, stage: Stage) -> Result<T> {
        match self {
            Ok(value) => Ok(value),
            Err(err) => Err(err.into().at_stage(stage)),
        }
    }
}

impl From<polars::error::PolarsError> for StudentError {
    fn from(err: polars::error::PolarsError) -> Self {
        StudentError::Data(err.to_string())
    }
}

impl From<serde_json::Error> for StudentError {
    fn from(err: serde_json::Error) -> Self {
        StudentError::Serialization(err.to_string())
    }
}

impl From<ndarray::ShapeError> for StudentError {
    fn from(err: ndarray::ShapeError) -> Self {
        StudentError::ShapeError {
            expected: "valid shape".to_string(),
            actual: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = StudentError::Data("test error".to_string());
        assert_eq!(err.to_string(), "Data error: test error");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: StudentError = io_err.into();
        assert!(matches!(err, StudentError::Io(_)));
    }

    #[test]
    fn test_stage_wrapping_keeps_cause_and_location() {
        let res: std::result::Result<(), std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "stud.csv",
        ));
        let err = res.stage(Stage::Ingestion).unwrap_err();

        assert_eq!(err.stage(), Some(Stage::Ingestion));
        assert!(matches!(err.root_cause(), StudentError::Io(_)));
        let msg = err.to_string();
        assert!(msg.starts_with("Error in data ingestion at "));
        assert!(msg.contains("error.rs:"));
        assert!(msg.contains("stud.csv"));
    }

    #[test]
    fn test_nested_root_cause() {
        let err = StudentError::ArtifactLoad {
            path: PathBuf::from("artifacts/model.json"),
            source: Box::new(StudentError::ModelNotFitted),
        }
        .at_stage(Stage::ArtifactLoad);
        assert!(matches!(err.root_cause(), StudentError::ModelNotFitted));
    }
}
