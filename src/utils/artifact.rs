//! Serialized artifact persistence

use crate::error::{StudentError, Result};
use serde::{de::DeserializeOwned, Serialize};
use std::path::Path;

/// Serialize an object as pretty JSON, creating parent directories as needed
pub fn save_object<T: Serialize>(path: &Path, object: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let json = serde_json::to_string_pretty(object)?;
    std::fs::write(path, json)?;
    tracing::debug!(path = %path.display(), "Artifact saved");
    Ok(())
}

/// Load an object saved with [`save_object`]
///
/// Missing and corrupt files both come back as `ArtifactLoad` carrying the path.
pub fn load_object<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let read = || -> Result<T> {
        let json = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    };
    read().map_err(|e| StudentError::ArtifactLoad {
        path: path.to_path_buf(),
        source: Box::new(e),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Dummy {
        name: String,
        weights: Vec<f64>,
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("dummy.json");
        let obj = Dummy { name: "ols".into(), weights: vec![1.5, -2.0] };

        save_object(&path, &obj).unwrap();
        let loaded: Dummy = load_object(&path).unwrap();
        assert_eq!(loaded, obj);
    }

    #[test]
    fn test_load_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");
        let err = load_object::<Dummy>(&path).unwrap_err();
        match err {
            StudentError::ArtifactLoad { path: p, source } => {
                assert_eq!(p, path);
                assert!(matches!(*source, StudentError::Io(_)));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_load_corrupt() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");
        std::fs::write(&path, "{not json").unwrap();
        let err = load_object::<Dummy>(&path).unwrap_err();
        assert!(matches!(err.root_cause(), StudentError::Serialization(_)));
    }
}
