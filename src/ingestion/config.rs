//! Data ingestion configuration

use std::path::{Path, PathBuf};

/// Default location of the source dataset
pub const DEFAULT_SOURCE_PATH: &str = "notebook/data/stud.csv";

/// Default artifacts directory
pub const DEFAULT_ARTIFACTS_DIR: &str = "artifacts";

/// Paths and split parameters for a data ingestion run
#[derive(Debug, Clone, PartialEq)]
pub struct DataIngestionConfig {
    /// Source CSV to ingest
    pub source_path: PathBuf,
    /// Train split output
    pub train_data_path: PathBuf,
    /// Test split output
    pub test_data_path: PathBuf,
    /// Unmodified copy of the source
    pub raw_data_path: PathBuf,
    /// Fraction of rows assigned to the test split
    pub test_size: f64,
    /// Seed for the row shuffle
    pub random_state: u64,
}

impl Default for DataIngestionConfig {
    fn default() -> Self {
        Self::new().with_artifacts_dir(DEFAULT_ARTIFACTS_DIR)
    }
}

impl DataIngestionConfig {
    fn new() -> Self {
        Self {
            source_path: PathBuf::from(DEFAULT_SOURCE_PATH),
            train_data_path: PathBuf::new(),
            test_data_path: PathBuf::new(),
            raw_data_path: PathBuf::new(),
            test_size: 0.2,
            random_state: 42,
        }
    }

    /// Root all three output files under `dir`
    pub fn with_artifacts_dir(mut self, dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        self.train_data_path = dir.join("train.csv");
        self.test_data_path = dir.join("test.csv");
        self.raw_data_path = dir.join("raw_data.csv");
        self
    }

    /// Builder method to set the source CSV
    pub fn with_source_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.source_path = path.into();
        self
    }

    /// Builder method to set the test fraction
    pub fn with_test_size(mut self, test_size: f64) -> Self {
        self.test_size = test_size;
        self
    }

    /// Builder method to set the shuffle seed
    pub fn with_random_state(mut self, seed: u64) -> Self {
        self.random_state = seed;
        self
    }

    /// Directories that must exist before the three outputs are written
    pub fn output_dirs(&self) -> Vec<&Path> {
        let mut dirs: Vec<&Path> = Vec::new();
        for path in [&self.raw_data_path, &self.train_data_path, &self.test_data_path] {
            if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
                if !dirs.contains(&dir) {
                    dirs.push(dir);
                }
            }
        }
        dirs
    }
}
