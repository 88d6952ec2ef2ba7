//! Data ingestion
//!
//! Reads the source dataset, keeps a raw copy and writes a reproducible
//! train/test split into the artifacts directory.

mod config;

pub use config::{DataIngestionConfig, DEFAULT_ARTIFACTS_DIR, DEFAULT_SOURCE_PATH};

use crate::error::{ResultExt, Stage, StudentError, Result};
use crate::utils::{DataLoader, DataSaver};
use polars::prelude::*;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::path::PathBuf;
use tracing::{error, info};

/// Shuffle `0..n_samples` with a fixed seed and cut off the test indices.
///
/// The test split takes `ceil(n_samples * test_size)` rows, the train split
/// the rest. Returns `(train_indices, test_indices)`.
pub fn train_test_split_indices(
    n_samples: usize,
    test_size: f64,
    seed: u64,
) -> Result<(Vec<usize>, Vec<usize>)> {
    if !(test_size > 0.0 && test_size < 1.0) {
        return Err(StudentError::InvalidParameter {
            name: "test_size".to_string(),
            value: test_size.to_string(),
            reason: "must be strictly between 0 and 1".to_string(),
        });
    }

    let n_test = (n_samples as f64 * test_size).ceil() as usize;
    if n_samples < 2 || n_test == 0 || n_test >= n_samples {
        return Err(StudentError::Data(format!(
            "cannot split {} rows with test_size {}",
            n_samples, test_size
        )));
    }

    let mut indices: Vec<usize> = (0..n_samples).collect();
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let train = indices[n_test..].to_vec();
    let test = indices[..n_test].to_vec();
    Ok((train, test))
}

/// Split a frame into `(train, test)` row subsets
pub fn train_test_split(
    df: &DataFrame,
    test_size: f64,
    seed: u64,
) -> Result<(DataFrame, DataFrame)> {
    let (train_idx, test_idx) = train_test_split_indices(df.height(), test_size, seed)?;

    let to_ca = |idx: &[usize]| {
        IdxCa::from_vec(
            "idx".into(),
            idx.iter().map(|&i| i as IdxSize).collect(),
        )
    };

    let train = df.take(&to_ca(&train_idx))?;
    let test = df.take(&to_ca(&test_idx))?;
    Ok((train, test))
}

/// Data ingestion component
pub struct DataIngestion {
    config: DataIngestionConfig,
    loader: DataLoader,
    span: tracing::Span,
}

impl DataIngestion {
    /// Create an ingestion component with the given configuration
    pub fn new(config: DataIngestionConfig) -> Self {
        let span = tracing::info_span!("data_ingestion", source = %config.source_path.display());
        Self {
            config,
            loader: DataLoader::new(),
            span,
        }
    }

    /// Run the ingestion and return `(train_path, test_path)`
    pub fn initiate_data_ingestion(&self) -> Result<(PathBuf, PathBuf)> {
        let _guard = self.span.enter();
        info!("Entered the data ingestion component");

        self.run().map_err(|e| {
            error!(error = %e, "Error occurred during data ingestion");
            e
        })
    }

    fn run(&self) -> Result<(PathBuf, PathBuf)> {
        let config = &self.config;

        info!(path = %config.source_path.display(), "Reading dataset");
        let mut df = self
            .loader
            .load_csv(&config.source_path)
            .stage(Stage::Ingestion)?;
        info!(rows = df.height(), columns = df.width(), "Dataset loaded");

        for dir in config.output_dirs() {
            info!(dir = %dir.display(), "Creating artifacts directory (if not exists)");
            std::fs::create_dir_all(dir).stage(Stage::Ingestion)?;
        }

        DataSaver::save_csv(&mut df, &config.raw_data_path).stage(Stage::Ingestion)?;
        info!(path = %config.raw_data_path.display(), "Raw data saved");

        info!(
            test_size = config.test_size,
            random_state = config.random_state,
            "Performing train-test split"
        );
        let (mut train, mut test) =
            train_test_split(&df, config.test_size, config.random_state).stage(Stage::Ingestion)?;

        DataSaver::save_csv(&mut train, &config.train_data_path).stage(Stage::Ingestion)?;
        info!(path = %config.train_data_path.display(), rows = train.height(), "Train data saved");
        DataSaver::save_csv(&mut test, &config.test_data_path).stage(Stage::Ingestion)?;
        info!(path = %config.test_data_path.display(), rows = test.height(), "Test data saved");

        info!("Data ingestion completed successfully");
        Ok((config.train_data_path.clone(), config.test_data_path.clone()))
    }
}
