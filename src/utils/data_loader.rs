//! CSV loading and saving

use crate::error::{StudentError, Result};
use polars::prelude::*;
use std::fs::File;
use std::path::Path;

/// CSV data loader
#[derive(Debug, Clone)]
pub struct DataLoader {
    /// Rows scanned to infer column types
    infer_schema_length: usize,
}

impl Default for DataLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl DataLoader {
    /// Create a new data loader
    pub fn new() -> Self {
        Self {
            infer_schema_length: 1000,
        }
    }

    /// Load a CSV file with a header row
    pub fn load_csv(&self, path: &Path) -> Result<DataFrame> {
        let file = File::open(path)?;

        CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(Some(self.infer_schema_length))
            .into_reader_with_file_handle(file)
            .finish()
            .map_err(|e| StudentError::Data(format!("{}: {}", path.display(), e)))
    }
}

/// CSV writer for pipeline artifacts
pub struct DataSaver;

impl DataSaver {
    /// Save to CSV with a header row. There is no index column to drop.
    pub fn save_csv(df: &mut DataFrame, path: &Path) -> Result<()> {
        let mut file = File::create(path)?;

        CsvWriter::new(&mut file)
            .include_header(true)
            .finish(df)
            .map_err(|e| StudentError::Data(format!("{}: {}", path.display(), e)))
    }
}
