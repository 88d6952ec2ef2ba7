//! Feature scaling

use crate::error::{StudentError, Result};
use serde::{Deserialize, Serialize};

/// Parameters for one fitted output column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct ScalerParams {
    center: f64,
    scale: f64,
}

/// Standard scaler: `(x - mean) / std`, population std.
///
/// With `with_mean` off the column is only divided by its std, which keeps
/// one-hot columns sparse.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scaler {
    with_mean: bool,
    params: Vec<ScalerParams>,
    is_fitted: bool,
}

impl Scaler {
    /// Create a centering and scaling scaler
    pub fn new() -> Self {
        Self {
            with_mean: true,
            params: Vec::new(),
            is_fitted: false,
        }
    }

    /// Scale only, no centering
    pub fn without_mean() -> Self {
        Self {
            with_mean: false,
            ..Self::new()
        }
    }

    /// Fit on column-major data
    pub fn fit(&mut self, columns: &[Vec<f64>]) -> Result<&mut Self> {
        self.params = columns
            .iter()
            .map(|col| {
                let n = col.len().max(1) as f64;
                let mean = col.iter().sum::<f64>() / n;
                let var = col.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
                let std = var.sqrt();
                ScalerParams {
                    center: if self.with_mean { mean } else { 0.0 },
                    scale: if std == 0.0 { 1.0 } else { std },
                }
            })
            .collect();
        self.is_fitted = true;
        Ok(self)
    }

    /// Scale column-major data in place
    pub fn transform(&self, columns: &mut [Vec<f64>]) -> Result<()> {
        if !self.is_fitted {
            return Err(StudentError::ModelNotFitted);
        }
        if columns.len() != self.params.len() {
            return Err(StudentError::ShapeError {
                expected: format!("{} columns", self.params.len()),
                actual: format!("{} columns", columns.len()),
            });
        }
        for (col, params) in columns.iter_mut().zip(&self.params) {
            for v in col.iter_mut() {
                *v = (*v - params.center) / params.scale;
            }
        }
        Ok(())
    }
}

impl Default for Scaler {
    fn default() -> Self {
        Self::new()
    }
}
