//! Custom data record

use crate::error::{Result, StudentError};
use polars::prelude::*;
use serde::{Deserialize, Serialize};

/// Columns of the one-row frame, in order
pub const FEATURE_COLUMNS: [&str; 7] = [
    "gender",
    "race_ethnicity",
    "parental_level_of_education",
    "lunch",
    "test_preparation_course",
    "reading_score",
    "writing_score",
];

/// Upper bound of the reading and writing scores
pub const MAX_SCORE: f64 = 100.0;

/// Accept whole-number scores in `0..=100`
pub fn check_score(name: &str, value: f64) -> Result<f64> {
    if value.is_finite() && value.fract() == 0.0 && (0.0..=MAX_SCORE).contains(&value) {
        Ok(value)
    } else {
        Err(StudentError::InvalidParameter {
            name: name.to_string(),
            value: value.to_string(),
            reason: "must be a whole number between 0 and 100".to_string(),
        })
    }
}

/// One student's features as entered by a user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomData {
    pub gender: String,
    pub race_ethnicity: String,
    pub parental_level_of_education: String,
    pub lunch: String,
    pub test_preparation_course: String,
    pub reading_score: f64,
    pub writing_score: f64,
}

impl CustomData {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        gender: impl Into<String>,
        race_ethnicity: impl Into<String>,
        parental_level_of_education: impl Into<String>,
        lunch: impl Into<String>,
        test_preparation_course: impl Into<String>,
        reading_score: f64,
        writing_score: f64,
    ) -> Self {
        Self {
            gender: gender.into(),
            race_ethnicity: race_ethnicity.into(),
            parental_level_of_education: parental_level_of_education.into(),
            lunch: lunch.into(),
            test_preparation_course: test_preparation_course.into(),
            reading_score,
            writing_score,
        }
    }

    /// Check both scores with [`check_score`]
    pub fn validate(&self) -> Result<()> {
        check_score("reading_score", self.reading_score)?;
        check_score("writing_score", self.writing_score)?;
        Ok(())
    }

    /// One-row frame with [`FEATURE_COLUMNS`]
    pub fn get_data_as_data_frame(&self) -> Result<DataFrame> {
        let columns: Vec<Column> = vec![
            Series::new(FEATURE_COLUMNS[0].into(), [self.gender.as_str()]).into(),
            Series::new(FEATURE_COLUMNS[1].into(), [self.race_ethnicity.as_str()]).into(),
            Series::new(
                FEATURE_COLUMNS[2].into(),
                [self.parental_level_of_education.as_str()],
            )
            .into(),
            Series::new(FEATURE_COLUMNS[3].into(), [self.lunch.as_str()]).into(),
            Series::new(
                FEATURE_COLUMNS[4].into(),
                [self.test_preparation_course.as_str()],
            )
            .into(),
            Series::new(FEATURE_COLUMNS[5].into(), [self.reading_score]).into(),
            Series::new(FEATURE_COLUMNS[6].into(), [self.writing_score]).into(),
        ];
        Ok(DataFrame::new(columns)?)
    }
}
