//! Request handlers

use std::sync::Arc;

use axum::{
    extract::State,
    response::Html,
    Form, Json,
};
use serde::Deserialize;
use tracing::{error, info, warn};

use crate::error::StudentError;
use crate::inference::{check_score, CustomData, ScorePredictor, MAX_SCORE};

use super::error::{Result, ServerError};
use super::state::AppState;

/// Shown when the form is incomplete
pub const FILL_ALL_FIELDS: &str = "Please fill out all the fields.";

/// Shown when the prediction pipeline fails for any reason
pub const PREDICTION_FAILED: &str =
    "Prediction failed. Make sure the artifacts directory contains the model and preprocessor files.";

/// A select box of the prediction form
struct Choice {
    name: &'static str,
    label: &'static str,
    placeholder: &'static str,
    options: &'static [&'static str],
}

const CHOICES: [Choice; 5] = [
    Choice {
        name: "gender",
        label: "Gender",
        placeholder: "Select your Gender",
        options: &["male", "female"],
    },
    Choice {
        name: "ethnicity",
        label: "Race or Ethnicity",
        placeholder: "Select Ethnicity",
        options: &["group A", "group B", "group C", "group D", "group E"],
    },
    Choice {
        name: "parental_level_of_education",
        label: "Parental Level of Education",
        placeholder: "Select Parent Education",
        options: &[
            "associate's degree",
            "bachelor's degree",
            "high school",
            "master's degree",
            "some college",
            "some high school",
        ],
    },
    Choice {
        name: "lunch",
        label: "Lunch Type",
        placeholder: "Select Lunch Type",
        options: &["free/reduced", "standard"],
    },
    Choice {
        name: "test_preparation_course",
        label: "Test Preparation Course",
        placeholder: "Select Test_course",
        options: &["none", "completed"],
    },
];

// ============================================================================
// Form parsing
// ============================================================================

/// Raw url-encoded fields of the prediction form
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PredictForm {
    pub gender: Option<String>,
    pub ethnicity: Option<String>,
    pub parental_level_of_education: Option<String>,
    pub lunch: Option<String>,
    pub test_preparation_course: Option<String>,
    pub reading_score: Option<String>,
    pub writing_score: Option<String>,
}

fn selected(value: &Option<String>, choice: &Choice) -> Option<String> {
    let value = value.as_deref()?.trim();
    if value.is_empty() || value == choice.placeholder {
        return None;
    }
    Some(value.to_string())
}

fn score(name: &str, value: &Option<String>) -> Option<f64> {
    let parsed: f64 = value.as_deref()?.trim().parse().ok()?;
    check_score(name, parsed).ok()
}

impl PredictForm {
    /// Build a record, or `None` if any field is unfilled or invalid
    pub fn to_custom_data(&self) -> Option<CustomData> {
        let [gender, ethnicity, education, lunch, test_prep] = &CHOICES;
        Some(CustomData::new(
            selected(&self.gender, gender)?,
            selected(&self.ethnicity, ethnicity)?,
            selected(&self.parental_level_of_education, education)?,
            selected(&self.lunch, lunch)?,
            selected(&self.test_preparation_course, test_prep)?,
            score("reading_score", &self.reading_score)?,
            score("writing_score", &self.writing_score)?,
        ))
    }
}

/// Score one record; the first prediction is the answer
pub fn predict_score(predictor: &dyn ScorePredictor, data: &CustomData) -> crate::error::Result<f64> {
    let df = data.get_data_as_data_frame()?;
    let preds = predictor.predict(&df)?;
    preds
        .first()
        .copied()
        .ok_or_else(|| StudentError::Computation("predictor returned no values".to_string()))
}

// ============================================================================
// Rendering
// ============================================================================

/// What to show under the form
enum Notice {
    Warning(&'static str),
    Failure(&'static str),
    Score(f64),
}

const STYLE: &str = r#"<style>
body { font-family: sans-serif; margin: 2em auto; max-width: 720px; background: #f5f5f5; color: #333; }
.card { background: white; border-radius: 8px; padding: 1.5em; margin: 1em 0; box-shadow: 0 2px 4px rgba(0,0,0,0.1); }
h1 { color: #333; } h2 { color: #555; margin-top: 0; }
label { display: block; font-size: 0.9em; margin: 0.8em 0 0.3em; }
select, input { width: 100%; padding: 0.5em; border: 1px solid #ccc; border-radius: 4px; box-sizing: border-box; }
button, .button { margin-top: 1.2em; padding: 0.7em 1.5em; background: #2563eb; color: white; border: none; border-radius: 4px; cursor: pointer; text-decoration: none; display: inline-block; }
.warning { background: #fef3c7; color: #92400e; padding: 1em; border-radius: 4px; }
.failure { background: #fee2e2; color: #991b1b; padding: 1em; border-radius: 4px; }
.success { background: #dcfce7; color: #166534; padding: 1em; border-radius: 4px; font-weight: bold; }
.bar-row { display: flex; align-items: center; margin: 0.6em 0; }
.bar-label { width: 9em; font-size: 0.9em; }
.bar-track { flex: 1; background: #e5e7eb; border-radius: 4px; height: 1.4em; }
.bar { height: 1.4em; border-radius: 4px; }
.bar-value { width: 4em; text-align: right; font-size: 0.9em; }
</style>"#;

fn page(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    {style}
</head>
<body>
{body}
</body>
</html>"#,
        style = STYLE,
    )
}

fn render_select(choice: &Choice) -> String {
    let options: String = choice
        .options
        .iter()
        .map(|opt| format!(r#"<option value="{opt}">{opt}</option>"#))
        .collect();
    format!(
        r#"<label for="{name}">{label}</label>
<select id="{name}" name="{name}"><option value="{placeholder}" selected>{placeholder}</option>{options}</select>"#,
        name = choice.name,
        label = choice.label,
        placeholder = choice.placeholder,
    )
}

fn render_score_input(name: &str, label: &str) -> String {
    format!(
        r#"<label for="{name}">{label}</label>
<input id="{name}" name="{name}" type="number" min="0" max="100" step="1" value="0">"#
    )
}

fn render_bar(label: &str, value: f64, color: &str) -> String {
    let width = (value / MAX_SCORE * 100.0).clamp(0.0, 100.0);
    format!(
        r#"<div class="bar-row"><span class="bar-label">{label}</span><div class="bar-track"><div class="bar" style="width:{width:.1}%;background:{color}"></div></div><span class="bar-value">{value:.2}</span></div>"#
    )
}

fn render_notice(notice: &Notice) -> String {
    match notice {
        Notice::Warning(msg) => format!(r#"<div class="card warning">{msg}</div>"#),
        Notice::Failure(msg) => format!(r#"<div class="card failure">{msg}</div>"#),
        Notice::Score(value) => format!(
            r#"<div class="card"><div class="success">The predicted Math Score is: {value:.2}</div>
<h2>Predicted vs. maximum</h2>{}{}</div>"#,
            render_bar("Predicted", *value, "#2563eb"),
            render_bar("Maximum", MAX_SCORE, "#9ca3af"),
        ),
    }
}

fn render_form(notice: Option<Notice>) -> String {
    let selects: String = CHOICES.iter().map(render_select).collect();
    let body = format!(
        r#"<h1>Student Exam Performance Indicator</h1>
<div class="card">
<h2>Student Exam Performance Prediction</h2>
<form action="/predictdata" method="post">
{selects}
{reading}
{writing}
<button type="submit">Predict your Math Score</button>
</form>
</div>
{notice}"#,
        reading = render_score_input("reading_score", "Reading Score out of 100"),
        writing = render_score_input("writing_score", "Writing Score out of 100"),
        notice = notice.as_ref().map(render_notice).unwrap_or_default(),
    );
    page("Student Exam Performance Indicator", &body)
}

// ============================================================================
// UI Handlers
// ============================================================================

pub async fn serve_index() -> Html<String> {
    let body = r#"<h1>Student Exam Performance Indicator</h1>
<div class="card">
<p>Welcome to the Student Exam Performance Prediction App. Enter a student's details to predict their math score.</p>
<a class="button" href="/predictdata">Go to the prediction form</a>
</div>"#;
    Html(page("Student Exam Performance Indicator", body))
}

pub async fn serve_form() -> Html<String> {
    Html(render_form(None))
}

pub async fn predict_datapoint(
    State(state): State<Arc<AppState>>,
    Form(form): Form<PredictForm>,
) -> Html<String> {
    let Some(data) = form.to_custom_data() else {
        warn!("Prediction form submitted with unfilled fields");
        return Html(render_form(Some(Notice::Warning(FILL_ALL_FIELDS))));
    };

    match predict_score(state.predictor.as_ref(), &data) {
        Ok(value) => {
            info!(prediction = value, "Served form prediction");
            Html(render_form(Some(Notice::Score(value))))
        }
        Err(e) => {
            error!(error = %e, stage = ?e.stage(), "Form prediction failed");
            Html(render_form(Some(Notice::Failure(PREDICTION_FAILED))))
        }
    }
}

// ============================================================================
// API Handlers
// ============================================================================

pub async fn predict(
    State(state): State<Arc<AppState>>,
    Json(data): Json<CustomData>,
) -> Result<Json<serde_json::Value>> {
    data.validate().map_err(|e| ServerError::BadRequest(e.to_string()))?;

    let prediction = predict_score(state.predictor.as_ref(), &data)?;
    info!(prediction, "Served API prediction");

    Ok(Json(serde_json::json!({
        "success": true,
        "prediction": prediction,
    })))
}

pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
