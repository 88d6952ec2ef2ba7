//! Student performance CLI module
//!
//! Command-line interface for running the training pipeline, scoring a
//! single student and serving the prediction form.

use clap::{Parser, Subcommand};
use colored::*;
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::ingestion::{DataIngestion, DataIngestionConfig, DEFAULT_ARTIFACTS_DIR, DEFAULT_SOURCE_PATH};
use crate::inference::{CustomData, PredictPipeline, PredictPipelineConfig};
use crate::preprocessing::{DataTransformation, DataTransformationConfig};
use crate::training::{ModelTrainer, ModelTrainerConfig};

// ─── Styling helpers ───────────────────────────────────────────────────────────

const W: usize = 58; // box inner width

fn dim(s: &str) -> ColoredString   { s.truecolor(100, 100, 100) }
fn accent(s: &str) -> ColoredString { s.truecolor(120, 170, 255) }
fn muted(s: &str) -> ColoredString  { s.truecolor(140, 140, 140) }
fn ok(s: &str) -> ColoredString     { s.truecolor(100, 210, 120) }

fn line_box_top()    { println!("  {}", dim("┌─────────────────────────────────────────────────────────┐")); }
fn line_box_bottom() { println!("  {}", dim("└─────────────────────────────────────────────────────────┘")); }
fn line_box_sep()    { println!("  {}", dim("├─────────────────────────────────────────────────────────┤")); }

fn line_box(content: &str) {
    let visible_len = strip_ansi(content).chars().count();
    let pad = W.saturating_sub(visible_len);
    println!("  {}  {}{} {}", dim("│"), content, " ".repeat(pad), dim("│"));
}

fn line_box_center(content: &str) {
    let visible_len = strip_ansi(content).chars().count();
    let total_pad = W.saturating_sub(visible_len);
    let left = total_pad / 2;
    let right = total_pad - left;
    println!("  {}  {}{}{} {}", dim("│"), " ".repeat(left), content, " ".repeat(right), dim("│"));
}

fn line_box_empty() { line_box(""); }

fn strip_ansi(s: &str) -> String {
    let mut out = String::new();
    let mut in_escape = false;
    for c in s.chars() {
        if c == '\x1b' { in_escape = true; continue; }
        if in_escape { if c == 'm' { in_escape = false; } continue; }
        out.push(c);
    }
    out
}

fn kv(key: &str, val: &str) -> String {
    format!("{} {}", muted(key), val.white())
}

fn step_run(msg: &str) {
    print!("  {} {}... ", accent("›"), msg);
}

fn step_done(detail: &str) {
    println!("{} {}", ok("done"), dim(detail));
}

fn step_failed() {
    println!("{}", "failed".red());
}

fn section(title: &str) {
    println!();
    println!("  {}", title.white().bold());
    println!("  {}", dim(&"─".repeat(56)));
}

// ─── CLI definition ────────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "student-performance")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Predict a student's math score from demographic and test-preparation features")]
#[command(long_about = None)]
pub struct Cli {
    /// Directory for log files (defaults to LOGS_DIR or logs)
    #[arg(long, global = true)]
    pub logs_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run ingestion, transformation and model training
    Train {
        /// Source dataset (CSV)
        #[arg(short, long, default_value = DEFAULT_SOURCE_PATH)]
        data: PathBuf,

        /// Artifacts directory
        #[arg(short, long, default_value = DEFAULT_ARTIFACTS_DIR)]
        artifacts: PathBuf,
    },

    /// Copy the dataset into the artifacts directory and split it
    Ingest {
        /// Source dataset (CSV)
        #[arg(short, long, default_value = DEFAULT_SOURCE_PATH)]
        data: PathBuf,

        /// Artifacts directory
        #[arg(short, long, default_value = DEFAULT_ARTIFACTS_DIR)]
        artifacts: PathBuf,
    },

    /// Predict the math score of one student
    Predict {
        #[arg(long)]
        gender: String,

        /// Race or ethnicity group, e.g. "group B"
        #[arg(long)]
        ethnicity: String,

        #[arg(long)]
        parental_education: String,

        /// standard or free/reduced
        #[arg(long)]
        lunch: String,

        /// none or completed
        #[arg(long)]
        test_prep: String,

        /// Reading score out of 100
        #[arg(long)]
        reading: f64,

        /// Writing score out of 100
        #[arg(long)]
        writing: f64,

        /// Artifacts directory
        #[arg(short, long, default_value = DEFAULT_ARTIFACTS_DIR)]
        artifacts: PathBuf,
    },

    /// Start the prediction web server
    Serve {
        /// Host to bind to (defaults to API_HOST or 0.0.0.0)
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (defaults to API_PORT or 8080)
        #[arg(short, long)]
        port: Option<u16>,

        /// Artifacts directory (defaults to ARTIFACTS_DIR or artifacts)
        #[arg(short, long)]
        artifacts: Option<PathBuf>,
    },
}

impl Cli {
    /// Log directory: flag, then `LOGS_DIR`, then `logs`
    pub fn resolve_logs_dir(&self) -> PathBuf {
        self.logs_dir
            .clone()
            .or_else(|| std::env::var("LOGS_DIR").ok().map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from("logs"))
    }
}

// ─── Commands ──────────────────────────────────────────────────────────────────

fn run_ingestion(data: &Path, artifacts: &Path) -> anyhow::Result<(PathBuf, PathBuf)> {
    let config = DataIngestionConfig::default()
        .with_source_path(data)
        .with_artifacts_dir(artifacts);

    step_run(&format!("Ingesting {}", data.display().to_string().cyan()));
    let start = Instant::now();
    match DataIngestion::new(config).initiate_data_ingestion() {
        Ok(paths) => {
            step_done(&format!("{:?}", start.elapsed()));
            Ok(paths)
        }
        Err(e) => {
            step_failed();
            Err(e.into())
        }
    }
}

pub fn cmd_ingest(data: &Path, artifacts: &Path) -> anyhow::Result<()> {
    section("Ingest");
    let (train_path, test_path) = run_ingestion(data, artifacts)?;

    println!();
    println!("  {:<12} {}", muted("Train"), train_path.display().to_string().white());
    println!("  {:<12} {}", muted("Test"), test_path.display().to_string().white());
    println!();
    Ok(())
}

pub fn cmd_train(data: &Path, artifacts: &Path) -> anyhow::Result<()> {
    section("Train");
    let (train_path, test_path) = run_ingestion(data, artifacts)?;

    step_run("Fitting preprocessor");
    let start = Instant::now();
    let transformation =
        DataTransformation::new(DataTransformationConfig::default().with_artifacts_dir(artifacts));
    let output = match transformation.initiate_data_transformation(&train_path, &test_path) {
        Ok(output) => output,
        Err(e) => {
            step_failed();
            return Err(e.into());
        }
    };
    step_done(&format!(
        "{} features in {:?}",
        output.train.ncols().saturating_sub(1),
        start.elapsed()
    ));

    step_run("Training models");
    let start = Instant::now();
    let trainer = ModelTrainer::new(ModelTrainerConfig::default().with_artifacts_dir(artifacts));
    let report = match trainer.initiate_model_trainer(&output.train, &output.test) {
        Ok(report) => report,
        Err(e) => {
            step_failed();
            return Err(e.into());
        }
    };
    step_done(&format!("{:?}", start.elapsed()));

    section("Test R²");
    for (model, r2) in &report.scores {
        let marker = if *model == report.best_model { ok("●") } else { dim("○") };
        println!("  {} {:<24} {}", marker, model.to_string(), format!("{:.4}", r2).white());
    }

    println!();
    println!("  {:<16} {}", muted("Best model"), report.best_model.to_string().white().bold());
    println!("  {:<16} {}", muted("R²"), format!("{:.4}", report.best_r2).white().bold());
    println!("  {:<16} {}", muted("Preprocessor"), output.preprocessor_path.display());
    println!("  {:<16} {}", muted("Model"), report.model_path.display());
    println!();

    Ok(())
}

#[allow(clippy::too_many_arguments)]
pub fn cmd_predict(
    gender: &str,
    ethnicity: &str,
    parental_education: &str,
    lunch: &str,
    test_prep: &str,
    reading: f64,
    writing: f64,
    artifacts: &Path,
) -> anyhow::Result<()> {
    let data = CustomData::new(gender, ethnicity, parental_education, lunch, test_prep, reading, writing);
    data.validate()?;
    let df = data.get_data_as_data_frame()?;

    let pipeline = PredictPipeline::new(PredictPipelineConfig::from_artifacts_dir(artifacts));
    let preds = pipeline.predict(&df)?;
    let value = preds
        .first()
        .copied()
        .ok_or_else(|| anyhow::anyhow!("predictor returned no values"))?;

    println!();
    println!("  {}", format!("The predicted Math Score is: {:.2}", value).white().bold());
    println!();
    Ok(())
}

pub async fn cmd_serve(
    host: Option<String>,
    port: Option<u16>,
    artifacts: Option<PathBuf>,
) -> anyhow::Result<()> {
    use crate::server::{run_server, ServerConfig};

    let mut config = ServerConfig::default();
    if let Some(host) = host {
        config = config.with_host(host);
    }
    if let Some(port) = port {
        config = config.with_port(port);
    }
    if let Some(dir) = artifacts {
        config = config.with_artifacts_dir(dir);
    }

    let base = format!("http://{}:{}", config.host, config.port);
    println!();
    line_box_top();
    line_box_empty();
    line_box_center(&format!("{}", "Student Exam Performance Indicator".white().bold()));
    line_box_center(&format!("{}", dim(&format!("v{}", env!("CARGO_PKG_VERSION")))));
    line_box_empty();
    line_box_sep();
    line_box_empty();
    line_box(&kv("Form   ", &format!("{}/predictdata", base)));
    line_box(&kv("API    ", &format!("{}/api/predict", base)));
    line_box(&kv("Health ", &format!("{}/api/health", base)));
    line_box_empty();
    line_box_sep();
    line_box_empty();
    line_box_center(&format!("{}", dim("ctrl+c to stop")));
    line_box_empty();
    line_box_bottom();
    println!();

    run_server(config).await
}
