//! Process-wide logging setup
//!
//! One log file per process start, named after the start time, plus a
//! console layer. Components emit through `tracing` macros inside their own
//! spans and never hold a handle to the sink.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default filter when `RUST_LOG` is unset
pub const DEFAULT_FILTER: &str = "student_performance=info,tower_http=info";

/// File name for a log started at `now`, e.g. `10_19_2026_14_03_59.log`
pub fn log_file_name(now: chrono::DateTime<chrono::Local>) -> String {
    format!("{}.log", now.format("%m_%d_%Y_%H_%M_%S"))
}

/// Create the logs directory and the log file for this process
pub fn create_log_file(logs_dir: &Path) -> std::io::Result<(PathBuf, File)> {
    std::fs::create_dir_all(logs_dir)?;
    let path = logs_dir.join(log_file_name(chrono::Local::now()));
    let file = File::create(&path)?;
    Ok((path, file))
}

/// Install the global subscriber. Call once, at process start.
///
/// Returns the path of the log file this process writes to.
pub fn init_logging(logs_dir: &Path) -> anyhow::Result<PathBuf> {
    let (path, file) = create_log_file(logs_dir)?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into());

    let console = fmt::layer().with_target(true).with_line_number(true);
    let file_layer = fmt::layer()
        .with_ansi(false)
        .with_target(true)
        .with_line_number(true)
        .with_writer(Mutex::new(file));

    tracing_subscriber::registry()
        .with(filter)
        .with(console)
        .with(file_layer)
        .try_init()?;

    tracing::info!(log_file = %path.display(), "Logging has started");
    Ok(path)
}
