//! Logging initialization for movies-sync.
//!
//! Delegates to the observability crate. Every run appends structured JSONL
//! to `~/.movies-sync/logs/movies-sync.jsonl`.

use crate::{CoreResult, Paths};
use observability::LogConfig;

/// Service name written into every log line.
const SERVICE_NAME: &str = "movies-sync";

/// Initialize the logging system.
///
/// - Structured JSONL output to the paths' log file
/// - Log level from RUST_LOG env var or the provided default
/// - Optional compact stderr output for interactive runs
///
/// # Example
///
/// ```ignore
/// init_logging("info", &paths, false)?;
/// tracing::info!("movies-sync started");
/// ```
pub fn init_logging(level: &str, paths: &Paths, also_stderr: bool) -> CoreResult<()> {
    paths.ensure_dirs()?;
    observability::init_with_config(LogConfig {
        service_name: SERVICE_NAME.into(),
        default_level: level.into(),
        log_path: Some(paths.log_file()),
        also_stderr,
    })?;
    Ok(())
}
