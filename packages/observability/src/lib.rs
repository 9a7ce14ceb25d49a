//! # Observability
//!
//! Logging bootstrap shared by every movies-sync binary.
//!
//! Library crates only emit `tracing` events with structured fields. The
//! binary decides where they go by calling [`init_with_config`] once:
//!
//! - with a `log_path`, every event is appended to that file as one JSON
//!   line (see [`LogEntry`]); `also_stderr` mirrors events to stderr in the
//!   compact format
//! - without one, only the compact stderr output is installed
//!
//! `RUST_LOG` takes precedence over `default_level`.
//!
//! ```rust,ignore
//! observability::init_with_config(observability::LogConfig {
//!     service_name: "movies-sync".into(),
//!     log_path: Some(paths.log_file()),
//!     ..Default::default()
//! })?;
//! tracing::info!(page = 1, "Fetching page");
//! ```
//!
//! Tail the file with `tail -f ~/.movies-sync/logs/movies-sync.jsonl | jq`.

mod file;
mod json_layer;

use std::io;
use std::path::PathBuf;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

pub use file::LogFile;
pub use json_layer::LogEntry;

/// Where and how much to log.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Written into every JSON line as `service`.
    pub service_name: String,
    /// Filter directive used when `RUST_LOG` is unset.
    pub default_level: String,
    /// JSONL destination. `None` means stderr only.
    pub log_path: Option<PathBuf>,
    /// Mirror file output to stderr.
    pub also_stderr: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            service_name: "movies-sync".into(),
            default_level: "info".into(),
            log_path: None,
            also_stderr: false,
        }
    }
}

/// Stderr-only logging at the default level.
pub fn init(service_name: &str) -> io::Result<()> {
    init_with_config(LogConfig {
        service_name: service_name.into(),
        ..Default::default()
    })
}

/// Installs the global subscriber described by `config`.
///
/// Fails when the log file cannot be opened or a subscriber is already set.
pub fn init_with_config(config: LogConfig) -> io::Result<()> {
    if let Some(path) = &config.log_path {
        return file::init_file_subscriber(&config, path);
    }

    tracing_subscriber::fmt()
        .compact()
        .with_target(true)
        .with_writer(io::stderr)
        .with_env_filter(env_filter(&config.default_level))
        .finish()
        .try_init()
        .map_err(io::Error::other)
}

fn env_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
}
