//! JSONL file output.
//!
//! Several processes may append to the same log file. Every event reaches the
//! file as a single `write` on an `O_APPEND` handle, so lines never interleave.

use crate::json_layer::JsonLayer;
use crate::LogConfig;
use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

/// Append-only handle to a JSONL log file. Clones share the handle.
#[derive(Clone, Debug)]
pub struct LogFile {
    file: Arc<Mutex<File>>,
}

impl LogFile {
    /// Opens `path` for appending, creating it and its parent directories.
    pub fn open(path: &Path) -> io::Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Arc::new(Mutex::new(file)),
        })
    }
}

impl Write for LogFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.file.lock().write_all(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.lock().flush()
    }
}

impl<'a> MakeWriter<'a> for LogFile {
    type Writer = LogFile;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Installs the JSONL file layer, plus a compact stderr layer when asked.
pub(crate) fn init_file_subscriber(config: &LogConfig, log_path: &Path) -> io::Result<()> {
    let json = JsonLayer::new(config.service_name.clone(), LogFile::open(log_path)?)
        .with_filter(crate::env_filter(&config.default_level));

    let stderr = config.also_stderr.then(|| {
        tracing_subscriber::fmt::layer()
            .compact()
            .with_target(true)
            .with_writer(io::stderr)
            .with_filter(crate::env_filter(&config.default_level))
    });

    tracing_subscriber::registry()
        .with(json)
        .with(stderr)
        .try_init()
        .map_err(io::Error::other)?;

    tracing::debug!(log_path = %log_path.display(), "Logging to file");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn open_creates_missing_directories() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("logs").join("test.jsonl");

        let mut log = LogFile::open(&path).unwrap();
        log.write_all(b"{\"n\":1}\n").unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{\"n\":1}\n");
    }

    #[test]
    fn separate_handles_append_to_the_same_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("shared.jsonl");

        LogFile::open(&path).unwrap().write_all(b"first\n").unwrap();
        let mut second = LogFile::open(&path).unwrap();
        second.make_writer().write_all(b"second\n").unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "first\nsecond\n");
    }
}
