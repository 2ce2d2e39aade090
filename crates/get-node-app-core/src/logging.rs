//! Session log: one append-only file per run
//!
//! Events are emitted with the `tracing` macros. While a [`SessionLog`] is
//! alive, a plain-text fmt subscriber writing to the log file is the current
//! thread's default dispatcher.

use crate::config::APP_NAME;
use crate::error::ScaffoldError;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::dispatcher::DefaultGuard;

pub struct SessionLog {
    path: PathBuf,
    guard: Option<DefaultGuard>,
}

impl SessionLog {
    /// Create a new log file in `logs_dir` and start routing events to it
    pub fn create(logs_dir: &Path) -> Result<Self, ScaffoldError> {
        let stamp = chrono::Local::now().format("%Y%m%d-%H%M%S");
        let path = logs_dir.join(format!("{}-{}-{}.log", APP_NAME, stamp, std::process::id()));

        let file = File::create(&path).map_err(|e| {
            ScaffoldError::filesystem(&e, format!("Failed to create log file {}", path.display()))
        })?;

        let subscriber = tracing_subscriber::fmt()
            .with_ansi(false)
            .with_target(false)
            .with_max_level(tracing::Level::INFO)
            .with_writer(Mutex::new(file))
            .finish();
        let guard = tracing::subscriber::set_default(subscriber);

        Ok(Self {
            path,
            guard: Some(guard),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stop logging and keep the file; returns its path
    pub fn retain(mut self) -> PathBuf {
        self.guard.take();
        self.path.clone()
    }

    /// Stop logging and remove the file
    pub fn delete(mut self) -> Result<(), ScaffoldError> {
        self.guard.take();
        fs::remove_file(&self.path).map_err(|e| {
            ScaffoldError::filesystem(&e, format!("Failed to delete log {}", self.path.display()))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_events_are_written_with_level() {
        let dir = tempfile::tempdir().unwrap();
        let log = SessionLog::create(dir.path()).unwrap();

        tracing::info!("Checks complete");
        tracing::error!("Failed to fetch template list");

        let path = log.retain();
        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();

        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("INFO") && lines[0].ends_with("Checks complete"));
        assert!(lines[1].contains("ERROR") && lines[1].ends_with("Failed to fetch template list"));
    }

    #[test]
    fn test_delete_removes_file() {
        let dir = tempfile::tempdir().unwrap();
        let log = SessionLog::create(dir.path()).unwrap();
        let path = log.path().to_path_buf();
        assert!(path.exists());

        log.delete().unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn test_events_after_retain_are_not_logged() {
        let dir = tempfile::tempdir().unwrap();
        let log = SessionLog::create(dir.path()).unwrap();
        tracing::info!("kept");
        let path = log.retain();
        tracing::info!("dropped");

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("kept"));
        assert!(!content.contains("dropped"));
    }

    #[test]
    fn test_missing_logs_dir_is_filesystem_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = SessionLog::create(&dir.path().join("missing")).err().unwrap();
        assert_eq!(err.kind(), crate::error::ErrorKind::Filesystem);
    }
}
