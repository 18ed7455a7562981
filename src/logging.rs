//! File-backed tracing setup
//!
//! The terminal belongs to the TUI, so log lines go to
//! `<log dir>/pomodoro.log` instead of stdout.

use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use thiserror::Error;
use tracing_subscriber::EnvFilter;

const LOG_FILE: &str = "pomodoro.log";
const DEFAULT_DIRECTIVE: &str = "pomodoro_tui=info";

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("Failed to create log directory {path}: {source}")]
    CreateDir { path: PathBuf, source: io::Error },

    #[error("Failed to open log file {path}: {source}")]
    OpenFile { path: PathBuf, source: io::Error },

    #[error("Failed to install tracing subscriber: {0}")]
    Install(String),
}

/// Install the global subscriber, honouring `RUST_LOG` when set.
/// Returns the path of the log file.
pub fn init(log_dir: &Path) -> Result<PathBuf, LoggingError> {
    let file = open_log_file(log_dir)?;
    let path = log_dir.join(LOG_FILE);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|e| LoggingError::Install(e.to_string()))?;

    Ok(path)
}

fn open_log_file(log_dir: &Path) -> Result<File, LoggingError> {
    fs::create_dir_all(log_dir).map_err(|source| LoggingError::CreateDir {
        path: log_dir.to_path_buf(),
        source,
    })?;

    let path = log_dir.join(LOG_FILE);
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .map_err(|source| LoggingError::OpenFile { path, source })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_log_file_creates_directory() {
        let dir = std::env::temp_dir()
            .join(format!("pomodoro-tui-log-{}", std::process::id()))
            .join("nested");
        let _ = fs::remove_dir_all(&dir);

        open_log_file(&dir).unwrap();
        assert!(dir.join(LOG_FILE).is_file());

        let _ = fs::remove_dir_all(dir.parent().unwrap());
    }

    #[test]
    fn test_open_log_file_reports_path_on_failure() {
        let blocker = std::env::temp_dir()
            .join(format!("pomodoro-tui-blocker-{}", std::process::id()));
        fs::write(&blocker, b"not a directory").unwrap();

        let err = open_log_file(&blocker.join("logs")).unwrap_err();
        assert!(matches!(err, LoggingError::CreateDir { .. }));
        assert!(err.to_string().contains("pomodoro-tui-blocker"));

        let _ = fs::remove_file(blocker);
    }
}
