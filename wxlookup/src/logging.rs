//! File logging
//!
//! The terminal belongs to the UI, so events go to a file. Filter comes from
//! `WXLOOKUP_LOG`, then `RUST_LOG`, then `info`.

use std::fs::{self, File, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::error::AppError;

pub const LOG_ENV: &str = "WXLOOKUP_LOG";

const DEFAULT_FILTER: &str = "info";

pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the global subscriber, appending to `path`
pub fn init(path: &Path) -> Result<(), AppError> {
    let file = open_log_file(path)?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .map_err(|e| AppError::Logger(e.to_string()))
}

fn open_log_file(path: &Path) -> Result<File, AppError> {
    let log_error = |source| AppError::LogFile {
        path: path.to_path_buf(),
        source,
    };

    if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir).map_err(log_error)?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(log_error)
}
