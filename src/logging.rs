//! Log file setup
//!
//! The terminal belongs to the UI, so tracing output goes to a file in the
//! platform data directory (`~/.local/share/photogrid/` on Linux). Failing to
//! set up logging never stops the app.

use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use directories::ProjectDirs;
use tracing_subscriber::EnvFilter;

use crate::cli::DEFAULT_LOG_FILTER;

/// Name of the log file inside the log directory
pub const LOG_FILE_NAME: &str = "photogrid.log";

/// Directory the log file is written to, if a home directory is known
pub fn default_log_dir() -> Option<PathBuf> {
    let project_dirs = ProjectDirs::from("", "", "photogrid")?;
    Some(project_dirs.data_local_dir().to_path_buf())
}

/// Builds the tracing filter, falling back to the default on bad input
pub fn build_filter(directive: &str) -> EnvFilter {
    EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}

/// Installs the global subscriber writing to the default log directory
///
/// Returns the log file path, or `None` if logging could not be set up.
pub fn init_logging(directive: &str) -> Option<PathBuf> {
    let dir = default_log_dir()?;
    init_logging_in(&dir, directive).ok()
}

/// Installs the global subscriber writing to `dir/photogrid.log`
///
/// Creates `dir` if needed and appends to an existing log. Only the first
/// successful call installs a subscriber.
pub fn init_logging_in(dir: &Path, directive: &str) -> io::Result<PathBuf> {
    fs::create_dir_all(dir)?;

    let path = dir.join(LOG_FILE_NAME);
    let file = OpenOptions::new().create(true).append(true).open(&path)?;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(build_filter(directive))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init();

    Ok(path)
}
