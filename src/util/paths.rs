//! Where retrace keeps its files.
//!
//! Everything lives under one root, chosen once at startup: `--data-dir`,
//! else `$RETRACE_HOME`, else `~/.retrace`.
//!
//! ```text
//! <root>/config.toml
//! <root>/logs/retrace.log
//! ```

use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Environment variable that relocates the root when no flag is given.
pub const HOME_ENV: &str = "RETRACE_HOME";

const ROOT_NAME: &str = ".retrace";
const LOG_FILE: &str = "retrace.log";

static ROOT: OnceLock<PathBuf> = OnceLock::new();

/// Fix the root for the rest of the process and return it.
///
/// Only the first call decides; later calls get the root already chosen.
pub fn init_data_dir(custom_path: Option<PathBuf>) -> &'static Path {
    let requested = custom_path.clone();
    let root = ROOT.get_or_init(|| {
        resolve_root(custom_path, std::env::var_os(HOME_ENV), dirs::home_dir())
    });
    if let Some(requested) = requested.filter(|p| p != root) {
        tracing::debug!(
            requested = %requested.display(),
            root = %root.display(),
            "Data directory already chosen"
        );
    }
    root
}

fn resolve_root(
    flag: Option<PathBuf>,
    env: Option<OsString>,
    home: Option<PathBuf>,
) -> PathBuf {
    flag.or_else(|| env.filter(|v| !v.is_empty()).map(PathBuf::from))
        .or_else(|| home.map(|h| h.join(ROOT_NAME)))
        .unwrap_or_else(|| PathBuf::from(ROOT_NAME))
}

/// The root chosen by [`init_data_dir`], or the default when it was never called.
pub fn data_dir() -> PathBuf {
    match ROOT.get() {
        Some(root) => root.clone(),
        None => resolve_root(None, std::env::var_os(HOME_ENV), dirs::home_dir()),
    }
}

pub fn config_path() -> PathBuf {
    data_dir().join("config.toml")
}

pub fn logs_dir() -> PathBuf {
    data_dir().join("logs")
}

pub fn log_file_path() -> PathBuf {
    logs_dir().join(LOG_FILE)
}

/// Create the logs directory if needed and return the log file path.
pub fn prepare_log_file() -> io::Result<PathBuf> {
    fs::create_dir_all(logs_dir())?;
    Ok(log_file_path())
}
