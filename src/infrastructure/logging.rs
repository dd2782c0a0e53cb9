//! File-backed tracing setup.
//!
//! The terminal belongs to the UI, so log lines go to a file instead of stderr.

use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Installs a global `fmt` subscriber writing to `log_file`.
///
/// Returns `false` and leaves logging disabled if the file cannot be opened or a
/// subscriber is already installed.
pub fn init_logging(log_file: &Path, level: &str) -> bool {
    if let Some(parent) = log_file.parent() {
        if fs::create_dir_all(parent).is_err() {
            return false;
        }
    }

    let file = match OpenOptions::new().create(true).append(true).open(log_file) {
        Ok(file) => file,
        Err(_) => return false,
    };

    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .is_ok()
}
