//! File logging
//!
//! The terminal belongs to the UI, so log output goes to `<temp>/reqscope.log`.
//! Filtering follows `RUST_LOG` and defaults to `reqscope=info`.

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

pub fn log_path() -> PathBuf {
    std::env::temp_dir().join("reqscope.log")
}

/// Install the global subscriber; returns the log file path when logging is active
pub fn init() -> Option<PathBuf> {
    let path = log_path();
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .ok()?;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("reqscope=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .ok()?;

    Some(path)
}
