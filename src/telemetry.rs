//! Log setup for the binaries.
//!
//! The terminal is in raw mode on the alternate screen while a game runs, so
//! logs never go to stdout/stderr. They are written to the file named by
//! `TUI_ARCADE_LOG_PATH`; without it no subscriber is installed.

use std::fs::OpenOptions;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

pub const LOG_PATH_ENV: &str = "TUI_ARCADE_LOG_PATH";
pub const LOG_FILTER_ENV: &str = "TUI_ARCADE_LOG";

/// Install the file logger if configured. Returns whether one was installed.
pub fn init_telemetry() -> Result<bool> {
    let Some(path) = std::env::var(LOG_PATH_ENV)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
    else {
        return Ok(false);
    };

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("opening log file {path}"))?;

    let filter = std::env::var(LOG_FILTER_ENV).unwrap_or_else(|_| "info".to_string());
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("info"));

    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .is_ok();
    Ok(installed)
}
