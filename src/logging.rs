//! Logging utilities for badmap.
//!
//! This module provides structured logging for the discovery and
//! registration pass, so a skipped source is always visible with its
//! identity and cause.

use std::path::Path;
use tracing::info;

/// Initialize the tracing subscriber with the given log level
pub fn init_tracing(log_level: &str) {
    let filter = match std::env::var("RUST_LOG") {
        Ok(val) => val,
        Err(_) => log_level.to_string(),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();
}

/// Log a summary of one discovery/registration pass
pub fn log_registry_stats(dir: &Path, loaded: usize, skipped: usize) {
    info!(
        operation = "registry_init",
        dir = %dir.display(),
        loaded = loaded,
        skipped = skipped,
        "Colormap registration pass completed"
    );
}
