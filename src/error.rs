//! Error types for the badmap registry.
//!
//! This module defines a comprehensive error enum that covers all possible
//! error conditions in the crate: per-source load failures, name
//! collisions, and lookup misses.

use thiserror::Error;

/// The main error type for badmap operations.
#[derive(Error, Debug)]
pub enum BadmapError {
    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing errors from colormap source files or config files
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// A palette violates the sample-sequence invariants
    #[error("Invalid palette: {message}")]
    InvalidPalette { message: String },

    /// A single colormap source is malformed or unreadable
    #[error("Failed to load colormap source '{name}': {message}")]
    Load { name: String, message: String },

    /// A computed colormap name already exists in the shared namespace
    #[error("Colormap name collision: '{name}' is already registered")]
    Collision { name: String },

    /// A colormap name is absent from both the local table and the
    /// shared namespace
    #[error("Colormap not found: '{name}'")]
    NotFound { name: String },
}

impl BadmapError {
    /// Build a Load error for the given source name.
    pub fn load(name: impl Into<String>, message: impl Into<String>) -> Self {
        BadmapError::Load {
            name: name.into(),
            message: message.into(),
        }
    }
}

/// Convenience type alias for Results with BadmapError
pub type Result<T> = std::result::Result<T, BadmapError>;
