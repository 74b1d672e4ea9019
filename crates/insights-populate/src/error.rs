//! Error types for the fixture populator.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while writing fixtures.
#[derive(Error, Debug)]
pub enum PopulatorError {
    /// Run configuration rejected before generation.
    #[error("Invalid configuration: {0}")]
    Config(#[from] insights_core::ConfigError),

    /// Output directory could not be created.
    #[error("Failed to create output directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// Some files of an otherwise complete run could not be written.
    #[error("{failed} of {total} fixture files could not be written")]
    WriteFailures { failed: usize, total: usize },
}
