//! Export error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while encoding or writing an export.
#[derive(Debug, Error)]
pub enum ExportError {
    /// CSV encoding failed.
    #[error("CSV encoding error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON encoding failed.
    #[error("JSON encoding error: {0}")]
    Json(#[from] serde_json::Error),

    /// The file name is empty or would escape the sink directory.
    #[error("invalid export file name '{0}'")]
    InvalidFilename(String),

    /// The write target could not be written.
    #[error("failed to write {target}: {source}")]
    Io {
        /// Path or description of the write target.
        target: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
