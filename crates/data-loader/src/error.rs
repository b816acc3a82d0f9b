//! Error types for the data-loader crate.
//!
//! Loading is all-or-nothing: a missing file and a file that exists but
//! cannot be deserialized are reported as different variants so the
//! presentation layer can show a distinct message for each.

use thiserror::Error;

/// Errors that can occur while loading the precomputed artifacts
#[derive(Error, Debug)]
pub enum DataLoadError {
    /// Artifact file does not exist at the configured path
    #[error("Artifact not found: {path}")]
    ArtifactMissing { path: String },

    /// I/O error occurred while reading file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// File exists but its contents could not be deserialized
    #[error("Corrupt artifact {file}: {reason}")]
    Corrupt { file: String, reason: String },

    /// Artifacts deserialized but are inconsistent with each other
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

impl DataLoadError {
    /// True when the failure is a missing file rather than unreadable data
    pub fn is_missing(&self) -> bool {
        matches!(self, DataLoadError::ArtifactMissing { .. })
    }
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, DataLoadError>;
