//! Persistence error types.
//!
//! Every store operation returns a [`PersistenceError`] with a short
//! message for the terminal and an optional hint.

use std::path::PathBuf;

use cpass_model::BatchId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("Failed to {operation} file: {path}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not a batch document.
    #[error("Invalid batch file {path}: {reason}")]
    InvalidFormat { path: PathBuf, reason: String },

    #[error("Batch file version {found} is not supported (maximum: {max_supported})")]
    UnsupportedVersion {
        found: u32,
        max_supported: u32,
        path: PathBuf,
    },

    #[error("Batch not found: {0}")]
    BatchNotFound(BatchId),

    #[error("Failed to serialize batch {batch_id}")]
    Serialization {
        batch_id: BatchId,
        #[source]
        source: serde_json::Error,
    },

    /// Atomic write failed (temp file couldn't be renamed).
    #[error("Failed to complete save of {target_path}")]
    AtomicWriteFailed {
        temp_path: PathBuf,
        target_path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl PersistenceError {
    pub(crate) fn io(
        operation: &'static str,
        path: impl Into<PathBuf>,
    ) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| Self::Io {
            operation,
            path,
            source,
        }
    }

    /// Suggestion for how to resolve this error.
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::Io { operation, .. } if *operation == "read" => {
                Some("Check that the file exists and you have permission to read it.")
            }
            Self::Io { .. } => Some("Check that you have permission to write to this location."),
            Self::InvalidFormat { .. } => {
                Some("Remove or move the file out of the store directory.")
            }
            Self::UnsupportedVersion { .. } => {
                Some("The batch was written by a newer cpass; update and retry.")
            }
            Self::BatchNotFound(_) => Some("Run `cpass onboard` for this batch first."),
            Self::Serialization { .. } => None,
            Self::AtomicWriteFailed { .. } => {
                Some("Free up disk space or use a different --store-dir.")
            }
        }
    }
}

/// Result type alias for persistence operations.
pub type Result<T> = std::result::Result<T, PersistenceError>;
