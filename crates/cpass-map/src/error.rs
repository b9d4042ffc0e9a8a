//! Error types for mapping operations.

use std::path::PathBuf;

use cpass_model::ModelError;
use thiserror::Error;

/// Errors from mapping operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum MappingError {
    /// Column not found in the upload.
    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    /// The upload has no column that looks like a worker name.
    #[error("Upload must have a name column")]
    NoNameColumn,

    /// The upload has no column describing work or tasks.
    #[error("Upload must have a work, task, skill or experience column")]
    NoWorkColumn,

    /// Malformed `COLUMN=FIELD` override.
    #[error("Invalid override '{0}', expected COLUMN=FIELD")]
    InvalidOverride(String),

    #[error(transparent)]
    Model(#[from] ModelError),

    /// Filesystem failure in the mapping repository.
    #[error("Failed to {operation} {path}: {source}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A stored mapping could not be encoded or decoded.
    #[error("Invalid mapping file {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl MappingError {
    pub(crate) fn io(
        operation: &'static str,
        path: impl Into<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        Self::Io {
            operation,
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, MappingError>;
