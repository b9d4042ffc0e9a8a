//! Error types for taxonomy loading.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when loading or validating a taxonomy.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TaxonomyError {
    /// Taxonomy directory not found.
    #[error("Taxonomy directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// CSV file not found.
    #[error("CSV file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read a taxonomy file from disk.
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse CSV content.
    #[error("Failed to parse CSV {file}: {message}")]
    CsvParse { file: String, message: String },

    /// Invalid value in CSV field.
    #[error("Invalid {field} value '{value}' in {file}")]
    InvalidValue {
        field: &'static str,
        value: String,
        file: String,
    },

    /// A required field was blank.
    #[error("Empty {field} in {file} (record {record})")]
    EmptyField {
        field: &'static str,
        file: String,
        record: usize,
    },

    /// The same skill id was declared twice.
    #[error("Duplicate skill id {id}")]
    DuplicateSkill { id: String },

    /// A prerequisite names a skill that is not in the taxonomy.
    #[error("Skill {skill} lists unknown prerequisite {prerequisite}")]
    UnknownPrerequisite { skill: String, prerequisite: String },

    /// Canonical task weight outside [0, 1].
    #[error("Canonical task {task} has weight {weight} outside [0, 1]")]
    WeightOutOfRange { task: String, weight: f32 },
}

/// Result type for taxonomy operations.
pub type Result<T> = std::result::Result<T, TaxonomyError>;
