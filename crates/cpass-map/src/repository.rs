//! Reviewed column mappings kept between uploads.
//!
//! Uploads from the same source usually share a layout, so a reviewed
//! mapping can be saved and merged into the next batch's suggestions.
//!
//! One pretty-printed JSON document per batch, `<BATCH_ID>.json`, holding
//! the mappings plus `saved_at`, an optional description and the format
//! version.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{SecondsFormat, Utc};
use cpass_model::BatchId;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{MappingError, Result};
use crate::state::MappingConfig;

/// Directory of saved batch mappings.
#[derive(Debug, Clone)]
pub struct MappingRepository {
    base_dir: PathBuf,
}

/// One entry of [`MappingRepository::list`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MappingMetadata {
    pub batch_id: BatchId,
    pub file_path: PathBuf,
    /// Columns in the saved mapping, ignored ones included.
    pub mapping_count: usize,
    /// Number of columns mapped to `ignore`.
    pub ignored_count: usize,
    pub saved_at: Option<String>,
}

/// On-disk form of a [`MappingConfig`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredMappingConfig {
    #[serde(flatten)]
    pub config: MappingConfig,
    /// RFC 3339 timestamp of when this mapping was saved.
    pub saved_at: Option<String>,
    /// Free-form note, e.g. the upload source.
    pub description: Option<String>,
    /// Document format; files written before versioning read as `1.0`.
    #[serde(default = "default_version")]
    pub version: String,
}

fn default_version() -> String {
    "1.0".to_string()
}

impl StoredMappingConfig {
    pub fn new(config: MappingConfig) -> Self {
        Self {
            config,
            saved_at: Some(Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)),
            description: None,
            version: default_version(),
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

impl MappingRepository {
    /// Open a repository at `base_dir`, creating the directory if needed.
    pub fn new(base_dir: impl Into<PathBuf>) -> Result<Self> {
        let base_dir = base_dir.into();
        fs::create_dir_all(&base_dir)
            .map_err(|e| MappingError::io("create mapping directory", &base_dir, e))?;
        Ok(Self { base_dir })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Save a mapping configuration, stamping it with the current time.
    pub fn save(&self, config: &MappingConfig) -> Result<PathBuf> {
        self.save_stored(&StoredMappingConfig::new(config.clone()))
    }

    /// Write `stored` as is, replacing any earlier mapping of the batch.
    pub fn save_stored(&self, stored: &StoredMappingConfig) -> Result<PathBuf> {
        let path = self.mapping_path(&stored.config.batch_id);
        let json = serde_json::to_string_pretty(stored).map_err(|source| MappingError::Json {
            path: path.clone(),
            source,
        })?;
        fs::write(&path, json).map_err(|e| MappingError::io("write mapping", &path, e))?;
        debug!(path = %path.display(), "saved column mapping");
        Ok(path)
    }

    /// Load the mapping for `batch_id`. Returns `None` if no mapping exists.
    pub fn load(&self, batch_id: &BatchId) -> Result<Option<MappingConfig>> {
        Ok(self.load_stored(batch_id)?.map(|s| s.config))
    }

    /// Like [`Self::load`] but keeps the document metadata.
    pub fn load_stored(&self, batch_id: &BatchId) -> Result<Option<StoredMappingConfig>> {
        let path = self.mapping_path(batch_id);
        if !path.exists() {
            return Ok(None);
        }
        read_stored(&path).map(Some)
    }

    /// List all readable mappings, sorted by batch id.
    ///
    /// Files that are not valid mapping documents are skipped with a warning.
    pub fn list(&self) -> Result<Vec<MappingMetadata>> {
        let entries = fs::read_dir(&self.base_dir)
            .map_err(|e| MappingError::io("read mapping directory", &self.base_dir, e))?;
        let mut metadata = Vec::new();
        for entry in entries {
            let entry = entry
                .map_err(|e| MappingError::io("read mapping directory", &self.base_dir, e))?;
            let path = entry.path();
            if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            match read_stored(&path) {
                Ok(stored) => metadata.push(MappingMetadata {
                    mapping_count: stored.config.mappings.len(),
                    ignored_count: stored.config.ignored_columns().len(),
                    batch_id: stored.config.batch_id,
                    saved_at: stored.saved_at,
                    file_path: path,
                }),
                Err(error) => {
                    warn!(path = %path.display(), %error, "skipping unreadable mapping");
                }
            }
        }
        metadata.sort_by(|a, b| a.batch_id.cmp(&b.batch_id));
        Ok(metadata)
    }

    /// Delete a mapping. Returns whether a file was removed.
    pub fn delete(&self, batch_id: &BatchId) -> Result<bool> {
        let path = self.mapping_path(batch_id);
        if !path.exists() {
            return Ok(false);
        }
        fs::remove_file(&path).map_err(|e| MappingError::io("delete mapping", &path, e))?;
        Ok(true)
    }

    pub fn exists(&self, batch_id: &BatchId) -> bool {
        self.mapping_path(batch_id).exists()
    }

    fn mapping_path(&self, batch_id: &BatchId) -> PathBuf {
        self.base_dir.join(format!("{}.json", batch_id.as_str()))
    }
}

fn read_stored(path: &Path) -> Result<StoredMappingConfig> {
    let contents =
        fs::read_to_string(path).map_err(|e| MappingError::io("read mapping", path, e))?;
    serde_json::from_str(&contents).map_err(|source| MappingError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Reads and writes one batch's mapping when a repository is configured,
/// and does nothing otherwise.
#[derive(Debug, Clone)]
pub struct MappingConfigLoader {
    batch_id: BatchId,
    repository: Option<MappingRepository>,
}

impl MappingConfigLoader {
    pub fn new(batch_id: BatchId) -> Self {
        Self {
            batch_id,
            repository: None,
        }
    }

    #[must_use]
    pub fn with_repository(self, repository: MappingRepository) -> Self {
        Self {
            repository: Some(repository),
            ..self
        }
    }

    /// The saved mapping of the batch, or `default_fn()` when there is none.
    pub fn load_or_default(
        &self,
        default_fn: impl FnOnce() -> MappingConfig,
    ) -> Result<MappingConfig> {
        let saved = match &self.repository {
            Some(repo) => repo.load(&self.batch_id)?,
            None => None,
        };
        Ok(saved.unwrap_or_else(default_fn))
    }

    /// Path written, or `None` without a repository.
    pub fn save(&self, config: &MappingConfig) -> Result<Option<PathBuf>> {
        self.repository
            .as_ref()
            .map(|repo| repo.save(config))
            .transpose()
    }
}
