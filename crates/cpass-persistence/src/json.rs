//! JSON-directory store: one `<BATCH_ID>.batch.json` document per batch.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use cpass_model::{BatchId, OnboardingBatch};
use tracing::{info, warn};

use crate::document::{BatchDocument, BatchListing, CURRENT_SCHEMA_VERSION};
use crate::error::{PersistenceError, Result};
use crate::store::WorkerStore;

const EXTENSION: &str = "batch.json";

#[derive(Debug, Clone)]
pub struct JsonWorkerStore {
    dir: PathBuf,
}

impl JsonWorkerStore {
    /// Store rooted at `dir`. The directory is created on first save.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, batch_id: &BatchId) -> PathBuf {
        self.dir.join(format!("{batch_id}.{EXTENSION}"))
    }

    /// Read and validate one document.
    pub fn read_document(path: &Path) -> Result<BatchDocument> {
        let bytes = fs::read(path).map_err(PersistenceError::io("read", path))?;
        let value: serde_json::Value =
            serde_json::from_slice(&bytes).map_err(|e| PersistenceError::InvalidFormat {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        let version = value
            .get("schema_version")
            .and_then(serde_json::Value::as_u64)
            .ok_or_else(|| PersistenceError::InvalidFormat {
                path: path.to_path_buf(),
                reason: "missing schema_version".to_string(),
            })?;
        let version = u32::try_from(version).unwrap_or(u32::MAX);
        if version > CURRENT_SCHEMA_VERSION {
            return Err(PersistenceError::UnsupportedVersion {
                found: version,
                max_supported: CURRENT_SCHEMA_VERSION,
                path: path.to_path_buf(),
            });
        }

        serde_json::from_value(value).map_err(|e| PersistenceError::InvalidFormat {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Write `document` via a temp file and rename.
    fn write_document(&self, document: &BatchDocument) -> Result<PathBuf> {
        let batch_id = &document.batch.batch_id;
        let bytes = serde_json::to_vec_pretty(document).map_err(|source| {
            PersistenceError::Serialization {
                batch_id: batch_id.clone(),
                source,
            }
        })?;

        fs::create_dir_all(&self.dir)
            .map_err(PersistenceError::io("create directory", &self.dir))?;

        let path = self.path_for(batch_id);
        let temp_path = path.with_extension("json.tmp");
        let mut file =
            File::create(&temp_path).map_err(PersistenceError::io("create", &temp_path))?;
        file.write_all(&bytes)
            .map_err(PersistenceError::io("write", &temp_path))?;
        file.sync_all()
            .map_err(PersistenceError::io("sync", &temp_path))?;

        fs::rename(&temp_path, &path).map_err(|source| PersistenceError::AtomicWriteFailed {
            temp_path: temp_path.clone(),
            target_path: path.clone(),
            source,
        })?;
        Ok(path)
    }

    fn batch_files(&self) -> Result<Vec<PathBuf>> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }
        let entries =
            fs::read_dir(&self.dir).map_err(PersistenceError::io("read", &self.dir))?;
        let mut paths: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| {
                path.file_name()
                    .and_then(|name| name.to_str())
                    .is_some_and(|name| name.ends_with(&format!(".{EXTENSION}")))
            })
            .collect();
        paths.sort();
        Ok(paths)
    }
}

impl WorkerStore for JsonWorkerStore {
    fn save_batch(&mut self, batch: &OnboardingBatch) -> Result<()> {
        let path = self.path_for(&batch.batch_id);
        let document = match Self::read_document(&path) {
            Ok(mut existing) => {
                existing.batch = batch.clone();
                existing.schema_version = CURRENT_SCHEMA_VERSION;
                existing.touch();
                existing
            }
            Err(PersistenceError::Io { source, .. })
                if source.kind() == io::ErrorKind::NotFound =>
            {
                BatchDocument::new(batch.clone())
            }
            Err(error) => return Err(error),
        };
        let path = self.write_document(&document)?;
        info!(
            batch_id = %batch.batch_id,
            workers = batch.workers.len(),
            path = %path.display(),
            "saved batch"
        );
        Ok(())
    }

    fn load_batch(&self, batch_id: &BatchId) -> Result<OnboardingBatch> {
        let path = self.path_for(batch_id);
        if !path.exists() {
            return Err(PersistenceError::BatchNotFound(batch_id.clone()));
        }
        let document = Self::read_document(&path)?;
        info!(batch_id = %batch_id, path = %path.display(), "loaded batch");
        Ok(document.batch)
    }

    /// Unreadable documents are skipped with a warning.
    fn list_batches(&self) -> Result<Vec<BatchListing>> {
        let mut listings = Vec::new();
        for path in self.batch_files()? {
            match Self::read_document(&path) {
                Ok(document) => listings.push(document.listing()),
                Err(error) => {
                    warn!(path = %path.display(), %error, "skipping unreadable batch");
                }
            }
        }
        listings.sort_by(|a, b| a.batch_id.cmp(&b.batch_id));
        Ok(listings)
    }

    fn delete_batch(&mut self, batch_id: &BatchId) -> Result<bool> {
        let path = self.path_for(batch_id);
        if !path.exists() {
            return Ok(false);
        }
        fs::remove_file(&path).map_err(PersistenceError::io("delete", &path))?;
        info!(batch_id = %batch_id, "deleted batch");
        Ok(true)
    }

    fn contains_batch(&self, batch_id: &BatchId) -> Result<bool> {
        Ok(self.path_for(batch_id).exists())
    }
}
