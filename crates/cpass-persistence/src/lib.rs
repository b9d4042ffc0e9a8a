//! Storage for onboarded CPASS batches.
//!
//! # Features
//!
//! - [`WorkerStore`] trait with an in-memory implementation for tests and
//!   fixtures and a JSON-directory implementation for real use
//! - **Atomic writes** (temp file + rename) so a crash never leaves a
//!   half-written batch
//! - **Schema version check** on load
//! - [`NamePool`] for signup display names, with caller-owned state
//!
//! # File Format
//!
//! `JsonWorkerStore` writes one pretty-printed document per batch to
//! `<dir>/<BATCH_ID>.batch.json`:
//!
//! ```text
//! {
//!   "schema_version": 1,
//!   "created_at": "2026-03-01T09:00:00+00:00",
//!   "last_saved_at": "2026-03-01T09:05:00+00:00",
//!   "batch": { "batch_id": "KALRO-01", "workers": [...], ... }
//! }
//! ```

#![deny(unsafe_code)]

mod document;
mod error;
mod json;
mod names;
mod store;

pub use document::{BatchDocument, BatchListing, CURRENT_SCHEMA_VERSION};
pub use error::{PersistenceError, Result};
pub use json::JsonWorkerStore;
pub use names::{DEFAULT_NAMES, NamePool, UsedNames};
pub use store::{InMemoryWorkerStore, WorkerStore};
