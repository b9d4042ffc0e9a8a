//! Column mapping for CPASS worker uploads.
//!
//! [`MappingEngine`] scores each upload header against the keyword lists of
//! every [`cpass_model::TargetField`]; [`MappingReview`] applies manual
//! overrides; [`MappingRepository`] keeps reviewed mappings between runs.

#![deny(unsafe_code)]

pub mod engine;
pub mod error;
pub mod patterns;
pub mod repository;
pub mod state;
pub mod tier;
pub mod utils;

pub use engine::{
    ConfidenceLevel, ConfidenceThresholds, MappingEngine, MappingResult, NO_MATCH_CONFIDENCE,
};
pub use error::{MappingError, Result};
pub use repository::{MappingConfigLoader, MappingMetadata, MappingRepository, StoredMappingConfig};
pub use state::{MANUAL_CONFIDENCE, MappingConfig, MappingReview, MappingSummary};
pub use tier::detect_data_tier;
pub use utils::merge_mappings;
