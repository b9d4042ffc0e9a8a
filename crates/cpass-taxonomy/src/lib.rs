//! CPASS skill taxonomy.
//!
//! This crate provides:
//!
//! - **Embedded data** for every taxonomy version ([`embedded`])
//! - **Loaders** for embedded data and override directories ([`loader`])
//! - The validated, read-only [`Taxonomy`] registry
//!
//! # Data Directory Structure
//!
//! ```text
//! data/
//! └── 2025.1/
//!     ├── skills.csv            # id, name, domain, category, complexity, prerequisites, synonyms
//!     ├── canonical_tasks.csv   # reference task phrases and their skills
//!     ├── keywords.csv          # keyword stems used by the matcher
//!     ├── requirements.csv      # requirement phrase -> skill ids, ordered
//!     ├── certifications.csv    # certification -> requirement phrases
//!     └── occupations.csv       # occupation profiles in skill categories
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use cpass_taxonomy::{load, TaxonomyVersion};
//!
//! let taxonomy = load(TaxonomyVersion::latest())?;
//! println!("{} skills", taxonomy.skills().len());
//! ```

pub mod embedded;
pub mod error;
pub mod loader;
pub mod taxonomy;

pub use embedded::{TaxonomySources, TaxonomyVersion};
pub use error::{Result, TaxonomyError};
pub use loader::{
    TAXONOMY_ENV_VAR, load, load_default, load_from_dir, load_from_sources, taxonomy_dir_from_env,
};
pub use taxonomy::{DanglingReference, Taxonomy, TaxonomyParts, TaxonomyStats};
