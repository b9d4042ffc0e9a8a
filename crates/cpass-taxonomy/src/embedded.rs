//! Embedded taxonomy data.
//!
//! Every taxonomy version is compiled into the binary with `include_str!()`
//! so the matcher works offline and without path resolution.
//!
//! # Adding a version
//!
//! Copy the previous `data/<version>/` directory, edit the CSV files, add
//! constants below and a [`TaxonomyVersion`] variant pointing at them.

use std::fmt;

// =============================================================================
// Taxonomy 2025.1
// =============================================================================

pub const V2025_1_SKILLS: &str = include_str!("../data/2025.1/skills.csv");
pub const V2025_1_CANONICAL_TASKS: &str = include_str!("../data/2025.1/canonical_tasks.csv");
pub const V2025_1_KEYWORDS: &str = include_str!("../data/2025.1/keywords.csv");
pub const V2025_1_REQUIREMENTS: &str = include_str!("../data/2025.1/requirements.csv");
pub const V2025_1_CERTIFICATIONS: &str = include_str!("../data/2025.1/certifications.csv");
pub const V2025_1_OCCUPATIONS: &str = include_str!("../data/2025.1/occupations.csv");

/// Raw CSV content of one taxonomy version, one field per file.
#[derive(Debug, Clone, Copy)]
pub struct TaxonomySources<'a> {
    pub skills: &'a str,
    pub canonical_tasks: &'a str,
    pub keywords: &'a str,
    pub requirements: &'a str,
    pub certifications: &'a str,
    pub occupations: &'a str,
}

/// Taxonomy versions embedded in the binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TaxonomyVersion {
    /// 2025.1: CP/LV/MC/PH/HT/MG skill codes.
    #[default]
    V2025_1,
}

impl TaxonomyVersion {
    /// Directory name under `data/`.
    pub const fn dir_name(&self) -> &'static str {
        match self {
            Self::V2025_1 => "2025.1",
        }
    }

    pub const fn all() -> &'static [TaxonomyVersion] {
        &[Self::V2025_1]
    }

    pub const fn latest() -> Self {
        Self::V2025_1
    }

    pub const fn sources(&self) -> TaxonomySources<'static> {
        match self {
            Self::V2025_1 => TaxonomySources {
                skills: V2025_1_SKILLS,
                canonical_tasks: V2025_1_CANONICAL_TASKS,
                keywords: V2025_1_KEYWORDS,
                requirements: V2025_1_REQUIREMENTS,
                certifications: V2025_1_CERTIFICATIONS,
                occupations: V2025_1_OCCUPATIONS,
            },
        }
    }
}

impl fmt::Display for TaxonomyVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}
