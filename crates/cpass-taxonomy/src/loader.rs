//! Taxonomy CSV loading.
//!
//! The same parsers serve the embedded data and an override directory laid
//! out like `data/<version>/`.

use std::io::Cursor;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use cpass_model::{
    CanonicalTask, Certification, CertificationRequirement, ComplexityLevel, Occupation, Skill,
    SkillId,
};

use crate::embedded::{TaxonomySources, TaxonomyVersion};
use crate::error::{Result, TaxonomyError};
use crate::taxonomy::{Taxonomy, TaxonomyParts};

/// Environment variable that points the loader at an override directory.
pub const TAXONOMY_ENV_VAR: &str = "CPASS_TAXONOMY_DIR";

pub const SKILLS_FILE: &str = "skills.csv";
pub const CANONICAL_TASKS_FILE: &str = "canonical_tasks.csv";
pub const KEYWORDS_FILE: &str = "keywords.csv";
pub const REQUIREMENTS_FILE: &str = "requirements.csv";
pub const CERTIFICATIONS_FILE: &str = "certifications.csv";
pub const OCCUPATIONS_FILE: &str = "occupations.csv";

const LIST_SEPARATOR: char = ';';

// =============================================================================
// Public Loading Functions
// =============================================================================

/// Load an embedded taxonomy version.
///
/// # Example
///
/// ```rust,ignore
/// let taxonomy = cpass_taxonomy::load(TaxonomyVersion::default())?;
/// assert!(taxonomy.contains("CP004"));
/// ```
pub fn load(version: TaxonomyVersion) -> Result<Taxonomy> {
    let taxonomy = load_from_sources(version.dir_name(), &version.sources())?;
    debug!(version = %version, skills = taxonomy.skills().len(), "loaded embedded taxonomy");
    Ok(taxonomy)
}

/// Load a taxonomy from a directory containing the six CSV files.
pub fn load_from_dir(dir: &Path) -> Result<Taxonomy> {
    if !dir.is_dir() {
        return Err(TaxonomyError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }
    let skills = read_file(&dir.join(SKILLS_FILE))?;
    let canonical_tasks = read_file(&dir.join(CANONICAL_TASKS_FILE))?;
    let keywords = read_file(&dir.join(KEYWORDS_FILE))?;
    let requirements = read_file(&dir.join(REQUIREMENTS_FILE))?;
    let certifications = read_file(&dir.join(CERTIFICATIONS_FILE))?;
    let occupations = read_file(&dir.join(OCCUPATIONS_FILE))?;
    let sources = TaxonomySources {
        skills: &skills,
        canonical_tasks: &canonical_tasks,
        keywords: &keywords,
        requirements: &requirements,
        certifications: &certifications,
        occupations: &occupations,
    };
    let label = dir.display().to_string();
    let taxonomy = load_from_sources(&label, &sources)?;
    debug!(dir = %dir.display(), skills = taxonomy.skills().len(), "loaded taxonomy directory");
    Ok(taxonomy)
}

/// Override directory from `CPASS_TAXONOMY_DIR`, if set.
pub fn taxonomy_dir_from_env() -> Option<PathBuf> {
    std::env::var_os(TAXONOMY_ENV_VAR)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

/// Load from `dir` when given, else from `CPASS_TAXONOMY_DIR`, else the
/// latest embedded version.
pub fn load_default(dir: Option<&Path>) -> Result<Taxonomy> {
    if let Some(dir) = dir {
        return load_from_dir(dir);
    }
    if let Some(dir) = taxonomy_dir_from_env() {
        return load_from_dir(&dir);
    }
    load(TaxonomyVersion::latest())
}

/// Parse and validate all six files.
pub fn load_from_sources(version: &str, sources: &TaxonomySources<'_>) -> Result<Taxonomy> {
    Taxonomy::new(TaxonomyParts {
        version: version.to_string(),
        skills: parse_skills(sources.skills)?,
        canonical_tasks: parse_canonical_tasks(sources.canonical_tasks)?,
        keywords: parse_keywords(sources.keywords)?,
        requirements: parse_requirements(sources.requirements)?,
        certifications: parse_certifications(sources.certifications)?,
        occupations: parse_occupations(sources.occupations)?,
    })
}

fn read_file(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(TaxonomyError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    std::fs::read_to_string(path).map_err(|source| TaxonomyError::Io {
        path: path.to_path_buf(),
        source,
    })
}

// =============================================================================
// CSV Row Types
// =============================================================================

#[derive(Debug, Deserialize)]
struct SkillCsvRow {
    skill_id: String,
    name: String,
    domain: String,
    category: String,
    #[serde(default)]
    complexity: String,
    #[serde(default)]
    prerequisites: String,
    #[serde(default)]
    synonyms: String,
}

#[derive(Debug, Deserialize)]
struct CanonicalTaskCsvRow {
    task_id: String,
    phrase: String,
    primary_skill_id: String,
    #[serde(default)]
    secondary_skill_ids: String,
    weight: String,
}

#[derive(Debug, Deserialize)]
struct KeywordCsvRow {
    stem: String,
}

#[derive(Debug, Deserialize)]
struct RequirementCsvRow {
    phrase: String,
    skill_ids: String,
}

#[derive(Debug, Deserialize)]
struct CertificationCsvRow {
    certification: String,
    requirement: String,
}

#[derive(Debug, Deserialize)]
struct OccupationCsvRow {
    occupation_id: String,
    title: String,
    isco_code: String,
    required_categories: String,
    #[serde(default)]
    foundation_categories: String,
}

// =============================================================================
// Parsers
// =============================================================================

fn read_rows<T: serde::de::DeserializeOwned>(content: &str, file: &str) -> Result<Vec<T>> {
    let cursor = Cursor::new(content.trim_start_matches('\u{feff}').as_bytes());
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(cursor);
    reader
        .deserialize::<T>()
        .map(|result| {
            result.map_err(|e| TaxonomyError::CsvParse {
                file: file.to_string(),
                message: e.to_string(),
            })
        })
        .collect()
}

fn require(value: &str, field: &'static str, file: &str, record: usize) -> Result<String> {
    if value.is_empty() {
        return Err(TaxonomyError::EmptyField {
            field,
            file: file.to_string(),
            record,
        });
    }
    Ok(value.to_string())
}

fn skill_id(value: &str, field: &'static str, file: &str) -> Result<SkillId> {
    SkillId::new(value).map_err(|_| TaxonomyError::InvalidValue {
        field,
        value: value.to_string(),
        file: file.to_string(),
    })
}

fn split_list(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(LIST_SEPARATOR)
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

fn skill_id_list(raw: &str, field: &'static str, file: &str) -> Result<Vec<SkillId>> {
    split_list(raw).map(|v| skill_id(v, field, file)).collect()
}

pub(crate) fn parse_skills(content: &str) -> Result<Vec<Skill>> {
    let rows: Vec<SkillCsvRow> = read_rows(content, SKILLS_FILE)?;
    rows.into_iter()
        .enumerate()
        .map(|(idx, row)| {
            let record = idx + 1;
            let id = require(&row.skill_id, "skill_id", SKILLS_FILE, record)?;
            let complexity = if row.complexity.is_empty() {
                None
            } else {
                Some(row.complexity.parse::<ComplexityLevel>().map_err(|_| {
                    TaxonomyError::InvalidValue {
                        field: "complexity",
                        value: row.complexity.clone(),
                        file: SKILLS_FILE.to_string(),
                    }
                })?)
            };
            Ok(Skill {
                id: skill_id(&id, "skill_id", SKILLS_FILE)?,
                name: require(&row.name, "name", SKILLS_FILE, record)?,
                domain: row.domain,
                category: row.category,
                complexity,
                prerequisites: skill_id_list(&row.prerequisites, "prerequisites", SKILLS_FILE)?,
                synonyms: split_list(&row.synonyms).map(str::to_string).collect(),
            })
        })
        .collect()
}

pub(crate) fn parse_canonical_tasks(content: &str) -> Result<Vec<CanonicalTask>> {
    let rows: Vec<CanonicalTaskCsvRow> = read_rows(content, CANONICAL_TASKS_FILE)?;
    rows.into_iter()
        .enumerate()
        .map(|(idx, row)| {
            let record = idx + 1;
            let weight = row
                .weight
                .parse::<f32>()
                .map_err(|_| TaxonomyError::InvalidValue {
                    field: "weight",
                    value: row.weight.clone(),
                    file: CANONICAL_TASKS_FILE.to_string(),
                })?;
            let primary = require(
                &row.primary_skill_id,
                "primary_skill_id",
                CANONICAL_TASKS_FILE,
                record,
            )?;
            Ok(CanonicalTask {
                id: require(&row.task_id, "task_id", CANONICAL_TASKS_FILE, record)?,
                phrase: require(&row.phrase, "phrase", CANONICAL_TASKS_FILE, record)?,
                primary_skill: skill_id(&primary, "primary_skill_id", CANONICAL_TASKS_FILE)?,
                secondary_skills: skill_id_list(
                    &row.secondary_skill_ids,
                    "secondary_skill_ids",
                    CANONICAL_TASKS_FILE,
                )?,
                weight,
            })
        })
        .collect()
}

pub(crate) fn parse_keywords(content: &str) -> Result<Vec<String>> {
    let rows: Vec<KeywordCsvRow> = read_rows(content, KEYWORDS_FILE)?;
    Ok(rows
        .into_iter()
        .map(|row| row.stem.to_lowercase())
        .filter(|stem| !stem.is_empty())
        .collect())
}

pub(crate) fn parse_requirements(content: &str) -> Result<Vec<CertificationRequirement>> {
    let rows: Vec<RequirementCsvRow> = read_rows(content, REQUIREMENTS_FILE)?;
    rows.into_iter()
        .enumerate()
        .map(|(idx, row)| {
            Ok(CertificationRequirement {
                phrase: require(&row.phrase, "phrase", REQUIREMENTS_FILE, idx + 1)?,
                skill_ids: skill_id_list(&row.skill_ids, "skill_ids", REQUIREMENTS_FILE)?,
            })
        })
        .collect()
}

pub(crate) fn parse_certifications(content: &str) -> Result<Vec<Certification>> {
    let rows: Vec<CertificationCsvRow> = read_rows(content, CERTIFICATIONS_FILE)?;
    let mut certifications: Vec<Certification> = Vec::new();
    for (idx, row) in rows.into_iter().enumerate() {
        let record = idx + 1;
        let name = require(&row.certification, "certification", CERTIFICATIONS_FILE, record)?;
        let requirement = require(&row.requirement, "requirement", CERTIFICATIONS_FILE, record)?;
        match certifications.iter_mut().find(|c| c.name == name) {
            Some(existing) => existing.requirements.push(requirement),
            None => certifications.push(Certification {
                name,
                requirements: vec![requirement],
            }),
        }
    }
    Ok(certifications)
}

pub(crate) fn parse_occupations(content: &str) -> Result<Vec<Occupation>> {
    let rows: Vec<OccupationCsvRow> = read_rows(content, OCCUPATIONS_FILE)?;
    rows.into_iter()
        .enumerate()
        .map(|(idx, row)| {
            let record = idx + 1;
            Ok(Occupation {
                id: require(&row.occupation_id, "occupation_id", OCCUPATIONS_FILE, record)?,
                title: require(&row.title, "title", OCCUPATIONS_FILE, record)?,
                isco_code: row.isco_code,
                required_categories: split_list(&row.required_categories)
                    .map(str::to_string)
                    .collect(),
                foundation_categories: split_list(&row.foundation_categories)
                    .map(str::to_string)
                    .collect(),
            })
        })
        .collect()
}
