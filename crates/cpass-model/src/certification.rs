use serde::{Deserialize, Serialize};
use std::fmt;

use crate::ids::SkillId;

/// Registry entry linking a requirement phrase to the skills that satisfy it.
/// Any one of `skill_ids` is enough.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertificationRequirement {
    pub phrase: String,
    pub skill_ids: Vec<SkillId>,
}

/// A certification and its requirement phrases, in catalog order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Certification {
    pub name: String,
    pub requirements: Vec<String>,
}

/// An occupation profile expressed in skill categories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Occupation {
    pub id: String,
    pub title: String,
    pub isco_code: String,
    pub required_categories: Vec<String>,
    pub foundation_categories: Vec<String>,
}

/// How a requirement phrase was resolved against the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMethod {
    Exact,
    CaseInsensitive,
    Fuzzy,
    Unresolved,
}

impl MatchMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchMethod::Exact => "exact",
            MatchMethod::CaseInsensitive => "case-insensitive",
            MatchMethod::Fuzzy => "fuzzy",
            MatchMethod::Unresolved => "unresolved",
        }
    }
}

impl fmt::Display for MatchMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
