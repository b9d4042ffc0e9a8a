//! Type-safe enumerations for skill and onboarding concepts.
//!
//! Several of these are bucketings of a numeric score. The numeric score is
//! always kept alongside the bucket; the thresholds that produce a bucket
//! live with the code that computes it.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::ModelError;

/// Complexity of a skill in the taxonomy, from entry level upwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplexityLevel {
    Foundation,
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

impl ComplexityLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComplexityLevel::Foundation => "foundation",
            ComplexityLevel::Beginner => "beginner",
            ComplexityLevel::Intermediate => "intermediate",
            ComplexityLevel::Advanced => "advanced",
            ComplexityLevel::Expert => "expert",
        }
    }

    /// Level implied by the depth of a skill's prerequisite chain.
    ///
    /// A skill with no prerequisites has depth 0. Depths of 4 and above are
    /// all expert.
    pub fn from_depth(depth: usize) -> Self {
        match depth {
            0 => ComplexityLevel::Foundation,
            1 => ComplexityLevel::Beginner,
            2 => ComplexityLevel::Intermediate,
            3 => ComplexityLevel::Advanced,
            _ => ComplexityLevel::Expert,
        }
    }
}

impl fmt::Display for ComplexityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ComplexityLevel {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "foundation" => Ok(ComplexityLevel::Foundation),
            "beginner" => Ok(ComplexityLevel::Beginner),
            "intermediate" => Ok(ComplexityLevel::Intermediate),
            "advanced" => Ok(ComplexityLevel::Advanced),
            "expert" => Ok(ComplexityLevel::Expert),
            _ => Err(ModelError::UnknownComplexity(s.to_string())),
        }
    }
}

/// Confidence tier of a skill match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceTier {
    Low,
    Medium,
    High,
}

impl ConfidenceTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfidenceTier::Low => "low",
            ConfidenceTier::Medium => "medium",
            ConfidenceTier::High => "high",
        }
    }
}

impl fmt::Display for ConfidenceTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Proficiency implied by how confidently a task was matched to a skill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProficiencyEstimate {
    Beginner,
    Competent,
    Proficient,
}

impl ProficiencyEstimate {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProficiencyEstimate::Beginner => "Beginner",
            ProficiencyEstimate::Competent => "Competent",
            ProficiencyEstimate::Proficient => "Proficient",
        }
    }
}

impl fmt::Display for ProficiencyEstimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Proficiency derived from a worker's 1-10 self rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkerProficiency {
    Learning,
    Competent,
    Proficient,
    Expert,
}

impl WorkerProficiency {
    pub fn from_rating(rating: u8) -> Self {
        match rating {
            9.. => WorkerProficiency::Expert,
            7..=8 => WorkerProficiency::Proficient,
            4..=6 => WorkerProficiency::Competent,
            _ => WorkerProficiency::Learning,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WorkerProficiency::Learning => "learning",
            WorkerProficiency::Competent => "competent",
            WorkerProficiency::Proficient => "proficient",
            WorkerProficiency::Expert => "expert",
        }
    }
}

impl fmt::Display for WorkerProficiency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Review state of a proposed skill match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl ReviewStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewStatus::Pending => "pending",
            ReviewStatus::Approved => "approved",
            ReviewStatus::Rejected => "rejected",
        }
    }
}

impl fmt::Display for ReviewStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Certification readiness bucket of a worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadinessBucket {
    EarlyStage,
    InProgress,
    Ready,
}

impl ReadinessBucket {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReadinessBucket::EarlyStage => "early stage",
            ReadinessBucket::InProgress => "in progress",
            ReadinessBucket::Ready => "certification ready",
        }
    }
}

impl fmt::Display for ReadinessBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How much detail an uploaded sheet carries about each worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataTier {
    /// Name and a work description only.
    Basic,
    /// Adds years of experience and the kind of work done.
    Medium,
    /// Adds farm scale, task frequency and supervision level.
    Detailed,
}

impl DataTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            DataTier::Basic => "basic",
            DataTier::Medium => "medium",
            DataTier::Detailed => "detailed",
        }
    }
}

impl fmt::Display for DataTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
