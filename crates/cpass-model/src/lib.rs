//! Shared data model for CPASS skill onboarding.
//!
//! Plain serde-serializable types only. Scoring, matching and persistence
//! live in the crates that depend on this one.

pub mod batch;
pub mod certification;
pub mod enums;
pub mod error;
pub mod ids;
pub mod mapping;
pub mod matching;
pub mod skill;
pub mod worker;

pub use batch::OnboardingBatch;
pub use certification::{Certification, CertificationRequirement, MatchMethod, Occupation};
pub use enums::{
    ComplexityLevel, ConfidenceTier, DataTier, ProficiencyEstimate, ReadinessBucket, ReviewStatus,
    WorkerProficiency,
};
pub use error::{ModelError, Result};
pub use ids::{BatchId, SkillId};
pub use mapping::{ColumnMapping, TargetField};
pub use matching::SkillMatch;
pub use skill::{CanonicalTask, Skill};
pub use worker::{WorkerProfile, WorkerRecord};
