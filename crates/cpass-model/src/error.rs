use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ModelError {
    #[error("invalid skill id: {0:?}")]
    InvalidSkillId(String),
    #[error("invalid batch id: {0:?}")]
    InvalidBatchId(String),
    #[error("unknown target field: {0}")]
    UnknownField(String),
    #[error("unknown complexity level: {0}")]
    UnknownComplexity(String),
    #[error("confidence {0} is outside [0, 1]")]
    ConfidenceOutOfRange(f32),
}

pub type Result<T> = std::result::Result<T, ModelError>;
