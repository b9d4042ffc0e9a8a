use std::borrow::Borrow;
use std::fmt;

use crate::ModelError;

/// Stable taxonomy code of a skill, e.g. `CP004`.
///
/// Codes are trimmed and upper-cased on construction so `cp004` and
/// ` CP004 ` refer to the same skill.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(try_from = "String")]
pub struct SkillId(String);

impl SkillId {
    pub fn new(value: impl Into<String>) -> Result<Self, ModelError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() || trimmed.chars().any(char::is_whitespace) {
            return Err(ModelError::InvalidSkillId(value));
        }
        Ok(Self(trimmed.to_uppercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Domain prefix of the code (`CP` for `CP004`).
    pub fn prefix(&self) -> &str {
        let end = self
            .0
            .find(|c: char| c.is_ascii_digit())
            .unwrap_or(self.0.len());
        &self.0[..end]
    }
}

impl fmt::Display for SkillId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for SkillId {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl Borrow<str> for SkillId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Identifier of one upload batch. Used in file names and invitation codes,
/// so it is limited to ASCII letters, digits, `-` and `_`.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(try_from = "String")]
pub struct BatchId(String);

impl BatchId {
    pub fn new(value: impl Into<String>) -> Result<Self, ModelError> {
        let value = value.into();
        let trimmed = value.trim();
        let valid = !trimmed.is_empty()
            && trimmed
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(ModelError::InvalidBatchId(value));
        }
        Ok(Self(trimmed.to_uppercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for BatchId {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for BatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skill_id_is_normalized() {
        let id = SkillId::new(" cp004 ").unwrap();
        assert_eq!(id.as_str(), "CP004");
        assert_eq!(id.prefix(), "CP");
    }

    #[test]
    fn skill_id_rejects_blank_and_spaces() {
        assert!(SkillId::new("   ").is_err());
        assert!(SkillId::new("CP 004").is_err());
    }

    #[test]
    fn batch_id_rejects_path_characters() {
        assert!(BatchId::new("../etc").is_err());
        assert_eq!(BatchId::new("nakuru-01").unwrap().as_str(), "NAKURU-01");
    }

    #[test]
    fn deserialized_ids_are_validated() {
        let skill: SkillId = serde_json::from_str(r#"" cp004""#).unwrap();
        assert_eq!(skill.as_str(), "CP004");
        assert!(serde_json::from_str::<SkillId>(r#""CP 004""#).is_err());

        let batch: BatchId = serde_json::from_str(r#""nakuru-01""#).unwrap();
        assert_eq!(batch.as_str(), "NAKURU-01");
        assert!(serde_json::from_str::<BatchId>(r#""../etc""#).is_err());
        assert_eq!(serde_json::to_string(&batch).unwrap(), r#""NAKURU-01""#);
    }
}
