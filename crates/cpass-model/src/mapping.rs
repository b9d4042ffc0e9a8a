use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::ModelError;

/// Semantic field an uploaded column can be mapped to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetField {
    FullName,
    IdNumber,
    Phone,
    Location,
    EducationLevel,
    ExperienceYears,
    FarmSize,
    PrimaryCrops,
    Livestock,
    TaskDescription,
    WorkHistory,
    Gender,
    Age,
    /// Column is not used downstream.
    Ignore,
}

impl TargetField {
    /// Mappable fields in scoring order. `Ignore` is not included.
    pub const ALL: [TargetField; 13] = [
        TargetField::FullName,
        TargetField::IdNumber,
        TargetField::Phone,
        TargetField::Location,
        TargetField::EducationLevel,
        TargetField::ExperienceYears,
        TargetField::FarmSize,
        TargetField::PrimaryCrops,
        TargetField::Livestock,
        TargetField::TaskDescription,
        TargetField::WorkHistory,
        TargetField::Gender,
        TargetField::Age,
    ];

    /// Fields whose free text is fed to the skill matcher, in matching order.
    pub const SKILL_SOURCES: [TargetField; 4] = [
        TargetField::TaskDescription,
        TargetField::WorkHistory,
        TargetField::PrimaryCrops,
        TargetField::Livestock,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TargetField::FullName => "full_name",
            TargetField::IdNumber => "id_number",
            TargetField::Phone => "phone",
            TargetField::Location => "location",
            TargetField::EducationLevel => "education_level",
            TargetField::ExperienceYears => "experience_years",
            TargetField::FarmSize => "farm_size",
            TargetField::PrimaryCrops => "primary_crops",
            TargetField::Livestock => "livestock",
            TargetField::TaskDescription => "task_description",
            TargetField::WorkHistory => "work_history",
            TargetField::Gender => "gender",
            TargetField::Age => "age",
            TargetField::Ignore => "ignore",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TargetField::FullName => "Full Name",
            TargetField::IdNumber => "ID Number",
            TargetField::Phone => "Phone",
            TargetField::Location => "Location",
            TargetField::EducationLevel => "Education Level",
            TargetField::ExperienceYears => "Years of Experience",
            TargetField::FarmSize => "Farm Size",
            TargetField::PrimaryCrops => "Primary Crops",
            TargetField::Livestock => "Livestock",
            TargetField::TaskDescription => "Task Description",
            TargetField::WorkHistory => "Work History",
            TargetField::Gender => "Gender",
            TargetField::Age => "Age",
            TargetField::Ignore => "Ignore",
        }
    }

    pub fn is_ignore(&self) -> bool {
        matches!(self, TargetField::Ignore)
    }
}

impl fmt::Display for TargetField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TargetField {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        if normalized == "ignore" {
            return Ok(TargetField::Ignore);
        }
        TargetField::ALL
            .into_iter()
            .find(|field| field.as_str() == normalized)
            .ok_or_else(|| ModelError::UnknownField(s.to_string()))
    }
}

/// One uploaded column and the field it was mapped to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnMapping {
    pub source_column: String,
    pub target_field: TargetField,
    /// In [0, 1]. A manual override is always 1.0.
    pub confidence: f32,
    pub sample_values: Vec<String>,
    #[serde(default)]
    pub overridden: bool,
}

impl ColumnMapping {
    pub fn is_active(&self) -> bool {
        !self.target_field.is_ignore()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_field_parses_its_own_names() {
        for field in TargetField::ALL {
            assert_eq!(field.as_str().parse::<TargetField>().unwrap(), field);
        }
        assert_eq!("IGNORE".parse::<TargetField>().unwrap(), TargetField::Ignore);
        assert!("shoe_size".parse::<TargetField>().is_err());
    }
}
