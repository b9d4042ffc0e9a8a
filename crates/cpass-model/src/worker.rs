use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::enums::ReadinessBucket;
use crate::ids::SkillId;
use crate::mapping::TargetField;
use crate::matching::SkillMatch;

/// Profile fields taken from the mapped columns of one upload row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkerProfile {
    pub full_name: String,
    pub id_number: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub education_level: Option<String>,
    pub experience_years: Option<String>,
    pub farm_size: Option<String>,
    pub primary_crops: Option<String>,
    pub livestock: Option<String>,
    pub task_description: Option<String>,
    pub work_history: Option<String>,
    pub gender: Option<String>,
    pub age: Option<String>,
}

impl WorkerProfile {
    /// Stores `value` under `field`. Blank values and `Ignore` are dropped.
    /// The first non-blank value wins when several columns map to a field.
    pub fn set(&mut self, field: TargetField, value: &str) {
        let value = value.trim();
        if value.is_empty() {
            return;
        }
        if field == TargetField::FullName {
            if self.full_name.is_empty() {
                self.full_name = value.to_string();
            }
            return;
        }
        if let Some(slot) = self.slot_mut(field)
            && slot.is_none()
        {
            *slot = Some(value.to_string());
        }
    }

    pub fn get(&self, field: TargetField) -> Option<&str> {
        match field {
            TargetField::FullName => Some(self.full_name.as_str()).filter(|v| !v.is_empty()),
            TargetField::IdNumber => self.id_number.as_deref(),
            TargetField::Phone => self.phone.as_deref(),
            TargetField::Location => self.location.as_deref(),
            TargetField::EducationLevel => self.education_level.as_deref(),
            TargetField::ExperienceYears => self.experience_years.as_deref(),
            TargetField::FarmSize => self.farm_size.as_deref(),
            TargetField::PrimaryCrops => self.primary_crops.as_deref(),
            TargetField::Livestock => self.livestock.as_deref(),
            TargetField::TaskDescription => self.task_description.as_deref(),
            TargetField::WorkHistory => self.work_history.as_deref(),
            TargetField::Gender => self.gender.as_deref(),
            TargetField::Age => self.age.as_deref(),
            TargetField::Ignore => None,
        }
    }

    fn slot_mut(&mut self, field: TargetField) -> Option<&mut Option<String>> {
        match field {
            TargetField::IdNumber => Some(&mut self.id_number),
            TargetField::Phone => Some(&mut self.phone),
            TargetField::Location => Some(&mut self.location),
            TargetField::EducationLevel => Some(&mut self.education_level),
            TargetField::ExperienceYears => Some(&mut self.experience_years),
            TargetField::FarmSize => Some(&mut self.farm_size),
            TargetField::PrimaryCrops => Some(&mut self.primary_crops),
            TargetField::Livestock => Some(&mut self.livestock),
            TargetField::TaskDescription => Some(&mut self.task_description),
            TargetField::WorkHistory => Some(&mut self.work_history),
            TargetField::Gender => Some(&mut self.gender),
            TargetField::Age => Some(&mut self.age),
            TargetField::FullName | TargetField::Ignore => None,
        }
    }
}

/// One onboarded worker: profile plus deduplicated skills.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkerRecord {
    /// Row-derived identifier, unique within a batch (`row-1`, `row-2`, ...).
    pub worker_id: String,
    /// 1-based data row number in the upload.
    pub row_number: usize,
    pub invitation_code: String,
    pub profile: WorkerProfile,
    /// At most one match per skill id.
    pub skills: BTreeMap<SkillId, SkillMatch>,
    /// In [0, 100].
    pub certification_match_percentage: u8,
    pub readiness: ReadinessBucket,
}

impl WorkerRecord {
    pub fn skill_count(&self) -> usize {
        self.skills.len()
    }

    pub fn skill_ids(&self) -> impl Iterator<Item = &SkillId> {
        self.skills.keys()
    }

    pub fn display_name(&self) -> &str {
        &self.profile.full_name
    }
}
