use cpass_model::TargetField;

/// Header keywords that suggest each field. Matched as substrings of the
/// lower-cased header.
pub fn field_keywords(field: TargetField) -> &'static [&'static str] {
    match field {
        TargetField::FullName => &["name", "worker", "person", "respondent", "farmer"],
        TargetField::IdNumber => &["id", "national", "identification"],
        TargetField::Phone => &["phone", "mobile", "tel", "contact", "number"],
        TargetField::Location => &["location", "county", "region", "area", "village", "ward"],
        TargetField::EducationLevel => &["education", "school", "level", "qualification"],
        TargetField::ExperienceYears => &["experience", "years", "duration"],
        TargetField::FarmSize => &["farm", "size", "acres", "hectares", "land"],
        TargetField::PrimaryCrops => &["crop", "crops", "enterprise", "farming", "produce"],
        TargetField::Livestock => &["livestock", "animal", "cattle", "goat", "poultry", "sheep"],
        TargetField::TaskDescription => &[
            "task", "activity", "work", "job", "duties", "skills", "what",
        ],
        TargetField::WorkHistory => &["history", "background", "previous", "employment"],
        TargetField::Gender => &["gender", "sex"],
        TargetField::Age => &["age", "dob", "birth"],
        TargetField::Ignore => &[],
    }
}
