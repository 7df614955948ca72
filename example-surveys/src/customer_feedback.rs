use survey_wizard_types::{LoadError, SurveyDefinition};

/// Survey JSON as written by the survey generator: generated ids, empty
/// option lists on text fields, no rules on most fields.
pub const JSON: &str = include_str!("../surveys/customer_feedback.json");

pub const NAME: &str = "step1-field1";
pub const EMAIL: &str = "step1-field2";
pub const RECOMMEND: &str = "step2-field1";
pub const REFERRAL: &str = "step2-field2";
pub const COMMENTS: &str = "step3-field1";

pub fn customer_feedback() -> Result<SurveyDefinition, LoadError> {
    SurveyDefinition::from_json(JSON)
}
