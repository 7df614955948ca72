use survey_wizard_types::{LoadError, SurveyDefinition};

pub const JSON: &str = include_str!("../surveys/event_registration.json");

pub fn event_registration() -> Result<SurveyDefinition, LoadError> {
    SurveyDefinition::from_json(JSON)
}
