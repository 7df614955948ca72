use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use crate::{Field, FieldKind, LoadError};

/// The top-level structure containing all steps and screens of a survey.
///
/// A definition is immutable once loaded. Loading (from JSON or via
/// [`SurveyDefinition::validated`]) checks its structure, so a runtime can
/// rely on it being well-formed.
#[derive(Debug, Clone, PartialEq)]
pub struct SurveyDefinition {
    title: String,
    description: String,
    start_screen: StartScreen,
    end_screen: EndScreen,
    steps: Vec<Step>,
}

/// Text of the screen shown before the first step.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StartScreen {
    pub title: String,
    pub description: String,
    /// Label of the button that starts the survey.
    pub confirm_label: String,
}

/// Text of the screen shown after the last step.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EndScreen {
    pub title: String,
    pub description: String,
    /// Label of the button that goes back to the first step.
    pub review_label: String,
    /// Label of the button that submits the responses.
    pub submit_label: String,
}

/// One screen of the survey holding one or more fields.
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    id: String,
    title: String,
    fields: Vec<Field>,
}

impl Step {
    /// Create a new step with the given fields.
    pub fn new(id: impl Into<String>, title: impl Into<String>, fields: Vec<Field>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            fields,
        }
    }

    /// Append a field.
    pub fn with_field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }
}

impl SurveyDefinition {
    /// Create a new survey definition with the given title.
    ///
    /// Add steps with [`with_step`](Self::with_step), then call
    /// [`validated`](Self::validated) before handing it to a runtime.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            start_screen: StartScreen::default(),
            end_screen: EndScreen::default(),
            steps: Vec::new(),
        }
    }

    /// Parse and check a definition from JSON.
    pub fn from_json(json: &str) -> Result<Self, LoadError> {
        let raw: crate::wire::RawSurvey = serde_json::from_str(json)?;
        raw.into_definition()
    }

    /// Parse and check a definition from a JSON reader.
    pub fn from_reader(reader: impl Read) -> Result<Self, LoadError> {
        let raw: crate::wire::RawSurvey = serde_json::from_reader(reader)?;
        raw.into_definition()
    }

    /// Read, parse and check a definition from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Parse a definition embedded in a host document.
    ///
    /// `None` means the payload was not found at all.
    pub fn from_embedded(payload: Option<&str>) -> Result<Self, LoadError> {
        payload.ok_or(LoadError::Missing).and_then(Self::from_json)
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the start screen.
    pub fn with_start_screen(mut self, start_screen: StartScreen) -> Self {
        self.start_screen = start_screen;
        self
    }

    /// Set the end screen.
    pub fn with_end_screen(mut self, end_screen: EndScreen) -> Self {
        self.end_screen = end_screen;
        self
    }

    /// Append a step.
    pub fn with_step(mut self, step: Step) -> Self {
        self.steps.push(step);
        self
    }

    /// Check the structure of the definition.
    ///
    /// Fails on the first problem found: no steps, a repeated step id, a
    /// field id repeated anywhere in the survey, a radio or dropdown without
    /// options, or a max length below the min length.
    pub fn validated(self) -> Result<Self, LoadError> {
        self.check()?;
        Ok(self)
    }

    /// Run the structural checks of [`validated`](Self::validated) in place.
    pub fn check(&self) -> Result<(), LoadError> {
        if self.steps.is_empty() {
            return Err(LoadError::NoSteps);
        }

        let mut step_ids = HashSet::new();
        let mut field_ids = HashSet::new();
        for step in &self.steps {
            if !step_ids.insert(step.id()) {
                return Err(LoadError::DuplicateStepId(step.id().to_string()));
            }
            for field in step.fields() {
                if !field_ids.insert(field.id()) {
                    return Err(LoadError::DuplicateFieldId(field.id().clone()));
                }
                if let FieldKind::Radio(options) | FieldKind::Dropdown(options) = field.kind()
                    && options.is_empty()
                {
                    return Err(LoadError::MissingOptions(field.id().clone()));
                }
                let rules = field.rules();
                if let (Some(min), Some(max)) = (rules.min_length, rules.max_length)
                    && max < min
                {
                    return Err(LoadError::InvalidLengthBounds {
                        field_id: field.id().clone(),
                        min,
                        max,
                    });
                }
            }
        }

        Ok(())
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn start_screen(&self) -> &StartScreen {
        &self.start_screen
    }

    pub fn end_screen(&self) -> &EndScreen {
        &self.end_screen
    }

    /// Get the steps.
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Get a step by index.
    pub fn step(&self, index: usize) -> Option<&Step> {
        self.steps.get(index)
    }

    /// Look up a field in any step.
    pub fn field(&self, field_id: &str) -> Option<&Field> {
        self.fields().find(|f| f.id().as_str() == field_id)
    }

    /// All fields in step-then-field order.
    pub fn fields(&self) -> impl Iterator<Item = &Field> {
        self.steps.iter().flat_map(|s| s.fields().iter())
    }

    /// Get the number of steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Check if the survey has any steps.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{SelectOption, ValidationRules};

    fn one_step(fields: Vec<Field>) -> SurveyDefinition {
        SurveyDefinition::new("Survey").with_step(Step::new("step1", "Step 1", fields))
    }

    #[test]
    fn valid_definition_passes() {
        let definition = one_step(vec![Field::text("q1", "Q1")]).validated().unwrap();
        assert_eq!(definition.len(), 1);
        assert_eq!(definition.field("q1").unwrap().label(), "Q1");
    }

    #[test]
    fn no_steps() {
        let err = SurveyDefinition::new("Empty").validated().unwrap_err();
        assert!(matches!(err, LoadError::NoSteps));
    }

    #[test]
    fn duplicate_field_id_across_steps() {
        let err = SurveyDefinition::new("Survey")
            .with_step(Step::new("a", "A", vec![Field::text("q1", "Q1")]))
            .with_step(Step::new("b", "B", vec![Field::text("q1", "Again")]))
            .validated()
            .unwrap_err();
        assert!(matches!(err, LoadError::DuplicateFieldId(id) if id.as_str() == "q1"));
    }

    #[test]
    fn duplicate_step_id() {
        let err = SurveyDefinition::new("Survey")
            .with_step(Step::new("a", "A", vec![Field::text("q1", "Q1")]))
            .with_step(Step::new("a", "B", vec![Field::text("q2", "Q2")]))
            .validated()
            .unwrap_err();
        assert!(matches!(err, LoadError::DuplicateStepId(id) if id == "a"));
    }

    #[test]
    fn radio_without_options() {
        let err = one_step(vec![Field::radio("q1", "Q1", vec![])])
            .validated()
            .unwrap_err();
        assert!(matches!(err, LoadError::MissingOptions(_)));
    }

    #[test]
    fn max_below_min() {
        let rules = ValidationRules::new().min_length(5).max_length(2);
        let err = one_step(vec![Field::text("q1", "Q1").with_rules(rules)])
            .validated()
            .unwrap_err();
        assert!(matches!(
            err,
            LoadError::InvalidLengthBounds { min: 5, max: 2, .. }
        ));
    }

    #[test]
    fn fields_in_order() {
        let definition = SurveyDefinition::new("Survey")
            .with_step(Step::new(
                "a",
                "A",
                vec![
                    Field::text("q1", "Q1"),
                    Field::dropdown("q2", "Q2", vec![SelectOption::new("X", "x")]),
                ],
            ))
            .with_step(Step::new("b", "B", vec![Field::textarea("q3", "Q3")]));
        let ids: Vec<_> = definition.fields().map(|f| f.id().as_str()).collect();
        assert_eq!(ids, vec!["q1", "q2", "q3"]);
    }

    #[test]
    fn missing_embedded_payload() {
        let err = SurveyDefinition::from_embedded(None).unwrap_err();
        assert!(matches!(err, LoadError::Missing));
    }
}
