//! JSON shape of a survey definition, as written by the survey generator.

use serde::Deserialize;

use crate::{
    EndScreen, Field, FieldKind, LoadError, Pattern, SelectOption, StartScreen, Step,
    SurveyDefinition, ValidationRules,
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawSurvey {
    #[serde(alias = "title")]
    survey_title: String,
    #[serde(default, alias = "description")]
    survey_description: String,
    #[serde(default)]
    start_screen: RawStartScreen,
    #[serde(default)]
    end_screen: RawEndScreen,
    steps: Vec<RawStep>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawStartScreen {
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default, alias = "confirmLabel")]
    button_text: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawEndScreen {
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default, alias = "reviewLabel")]
    review_button_text: String,
    #[serde(default, alias = "submitLabel")]
    submit_button_text: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawStep {
    step_id: String,
    #[serde(default)]
    title: String,
    fields: Vec<RawField>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
enum RawFieldType {
    Text,
    Textarea,
    Radio,
    Dropdown,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawField {
    field_id: String,
    label: String,
    #[serde(rename = "type")]
    field_type: RawFieldType,
    #[serde(default)]
    placeholder: Option<String>,
    #[serde(default)]
    validation: Option<RawValidation>,
    #[serde(default)]
    options: Option<Vec<RawOption>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawValidation {
    #[serde(default)]
    required: bool,
    #[serde(default)]
    min_length: Option<usize>,
    #[serde(default)]
    max_length: Option<usize>,
    #[serde(default)]
    pattern: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawOption {
    label: String,
    value: String,
}

impl RawSurvey {
    pub(crate) fn into_definition(self) -> Result<SurveyDefinition, LoadError> {
        let mut definition = SurveyDefinition::new(self.survey_title)
            .with_description(self.survey_description)
            .with_start_screen(StartScreen {
                title: self.start_screen.title,
                description: self.start_screen.description,
                confirm_label: self.start_screen.button_text,
            })
            .with_end_screen(EndScreen {
                title: self.end_screen.title,
                description: self.end_screen.description,
                review_label: self.end_screen.review_button_text,
                submit_label: self.end_screen.submit_button_text,
            });

        for raw_step in self.steps {
            let fields = raw_step
                .fields
                .into_iter()
                .map(RawField::into_field)
                .collect::<Result<Vec<_>, _>>()?;
            definition = definition.with_step(Step::new(raw_step.step_id, raw_step.title, fields));
        }

        definition.validated()
    }
}

impl RawField {
    fn into_field(self) -> Result<Field, LoadError> {
        let options: Vec<SelectOption> = self
            .options
            .unwrap_or_default()
            .into_iter()
            .map(|o| SelectOption::new(o.label, o.value))
            .collect();

        let kind = match self.field_type {
            RawFieldType::Text | RawFieldType::Textarea if !options.is_empty() => {
                let kind = match self.field_type {
                    RawFieldType::Text => FieldKind::Text,
                    _ => FieldKind::Textarea,
                };
                return Err(LoadError::UnexpectedOptions {
                    field_id: self.field_id.into(),
                    kind: kind.type_name(),
                });
            }
            RawFieldType::Text => FieldKind::Text,
            RawFieldType::Textarea => FieldKind::Textarea,
            RawFieldType::Radio => FieldKind::Radio(options),
            RawFieldType::Dropdown => FieldKind::Dropdown(options),
        };

        let rules = match self.validation {
            Some(raw) => {
                let pattern = match raw.pattern.as_deref() {
                    Some(source) => Some(Pattern::new(source).map_err(|source| {
                        LoadError::InvalidPattern {
                            field_id: self.field_id.as_str().into(),
                            source,
                        }
                    })?),
                    None => None,
                };
                ValidationRules {
                    required: raw.required,
                    min_length: raw.min_length,
                    max_length: raw.max_length,
                    pattern,
                }
            }
            None => ValidationRules::default(),
        };

        let mut field = Field::new(self.field_id, self.label, kind).with_rules(rules);
        if let Some(placeholder) = self.placeholder {
            field = field.with_placeholder(placeholder);
        }
        Ok(field)
    }
}
