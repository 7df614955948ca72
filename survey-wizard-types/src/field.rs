use crate::{FieldId, ValidationRules};

/// A single field (question) in a step.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    /// Key of this field's response in the `Responses` map.
    id: FieldId,

    /// The label shown to the user.
    label: String,

    /// The kind of input (determines how the value is entered and displayed).
    kind: FieldKind,

    /// Hint text shown in an empty text input.
    placeholder: Option<String>,

    /// Checks applied when the step is advanced past.
    rules: ValidationRules,
}

impl Field {
    /// Create a new field without validation rules.
    pub fn new(id: impl Into<FieldId>, label: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            kind,
            placeholder: None,
            rules: ValidationRules::default(),
        }
    }

    /// Single-line text field.
    pub fn text(id: impl Into<FieldId>, label: impl Into<String>) -> Self {
        Self::new(id, label, FieldKind::Text)
    }

    /// Multi-line text field.
    pub fn textarea(id: impl Into<FieldId>, label: impl Into<String>) -> Self {
        Self::new(id, label, FieldKind::Textarea)
    }

    /// Radio group over the given options.
    pub fn radio(
        id: impl Into<FieldId>,
        label: impl Into<String>,
        options: Vec<SelectOption>,
    ) -> Self {
        Self::new(id, label, FieldKind::Radio(options))
    }

    /// Dropdown over the given options.
    pub fn dropdown(
        id: impl Into<FieldId>,
        label: impl Into<String>,
        options: Vec<SelectOption>,
    ) -> Self {
        Self::new(id, label, FieldKind::Dropdown(options))
    }

    /// Set the placeholder.
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    /// Set the validation rules.
    pub fn with_rules(mut self, rules: ValidationRules) -> Self {
        self.rules = rules;
        self
    }

    pub fn id(&self) -> &FieldId {
        &self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn kind(&self) -> &FieldKind {
        &self.kind
    }

    pub fn placeholder(&self) -> Option<&str> {
        self.placeholder.as_deref()
    }

    pub fn rules(&self) -> &ValidationRules {
        &self.rules
    }

    /// The selectable options. Empty for text kinds.
    pub fn options(&self) -> &[SelectOption] {
        self.kind.options()
    }

    /// Text shown for a stored value: the option label for single-select
    /// kinds (raw value if no option matches), the value itself otherwise.
    pub fn display_value<'a>(&'a self, value: &'a str) -> &'a str {
        self.options()
            .iter()
            .find(|option| option.value == value)
            .map_or(value, |option| option.label.as_str())
    }
}

/// The kind of field, determining input type and how the value is displayed.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    /// Single-line text input.
    Text,

    /// Multi-line text input.
    Textarea,

    /// Pick one of the options, shown as a radio group.
    Radio(Vec<SelectOption>),

    /// Pick one of the options, shown as a dropdown.
    Dropdown(Vec<SelectOption>),
}

impl FieldKind {
    /// Check if this kind picks one value out of a list of options.
    pub fn is_single_select(&self) -> bool {
        matches!(self, Self::Radio(_) | Self::Dropdown(_))
    }

    /// The selectable options. Empty for text kinds.
    pub fn options(&self) -> &[SelectOption] {
        match self {
            Self::Text | Self::Textarea => &[],
            Self::Radio(options) | Self::Dropdown(options) => options,
        }
    }

    /// The name used for this kind in survey JSON.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Textarea => "textarea",
            Self::Radio(_) => "radio",
            Self::Dropdown(_) => "dropdown",
        }
    }
}

/// One choice of a radio or dropdown field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    /// Text shown to the user.
    pub label: String,

    /// Value stored in the responses.
    pub value: String,
}

impl SelectOption {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}
