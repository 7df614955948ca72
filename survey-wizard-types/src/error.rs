use crate::{FieldId, RuntimeState, ValidationFailures};

/// Error raised while loading a survey definition.
///
/// Loading errors are fatal: a run cannot start without a well-formed
/// definition.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// No definition payload was supplied.
    #[error("Survey data not found")]
    Missing,

    /// The payload is not valid survey JSON.
    #[error("Malformed survey data: {0}")]
    Json(#[from] serde_json::Error),

    /// The definition file could not be read.
    #[error("Could not read survey data: {0}")]
    Io(#[from] std::io::Error),

    #[error("Survey has no steps")]
    NoSteps,

    #[error("Duplicate step id '{0}'")]
    DuplicateStepId(String),

    /// Field ids must be unique across the whole survey.
    #[error("Duplicate field id '{0}'")]
    DuplicateFieldId(FieldId),

    #[error("Field '{0}' is a radio or dropdown field but has no options")]
    MissingOptions(FieldId),

    #[error("Field '{field_id}' is a {kind} field and cannot have options")]
    UnexpectedOptions { field_id: FieldId, kind: &'static str },

    #[error("Field '{field_id}' has maxLength {max} below minLength {min}")]
    InvalidLengthBounds {
        field_id: FieldId,
        min: usize,
        max: usize,
    },

    #[error("Field '{field_id}' has an invalid pattern: {source}")]
    InvalidPattern {
        field_id: FieldId,
        #[source]
        source: regex::Error,
    },
}

/// Error type for survey runtime and backend operations.
#[derive(Debug, thiserror::Error)]
pub enum SurveyError {
    /// The definition could not be loaded.
    #[error(transparent)]
    Load(#[from] LoadError),

    /// The current step did not pass validation. The run stays on the step.
    #[error("Validation failed: {0}")]
    Validation(ValidationFailures),

    /// An operation was called in a state that does not allow it.
    #[error("Cannot {operation} while the survey is {state}")]
    InvalidState {
        operation: &'static str,
        state: RuntimeState,
    },

    /// User cancelled the survey (Ctrl+C, closed window, etc.)
    #[error("Survey cancelled by user")]
    Cancelled,

    /// Backend-specific failure (I/O, UI framework crash, etc.)
    #[error("Backend error: {0}")]
    Backend(#[from] anyhow::Error),
}

impl SurveyError {
    /// Create a backend error from any error type.
    pub fn backend(err: impl Into<anyhow::Error>) -> Self {
        Self::Backend(err.into())
    }

    /// Check if this error represents user cancellation.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// The validation failures, if this is a validation error.
    pub fn validation_failures(&self) -> Option<&ValidationFailures> {
        match self {
            Self::Validation(failures) => Some(failures),
            _ => None,
        }
    }
}
