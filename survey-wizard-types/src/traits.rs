use crate::{Responses, SurveyDefinition};

/// Trait for frontends that take a user through a survey.
///
/// A backend shows the start screen, walks the steps (letting the user go
/// back and forth), shows the end screen with its summary and returns the
/// committed responses once the user submits. Step validation and response
/// bookkeeping belong to the runtime the backend drives; the backend only
/// resolves what the user entered into a field id to value map.
pub trait SurveyBackend {
    /// The error type for this backend.
    type Error: Into<anyhow::Error>;

    /// Run a survey to submission.
    ///
    /// # Returns
    /// * `Ok(responses)` once the user submits
    /// * `Err` on cancellation or backend failure
    fn collect(&self, definition: &SurveyDefinition) -> Result<Responses, Self::Error>;
}
