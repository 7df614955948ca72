//! Scripted backend for running surveys without user interaction.
//!
//! `ScriptedBackend` replays a fixed sequence of user actions against a
//! [`SurveyRuntime`]. This is useful for testing surveys and frontends.
//!
//! # Example
//!
//! ```rust,ignore
//! use survey_wizard::{ScriptedBackend, SurveyBackend, SurveyDefinition};
//!
//! let definition = SurveyDefinition::from_json(json)?;
//! let responses = ScriptedBackend::new()
//!     .fill([("name", "Ada")])
//!     .fill([("recommend", "y")])
//!     .submit()
//!     .collect(&definition)?;
//!
//! assert_eq!(responses.value("name"), Some("Ada"));
//! ```

use tracing::debug;

use crate::{
    FieldId, Responses, RuntimeState, SurveyBackend, SurveyDefinition, SurveyError, SurveyRuntime,
    ValidationFailures,
};

/// One thing the scripted user does.
#[derive(Debug, Clone, PartialEq)]
pub enum ScriptedAction {
    /// Enter these answers into the current step and press "next".
    Fill(Responses),

    /// Press "back".
    Back,

    /// Press "review" on the end screen.
    Review,

    /// Press "submit" on the end screen.
    Submit,
}

/// A backend that replays pre-configured user actions.
#[derive(Debug, Clone, Default)]
pub struct ScriptedBackend {
    actions: Vec<ScriptedAction>,
}

/// Error type for ScriptedBackend.
#[derive(Debug, thiserror::Error)]
pub enum ScriptedBackendError {
    /// The last scripted fill was rejected and nothing follows it.
    #[error("Step '{step}' rejected: {failures}")]
    ValidationFailed {
        step: String,
        failures: ValidationFailures,
    },

    /// The script ended before a submit.
    #[error("Script ended while the survey is {0}")]
    ScriptExhausted(RuntimeState),

    #[error(transparent)]
    Survey(#[from] SurveyError),
}

impl ScriptedBackend {
    /// Create a new empty script.
    pub fn new() -> Self {
        Self {
            actions: Vec::new(),
        }
    }

    /// Append an action.
    pub fn then(mut self, action: ScriptedAction) -> Self {
        self.actions.push(action);
        self
    }

    /// Fill the current step with the given field answers and press "next".
    pub fn fill<K, V>(self, answers: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<FieldId>,
        V: Into<String>,
    {
        self.then(ScriptedAction::Fill(answers.into_iter().collect()))
    }

    /// Fill the current step with a prepared answer map and press "next".
    pub fn fill_responses(self, answers: Responses) -> Self {
        self.then(ScriptedAction::Fill(answers))
    }

    /// Press "back".
    pub fn back(self) -> Self {
        self.then(ScriptedAction::Back)
    }

    /// Press "review".
    pub fn review(self) -> Self {
        self.then(ScriptedAction::Review)
    }

    /// Press "submit".
    pub fn submit(self) -> Self {
        self.then(ScriptedAction::Submit)
    }

    /// The scripted actions.
    pub fn actions(&self) -> &[ScriptedAction] {
        &self.actions
    }

    /// Replay the script against an already created runtime.
    ///
    /// Starts the runtime if it is still on the start screen. Returns when a
    /// `Submit` is reached; the runtime is left in whatever state the script
    /// drove it to.
    pub fn replay(&self, runtime: &mut SurveyRuntime<'_>) -> Result<Responses, ScriptedBackendError> {
        if runtime.state() == RuntimeState::NotStarted {
            runtime.start()?;
        }

        let mut actions = self.actions.iter().peekable();
        while let Some(action) = actions.next() {
            debug!(?action, state = %runtime.state(), "replaying action");
            match action {
                ScriptedAction::Fill(answers) => match runtime.advance(answers) {
                    Ok(_) => {}
                    // A rejected step is retried by the next scripted fill.
                    Err(SurveyError::Validation(failures)) if actions.peek().is_some() => {
                        debug!(%failures, "scripted fill rejected");
                    }
                    Err(SurveyError::Validation(failures)) => {
                        let step = runtime
                            .current_step()
                            .map(|s| s.id().to_string())
                            .unwrap_or_default();
                        return Err(ScriptedBackendError::ValidationFailed { step, failures });
                    }
                    Err(err) => return Err(err.into()),
                },
                ScriptedAction::Back => {
                    runtime.retreat()?;
                }
                ScriptedAction::Review => {
                    runtime.review()?;
                }
                ScriptedAction::Submit => {
                    if runtime.state() != RuntimeState::Completed {
                        return Err(SurveyError::InvalidState {
                            operation: "submit",
                            state: runtime.state(),
                        }
                        .into());
                    }
                    return Ok(runtime.responses().clone());
                }
            }
        }

        Err(ScriptedBackendError::ScriptExhausted(runtime.state()))
    }
}

impl SurveyBackend for ScriptedBackend {
    type Error = ScriptedBackendError;

    fn collect(&self, definition: &SurveyDefinition) -> Result<Responses, Self::Error> {
        let mut runtime = SurveyRuntime::new(definition);
        self.replay(&mut runtime)
    }
}
