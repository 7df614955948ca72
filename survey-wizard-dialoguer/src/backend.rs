//! Dialoguer backend implementation for SurveyBackend trait.

use dialoguer::theme::{ColorfulTheme, SimpleTheme, Theme};
use dialoguer::{Confirm, Editor, Input, Select};
use survey_wizard::{
    Field, FieldKind, Responses, RuntimeState, SurveyBackend, SurveyDefinition, SurveyError,
    SurveyRuntime,
};
use thiserror::Error;
use tracing::{debug, info};

use crate::prompts;

/// Error type for the Dialoguer backend.
#[derive(Debug, Error)]
pub enum DialoguerError {
    /// User cancelled the survey (e.g., pressed Ctrl+C or declined to start).
    #[error("Survey cancelled by user")]
    Cancelled,

    /// An I/O error occurred during prompting.
    #[error("Dialoguer error: {0}")]
    Dialoguer(#[from] dialoguer::Error),

    /// The runtime rejected a transition.
    #[error(transparent)]
    Survey(#[from] SurveyError),
}

/// Helper to check if a dialoguer error is a cancellation (Ctrl+C / Escape)
fn is_cancelled(err: &dialoguer::Error) -> bool {
    matches!(err, dialoguer::Error::IO(io_err) if io_err.kind() == std::io::ErrorKind::Interrupted)
}

fn prompt_error(err: dialoguer::Error) -> DialoguerError {
    if is_cancelled(&err) {
        DialoguerError::Cancelled
    } else {
        DialoguerError::Dialoguer(err)
    }
}

/// What the user picked on the end screen.
enum EndChoice {
    Review,
    Submit,
}

/// Dialoguer backend for interactive CLI prompts.
///
/// Shows the start screen, one step at a time with "Next"/"Finish" and
/// "Back", and the end screen with the summary and review/submit choices.
/// A rejected step is shown again with the failures printed above it and
/// the entered values pre-filled.
#[derive(Debug, Default, Clone)]
pub struct DialoguerBackend {
    /// Use colorful theme for prompts.
    colorful: bool,
}

impl DialoguerBackend {
    /// Create a new Dialoguer backend with default (colorful) theme.
    pub fn new() -> Self {
        Self { colorful: true }
    }

    /// Create a backend with plain (no color) theme.
    pub fn plain() -> Self {
        Self { colorful: false }
    }

    fn with_theme<R>(&self, f: impl FnOnce(&dyn Theme) -> R) -> R {
        if self.colorful {
            f(&ColorfulTheme::default())
        } else {
            f(&SimpleTheme)
        }
    }

    fn show_start_screen(&self, definition: &SurveyDefinition) -> Result<(), DialoguerError> {
        println!("{}", definition.title());
        if !definition.description().is_empty() {
            println!("{}", definition.description());
        }
        println!();

        let screen = definition.start_screen();
        if !screen.title.is_empty() {
            println!("{}", screen.title);
        }
        if !screen.description.is_empty() {
            println!("{}", screen.description);
        }

        let start = self
            .with_theme(|theme| {
                Confirm::with_theme(theme)
                    .with_prompt(prompts::label_or(&screen.confirm_label, "Start"))
                    .default(true)
                    .interact()
            })
            .map_err(prompt_error)?;

        if start {
            Ok(())
        } else {
            Err(DialoguerError::Cancelled)
        }
    }

    /// Ask every field of the current step, then offer navigation.
    ///
    /// `draft` holds everything typed so far, so a rejected or revisited step
    /// is pre-filled.
    fn run_step(
        &self,
        runtime: &mut SurveyRuntime<'_>,
        draft: &mut Responses,
    ) -> Result<(), DialoguerError> {
        let Some(step) = runtime.current_step() else {
            return Ok(());
        };

        println!();
        println!("{}", prompts::step_header(runtime));

        let mut answers = Responses::new();
        for field in step.fields() {
            let previous = draft
                .value(field.id().as_str())
                .or_else(|| runtime.responses().value(field.id().as_str()))
                .map(str::to_owned);
            let value = self.ask_field(field, previous.as_deref())?;
            debug!(field = %field.id(), answered = value.is_some(), "field answered");
            draft.set(field.id(), value.clone());
            answers.set(field.id(), value);
        }

        let items = prompts::navigation_items(runtime);
        let choice = self
            .with_theme(|theme| {
                Select::with_theme(theme)
                    .with_prompt("Continue")
                    .items(&items)
                    .default(0)
                    .interact()
            })
            .map_err(prompt_error)?;

        if items[choice] == "Back" {
            runtime.retreat()?;
            return Ok(());
        }

        match runtime.advance(&answers) {
            Ok(_) => Ok(()),
            Err(SurveyError::Validation(failures)) => {
                println!();
                for line in prompts::failure_lines(runtime.definition(), &failures) {
                    println!("Error: {line}");
                }
                Ok(())
            }
            Err(err) => Err(err.into()),
        }
    }

    fn ask_field(&self, field: &Field, previous: Option<&str>) -> Result<Option<String>, DialoguerError> {
        let prompt = prompts::field_prompt(field);
        match field.kind() {
            FieldKind::Text => self.ask_text(&prompt, previous).map(Some),
            FieldKind::Textarea => self.ask_textarea(&prompt, previous).map(Some),
            FieldKind::Radio(_) | FieldKind::Dropdown(_) => self.ask_select(field, &prompt, previous),
        }
    }

    fn ask_text(&self, prompt: &str, previous: Option<&str>) -> Result<String, DialoguerError> {
        self.with_theme(|theme| {
            let mut builder: Input<String> = Input::with_theme(theme)
                .with_prompt(prompt)
                .allow_empty(true);
            if let Some(previous) = previous {
                builder = builder.with_initial_text(previous);
            }
            builder.interact_text()
        })
        .map_err(prompt_error)
    }

    fn ask_textarea(&self, prompt: &str, previous: Option<&str>) -> Result<String, DialoguerError> {
        println!("{prompt}");
        match Editor::new().edit(previous.unwrap_or("")) {
            Ok(Some(text)) => Ok(text.trim_end_matches(['\r', '\n']).to_string()),
            // Editor closed without saving: keep what was there.
            Ok(None) => Ok(previous.unwrap_or_default().to_string()),
            Err(err) => Err(prompt_error(err)),
        }
    }

    fn ask_select(
        &self,
        field: &Field,
        prompt: &str,
        previous: Option<&str>,
    ) -> Result<Option<String>, DialoguerError> {
        let items = prompts::select_items(field);
        let index = self
            .with_theme(|theme| {
                Select::with_theme(theme)
                    .with_prompt(prompt)
                    .items(&items)
                    .default(prompts::select_default(field, previous))
                    .interact()
            })
            .map_err(prompt_error)?;
        Ok(prompts::selected_value(field, index))
    }

    fn show_end_screen(&self, runtime: &SurveyRuntime<'_>) -> Result<EndChoice, DialoguerError> {
        let screen = runtime.definition().end_screen();
        println!();
        if !screen.title.is_empty() {
            println!("{}", screen.title);
        }
        if !screen.description.is_empty() {
            println!("{}", screen.description);
        }
        for entry in runtime.build_summary()? {
            println!("  {}: {}", entry.label, entry.value);
        }
        println!();

        let items = [
            prompts::label_or(&screen.review_label, "Review"),
            prompts::label_or(&screen.submit_label, "Submit"),
        ];
        let choice = self
            .with_theme(|theme| {
                Select::with_theme(theme)
                    .items(&items)
                    .default(1)
                    .interact()
            })
            .map_err(prompt_error)?;

        Ok(if choice == 0 {
            EndChoice::Review
        } else {
            EndChoice::Submit
        })
    }
}

impl SurveyBackend for DialoguerBackend {
    type Error = DialoguerError;

    fn collect(&self, definition: &SurveyDefinition) -> Result<Responses, Self::Error> {
        let mut runtime = SurveyRuntime::new(definition);
        let mut draft = Responses::new();

        loop {
            match runtime.state() {
                RuntimeState::NotStarted => {
                    self.show_start_screen(definition)?;
                    runtime.start()?;
                }
                RuntimeState::InProgress => self.run_step(&mut runtime, &mut draft)?,
                RuntimeState::Completed => match self.show_end_screen(&runtime)? {
                    EndChoice::Review => runtime.review()?,
                    EndChoice::Submit => {
                        info!(responses = runtime.responses().len(), "survey submitted");
                        return Ok(runtime.into_responses());
                    }
                },
            }
        }
    }
}
