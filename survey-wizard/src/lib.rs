//! # survey-wizard
//!
//! Step-by-step surveys loaded from JSON. Frontend-agnostic.
//!
//! A survey is an ordered list of steps, each holding fields of one of four
//! kinds (text, textarea, radio, dropdown) with optional validation rules.
//! [`SurveyRuntime`] walks one user through it: validate the current step,
//! commit its answers, move forward or back, and build the end-screen
//! summary.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use survey_wizard::{Advance, Responses, SurveyDefinition, SurveyRuntime};
//!
//! let definition = SurveyDefinition::from_json(json)?;
//! let mut runtime = SurveyRuntime::new(&definition);
//! runtime.start()?;
//!
//! // The frontend renders `runtime.current_fields()` and collects answers.
//! let answers = Responses::new().with("name", "Ada");
//! match runtime.advance(&answers) {
//!     Ok(Advance::NextStep) => { /* render the next step */ }
//!     Ok(Advance::Completed) => {
//!         for entry in runtime.build_summary()? {
//!             println!("{}: {}", entry.label, entry.value);
//!         }
//!     }
//!     Err(err) => { /* show runtime.failures() next to the fields */ }
//! }
//! ```
//!
//! ## Survey JSON
//!
//! - `surveyTitle`, `surveyDescription`
//! - `startScreen` - `title`, `description`, `buttonText`
//! - `endScreen` - `title`, `description`, `reviewButtonText`, `submitButtonText`
//! - `steps[]` - `stepId`, `title`, `fields[]`
//! - `fields[]` - `fieldId`, `label`, `type`, `placeholder`, `validation`
//!   (`required`, `minLength`, `maxLength`, `pattern`), `options[]` (`label`, `value`)
//!
//! ## Backends
//!
//! Backends are separate crates that implement `SurveyBackend`:
//! - `survey-wizard-dialoguer` - CLI prompts via dialoguer
//!
//! [`ScriptedBackend`] replays canned user actions, for tests.

// Re-export all types from survey-wizard-types
pub use survey_wizard_types::*;

mod runtime;
pub use runtime::{Advance, SummaryEntry, SurveyRuntime};

// Scripted backend for testing surveys without user interaction
mod scripted_backend;
pub use scripted_backend::{ScriptedAction, ScriptedBackend, ScriptedBackendError};
