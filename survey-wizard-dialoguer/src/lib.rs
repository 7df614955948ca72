//! # survey-wizard-dialoguer
//!
//! Dialoguer wizard backend for survey-wizard.
//!
//! This crate provides a command-line wizard interface for taking a survey
//! using the `dialoguer` library. Steps are presented one at a time in a
//! classic CLI wizard style, with back navigation, inline validation errors
//! and a review/submit end screen.
//!
//! ## Example
//!
//! ```rust,ignore
//! use survey_wizard::{SurveyBackend, SurveyDefinition};
//! use survey_wizard_dialoguer::DialoguerBackend;
//!
//! fn main() -> anyhow::Result<()> {
//!     let definition = SurveyDefinition::from_path("survey.json")?;
//!     let responses = DialoguerBackend::new().collect(&definition)?;
//!     println!("{} answers collected", responses.len());
//!     Ok(())
//! }
//! ```

mod backend;
mod prompts;

pub use backend::{DialoguerBackend, DialoguerError};
