//! Core types for the survey-wizard crate.
//!
//! This crate provides the foundational types for defining surveys:
//! - `SurveyDefinition` and `Step` - The survey structure, loaded from JSON
//! - `Field` and `FieldKind` - Individual fields and their input kinds
//! - `ValidationRules` - Per-field checks and the failures they report
//! - `Responses` and `FieldId` - Collected values keyed by field id
//! - `SurveyBackend` trait - For implementing frontends

mod field_id;
pub use field_id::FieldId;

mod responses;
pub use responses::Responses;

mod validation;
pub use validation::{Pattern, RuleViolation, ValidationError, ValidationFailures, ValidationRules};

mod field;
pub use field::{Field, FieldKind, SelectOption};

mod definition;
pub use definition::{EndScreen, StartScreen, Step, SurveyDefinition};

mod wire;

mod state;
pub use state::RuntimeState;

mod error;
pub use error::{LoadError, SurveyError};

mod traits;
pub use traits::SurveyBackend;
