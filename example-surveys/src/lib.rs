pub mod customer_feedback;
pub mod event_registration;
pub mod quick_poll;

pub use customer_feedback::customer_feedback;
pub use event_registration::event_registration;
pub use quick_poll::quick_poll;

use survey_wizard_types::{LoadError, SurveyDefinition};

/// Look up a bundled survey by name.
pub fn by_name(name: &str) -> Option<Result<SurveyDefinition, LoadError>> {
    match name {
        "customer_feedback" => Some(customer_feedback()),
        "event_registration" => Some(event_registration()),
        "quick_poll" => Some(quick_poll()),
        _ => None,
    }
}

/// Names accepted by [`by_name`].
pub const NAMES: &[&str] = &["customer_feedback", "event_registration", "quick_poll"];
