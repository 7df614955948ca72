use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a field, e.g. `"contact-email"`.
///
/// Used as keys in `Responses`. Field ids are unique across the whole survey,
/// not just within the step that declares them.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldId {
    id: String,
}

impl FieldId {
    /// Create a new field id.
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }

    /// Get the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.id
    }

    /// Check if the id is empty.
    pub fn is_empty(&self) -> bool {
        self.id.is_empty()
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

impl Borrow<str> for FieldId {
    fn borrow(&self) -> &str {
        &self.id
    }
}

impl From<&str> for FieldId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for FieldId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&String> for FieldId {
    fn from(s: &String) -> Self {
        Self::new(s.clone())
    }
}

impl From<&FieldId> for FieldId {
    fn from(id: &FieldId) -> Self {
        id.clone()
    }
}
