use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::FieldId;

/// Responses keyed by field id, ordered by id.
///
/// A value of `None` means the field was shown but left unanswered (e.g. a
/// radio group with nothing selected). The same type is used for the answers
/// a frontend collects for the current step and for the runtime's committed
/// responses.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Responses {
    values: BTreeMap<FieldId, Option<String>>,
}

impl Responses {
    /// Create a new empty responses collection.
    pub fn new() -> Self {
        Self {
            values: BTreeMap::new(),
        }
    }

    /// Insert an answered value, overwriting any earlier value.
    pub fn insert(&mut self, field_id: impl Into<FieldId>, value: impl Into<String>) {
        self.values.insert(field_id.into(), Some(value.into()));
    }

    /// Record a field as unanswered, overwriting any earlier value.
    pub fn insert_unanswered(&mut self, field_id: impl Into<FieldId>) {
        self.values.insert(field_id.into(), None);
    }

    /// Insert a possibly missing value.
    pub fn set(&mut self, field_id: impl Into<FieldId>, value: Option<String>) {
        self.values.insert(field_id.into(), value);
    }

    /// Builder-style `insert`.
    pub fn with(mut self, field_id: impl Into<FieldId>, value: impl Into<String>) -> Self {
        self.insert(field_id, value);
        self
    }

    /// Get the entry for a field.
    ///
    /// The outer `None` means nothing was recorded; `Some(None)` means the
    /// field was recorded as unanswered.
    pub fn get(&self, field_id: &str) -> Option<&Option<String>> {
        self.values.get(field_id)
    }

    /// Get the answered value for a field, if any.
    pub fn value(&self, field_id: &str) -> Option<&str> {
        self.values.get(field_id).and_then(|v| v.as_deref())
    }

    /// Check if an entry exists for a field.
    pub fn contains(&self, field_id: &str) -> bool {
        self.values.contains_key(field_id)
    }

    /// Remove the entry for a field.
    pub fn remove(&mut self, field_id: &str) -> Option<Option<String>> {
        self.values.remove(field_id)
    }

    /// Get an iterator over all entries, in field id order.
    pub fn iter(&self) -> impl Iterator<Item = (&FieldId, &Option<String>)> {
        self.values.iter()
    }

    /// Get the number of entries.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if there are no entries.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Merge another responses collection into this one, overwriting on conflict.
    pub fn extend(&mut self, other: Responses) {
        self.values.extend(other.values);
    }
}

impl<K: Into<FieldId>, V: Into<String>> FromIterator<(K, V)> for Responses {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut responses = Responses::new();
        for (k, v) in iter {
            responses.insert(k, v);
        }
        responses
    }
}

impl IntoIterator for Responses {
    type Item = (FieldId, Option<String>);
    type IntoIter = std::collections::btree_map::IntoIter<FieldId, Option<String>>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}

impl<'a> IntoIterator for &'a Responses {
    type Item = (&'a FieldId, &'a Option<String>);
    type IntoIter = std::collections::btree_map::Iter<'a, FieldId, Option<String>>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}
