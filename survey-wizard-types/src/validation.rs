use std::fmt;

use regex::Regex;

use crate::FieldId;

/// A compiled `pattern` rule.
///
/// The expression is compiled once when the definition is loaded. Matching is
/// an unanchored search: a value passes if the expression matches anywhere in
/// it. Anchor with `^...$` to require a full match.
///
/// Expressions use the `regex` crate syntax, which has no lookaround and no
/// backreferences. Patterns relying on them fail to compile and the
/// definition is rejected with `LoadError::InvalidPattern`.
#[derive(Debug, Clone)]
pub struct Pattern {
    regex: Regex,
}

impl Pattern {
    /// Compile a pattern.
    pub fn new(source: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            regex: Regex::new(source)?,
        })
    }

    /// The expression as written in the definition.
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    /// Check whether `value` matches.
    pub fn is_match(&self, value: &str) -> bool {
        self.regex.is_match(value)
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

/// Validation rule set of a field.
///
/// Rules are applied in a fixed order: required, min length, max length,
/// pattern. Only the first failing rule is reported. Length and pattern rules
/// only apply to non-empty values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationRules {
    /// The field must have a non-empty value.
    pub required: bool,

    /// Minimum number of characters, inclusive.
    pub min_length: Option<usize>,

    /// Maximum number of characters, inclusive.
    pub max_length: Option<usize>,

    /// Expression the value must match.
    pub pattern: Option<Pattern>,
}

impl ValidationRules {
    /// Create an empty rule set (everything passes).
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the field as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Set the minimum length.
    pub fn min_length(mut self, min: usize) -> Self {
        self.min_length = Some(min);
        self
    }

    /// Set the maximum length.
    pub fn max_length(mut self, max: usize) -> Self {
        self.max_length = Some(max);
        self
    }

    /// Set the pattern, compiling it.
    pub fn pattern(mut self, source: &str) -> Result<Self, regex::Error> {
        self.pattern = Some(Pattern::new(source)?);
        Ok(self)
    }

    /// Check if no rule is configured.
    pub fn is_empty(&self) -> bool {
        !self.required
            && self.min_length.is_none()
            && self.max_length.is_none()
            && self.pattern.is_none()
    }

    /// Check a resolved value against the rules.
    ///
    /// `None` and `Some("")` are both treated as "no value".
    pub fn check(&self, value: Option<&str>) -> Result<(), RuleViolation> {
        let value = match value {
            Some(v) if !v.is_empty() => v,
            _ if self.required => return Err(RuleViolation::Required),
            _ => return Ok(()),
        };

        let length = value.chars().count();
        if let Some(min) = self.min_length
            && length < min
        {
            return Err(RuleViolation::MinLength(min));
        }
        if let Some(max) = self.max_length
            && length > max
        {
            return Err(RuleViolation::MaxLength(max));
        }
        if let Some(pattern) = &self.pattern
            && !pattern.is_match(value)
        {
            return Err(RuleViolation::Pattern);
        }
        Ok(())
    }
}

/// The rule a value failed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuleViolation {
    #[error("This field is required.")]
    Required,

    #[error("Must be at least {0} characters.")]
    MinLength(usize),

    #[error("Cannot exceed {0} characters.")]
    MaxLength(usize),

    #[error("Invalid format.")]
    Pattern,
}

/// A failed check for one field.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{field_id}: {violation}")]
pub struct ValidationError {
    pub field_id: FieldId,
    pub violation: RuleViolation,
}

impl ValidationError {
    pub fn new(field_id: impl Into<FieldId>, violation: RuleViolation) -> Self {
        Self {
            field_id: field_id.into(),
            violation,
        }
    }

    /// The message shown next to the field.
    pub fn message(&self) -> String {
        self.violation.to_string()
    }
}

/// All failures of one validation pass, in field order, at most one per field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationFailures {
    errors: Vec<ValidationError>,
}

impl ValidationFailures {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    /// The failure reported for a field, if any.
    pub fn get(&self, field_id: &str) -> Option<&ValidationError> {
        self.errors.iter().find(|e| e.field_id.as_str() == field_id)
    }

    /// Messages keyed by field id, in field order.
    pub fn messages(&self) -> Vec<(&FieldId, String)> {
        self.errors
            .iter()
            .map(|e| (&e.field_id, e.message()))
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.errors.iter()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn clear(&mut self) {
        self.errors.clear();
    }
}

impl fmt::Display for ValidationFailures {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.errors.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{error}")?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a ValidationFailures {
    type Item = &'a ValidationError;
    type IntoIter = std::slice::Iter<'a, ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

impl FromIterator<ValidationError> for ValidationFailures {
    fn from_iter<I: IntoIterator<Item = ValidationError>>(iter: I) -> Self {
        Self {
            errors: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_rules_accept_anything() {
        let rules = ValidationRules::new();
        assert!(rules.is_empty());
        assert_eq!(rules.check(None), Ok(()));
        assert_eq!(rules.check(Some("")), Ok(()));
        assert_eq!(rules.check(Some("anything")), Ok(()));
    }

    #[test]
    fn required_rejects_empty_and_missing() {
        let rules = ValidationRules::new().required();
        assert_eq!(rules.check(None), Err(RuleViolation::Required));
        assert_eq!(rules.check(Some("")), Err(RuleViolation::Required));
    }

    #[test]
    fn required_wins_over_other_rules() {
        let rules = ValidationRules::new()
            .required()
            .min_length(3)
            .pattern("^x+$")
            .unwrap();
        assert_eq!(rules.check(Some("")), Err(RuleViolation::Required));
    }

    #[test]
    fn min_length_is_inclusive() {
        let rules = ValidationRules::new().min_length(3);
        assert_eq!(rules.check(Some("ab")), Err(RuleViolation::MinLength(3)));
        assert_eq!(rules.check(Some("abc")), Ok(()));
    }

    #[test]
    fn max_length_is_inclusive() {
        let rules = ValidationRules::new().max_length(3);
        assert_eq!(rules.check(Some("abc")), Ok(()));
        assert_eq!(rules.check(Some("abcd")), Err(RuleViolation::MaxLength(3)));
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        let rules = ValidationRules::new().max_length(3);
        assert_eq!(rules.check(Some("äöü")), Ok(()));
    }

    #[test]
    fn empty_value_skips_length_and_pattern() {
        let rules = ValidationRules::new()
            .min_length(5)
            .pattern("^[0-9]+$")
            .unwrap();
        assert_eq!(rules.check(Some("")), Ok(()));
        assert_eq!(rules.check(None), Ok(()));
    }

    #[test]
    fn first_failing_rule_is_reported() {
        let rules = ValidationRules::new()
            .min_length(5)
            .pattern("^[0-9]+$")
            .unwrap();
        assert_eq!(rules.check(Some("ab")), Err(RuleViolation::MinLength(5)));
        assert_eq!(rules.check(Some("abcdef")), Err(RuleViolation::Pattern));
        assert_eq!(rules.check(Some("123456")), Ok(()));
    }

    #[test]
    fn max_length_is_checked_before_pattern() {
        let rules = ValidationRules::new()
            .max_length(3)
            .pattern("^[0-9]+$")
            .unwrap();
        assert_eq!(rules.check(Some("abcd")), Err(RuleViolation::MaxLength(3)));
        assert_eq!(rules.check(Some("abc")), Err(RuleViolation::Pattern));
        assert_eq!(rules.check(Some("123")), Ok(()));
    }

    #[test]
    fn lookaround_is_not_supported() {
        assert!(Pattern::new("^(?=.*[0-9]).+$").is_err());
        assert!(Pattern::new(r"(a)\1").is_err());
    }

    #[test]
    fn pattern_is_unanchored() {
        let rules = ValidationRules::new().pattern("@").unwrap();
        assert_eq!(rules.check(Some("me@example.com")), Ok(()));
        assert_eq!(rules.check(Some("nope")), Err(RuleViolation::Pattern));
    }

    #[test]
    fn messages() {
        assert_eq!(RuleViolation::Required.to_string(), "This field is required.");
        assert_eq!(
            RuleViolation::MinLength(3).to_string(),
            "Must be at least 3 characters."
        );
        assert_eq!(
            RuleViolation::MaxLength(10).to_string(),
            "Cannot exceed 10 characters."
        );
        assert_eq!(RuleViolation::Pattern.to_string(), "Invalid format.");
    }

    #[test]
    fn failures_lookup_by_field() {
        let failures: ValidationFailures = [
            ValidationError::new("name", RuleViolation::Required),
            ValidationError::new("zip", RuleViolation::Pattern),
        ]
        .into_iter()
        .collect();

        assert_eq!(failures.len(), 2);
        assert_eq!(
            failures.get("zip").map(|e| e.message()),
            Some("Invalid format.".to_string())
        );
        assert!(failures.get("email").is_none());
        assert_eq!(
            failures.to_string(),
            "name: This field is required.; zip: Invalid format."
        );
    }
}
