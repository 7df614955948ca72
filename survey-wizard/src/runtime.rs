//! The survey runtime: a cursor over the steps of a definition plus the
//! responses committed so far.

use tracing::{debug, info, warn};

use crate::{
    Field, FieldId, Responses, RuntimeState, Step, SurveyDefinition, SurveyError,
    ValidationError, ValidationFailures,
};

/// Outcome of a successful [`SurveyRuntime::advance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// The cursor moved to the next step.
    NextStep,

    /// The last step was validated; the survey is completed.
    Completed,
}

/// One line of the end-screen summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryEntry {
    pub field_id: FieldId,
    /// The field's label.
    pub label: String,
    /// The answer as shown to the user (option label for radio and dropdown fields).
    pub value: String,
}

impl SummaryEntry {
    /// The entry as a `(label, value)` pair.
    pub fn as_pair(&self) -> (&str, &str) {
        (&self.label, &self.value)
    }
}

/// Runs one user through a survey.
///
/// The runtime borrows the definition and owns the cursor, the committed
/// responses and the failures of the last rejected step. A frontend renders
/// [`current_fields`](Self::current_fields), resolves what the user entered
/// into a [`Responses`] map and hands that to [`advance`](Self::advance).
///
/// ```text
/// NotStarted --start--> InProgress --advance (last step)--> Completed
///                        ^  |  ^                                 |
///                        |  |  +--advance / retreat              |
///                        +--+------------review------------------+
/// ```
#[derive(Debug, Clone)]
pub struct SurveyRuntime<'a> {
    definition: &'a SurveyDefinition,
    state: RuntimeState,
    cursor: usize,
    responses: Responses,
    failures: ValidationFailures,
    reviewing: bool,
}

impl<'a> SurveyRuntime<'a> {
    /// Create a runtime on the start screen.
    pub fn new(definition: &'a SurveyDefinition) -> Self {
        Self {
            definition,
            state: RuntimeState::NotStarted,
            cursor: 0,
            responses: Responses::new(),
            failures: ValidationFailures::new(),
            reviewing: false,
        }
    }

    /// Leave the start screen and show the first step.
    ///
    /// Fails with [`SurveyError::Load`] if the definition is malformed (no
    /// steps, repeated ids, options missing), which is possible when it was
    /// built in code without [`SurveyDefinition::validated`].
    pub fn start(&mut self) -> Result<(), SurveyError> {
        self.expect_state("start", RuntimeState::NotStarted)?;
        self.definition.check()?;
        self.state = RuntimeState::InProgress;
        self.cursor = 0;
        debug!(
            survey = self.definition.title(),
            steps = self.definition.len(),
            "survey started"
        );
        Ok(())
    }

    /// Validate the current step against `answers` and move on.
    ///
    /// On success every field of the step is written to the responses
    /// (fields missing from `answers` are written as unanswered), and the
    /// cursor moves to the next step or the survey completes. On failure
    /// nothing is written, the cursor stays, and the failures are returned
    /// and kept for [`failures`](Self::failures).
    pub fn advance(&mut self, answers: &Responses) -> Result<Advance, SurveyError> {
        self.expect_state("advance", RuntimeState::InProgress)?;
        let step = self.step_at_cursor();

        let failures = check_fields(step.fields(), answers);
        if !failures.is_empty() {
            warn!(step = step.id(), failures = %failures, "step rejected");
            self.failures = failures.clone();
            return Err(SurveyError::Validation(failures));
        }

        self.failures.clear();
        for field in step.fields() {
            self.responses
                .set(field.id(), resolve(answers, field.id()).map(str::to_owned));
        }

        if self.cursor + 1 == self.definition.len() {
            self.state = RuntimeState::Completed;
            self.reviewing = false;
            info!(
                survey = self.definition.title(),
                responses = self.responses.len(),
                "survey completed"
            );
            Ok(Advance::Completed)
        } else {
            self.cursor += 1;
            debug!(step = self.step_at_cursor().id(), cursor = self.cursor, "advanced");
            Ok(Advance::NextStep)
        }
    }

    /// Check the current step against `answers` without committing anything.
    pub fn validate_step(&self, answers: &Responses) -> Result<(), SurveyError> {
        self.expect_state("validate", RuntimeState::InProgress)?;
        let failures = check_fields(self.step_at_cursor().fields(), answers);
        if failures.is_empty() {
            Ok(())
        } else {
            Err(SurveyError::Validation(failures))
        }
    }

    /// Go back one step without validating.
    ///
    /// Returns `false` (and changes nothing) on the first step.
    pub fn retreat(&mut self) -> Result<bool, SurveyError> {
        self.expect_state("go back", RuntimeState::InProgress)?;
        if self.cursor == 0 {
            return Ok(false);
        }
        self.cursor -= 1;
        self.failures.clear();
        debug!(step = self.step_at_cursor().id(), cursor = self.cursor, "went back");
        Ok(true)
    }

    /// Go from the end screen back to the first step, keeping all responses.
    pub fn review(&mut self) -> Result<(), SurveyError> {
        self.expect_state("review", RuntimeState::Completed)?;
        self.state = RuntimeState::InProgress;
        self.cursor = 0;
        self.reviewing = true;
        self.failures.clear();
        debug!(survey = self.definition.title(), "reviewing responses");
        Ok(())
    }

    /// The end-screen summary, in step-then-field order.
    ///
    /// Fields without an answer (unanswered or empty) are left out.
    pub fn build_summary(&self) -> Result<Vec<SummaryEntry>, SurveyError> {
        self.expect_state("build the summary", RuntimeState::Completed)?;
        let summary = self
            .definition
            .fields()
            .filter_map(|field| {
                let value = self.responses.value(field.id().as_str())?;
                if value.is_empty() {
                    return None;
                }
                Some(SummaryEntry {
                    field_id: field.id().clone(),
                    label: field.label().to_string(),
                    value: field.display_value(value).to_string(),
                })
            })
            .collect();
        Ok(summary)
    }

    pub fn definition(&self) -> &'a SurveyDefinition {
        self.definition
    }

    pub fn state(&self) -> RuntimeState {
        self.state
    }

    /// Index of the current step.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// The step being shown, if a step is being shown.
    pub fn current_step(&self) -> Option<&'a Step> {
        match self.state {
            RuntimeState::InProgress => Some(self.step_at_cursor()),
            RuntimeState::NotStarted | RuntimeState::Completed => None,
        }
    }

    /// Fields to render for the current step. Empty outside a step.
    pub fn current_fields(&self) -> &'a [Field] {
        match self.current_step() {
            Some(step) => step.fields(),
            None => &[],
        }
    }

    /// Failures of the last rejected [`advance`](Self::advance).
    ///
    /// Cleared by every successful transition.
    pub fn failures(&self) -> &ValidationFailures {
        &self.failures
    }

    /// Whether "back" is available.
    pub fn can_retreat(&self) -> bool {
        self.state == RuntimeState::InProgress && self.cursor > 0
    }

    /// Whether advancing will complete the survey.
    pub fn is_last_step(&self) -> bool {
        self.state == RuntimeState::InProgress && self.cursor + 1 == self.definition.len()
    }

    /// `(step number, step count)`, with step numbers starting at 1.
    pub fn progress(&self) -> (usize, usize) {
        (self.cursor + 1, self.definition.len())
    }

    /// Whether this pass was entered through [`review`](Self::review).
    pub fn is_reviewing(&self) -> bool {
        self.reviewing
    }

    /// Responses committed so far.
    pub fn responses(&self) -> &Responses {
        &self.responses
    }

    /// Consume the runtime, returning the committed responses.
    pub fn into_responses(self) -> Responses {
        self.responses
    }

    fn step_at_cursor(&self) -> &'a Step {
        let definition: &'a SurveyDefinition = self.definition;
        &definition.steps()[self.cursor]
    }

    fn expect_state(
        &self,
        operation: &'static str,
        expected: RuntimeState,
    ) -> Result<(), SurveyError> {
        if self.state == expected {
            Ok(())
        } else {
            Err(SurveyError::InvalidState {
                operation,
                state: self.state,
            })
        }
    }
}

fn resolve<'r>(answers: &'r Responses, field_id: &FieldId) -> Option<&'r str> {
    answers.value(field_id.as_str())
}

fn check_fields(fields: &[Field], answers: &Responses) -> ValidationFailures {
    fields
        .iter()
        .filter_map(|field| {
            field
                .rules()
                .check(resolve(answers, field.id()))
                .err()
                .map(|violation| ValidationError::new(field.id(), violation))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{LoadError, RuleViolation, SelectOption, ValidationRules};

    fn two_steps() -> SurveyDefinition {
        SurveyDefinition::new("Two steps")
            .with_step(Step::new(
                "about",
                "About you",
                vec![
                    Field::text("name", "Name").with_rules(ValidationRules::new().required()),
                    Field::text("nick", "Nickname").with_rules(ValidationRules::new().min_length(3)),
                ],
            ))
            .with_step(Step::new(
                "visit",
                "Your visit",
                vec![Field::radio(
                    "again",
                    "Come again?",
                    vec![SelectOption::new("Yes", "y"), SelectOption::new("No", "n")],
                )],
            ))
            .validated()
            .unwrap()
    }

    #[test]
    fn new_runtime_is_not_started() {
        let definition = two_steps();
        let runtime = SurveyRuntime::new(&definition);
        assert_eq!(runtime.state(), RuntimeState::NotStarted);
        assert!(runtime.current_step().is_none());
        assert!(runtime.current_fields().is_empty());
        assert!(!runtime.can_retreat());
    }

    #[test]
    fn start_without_steps_is_a_load_error() {
        let definition = SurveyDefinition::new("No steps");
        let mut runtime = SurveyRuntime::new(&definition);

        let err = runtime.start().unwrap_err();
        assert!(matches!(err, SurveyError::Load(LoadError::NoSteps)));
        assert_eq!(runtime.state(), RuntimeState::NotStarted);
        assert!(runtime.current_step().is_none());
        assert!(runtime.current_fields().is_empty());
        assert!(!runtime.is_last_step());
    }

    #[test]
    fn start_with_repeated_field_id_is_a_load_error() {
        let definition = SurveyDefinition::new("Repeated")
            .with_step(Step::new("a", "A", vec![Field::text("q", "First")]))
            .with_step(Step::new("b", "B", vec![Field::text("q", "Second")]));
        let mut runtime = SurveyRuntime::new(&definition);

        let err = runtime.start().unwrap_err();
        assert!(matches!(
            err,
            SurveyError::Load(LoadError::DuplicateFieldId(ref id)) if id.as_str() == "q"
        ));
        assert_eq!(runtime.state(), RuntimeState::NotStarted);
        assert!(runtime.advance(&Responses::new().with("q", "one")).is_err());
        assert!(runtime.responses().is_empty());
    }

    #[test]
    fn start_with_optionless_dropdown_is_a_load_error() {
        let definition = SurveyDefinition::new("No options")
            .with_step(Step::new("a", "A", vec![Field::dropdown("d", "D", vec![])]));
        let mut runtime = SurveyRuntime::new(&definition);
        assert!(matches!(
            runtime.start(),
            Err(SurveyError::Load(LoadError::MissingOptions(_)))
        ));
    }

    #[test]
    fn dropdown_summary_falls_back_to_raw_value() {
        let definition = SurveyDefinition::new("Dropdown")
            .with_step(Step::new(
                "a",
                "A",
                vec![Field::dropdown(
                    "size",
                    "Size",
                    vec![SelectOption::new("Small", "s"), SelectOption::new("Large", "l")],
                )],
            ))
            .validated()
            .unwrap();
        let mut runtime = SurveyRuntime::new(&definition);
        runtime.start().unwrap();
        runtime.advance(&Responses::new().with("size", "xl")).unwrap();

        let summary = runtime.build_summary().unwrap();
        let pairs: Vec<_> = summary.iter().map(SummaryEntry::as_pair).collect();
        assert_eq!(pairs, vec![("Size", "xl")]);
    }

    #[test]
    fn start_twice_is_rejected() {
        let definition = two_steps();
        let mut runtime = SurveyRuntime::new(&definition);
        runtime.start().unwrap();
        let err = runtime.start().unwrap_err();
        assert!(matches!(
            err,
            SurveyError::InvalidState {
                operation: "start",
                state: RuntimeState::InProgress
            }
        ));
    }

    #[test]
    fn advance_before_start_is_rejected() {
        let definition = two_steps();
        let mut runtime = SurveyRuntime::new(&definition);
        let err = runtime.advance(&Responses::new()).unwrap_err();
        assert!(matches!(err, SurveyError::InvalidState { .. }));
    }

    #[test]
    fn failures_are_reported_per_field() {
        let definition = two_steps();
        let mut runtime = SurveyRuntime::new(&definition);
        runtime.start().unwrap();

        let err = runtime
            .advance(&Responses::new().with("nick", "ab"))
            .unwrap_err();
        let failures = err.validation_failures().unwrap();
        assert_eq!(failures.len(), 2);
        assert_eq!(failures.get("name").unwrap().violation, RuleViolation::Required);
        assert_eq!(failures.get("nick").unwrap().violation, RuleViolation::MinLength(3));

        assert_eq!(runtime.failures(), failures);
        assert_eq!(runtime.cursor(), 0);
        assert!(runtime.responses().is_empty());
    }

    #[test]
    fn successful_advance_commits_and_clears_failures() {
        let definition = two_steps();
        let mut runtime = SurveyRuntime::new(&definition);
        runtime.start().unwrap();
        runtime.advance(&Responses::new()).unwrap_err();

        let outcome = runtime
            .advance(&Responses::new().with("name", "Ada"))
            .unwrap();
        assert_eq!(outcome, Advance::NextStep);
        assert!(runtime.failures().is_empty());
        assert_eq!(runtime.cursor(), 1);
        assert_eq!(runtime.responses().value("name"), Some("Ada"));
        assert_eq!(runtime.responses().get("nick"), Some(&None));
    }

    #[test]
    fn answers_for_other_steps_are_ignored() {
        let definition = two_steps();
        let mut runtime = SurveyRuntime::new(&definition);
        runtime.start().unwrap();
        runtime
            .advance(&Responses::new().with("name", "Ada").with("again", "y"))
            .unwrap();
        assert!(!runtime.responses().contains("again"));
    }

    #[test]
    fn validate_step_does_not_commit() {
        let definition = two_steps();
        let mut runtime = SurveyRuntime::new(&definition);
        runtime.start().unwrap();
        runtime
            .validate_step(&Responses::new().with("name", "Ada"))
            .unwrap();
        assert!(runtime.responses().is_empty());
        assert_eq!(runtime.cursor(), 0);
    }

    #[test]
    fn navigation_flags() {
        let definition = two_steps();
        let mut runtime = SurveyRuntime::new(&definition);
        runtime.start().unwrap();
        assert!(!runtime.can_retreat());
        assert!(!runtime.is_last_step());
        assert_eq!(runtime.progress(), (1, 2));

        runtime.advance(&Responses::new().with("name", "Ada")).unwrap();
        assert!(runtime.can_retreat());
        assert!(runtime.is_last_step());
        assert_eq!(runtime.progress(), (2, 2));
        assert_eq!(runtime.current_step().unwrap().id(), "visit");
    }

    #[test]
    fn retreat_keeps_responses() {
        let definition = two_steps();
        let mut runtime = SurveyRuntime::new(&definition);
        runtime.start().unwrap();
        runtime.advance(&Responses::new().with("name", "Ada")).unwrap();

        assert!(runtime.retreat().unwrap());
        assert_eq!(runtime.cursor(), 0);
        assert_eq!(runtime.responses().value("name"), Some("Ada"));
    }

    #[test]
    fn summary_outside_completed_is_rejected() {
        let definition = two_steps();
        let mut runtime = SurveyRuntime::new(&definition);
        runtime.start().unwrap();
        assert!(matches!(
            runtime.build_summary(),
            Err(SurveyError::InvalidState { .. })
        ));
    }

    #[test]
    fn summary_skips_unanswered_and_empty() {
        let definition = two_steps();
        let mut runtime = SurveyRuntime::new(&definition);
        runtime.start().unwrap();
        runtime
            .advance(&Responses::new().with("name", "Ada").with("nick", ""))
            .unwrap();
        runtime.advance(&Responses::new().with("again", "n")).unwrap();

        let summary = runtime.build_summary().unwrap();
        let pairs: Vec<_> = summary.iter().map(SummaryEntry::as_pair).collect();
        assert_eq!(pairs, vec![("Name", "Ada"), ("Come again?", "No")]);
    }
}
