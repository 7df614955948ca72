//! Prompt text and selection mapping, kept free of terminal I/O.

use survey_wizard::{Field, SurveyDefinition, SurveyRuntime, ValidationFailures};

/// Select entry for leaving a non-required single-select field empty.
pub(crate) const NO_ANSWER: &str = "(no answer)";

/// Prompt for a field: its label, with the placeholder as a hint.
pub(crate) fn field_prompt(field: &Field) -> String {
    match field.placeholder() {
        Some(placeholder) if !placeholder.is_empty() => {
            format!("{} (e.g. {placeholder})", field.label())
        }
        _ => field.label().to_string(),
    }
}

/// Select items for a radio or dropdown field.
///
/// Non-required fields get a trailing [`NO_ANSWER`] entry so the user can
/// leave them unanswered.
pub(crate) fn select_items(field: &Field) -> Vec<&str> {
    let mut items: Vec<&str> = field.options().iter().map(|o| o.label.as_str()).collect();
    if !field.rules().required {
        items.push(NO_ANSWER);
    }
    items
}

/// Initially highlighted select item for a previously stored value.
pub(crate) fn select_default(field: &Field, previous: Option<&str>) -> usize {
    let options = field.options();
    match previous {
        Some(value) => options.iter().position(|o| o.value == value).unwrap_or(0),
        // Unanswered optional fields start on the "no answer" entry.
        None if !field.rules().required => options.len(),
        None => 0,
    }
}

/// The stored value for a chosen select item.
pub(crate) fn selected_value(field: &Field, index: usize) -> Option<String> {
    field.options().get(index).map(|o| o.value.clone())
}

/// Labels of the navigation choices shown under a step.
pub(crate) fn navigation_items(runtime: &SurveyRuntime<'_>) -> Vec<&'static str> {
    let mut items = vec![if runtime.is_last_step() { "Finish" } else { "Next" }];
    if runtime.can_retreat() {
        items.push("Back");
    }
    items
}

/// One `label: message` line per failed field.
pub(crate) fn failure_lines(definition: &SurveyDefinition, failures: &ValidationFailures) -> Vec<String> {
    failures
        .iter()
        .map(|failure| {
            let label = definition
                .field(failure.field_id.as_str())
                .map_or(failure.field_id.as_str(), Field::label);
            format!("{label}: {}", failure.message())
        })
        .collect()
}

/// Header line of a step, e.g. `Step 2 of 3: Your visit`.
pub(crate) fn step_header(runtime: &SurveyRuntime<'_>) -> String {
    let (number, total) = runtime.progress();
    let title = runtime.current_step().map_or("", |s| s.title());
    if runtime.is_reviewing() {
        format!("Step {number} of {total}: {title} (reviewing)")
    } else {
        format!("Step {number} of {total}: {title}")
    }
}

/// Button label, falling back when the definition leaves it empty.
pub(crate) fn label_or<'a>(label: &'a str, fallback: &'a str) -> &'a str {
    if label.is_empty() { fallback } else { label }
}

#[cfg(test)]
mod tests {
    use super::*;
    use survey_wizard::{Responses, SelectOption, Step, ValidationRules};

    fn yes_no(required: bool) -> Field {
        let field = Field::radio(
            "agree",
            "Agree?",
            vec![SelectOption::new("Yes", "y"), SelectOption::new("No", "n")],
        );
        if required {
            field.with_rules(ValidationRules::new().required())
        } else {
            field
        }
    }

    #[test]
    fn prompt_shows_placeholder() {
        let field = Field::text("name", "Name").with_placeholder("Jane Doe");
        assert_eq!(field_prompt(&field), "Name (e.g. Jane Doe)");
        assert_eq!(field_prompt(&Field::text("name", "Name")), "Name");
    }

    #[test]
    fn optional_select_offers_no_answer() {
        assert_eq!(select_items(&yes_no(false)), vec!["Yes", "No", NO_ANSWER]);
        assert_eq!(select_items(&yes_no(true)), vec!["Yes", "No"]);
    }

    #[test]
    fn select_maps_back_to_values() {
        let field = yes_no(false);
        assert_eq!(selected_value(&field, 1), Some("n".to_string()));
        assert_eq!(selected_value(&field, 2), None);
    }

    #[test]
    fn select_default_follows_previous_answer() {
        assert_eq!(select_default(&yes_no(true), Some("n")), 1);
        assert_eq!(select_default(&yes_no(true), Some("gone")), 0);
        assert_eq!(select_default(&yes_no(true), None), 0);
        assert_eq!(select_default(&yes_no(false), None), 2);
    }

    #[test]
    fn navigation_depends_on_position() {
        let definition = SurveyDefinition::new("Nav")
            .with_step(Step::new("a", "A", vec![Field::text("x", "X")]))
            .with_step(Step::new("b", "B", vec![Field::text("y", "Y")]))
            .validated()
            .unwrap();
        let mut runtime = SurveyRuntime::new(&definition);
        runtime.start().unwrap();
        assert_eq!(navigation_items(&runtime), vec!["Next"]);
        assert_eq!(step_header(&runtime), "Step 1 of 2: A");

        runtime.advance(&Responses::new()).unwrap();
        assert_eq!(navigation_items(&runtime), vec!["Finish", "Back"]);
    }

    #[test]
    fn failures_use_field_labels() {
        let definition = SurveyDefinition::new("Fail")
            .with_step(Step::new(
                "a",
                "A",
                vec![Field::text("x", "Your name").with_rules(ValidationRules::new().required())],
            ))
            .validated()
            .unwrap();
        let mut runtime = SurveyRuntime::new(&definition);
        runtime.start().unwrap();
        runtime.advance(&Responses::new()).unwrap_err();

        assert_eq!(
            failure_lines(&definition, runtime.failures()),
            vec!["Your name: This field is required.".to_string()]
        );
    }

    #[test]
    fn empty_labels_fall_back() {
        assert_eq!(label_or("", "Submit"), "Submit");
        assert_eq!(label_or("Send", "Submit"), "Send");
    }
}
