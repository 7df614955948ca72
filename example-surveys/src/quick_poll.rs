use survey_wizard_types::{
    EndScreen, Field, LoadError, SelectOption, StartScreen, Step, SurveyDefinition,
    ValidationRules,
};

/// A single-step poll, built in code instead of loaded from JSON.
pub fn quick_poll() -> Result<SurveyDefinition, LoadError> {
    SurveyDefinition::new("Quick Poll")
        .with_description("One question, one answer.")
        .with_start_screen(StartScreen {
            title: "Quick poll".into(),
            description: "Takes five seconds.".into(),
            confirm_label: "Go".into(),
        })
        .with_end_screen(EndScreen {
            title: "Thanks!".into(),
            description: "Your vote:".into(),
            review_label: "Change vote".into(),
            submit_label: "Cast vote".into(),
        })
        .with_step(Step::new(
            "vote",
            "Tabs or spaces?",
            vec![
                Field::radio(
                    "indent",
                    "Indentation",
                    vec![
                        SelectOption::new("Tabs", "tabs"),
                        SelectOption::new("Spaces", "spaces"),
                    ],
                )
                .with_rules(ValidationRules::new().required()),
            ],
        ))
        .validated()
}
