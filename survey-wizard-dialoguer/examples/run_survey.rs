//! Take a survey in the terminal and print the submitted responses as JSON.
//!
//! Run with: cargo run -p survey-wizard-dialoguer --example run_survey -- [survey.json | bundled name]
//!
//! Without an argument the bundled customer feedback survey is used.
//! Set `RUST_LOG=debug` to see runtime transitions.

use anyhow::Context;
use survey_wizard::{SurveyBackend, SurveyDefinition};
use survey_wizard_dialoguer::DialoguerBackend;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let definition = match std::env::args().nth(1) {
        Some(arg) => match example_surveys::by_name(&arg) {
            Some(bundled) => bundled?,
            None => SurveyDefinition::from_path(&arg)
                .with_context(|| format!("loading survey from {arg}"))?,
        },
        None => example_surveys::customer_feedback()?,
    };

    let responses = DialoguerBackend::new().collect(&definition)?;
    println!("{}", serde_json::to_string_pretty(&responses)?);
    Ok(())
}
