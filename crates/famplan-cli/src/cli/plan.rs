//! One-shot `plan` command.

use std::process::ExitCode;

use anyhow::Result;

use famplan_core::plan::history::SessionHistory;
use famplan_core::plan::status::StatusSink;

use super::render::{SpinnerSink, plan_error_json, print_plan_error, print_plans};
use crate::state::AppState;

/// Query plans for `city` and print them.
///
/// # Examples
///
/// ```bash
/// famplan plan Granada
/// famplan plan San Sebastián --json
/// ```
pub async fn run(state: &AppState, city: &str, json: bool, quiet: bool) -> Result<ExitCode> {
    let mut history = SessionHistory::new();

    let spinner = (!json && !quiet).then(|| SpinnerSink::start("Preparing query..."));
    let sink = spinner.as_ref().map(|s| s as &dyn StatusSink);

    let outcome = state
        .plan_service
        .obtain_plans(city, &mut history, sink)
        .await;

    if let Some(spinner) = &spinner {
        spinner.finish();
    }

    match outcome {
        Ok(result) => {
            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                print_plans(&result);
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            tracing::debug!(error = %err, "Plan query failed");
            if json {
                println!("{}", serde_json::to_string_pretty(&plan_error_json(&err))?);
            } else {
                print_plan_error(&err);
            }
            Ok(ExitCode::FAILURE)
        }
    }
}
