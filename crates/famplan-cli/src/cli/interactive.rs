//! Interactive session: one history cache shared across several queries.
//!
//! Meta-commands: `:history` lists cached cities, `:quit` (or an empty
//! line) ends the session.

use std::process::ExitCode;

use anyhow::Result;
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;
use dialoguer::Input;

use famplan_core::plan::history::SessionHistory;
use famplan_core::plan::status::StatusSink;

use super::render::{SpinnerSink, print_plan_error, print_plans};
use crate::state::AppState;

/// What the user typed at the prompt.
#[derive(Debug, PartialEq, Eq)]
enum SessionInput {
    Quit,
    History,
    City(String),
}

fn parse_input(line: &str) -> SessionInput {
    match line.trim() {
        "" | ":quit" | ":q" | ":exit" => SessionInput::Quit,
        ":history" | ":h" => SessionInput::History,
        city => SessionInput::City(city.to_string()),
    }
}

fn print_banner(model: &str) {
    println!();
    println!("  {}", style("Family plans").cyan().bold());
    println!(
        "  {}",
        style("Ten free or low-cost things to do with kids, city by city.").dim()
    );
    println!();
    println!("  {}  {}", style("Model:").bold(), style(model).dim());
    println!();
    println!(
        "  {}",
        style("Type a city. :history lists this session's cities, :quit or an empty line exits.")
            .dim()
    );
    println!("  {}", style("---").dim());
    println!();
}

fn print_history(history: &SessionHistory) {
    if history.is_empty() {
        println!();
        println!("  {} No cities queried yet.", style("i").blue().bold());
        println!();
        return;
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("#").fg(Color::White),
        Cell::new("City").fg(Color::White),
    ]);
    for (i, city) in history.cities().enumerate() {
        table.add_row(vec![
            Cell::new(i + 1).fg(Color::DarkGrey),
            Cell::new(city).fg(Color::Cyan),
        ]);
    }

    println!();
    println!("{table}");
    println!();
}

/// Run the read-query-print loop until the user quits.
pub async fn run(state: &AppState, quiet: bool) -> Result<ExitCode> {
    let mut history = SessionHistory::new();

    if !quiet {
        print_banner(&state.config().model);
    }

    loop {
        let line: String = Input::new()
            .with_prompt("City")
            .allow_empty(true)
            .interact_text()?;

        let city = match parse_input(&line) {
            SessionInput::Quit => break,
            SessionInput::History => {
                print_history(&history);
                continue;
            }
            SessionInput::City(city) => city,
        };

        let spinner = (!quiet).then(|| SpinnerSink::start("Preparing query..."));
        let sink = spinner.as_ref().map(|s| s as &dyn StatusSink);
        let outcome = state
            .plan_service
            .obtain_plans(&city, &mut history, sink)
            .await;
        if let Some(spinner) = &spinner {
            spinner.finish();
        }

        match outcome {
            Ok(result) => print_plans(&result),
            // The session survives failed queries.
            Err(err) => print_plan_error(&err),
        }
    }

    if !quiet {
        println!(
            "  {} {} {} this session.",
            style("Bye!").bold(),
            style(history.len()).bold(),
            if history.len() == 1 { "city" } else { "cities" }
        );
        println!();
    }

    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_input() {
        assert_eq!(parse_input(""), SessionInput::Quit);
        assert_eq!(parse_input("   "), SessionInput::Quit);
        assert_eq!(parse_input(":quit"), SessionInput::Quit);
        assert_eq!(parse_input(":history"), SessionInput::History);
        assert_eq!(
            parse_input("  san sebastián "),
            SessionInput::City("san sebastián".to_string())
        );
    }
}
