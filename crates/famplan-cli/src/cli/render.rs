//! Terminal rendering: plan cards, error messages, and the status spinner.

use std::time::Duration;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use famplan_core::plan::cost::{FREE_LABEL, LOW_COST_LABEL};
use famplan_core::plan::status::StatusSink;
use famplan_types::error::PlanError;
use famplan_types::plan::{PlanEntry, PlanResult};

/// Status sink backed by an `indicatif` spinner.
pub struct SpinnerSink {
    spinner: ProgressBar,
}

impl SpinnerSink {
    pub fn start(initial: &str) -> Self {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        spinner.set_message(initial.to_string());
        spinner.enable_steady_tick(Duration::from_millis(80));
        Self { spinner }
    }

    pub fn finish(&self) {
        self.spinner.finish_and_clear();
    }
}

impl StatusSink for SpinnerSink {
    fn report(&self, message: &str) {
        self.spinner.set_message(message.to_string());
    }
}

/// Styled cost badge, or an empty string when no label applies.
pub fn cost_badge(label: Option<&str>) -> String {
    match label {
        None => String::new(),
        Some(l) if l == FREE_LABEL => format!(" {}", style(format!("[{l}]")).green().bold()),
        Some(l) if l == LOW_COST_LABEL => format!(" {}", style(format!("[{l}]")).yellow().bold()),
        Some(l) => format!(" {}", style(format!("[{l}]")).cyan()),
    }
}

fn print_card(entry: &PlanEntry) {
    println!(
        "  {} {}{}",
        style(format!("{:>2}.", entry.ordinal)).dim(),
        style(&entry.title).bold(),
        cost_badge(entry.cost_label.as_deref())
    );
    println!("      {}", entry.description);
    println!();
}

/// Print a plan result as cards, or the raw reply when nothing parsed.
pub fn print_plans(result: &PlanResult) {
    println!();
    println!(
        "  {} {}",
        style("Plans for").bold(),
        style(result.city.to_uppercase()).cyan().bold()
    );
    if result.from_cache {
        println!("  {}", style("(from this session's history)").dim());
    }
    println!();

    if result.is_structured() {
        for entry in &result.entries {
            print_card(entry);
        }
    } else {
        for line in result.raw_text.lines() {
            println!("  {line}");
        }
        println!();
    }
}

/// Print a query failure with its remediation hint.
pub fn print_plan_error(err: &PlanError) {
    eprintln!();
    eprintln!("  {} {}", style("✗").red().bold(), err.user_message());
    if err.is_user_retryable() {
        eprintln!("  {}", style("Try again in a few moments.").dim());
    }
    eprintln!();
}

/// JSON body for a query failure.
pub fn plan_error_json(err: &PlanError) -> serde_json::Value {
    serde_json::json!({
        "error": err.kind(),
        "message": err.user_message(),
        "detail": err.to_string(),
        "retryable": err.is_user_retryable(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cost_badge_contains_label() {
        assert_eq!(cost_badge(None), "");
        assert!(cost_badge(Some("Free")).contains("[Free]"));
        assert!(cost_badge(Some("Low-cost")).contains("[Low-cost]"));
        assert!(cost_badge(Some("~3€")).contains("[~3€]"));
    }

    #[test]
    fn test_plan_error_json() {
        let value = plan_error_json(&PlanError::EmptyResponse);
        assert_eq!(value["error"], "EmptyResponse");
        assert_eq!(value["retryable"], true);

        let value = plan_error_json(&PlanError::MissingInput);
        assert_eq!(value["error"], "MissingInput");
        assert_eq!(value["retryable"], false);
    }

    #[test]
    fn test_spinner_sink_reports() {
        let sink = SpinnerSink::start("Starting...");
        sink.report("Querying the model (attempt 1/3)...");
        assert_eq!(sink.spinner.message(), "Querying the model (attempt 1/3)...");
        sink.finish();
    }
}
