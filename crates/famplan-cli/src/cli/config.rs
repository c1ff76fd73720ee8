//! `config` command: effective settings and token source.

use anyhow::Result;
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;

use famplan_infra::config::CONFIG_FILE_NAME;

use crate::state::AppState;

/// Print the effective configuration and which source supplies the token.
pub async fn show(state: &AppState, json: bool) -> Result<()> {
    let config = state.config();
    let config_file = state.config_dir.join(CONFIG_FILE_NAME);
    let config_file_exists = tokio::fs::try_exists(&config_file).await.unwrap_or(false);

    let token = state
        .plan_service
        .token_resolver()
        .resolve(&config.token_key)
        .await
        .ok();

    if json {
        let output = serde_json::json!({
            "config_file": config_file.display().to_string(),
            "config_file_exists": config_file_exists,
            "config": config,
            "token": token.as_ref().map(|t| serde_json::json!({
                "source": t.source,
                "masked": t.masked(),
            })),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Setting").fg(Color::White),
        Cell::new("Value").fg(Color::White),
    ]);

    let file_note = if config_file_exists { "" } else { " (not found, defaults)" };
    let rows = [
        ("Config file", format!("{}{file_note}", config_file.display())),
        ("Model", config.model.clone()),
        ("Max tokens", config.max_tokens.to_string()),
        ("Temperature", config.temperature.to_string()),
        ("Attempts", config.max_attempts.to_string()),
        ("Retry delay", format!("{}s", config.retry_delay_secs)),
        ("Endpoint", config.base_url.clone()),
        ("Secrets file", config.secrets_file.clone()),
        ("Dotenv file", config.dotenv_file.clone()),
    ];
    for (name, value) in rows {
        table.add_row(vec![Cell::new(name).fg(Color::Cyan), Cell::new(value)]);
    }

    let token_cell = match &token {
        Some(t) => Cell::new(format!("{} ({})", t.masked(), t.source)).fg(Color::Green),
        None => Cell::new("not found").fg(Color::Red),
    };
    table.add_row(vec![Cell::new(&config.token_key).fg(Color::Cyan), token_cell]);

    println!();
    println!("{table}");
    println!();

    if token.is_none() {
        println!(
            "  {} Add {} to {}, export it in your shell or put it in {}.",
            style("i").blue().bold(),
            style(&config.token_key).yellow(),
            style(&config.secrets_file).yellow(),
            style(&config.dotenv_file).yellow()
        );
        println!();
    }

    Ok(())
}
