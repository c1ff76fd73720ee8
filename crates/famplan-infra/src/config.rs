//! Configuration loader for Famplan.
//!
//! Reads `famplan.toml` from the config directory (`~/.famplan/` by default)
//! and deserializes it into [`PlannerConfig`]. Falls back to defaults when
//! the file is missing or malformed; a bad config file is never fatal.

use std::path::{Path, PathBuf};

use famplan_types::config::PlannerConfig;

/// File name of the planner configuration inside the config directory.
pub const CONFIG_FILE_NAME: &str = "famplan.toml";

/// Environment variable that overrides the config directory.
pub const HOME_ENV_VAR: &str = "FAMPLAN_HOME";

/// Resolve the config directory.
///
/// Priority: explicit override (`--config-dir`), then `FAMPLAN_HOME`, then
/// `~/.famplan`, then `./.famplan` when no home directory is known.
pub fn resolve_config_dir(override_dir: Option<&Path>) -> PathBuf {
    if let Some(dir) = override_dir {
        return dir.to_path_buf();
    }

    if let Ok(dir) = std::env::var(HOME_ENV_VAR) {
        if !dir.trim().is_empty() {
            return PathBuf::from(dir);
        }
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".famplan");
    }

    PathBuf::from(".famplan")
}

/// Load planner configuration from `{config_dir}/famplan.toml`.
///
/// - Missing file: [`PlannerConfig::default()`], logged at debug.
/// - Unreadable or unparseable file: defaults, logged at warn.
pub async fn load_planner_config(config_dir: &Path) -> PlannerConfig {
    let config_path = config_dir.join(CONFIG_FILE_NAME);

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No {CONFIG_FILE_NAME} found at {}, using defaults", config_path.display());
            return PlannerConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", config_path.display());
            return PlannerConfig::default();
        }
    };

    match toml::from_str::<PlannerConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(
                "Failed to parse {}: {err}, using defaults",
                config_path.display()
            );
            PlannerConfig::default()
        }
    }
}
