//! Application state wiring configuration, token chain and plan service.

use std::path::PathBuf;

use famplan_core::plan::service::PlanService;
use famplan_core::secret::resolver::TokenResolver;
use famplan_infra::config::{load_planner_config, resolve_config_dir};
use famplan_infra::llm::create_provider;
use famplan_infra::secret::chain::build_token_chain;
use famplan_types::config::PlannerConfig;

use crate::cli::Cli;

/// Shared state for all commands.
pub struct AppState {
    pub config_dir: PathBuf,
    pub plan_service: PlanService,
}

/// Apply per-invocation CLI overrides on top of the loaded configuration.
pub fn apply_overrides(config: &mut PlannerConfig, cli: &Cli) {
    if let Some(model) = &cli.model {
        config.model = model.clone();
    }
    if let Some(max_tokens) = cli.max_tokens {
        config.max_tokens = max_tokens;
    }
    if let Some(temperature) = cli.temperature {
        config.temperature = temperature;
    }
}

impl AppState {
    /// Load configuration and wire the plan service.
    ///
    /// Never touches the network and never requires the token; both happen
    /// on the first query.
    pub async fn init(cli: &Cli) -> anyhow::Result<Self> {
        let config_dir = resolve_config_dir(cli.config_dir.as_deref());
        let mut config = load_planner_config(&config_dir).await;
        apply_overrides(&mut config, cli);

        tracing::debug!(
            config_dir = %config_dir.display(),
            model = %config.model,
            "Configuration loaded"
        );

        let resolver = TokenResolver::new(build_token_chain(
            &config.secrets_file,
            &config.dotenv_file,
        ));

        let provider_config = config.clone();
        let factory = move |token| create_provider(&provider_config, token);

        let plan_service = PlanService::new(resolver, factory, config);

        Ok(Self {
            config_dir,
            plan_service,
        })
    }

    pub fn config(&self) -> &PlannerConfig {
        self.plan_service.config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_apply_overrides() {
        let cli = Cli::parse_from([
            "famplan",
            "--model",
            "Qwen/Qwen2.5-7B-Instruct",
            "--max-tokens",
            "512",
            "config",
        ]);
        let mut config = PlannerConfig::default();
        apply_overrides(&mut config, &cli);

        assert_eq!(config.model, "Qwen/Qwen2.5-7B-Instruct");
        assert_eq!(config.max_tokens, 512);
        assert!((config.temperature - 0.7).abs() < f32::EPSILON);
    }

    #[tokio::test]
    async fn test_init_with_empty_config_dir() {
        let tmp = tempfile::TempDir::new().unwrap();
        let dir = tmp.path().to_string_lossy().to_string();
        let cli = Cli::parse_from(["famplan", "--config-dir", dir.as_str(), "config"]);

        let state = AppState::init(&cli).await.unwrap();
        assert_eq!(state.config_dir, tmp.path());
        assert_eq!(state.config(), &PlannerConfig::default());
    }
}
