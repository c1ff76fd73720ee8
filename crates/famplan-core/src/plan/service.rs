//! Plan service: the single entry point a front end calls per query.
//!
//! Flow: validate input -> normalize city -> session history -> resolve
//! token -> build prompt -> retry controller -> parse + cost tags -> record.
//!
//! The service itself is stateless; the session history is owned by the
//! caller and borrowed mutably for the duration of one query, so two
//! queries can never write it at the same time.

use secrecy::SecretString;

use famplan_types::config::PlannerConfig;
use famplan_types::error::PlanError;
use famplan_types::llm::{CompletionRequest, LlmError};
use famplan_types::plan::PlanResult;

use crate::llm::box_provider::BoxLlmProvider;
use crate::secret::resolver::TokenResolver;

use super::cost::tag_entries;
use super::history::{SessionHistory, normalize_city};
use super::parser::parse_plans;
use super::prompt::build_prompt;
use super::retry::{RetryController, RetryPolicy};
use super::status::StatusSink;

/// Builds a provider once the bearer token is known.
pub trait ProviderFactory: Send + Sync {
    fn create(&self, token: SecretString) -> Result<BoxLlmProvider, LlmError>;
}

impl<F> ProviderFactory for F
where
    F: Fn(SecretString) -> Result<BoxLlmProvider, LlmError> + Send + Sync,
{
    fn create(&self, token: SecretString) -> Result<BoxLlmProvider, LlmError> {
        self(token)
    }
}

/// Parse a reply and attach cost labels.
pub fn build_plan_result(city: &str, raw_text: String) -> PlanResult {
    let mut entries = parse_plans(&raw_text);
    tag_entries(&mut entries);
    PlanResult {
        city: city.to_string(),
        raw_text,
        entries,
        from_cache: false,
    }
}

pub struct PlanService {
    resolver: TokenResolver,
    factory: Box<dyn ProviderFactory>,
    config: PlannerConfig,
    retry: RetryController,
}

impl PlanService {
    pub fn new(
        resolver: TokenResolver,
        factory: impl ProviderFactory + 'static,
        config: PlannerConfig,
    ) -> Self {
        let retry = RetryController::new(RetryPolicy::from_config(&config));
        Self {
            resolver,
            factory: Box::new(factory),
            config,
            retry,
        }
    }

    /// Override the retry policy derived from the configuration.
    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry = RetryController::new(policy);
        self
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    pub fn token_resolver(&self) -> &TokenResolver {
        &self.resolver
    }

    /// Query the model for `city` and return the raw reply text.
    ///
    /// No caching and no parsing. The city is embedded as given.
    pub async fn fetch_plan_text(
        &self,
        city: &str,
        sink: Option<&dyn StatusSink>,
    ) -> Result<String, PlanError> {
        if city.trim().is_empty() {
            return Err(PlanError::MissingInput);
        }

        let resolved = self.resolver.resolve(&self.config.token_key).await?;
        let provider = self.factory.create(resolved.token).map_err(|e| {
            PlanError::Configuration(format!("Could not initialise the inference client: {e}."))
        })?;

        let request = CompletionRequest {
            model: self.config.model.clone(),
            messages: build_prompt(city),
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
        };

        self.retry.fetch(&provider, &request, sink).await
    }

    /// Full query: serves repeats from `history`, otherwise fetches,
    /// parses, and records the result.
    pub async fn obtain_plans(
        &self,
        city: &str,
        history: &mut SessionHistory,
        sink: Option<&dyn StatusSink>,
    ) -> Result<PlanResult, PlanError> {
        if city.trim().is_empty() {
            return Err(PlanError::MissingInput);
        }
        let city = normalize_city(city);

        if let Some(cached) = history.lookup(&city) {
            tracing::info!(city = %city, "Serving plans from session history");
            let mut result = cached.clone();
            result.from_cache = true;
            return Ok(result);
        }

        let raw_text = self.fetch_plan_text(&city, sink).await?;
        let result = build_plan_result(&city, raw_text);
        tracing::info!(
            city = %city,
            entries = result.entries.len(),
            structured = result.is_structured(),
            "Plans fetched"
        );

        history.record(&city, result.clone());
        Ok(result)
    }
}
