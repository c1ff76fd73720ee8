use thiserror::Error;

/// Errors raised by a plan query.
///
/// These are the only failures that leave the query pipeline; the caller
/// maps each to a user-visible message (see [`PlanError::user_message`]).
#[derive(Debug, Error)]
pub enum PlanError {
    #[error("no city given")]
    MissingInput,

    #[error("{0}")]
    Configuration(String),

    #[error("request failed after {attempts} attempts: {cause_kind}: {cause}")]
    Transport {
        attempts: u32,
        cause_kind: &'static str,
        cause: String,
    },

    #[error("the model returned an empty response")]
    EmptyResponse,
}

impl PlanError {
    /// Stable type name, used in machine-readable output.
    pub fn kind(&self) -> &'static str {
        match self {
            PlanError::MissingInput => "MissingInput",
            PlanError::Configuration(_) => "Configuration",
            PlanError::Transport { .. } => "Transport",
            PlanError::EmptyResponse => "EmptyResponse",
        }
    }

    /// Message suitable for the end user, including remediation hints.
    pub fn user_message(&self) -> String {
        match self {
            PlanError::MissingInput => "Please type the name of a city.".to_string(),
            PlanError::Configuration(detail) => format!(
                "Token not configured. {detail} Add it to the secrets file, \
                 export it in your shell or put it in .env."
            ),
            PlanError::Transport { attempts, .. } => format!(
                "Could not reach the inference API after {attempts} attempts. \
                 Check your internet connection and that your token is valid."
            ),
            PlanError::EmptyResponse => {
                "The model returned an empty response. Try again.".to_string()
            }
        }
    }

    /// Whether asking the user to retry manually makes sense.
    pub fn is_user_retryable(&self) -> bool {
        matches!(self, PlanError::Transport { .. } | PlanError::EmptyResponse)
    }
}

/// Errors from secret source lookups.
#[derive(Debug, Error)]
pub enum SecretError {
    #[error("secret source unavailable: {0}")]
    Unavailable(String),

    #[error("secret source read error: {0}")]
    Read(String),
}
