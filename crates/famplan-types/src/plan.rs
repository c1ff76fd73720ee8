//! Plan types: parsed activity entries and the result of one city query.

use serde::{Deserialize, Serialize};

/// One recommended activity parsed from the model reply.
///
/// `ordinal` is kept exactly as it appeared in the text; entries are neither
/// renumbered nor deduplicated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanEntry {
    pub ordinal: String,
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost_label: Option<String>,
}

/// Outcome of a plan query for one city.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanResult {
    /// Normalized city name (trimmed, title-cased).
    pub city: String,
    /// The model reply as received, trimmed.
    pub raw_text: String,
    /// Structured entries, empty when the reply could not be parsed.
    pub entries: Vec<PlanEntry>,
    /// Whether this result was served from the session history.
    #[serde(default)]
    pub from_cache: bool,
}

impl PlanResult {
    /// False when the caller must fall back to displaying `raw_text`.
    pub fn is_structured(&self) -> bool {
        !self.entries.is_empty()
    }
}
