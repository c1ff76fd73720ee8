//! Line-oriented parser for numbered plan lists.
//!
//! Accepted line shapes:
//! - `1. **Title**: Description`
//! - `1. Title: Description`
//! - `1. Title - Description` (also en dash and em dash)
//!
//! Parsing is best effort. Malformed replies yield fewer entries or none;
//! an empty result means the caller shows the raw text instead.

use std::sync::LazyLock;

use regex::Regex;

use famplan_types::plan::PlanEntry;

// A bold title must close before the separator, so dashes inside
// `**Vitoria-Gasteiz**` stay in the title. Whitespace is `[ \t]` only; a
// match never spans lines.
static ENTRY_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?m)^(\d{1,2})\.[ \t]+(?:\*\*(.+?)\*\*[ \t]*(?::|[-\x{2013}\x{2014}])[ \t]*|(.+?)(?::[ \t]*|[ \t]*[-\x{2013}\x{2014}][ \t]*))(.+)$",
    )
    .expect("entry pattern is a valid regex")
});

/// Extract entries in source order. No sorting, no deduplication, no
/// check that ordinals run 1..10. Cost labels are left unset.
pub fn parse_plans(text: &str) -> Vec<PlanEntry> {
    ENTRY_PATTERN
        .captures_iter(text)
        .filter_map(|caps| {
            let title = caps.get(2).or_else(|| caps.get(3))?;
            Some(PlanEntry {
                ordinal: caps[1].to_string(),
                title: clean_title(title.as_str()),
                description: caps[4].trim().to_string(),
                cost_label: None,
            })
        })
        .collect()
}

fn clean_title(raw: &str) -> String {
    raw.trim()
        .trim_end_matches('*')
        .trim_start_matches('*')
        .trim()
        .to_string()
}
