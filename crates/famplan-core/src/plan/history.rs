//! Session history: an in-memory cache of plan results keyed by city.
//!
//! Lives for one session (created by the caller at session start, dropped at
//! session end). No capacity limit, no TTL, no eviction.

use famplan_types::plan::PlanResult;

/// Normalize a raw city name for use as a cache key.
///
/// Trims, collapses inner whitespace, and title-cases: the first letter of
/// every alphabetic run is upper-cased, the rest lower-cased
/// (`"  san   SEBASTIÁN "` -> `"San Sebastián"`).
pub fn normalize_city(raw: &str) -> String {
    let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");

    let mut out = String::with_capacity(collapsed.len());
    let mut prev_alpha = false;
    for c in collapsed.chars() {
        if c.is_alphabetic() {
            if prev_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(c);
            prev_alpha = false;
        }
    }
    out
}

/// One cached query.
#[derive(Debug, Clone)]
pub struct SessionHistoryEntry {
    pub city: String,
    pub result: PlanResult,
}

/// Per-session cache of successful queries.
///
/// `record` appends unconditionally; callers keep at most one entry per
/// normalized city by calling `lookup` first.
#[derive(Debug, Default)]
pub struct SessionHistory {
    entries: Vec<SessionHistoryEntry>,
}

impl SessionHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Exact match on the normalized city, first match wins.
    pub fn lookup(&self, city: &str) -> Option<&PlanResult> {
        let key = normalize_city(city);
        self.entries
            .iter()
            .find(|entry| entry.city == key)
            .map(|entry| &entry.result)
    }

    pub fn record(&mut self, city: &str, result: PlanResult) {
        self.entries.push(SessionHistoryEntry {
            city: normalize_city(city),
            result,
        });
    }

    /// Cached cities in insertion order.
    pub fn cities(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.city.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
