//! Cost tagging for plan descriptions.
//!
//! Purely cosmetic: a missed or wrong label is never an error.

use std::sync::LazyLock;

use regex::Regex;

use famplan_types::plan::PlanEntry;

pub const FREE_LABEL: &str = "Free";
pub const LOW_COST_LABEL: &str = "Low-cost";

const FREE_MARKERS: &[&str] = &["gratuit", "gratis", "libre", "free"];
const LOW_COST_MARKERS: &[&str] = &["bajo coste", "bajo costo", "económic", "low cost", "low-cost"];

static PRICE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d+[.,]?\d*)\s*€|(\d+[.,]?\d*)\s*euros?")
        .expect("price pattern is a valid regex")
});

/// Classify a description into a coarse cost label.
///
/// Priority: free markers, then low-cost markers, then an explicit price
/// (`3€`, `2,50 €`, `4 euros`) rendered as `~<price>`.
pub fn classify_cost(description: &str) -> Option<String> {
    let lower = description.to_lowercase();

    if FREE_MARKERS.iter().any(|m| lower.contains(m)) {
        return Some(FREE_LABEL.to_string());
    }
    if LOW_COST_MARKERS.iter().any(|m| lower.contains(m)) {
        return Some(LOW_COST_LABEL.to_string());
    }

    PRICE_PATTERN
        .find(&lower)
        .map(|m| format!("~{}", m.as_str().trim()))
}

/// Fill in `cost_label` on every entry.
pub fn tag_entries(entries: &mut [PlanEntry]) {
    for entry in entries.iter_mut() {
        entry.cost_label = classify_cost(&entry.description);
    }
}
