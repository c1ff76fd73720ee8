//! The plan query pipeline.
//!
//! - `prompt`: builds the two-message conversation for a city
//! - `retry`: bounded retry loop around the provider call
//! - `parser`: extracts numbered entries from the reply text
//! - `cost`: best-effort cost label per entry
//! - `history`: in-memory per-session cache keyed by normalized city
//! - `service`: `PlanService`, the entry point wiring all of the above
//! - `status`: progress sink for callers that show status

pub mod cost;
pub mod history;
pub mod parser;
pub mod prompt;
pub mod retry;
pub mod service;
pub mod status;
