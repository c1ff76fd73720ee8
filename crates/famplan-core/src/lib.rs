//! Business logic and provider trait definitions for Famplan.
//!
//! This crate defines the "ports" (LLM and secret provider traits) that the
//! infrastructure layer implements, plus the planning pipeline itself. It
//! depends only on `famplan-types` -- never on `famplan-infra` or any
//! HTTP/filesystem crate.

pub mod llm;
pub mod plan;
pub mod secret;
