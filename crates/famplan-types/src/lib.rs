//! Shared domain types for Famplan.
//!
//! This crate contains the types passed between the planning core, the
//! infrastructure adapters and the CLI: chat messages and completion
//! requests, parsed plan entries, configuration, and the error taxonomy.
//!
//! Zero infrastructure dependencies -- only serde and thiserror.

pub mod config;
pub mod error;
pub mod llm;
pub mod plan;
