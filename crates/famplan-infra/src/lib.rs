//! Infrastructure layer for Famplan.
//!
//! Contains implementations of the ports defined in `famplan-core`: the
//! Hugging Face router chat-completion client, the token sources (secrets
//! file and environment), and the configuration file loader.

pub mod config;
pub mod llm;
pub mod secret;
