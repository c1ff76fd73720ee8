//! Token source implementations.
//!
//! - `file`: structured TOML secrets store (highest priority)
//! - `env`: process environment
//! - `dotenv`: `.env` file, consulted after the process environment
//! - `chain`: wires the sources together in priority order

pub mod chain;
pub mod dotenv;
pub mod env;
pub mod file;
