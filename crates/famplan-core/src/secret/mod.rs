//! Token source abstractions and resolution.
//!
//! - `provider`: `SecretProvider` trait and its boxed wrapper
//! - `resolver`: `TokenResolver`, walks an ordered chain of providers

pub mod provider;
pub mod resolver;
