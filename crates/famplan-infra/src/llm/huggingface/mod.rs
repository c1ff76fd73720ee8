//! Hugging Face inference router provider.

pub mod client;
pub mod types;

pub use client::HuggingFaceProvider;
