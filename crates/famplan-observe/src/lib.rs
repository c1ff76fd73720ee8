//! Observability setup for Famplan: tracing subscriber and optional
//! OpenTelemetry span export.

pub mod tracing_setup;
