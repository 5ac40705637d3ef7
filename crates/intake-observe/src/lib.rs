//! Observability setup for Intake: the global tracing subscriber and the
//! optional OpenTelemetry stdout exporter.

pub mod tracing_setup;
