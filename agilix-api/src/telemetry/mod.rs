//! Agilix API Telemetry
//!
//! Structured JSON logging through `tracing-subscriber`.

pub mod tracer;

pub use tracer::{init_tracer, TelemetryConfig};
