//! Observability helpers.

pub mod tracing;
