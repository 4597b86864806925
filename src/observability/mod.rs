//! # Observability
//!
//! Self-instrumentation of a run. Logging goes through `tracing`; the
//! subscriber is installed in [`crate::runtime::initialization`].

pub mod metrics;
