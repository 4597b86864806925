//! # Metrics Module
//!
//! Prometheus metrics describing the run itself (not the audited sites).
//!
//! ## Sub-modules
//!
//! - `registry` - Metrics registry setup, registration and encoding
//! - `run_metrics` - Audit, cache, sample and push counters

pub mod registry;
pub mod run_metrics;

pub use registry::*;
pub use run_metrics::*;
