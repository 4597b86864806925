//! # Metrics Registry
//!
//! Prometheus registry holding the run metrics.

use anyhow::{Context, Result};
use prometheus::{Encoder, Registry, TextEncoder};
use std::sync::LazyLock;

/// Global Prometheus metrics registry
pub(crate) static REGISTRY: LazyLock<Registry> = LazyLock::new(Registry::new);

/// Register all metrics with the Prometheus registry
///
/// Must be called at most once per process.
#[allow(
    clippy::missing_errors_doc,
    reason = "Error documentation is provided in doc comments"
)]
pub fn register_metrics() -> Result<()> {
    super::run_metrics::register_run_metrics()
}

/// Text exposition of everything registered in [`REGISTRY`]
///
/// # Errors
///
/// Returns an error if encoding fails.
pub fn render_registry() -> Result<String> {
    let mut buffer = Vec::new();
    TextEncoder::new()
        .encode(&REGISTRY.gather(), &mut buffer)
        .context("Failed to encode run metrics")?;
    String::from_utf8(buffer).context("Run metrics are not valid UTF-8")
}
