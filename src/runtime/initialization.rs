//! # Initialization
//!
//! Process setup before the first audit: rustls crypto provider, tracing
//! subscriber and metrics registration.

use crate::constants::{DEFAULT_LOG_FILTER, VERBOSE_LOG_FILTER};
use crate::observability;
use anyhow::{Context, Result};
use tracing::{debug, info};

/// Initialize the process runtime
///
/// This function handles:
/// - Tracing subscriber setup (stderr, `RUST_LOG` aware)
/// - rustls crypto provider setup
/// - Metrics registration
///
/// # Errors
///
/// Fails if a tracing subscriber is already installed or the metrics cannot
/// be registered.
pub fn initialize(verbose: bool) -> Result<()> {
    let default_filter = if verbose {
        VERBOSE_LOG_FILTER
    } else {
        DEFAULT_LOG_FILTER
    };
    // stdout is reserved for operator output; logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {e}"))?;

    // Required for rustls 0.23+ when no default provider is set via features.
    // An already installed provider is fine.
    if rustls::crypto::ring::default_provider()
        .install_default()
        .is_err()
    {
        debug!("rustls crypto provider already installed");
    }

    info!("Starting lighthouse-push v{}", env!("CARGO_PKG_VERSION"));

    observability::metrics::register_metrics().context("Failed to register run metrics")?;

    Ok(())
}
