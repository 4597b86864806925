//! # Run Configuration
//!
//! Resolved and validated settings for one invocation, built from the CLI.
//! All settings have defaults in [`crate::constants`].

use crate::cli::Cli;
use crate::constants::{DEFAULT_LIGHTHOUSE_BIN, DEFAULT_PUSHGATEWAY_URL, DEFAULT_SKIPPED_CATEGORIES};
use anyhow::{bail, Context, Result};
use std::path::PathBuf;
use std::time::Duration;

/// How the audit tool is invoked
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditConfig {
    /// Executable name or path
    pub lighthouse_bin: String,
    /// Extra Chrome flags, appended after `--headless`
    pub chrome_flags: String,
    /// Use the desktop preset
    pub desktop: bool,
    /// Kill the tool after this long; `None` waits indefinitely
    pub timeout: Option<Duration>,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            lighthouse_bin: DEFAULT_LIGHTHOUSE_BIN.to_string(),
            chrome_flags: String::new(),
            desktop: false,
            timeout: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// URLs in processing order
    pub urls: Vec<String>,
    pub pushgateway_url: String,
    pub audit: AuditConfig,
    /// Cache directory, `None` when caching is disabled
    pub cache_dir: Option<PathBuf>,
    pub skipped_categories: Vec<String>,
    /// Timeout for the Pushgateway request; `None` waits indefinitely
    pub push_timeout: Option<Duration>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            urls: Vec::new(),
            pushgateway_url: DEFAULT_PUSHGATEWAY_URL.to_string(),
            audit: AuditConfig::default(),
            cache_dir: None,
            skipped_categories: default_skipped_categories(),
            push_timeout: None,
        }
    }
}

impl TryFrom<Cli> for RunConfig {
    type Error = anyhow::Error;

    fn try_from(cli: Cli) -> Result<Self> {
        if cli.urls.is_empty() {
            bail!("At least one URL is required");
        }
        for url in &cli.urls {
            validate_url(url)?;
        }

        let skipped_categories = if cli.skip_categories.is_empty() {
            default_skipped_categories()
        } else {
            cli.skip_categories
        };

        Ok(Self {
            urls: cli.urls,
            pushgateway_url: cli.pushgateway,
            audit: AuditConfig {
                lighthouse_bin: cli.lighthouse_bin,
                chrome_flags: cli.chrome_flags,
                desktop: cli.desktop,
                timeout: cli.audit_timeout.map(Duration::from_secs),
            },
            cache_dir: cli.cache.then_some(cli.cache_dir),
            skipped_categories,
            push_timeout: cli.push_timeout.map(Duration::from_secs),
        })
    }
}

fn default_skipped_categories() -> Vec<String> {
    DEFAULT_SKIPPED_CATEGORIES
        .iter()
        .map(|c| (*c).to_string())
        .collect()
}

/// Audited URLs must be absolute http(s) URLs
fn validate_url(raw: &str) -> Result<()> {
    let url = url::Url::parse(raw).with_context(|| format!("Invalid URL to audit: {raw}"))?;
    if !matches!(url.scheme(), "http" | "https") {
        bail!("Invalid URL to audit: {raw} (only http and https are supported)");
    }
    Ok(())
}
