//! # Command Line
//!
//! ```bash
//! # Audit two sites and push to the default Pushgateway
//! lighthouse-push https://example.com https://example.org
//!
//! # Route Chrome through a proxy and push somewhere else
//! lighthouse-push --chrome-flags="--proxy-server=socks5://localhost:1080" \
//!     --pushgateway http://localhost:9091/metrics/job/lighthouse https://example.com
//!
//! # Reuse reports from .lighthouse-cache/ when present
//! lighthouse-push --cache https://example.com
//! ```

use crate::constants::{DEFAULT_CACHE_DIR, DEFAULT_LIGHTHOUSE_BIN, DEFAULT_PUSHGATEWAY_URL};
use clap::Parser;
use std::path::PathBuf;

/// Run Lighthouse on one or more sites and push the results to a Prometheus Pushgateway
#[derive(Debug, Parser)]
#[command(name = "lighthouse-push", version)]
#[command(about = "Run Lighthouse on one or more sites and push the results to a Prometheus Pushgateway", long_about = None)]
pub struct Cli {
    /// Sites to audit, in order
    #[arg(value_name = "URL", required = true)]
    pub urls: Vec<String>,

    /// Extra flags passed to Chrome, e.g. --chrome-flags="--proxy-server=socks5://localhost:1080"
    #[arg(long, value_name = "FLAGS", default_value = "", allow_hyphen_values = true)]
    pub chrome_flags: String,

    /// Pushgateway URL the results are POSTed to
    #[arg(long, value_name = "URL", default_value = DEFAULT_PUSHGATEWAY_URL)]
    pub pushgateway: String,

    /// Load reports from the cache when present and cache fresh ones
    #[arg(long)]
    pub cache: bool,

    /// Directory holding cached reports
    #[arg(long, value_name = "DIR", default_value = DEFAULT_CACHE_DIR)]
    pub cache_dir: PathBuf,

    /// Lighthouse executable
    #[arg(long, value_name = "PROGRAM", default_value = DEFAULT_LIGHTHOUSE_BIN)]
    pub lighthouse_bin: String,

    /// Audit with the desktop preset instead of mobile emulation
    #[arg(long)]
    pub desktop: bool,

    /// Category to leave out (repeatable). Replaces the default: accessibility, pwa
    #[arg(long = "skip-category", value_name = "CATEGORY")]
    pub skip_categories: Vec<String>,

    /// Give up on a Lighthouse run after this many seconds
    #[arg(long, value_name = "SECONDS")]
    pub audit_timeout: Option<u64>,

    /// Give up on the push after this many seconds
    #[arg(long, value_name = "SECONDS")]
    pub push_timeout: Option<u64>,

    /// Debug logging (ignored when RUST_LOG is set)
    #[arg(short, long)]
    pub verbose: bool,
}
