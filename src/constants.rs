//! # Constants
//!
//! Default values shared by the CLI, the audit runner and the Pushgateway client.

/// Default Pushgateway push URL (job-scoped)
pub const DEFAULT_PUSHGATEWAY_URL: &str = "http://prometheus:9091/metrics/job/lighthouse";

/// Default audit tool executable, resolved through `PATH`
pub const DEFAULT_LIGHTHOUSE_BIN: &str = "lighthouse";

/// Default directory for cached reports
pub const DEFAULT_CACHE_DIR: &str = ".lighthouse-cache";

/// Suffix appended to every cache entry
pub const CACHE_FILE_SUFFIX: &str = ".json";

/// Longest cache file name, in bytes, before falling back to a hashed name
pub const MAX_CACHE_FILE_NAME_LEN: usize = 255;

/// Flags passed to every Lighthouse invocation, before the browser flags
/// - `--quiet`: no progress output on stderr
/// - `--no-enable-error-reporting`: never prompt for telemetry consent
/// - `--output=json`: report on stdout as JSON
pub const LIGHTHOUSE_BASE_ARGS: &[&str] = &["--quiet", "--no-enable-error-reporting", "--output=json"];

/// Lighthouse flag carrying the space-joined Chrome flags
pub const LIGHTHOUSE_CHROME_FLAGS_ARG: &str = "--chrome-flags";

/// Lighthouse flag selecting desktop emulation
pub const LIGHTHOUSE_DESKTOP_ARG: &str = "--preset=desktop";

/// Chrome flag that is always part of `--chrome-flags`
pub const CHROME_HEADLESS_FLAG: &str = "--headless";

/// Categories skipped when no `--skip-category` is given
pub const DEFAULT_SKIPPED_CATEGORIES: &[&str] = &["accessibility", "pwa"];

/// Content type of the exposition text body
pub const EXPOSITION_CONTENT_TYPE: &str = "text/plain; version=0.0.4";

/// Number of rendered sample lines echoed after a successful push
pub const PUSH_PREVIEW_LINES: usize = 3;

/// Default tracing filter when `RUST_LOG` is unset
pub const DEFAULT_LOG_FILTER: &str = "lighthouse_push=info";

/// Tracing filter used with `--verbose` when `RUST_LOG` is unset
pub const VERBOSE_LOG_FILTER: &str = "lighthouse_push=debug";
