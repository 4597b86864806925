//! # Audit Error Types
//!
//! Errors raised while producing a report: running the audit tool and reading
//! or writing the report cache.

use std::path::PathBuf;
use std::process::ExitStatus;
use std::time::Duration;
use thiserror::Error;

/// Failure to produce a report for a URL
///
/// Every variant is fatal for the whole run.
#[derive(Debug, Error)]
pub enum AuditError {
    /// The audit tool could not be resolved on `PATH`
    #[error("audit tool '{program}' not found: {source}")]
    ToolNotFound {
        program: String,
        #[source]
        source: which::Error,
    },
    /// The process could not be started or waited on
    #[error("failed to run audit tool for {url}: {source}")]
    Spawn {
        url: String,
        #[source]
        source: std::io::Error,
    },
    /// The process did not finish within the configured timeout
    #[error("audit of {url} timed out after {}s", timeout.as_secs())]
    TimedOut { url: String, timeout: Duration },
    /// The process exited unsuccessfully
    #[error("audit tool exited with {status} for {url}: {stderr}")]
    Failed {
        url: String,
        status: ExitStatus,
        stderr: String,
    },
    /// Standard output was not valid UTF-8
    #[error("audit tool produced non-UTF-8 output for {url}: {source}")]
    NonUtf8Output {
        url: String,
        #[source]
        source: std::string::FromUtf8Error,
    },
    /// Standard output was not a valid report
    #[error("audit tool produced an invalid report for {url}: {source}")]
    InvalidReport {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Failure to use a cache entry
///
/// Never fatal: a read failure falls through to a live audit, a write failure
/// only loses the entry.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("failed to read cached report {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cached report {} is not a valid report: {source}", path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to write cached report {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
