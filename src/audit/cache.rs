//! # Report Cache
//!
//! One file per URL holding the raw JSON emitted by the audit tool. The file
//! name is the form-urlencoded URL plus `.json`, so any URL maps to a single
//! flat, filesystem-safe name inside the cache directory.

use crate::audit::error::CacheError;
use crate::audit::producer::AuditedReport;
use crate::audit::report::Report;
use crate::constants::{CACHE_FILE_SUFFIX, MAX_CACHE_FILE_NAME_LEN};
use std::io::Write;
use std::path::PathBuf;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct ReportCache {
    dir: PathBuf,
}

impl ReportCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path of the cache entry for `url`
    pub fn entry_path(&self, url: &str) -> PathBuf {
        self.dir.join(cache_file_name(url))
    }

    /// Load the cached report for `url`
    ///
    /// Returns `Ok(None)` when there is no entry.
    ///
    /// # Errors
    ///
    /// Returns an error when the entry exists but cannot be read or parsed.
    pub fn load(&self, url: &str) -> Result<Option<AuditedReport>, CacheError> {
        let path = self.entry_path(url);
        let raw_json = match std::fs::read_to_string(&path) {
            Ok(raw_json) => raw_json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No cached report at {}", path.display());
                return Ok(None);
            }
            Err(source) => return Err(CacheError::Read { path, source }),
        };

        let report =
            Report::from_json(&raw_json).map_err(|source| CacheError::Corrupt { path, source })?;
        Ok(Some(AuditedReport { report, raw_json }))
    }

    /// Write the raw report for `url`, replacing any existing entry
    ///
    /// The entry is written to a temporary file in the cache directory and
    /// renamed into place, so readers never see a partial file.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or the file cannot
    /// be written.
    pub fn store(&self, url: &str, raw_json: &str) -> Result<PathBuf, CacheError> {
        let path = self.entry_path(url);
        let write_error = |source| CacheError::Write {
            path: path.clone(),
            source,
        };

        std::fs::create_dir_all(&self.dir).map_err(write_error)?;
        let mut file = tempfile::NamedTempFile::new_in(&self.dir).map_err(write_error)?;
        file.write_all(raw_json.as_bytes()).map_err(write_error)?;
        file.persist(&path).map_err(|e| write_error(e.error))?;

        debug!("Cached report for {} at {}", url, path.display());
        Ok(path)
    }
}

/// Cache file name for `url`
///
/// URLs whose encoded name would exceed the filesystem's name limit use the
/// hex MD5 of the URL instead. An encoded absolute URL always contains `%3A`,
/// so the two forms never collide.
pub fn cache_file_name(url: &str) -> String {
    let encoded: String = url::form_urlencoded::byte_serialize(url.as_bytes()).collect();
    if encoded.len() + CACHE_FILE_SUFFIX.len() <= MAX_CACHE_FILE_NAME_LEN {
        format!("{encoded}{CACHE_FILE_SUFFIX}")
    } else {
        format!("{:x}{CACHE_FILE_SUFFIX}", md5::compute(url.as_bytes()))
    }
}
