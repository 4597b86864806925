//! # Report Producers
//!
//! A producer turns a URL into a parsed report. The live producer is
//! [`LighthouseRunner`](crate::audit::LighthouseRunner); [`CachingProducer`]
//! puts a [`ReportCache`] in front of any other producer.

use crate::audit::cache::ReportCache;
use crate::audit::error::AuditError;
use crate::audit::report::Report;
use crate::observability;
use async_trait::async_trait;
use tracing::{info, warn};

/// A parsed report together with the JSON text it was parsed from
#[derive(Debug, Clone)]
pub struct AuditedReport {
    pub report: Report,
    pub raw_json: String,
}

impl AuditedReport {
    /// Parse the tool's output for `url`
    ///
    /// # Errors
    ///
    /// Returns [`AuditError::InvalidReport`] if `raw_json` is not a report.
    pub fn parse(url: &str, raw_json: String) -> Result<Self, AuditError> {
        let report = Report::from_json(&raw_json).map_err(|source| AuditError::InvalidReport {
            url: url.to_string(),
            source,
        })?;
        Ok(Self { report, raw_json })
    }
}

/// Given a URL, return a report or fail
#[async_trait]
pub trait ReportProducer: Send + Sync {
    async fn produce(&self, url: &str) -> Result<AuditedReport, AuditError>;
}

/// Serves reports from the cache, falling back to `inner` and caching its result
#[derive(Debug)]
pub struct CachingProducer<P> {
    inner: P,
    cache: ReportCache,
}

impl<P: ReportProducer> CachingProducer<P> {
    pub fn new(inner: P, cache: ReportCache) -> Self {
        Self { inner, cache }
    }

    pub fn cache(&self) -> &ReportCache {
        &self.cache
    }
}

#[async_trait]
impl<P: ReportProducer> ReportProducer for CachingProducer<P> {
    async fn produce(&self, url: &str) -> Result<AuditedReport, AuditError> {
        match self.cache.load(url) {
            Ok(Some(cached)) => {
                info!("Using cached report for {}", url);
                observability::metrics::increment_cache_hits_total();
                return Ok(cached);
            }
            Ok(None) => {
                observability::metrics::increment_cache_misses_total();
            }
            Err(e) => {
                warn!("Ignoring cached report for {}: {}", url, e);
                observability::metrics::increment_cache_errors_total();
            }
        }

        let audited = self.inner.produce(url).await?;

        if let Err(e) = self.cache.store(url, &audited.raw_json) {
            warn!("Report for {} was not cached: {}", url, e);
            observability::metrics::increment_cache_errors_total();
        }

        Ok(audited)
    }
}
