//! # Run Metrics
//!
//! Metrics for one invocation: audits, cache usage, extracted and pushed samples.

use crate::observability::metrics::registry::REGISTRY;
use anyhow::Result;
use prometheus::{Histogram, IntCounter};
use std::sync::LazyLock;

// Audit metrics
static AUDITS_TOTAL: LazyLock<IntCounter> = LazyLock::new(|| {
    IntCounter::new(
        "lighthouse_push_audits_total",
        "Total number of live Lighthouse audits started",
    )
    .expect("Failed to create AUDITS_TOTAL metric - this should never happen")
});

static AUDIT_ERRORS_TOTAL: LazyLock<IntCounter> = LazyLock::new(|| {
    IntCounter::new(
        "lighthouse_push_audit_errors_total",
        "Total number of failed Lighthouse audits",
    )
    .expect("Failed to create AUDIT_ERRORS_TOTAL metric - this should never happen")
});

static AUDIT_DURATION: LazyLock<Histogram> = LazyLock::new(|| {
    Histogram::with_opts(
        prometheus::HistogramOpts::new(
            "lighthouse_push_audit_duration_seconds",
            "Duration of Lighthouse runs in seconds",
        )
        .buckets(vec![5.0, 10.0, 20.0, 30.0, 60.0, 120.0, 300.0]),
    )
    .expect("Failed to create AUDIT_DURATION metric - this should never happen")
});

// Cache metrics
static CACHE_HITS_TOTAL: LazyLock<IntCounter> = LazyLock::new(|| {
    IntCounter::new(
        "lighthouse_push_cache_hits_total",
        "Total number of reports served from the cache",
    )
    .expect("Failed to create CACHE_HITS_TOTAL metric - this should never happen")
});

static CACHE_MISSES_TOTAL: LazyLock<IntCounter> = LazyLock::new(|| {
    IntCounter::new(
        "lighthouse_push_cache_misses_total",
        "Total number of URLs without a cached report",
    )
    .expect("Failed to create CACHE_MISSES_TOTAL metric - this should never happen")
});

static CACHE_ERRORS_TOTAL: LazyLock<IntCounter> = LazyLock::new(|| {
    IntCounter::new(
        "lighthouse_push_cache_errors_total",
        "Total number of unreadable, corrupt or unwritable cache entries",
    )
    .expect("Failed to create CACHE_ERRORS_TOTAL metric - this should never happen")
});

// Sample metrics
static SAMPLES_EXTRACTED_TOTAL: LazyLock<IntCounter> = LazyLock::new(|| {
    IntCounter::new(
        "lighthouse_push_samples_extracted_total",
        "Total number of samples extracted from reports",
    )
    .expect("Failed to create SAMPLES_EXTRACTED_TOTAL metric - this should never happen")
});

static SAMPLES_PUSHED_TOTAL: LazyLock<IntCounter> = LazyLock::new(|| {
    IntCounter::new(
        "lighthouse_push_samples_pushed_total",
        "Total number of samples accepted by the Pushgateway",
    )
    .expect("Failed to create SAMPLES_PUSHED_TOTAL metric - this should never happen")
});

static PUSH_ERRORS_TOTAL: LazyLock<IntCounter> = LazyLock::new(|| {
    IntCounter::new(
        "lighthouse_push_push_errors_total",
        "Total number of failed or rejected pushes",
    )
    .expect("Failed to create PUSH_ERRORS_TOTAL metric - this should never happen")
});

/// Register run metrics with the registry
pub(crate) fn register_run_metrics() -> Result<()> {
    REGISTRY.register(Box::new(AUDITS_TOTAL.clone()))?;
    REGISTRY.register(Box::new(AUDIT_ERRORS_TOTAL.clone()))?;
    REGISTRY.register(Box::new(AUDIT_DURATION.clone()))?;
    REGISTRY.register(Box::new(CACHE_HITS_TOTAL.clone()))?;
    REGISTRY.register(Box::new(CACHE_MISSES_TOTAL.clone()))?;
    REGISTRY.register(Box::new(CACHE_ERRORS_TOTAL.clone()))?;
    REGISTRY.register(Box::new(SAMPLES_EXTRACTED_TOTAL.clone()))?;
    REGISTRY.register(Box::new(SAMPLES_PUSHED_TOTAL.clone()))?;
    REGISTRY.register(Box::new(PUSH_ERRORS_TOTAL.clone()))?;
    Ok(())
}

pub fn increment_audits_total() {
    AUDITS_TOTAL.inc();
}

pub fn increment_audit_errors_total() {
    AUDIT_ERRORS_TOTAL.inc();
}

pub fn observe_audit_duration(duration: f64) {
    AUDIT_DURATION.observe(duration);
}

pub fn increment_cache_hits_total() {
    CACHE_HITS_TOTAL.inc();
}

pub fn increment_cache_misses_total() {
    CACHE_MISSES_TOTAL.inc();
}

pub fn increment_cache_errors_total() {
    CACHE_ERRORS_TOTAL.inc();
}

pub fn add_samples_extracted(count: usize) {
    SAMPLES_EXTRACTED_TOTAL.inc_by(count as u64);
}

pub fn add_samples_pushed(count: usize) {
    SAMPLES_PUSHED_TOTAL.inc_by(count as u64);
}

pub fn increment_push_errors_total() {
    PUSH_ERRORS_TOTAL.inc();
}

/// Point-in-time view of the run counters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub audits: u64,
    pub audit_errors: u64,
    pub cache_hits: u64,
    pub cache_misses: u64,
    pub cache_errors: u64,
    pub samples_extracted: u64,
    pub samples_pushed: u64,
    pub push_errors: u64,
}

pub fn run_summary() -> RunSummary {
    RunSummary {
        audits: AUDITS_TOTAL.get(),
        audit_errors: AUDIT_ERRORS_TOTAL.get(),
        cache_hits: CACHE_HITS_TOTAL.get(),
        cache_misses: CACHE_MISSES_TOTAL.get(),
        cache_errors: CACHE_ERRORS_TOTAL.get(),
        samples_extracted: SAMPLES_EXTRACTED_TOTAL.get(),
        samples_pushed: SAMPLES_PUSHED_TOTAL.get(),
        push_errors: PUSH_ERRORS_TOTAL.get(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Counters are process-wide and other tests bump them concurrently, so
    // these only check a lower bound.

    #[test]
    fn test_increment_audits_total() {
        let before = AUDITS_TOTAL.get();
        increment_audits_total();
        assert!(AUDITS_TOTAL.get() > before);
    }

    #[test]
    fn test_observe_audit_duration() {
        let before = AUDIT_DURATION.get_sample_count();
        observe_audit_duration(12.5);
        assert!(AUDIT_DURATION.get_sample_count() > before);
    }

    #[test]
    fn test_add_samples_extracted() {
        let before = SAMPLES_EXTRACTED_TOTAL.get();
        add_samples_extracted(7);
        assert!(SAMPLES_EXTRACTED_TOTAL.get() >= before + 7);
    }

    #[test]
    fn test_run_summary_reflects_counters() {
        let before = run_summary();
        increment_cache_hits_total();
        increment_cache_misses_total();
        increment_push_errors_total();
        let after = run_summary();
        assert!(after.cache_hits > before.cache_hits);
        assert!(after.cache_misses > before.cache_misses);
        assert!(after.push_errors > before.push_errors);
    }
}
