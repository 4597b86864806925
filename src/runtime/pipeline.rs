//! # Pipeline
//!
//! The whole run: for each URL in order produce a report and extract its
//! samples, then push the combined batch once.
//!
//! Any audit, extraction or push failure aborts the run. Nothing is pushed
//! unless every URL produced its samples.

use crate::audit::{CachingProducer, LighthouseRunner, ReportCache, ReportProducer};
use crate::config::RunConfig;
use crate::extract::{extract_samples, ExtractionRules, Sample};
use crate::observability;
use crate::pushgateway::{PushSummary, PushgatewayClient};
use anyhow::{Context, Result};
use tracing::{debug, info, info_span, Instrument};

/// Build the report producer for `config`: the runner, behind the cache when enabled
pub fn build_producer(config: &RunConfig) -> Box<dyn ReportProducer> {
    let runner = LighthouseRunner::new(&config.audit);
    match &config.cache_dir {
        Some(dir) => {
            info!("Report cache enabled at {}", dir.display());
            Box::new(CachingProducer::new(runner, ReportCache::new(dir)))
        }
        None => Box::new(runner),
    }
}

/// Run the configured audits and push the results
///
/// # Errors
///
/// Returns the first fatal error: invalid Pushgateway URL, failed audit,
/// malformed report or rejected push.
pub async fn run(config: &RunConfig) -> Result<PushSummary> {
    let pusher = PushgatewayClient::new(&config.pushgateway_url, config.push_timeout)?;
    let producer = build_producer(config);
    let rules = ExtractionRules::new(config.skipped_categories.iter().cloned());
    info!("Skipping categories: {}", rules.skipped_categories().join(", "));

    let summary = run_with(producer.as_ref(), &pusher, &config.urls, &rules).await?;

    println!("Pushed {} results to {}", summary.samples, pusher.url());
    for line in &summary.preview {
        println!("  {line}");
    }
    if summary.samples > summary.preview.len() {
        println!("  …");
    }

    log_run_metrics();
    Ok(summary)
}

/// Audit `urls` with `producer` and push everything with `pusher`
///
/// # Errors
///
/// See [`run`].
pub async fn run_with(
    producer: &dyn ReportProducer,
    pusher: &PushgatewayClient,
    urls: &[String],
    rules: &ExtractionRules,
) -> Result<PushSummary> {
    let mut samples: Vec<Sample> = Vec::new();

    for url in urls {
        println!("Launching lighthouse for {url}…");
        let extracted = audit_url(producer, url, rules)
            .instrument(info_span!("audit", url = %url))
            .await?;
        samples.extend(extracted);
    }

    pusher
        .push(&samples)
        .await
        .with_context(|| format!("Failed to push {} samples", samples.len()))
}

async fn audit_url(
    producer: &dyn ReportProducer,
    url: &str,
    rules: &ExtractionRules,
) -> Result<Vec<Sample>> {
    let audited = producer
        .produce(url)
        .await
        .with_context(|| format!("Failed to audit {url}"))?;

    if audited.report.requested_url != url {
        debug!(
            "Report for {} was requested as {}; samples use the report's URL",
            url, audited.report.requested_url
        );
    }

    let samples = extract_samples(&audited.report, rules)
        .with_context(|| format!("Failed to extract metrics for {url}"))?;
    observability::metrics::add_samples_extracted(samples.len());
    info!("Extracted {} samples", samples.len());
    Ok(samples)
}

fn log_run_metrics() {
    let summary = observability::metrics::run_summary();
    info!(
        "Run summary: audits={} audit_errors={} cache_hits={} cache_misses={} cache_errors={} samples_extracted={} samples_pushed={} push_errors={}",
        summary.audits,
        summary.audit_errors,
        summary.cache_hits,
        summary.cache_misses,
        summary.cache_errors,
        summary.samples_extracted,
        summary.samples_pushed,
        summary.push_errors
    );
    match observability::metrics::render_registry() {
        Ok(text) => debug!("Run metrics:\n{}", text),
        Err(e) => debug!("Run metrics unavailable: {}", e),
    }
}
