//! # Metric Extraction
//!
//! Flattens one report into an ordered list of samples:
//!
//! 1. `scrape_duration_seconds` from `timing.total`
//! 2. per retained category, in document order: `category_score`, then for
//!    every referenced audit its `audit_score` followed by any derived metrics
//!
//! Extraction is a pure function of the report and the rules.

use crate::audit::Report;
use crate::extract::rules::ExtractionRules;
use crate::extract::sample::{Labels, MetricName, Sample, LABEL_AUDIT_ID, LABEL_CATEGORY};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExtractError {
    /// A category references an audit id that is not in `audits`
    #[error("report for {instance} references audit '{audit_id}' in category '{category}', but the audit is missing")]
    MissingAudit {
        instance: String,
        category: String,
        audit_id: String,
    },
}

/// Extract the samples for one report
///
/// # Errors
///
/// Returns [`ExtractError::MissingAudit`] if a retained category references an
/// audit that the report does not contain.
pub fn extract_samples(report: &Report, rules: &ExtractionRules) -> Result<Vec<Sample>, ExtractError> {
    let instance = report.requested_url.as_str();
    let mut samples = vec![Sample::new(
        MetricName::ScrapeDurationSeconds,
        Labels::instance(instance),
        report.timing.total,
    )];

    for (category_id, category) in report.categories.iter() {
        if rules.is_skipped(category_id) {
            debug!("Skipping category {} for {}", category_id, instance);
            continue;
        }

        let category_labels = Labels::instance(instance).with(LABEL_CATEGORY, category_id);
        match category.score {
            Some(score) => samples.push(Sample::new(
                MetricName::CategoryScore,
                category_labels.clone(),
                score,
            )),
            None => debug!("Category {} has no score for {}", category_id, instance),
        }

        for audit_ref in &category.audit_refs {
            let audit_id = audit_ref.id.as_str();
            let audit = report
                .audit(audit_id)
                .ok_or_else(|| ExtractError::MissingAudit {
                    instance: instance.to_string(),
                    category: category_id.to_string(),
                    audit_id: audit_id.to_string(),
                })?;

            if let Some(score) = audit.score {
                samples.push(Sample::new(
                    MetricName::AuditScore,
                    category_labels.clone().with(LABEL_AUDIT_ID, audit_id),
                    score,
                ));
            }

            for derived in rules.derived_for(audit_id) {
                match audit.numeric_value {
                    Some(value) => samples.push(Sample::new(
                        derived.metric,
                        Labels::instance(instance),
                        value,
                    )),
                    None => debug!(
                        "Audit {} has no value for {} on {}",
                        audit_id, derived.metric, instance
                    ),
                }
            }
        }
    }

    debug!("Extracted {} samples for {}", samples.len(), instance);
    Ok(samples)
}
