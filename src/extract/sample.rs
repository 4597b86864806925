//! # Samples
//!
//! One `(metric name, label set, value)` unit of output data.

use std::fmt;

/// Every metric this tool can emit
///
/// The Pushgateway payload declares a `# TYPE` header for each of these,
/// whether or not the batch contains a sample for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricName {
    /// Total audit run time (`timing.total`, milliseconds)
    ScrapeDurationSeconds,
    CategoryScore,
    AuditScore,
    FirstMeaningfulPaintMs,
    SpeedIndex,
}

impl MetricName {
    /// All metric names, in header order
    pub const ALL: [MetricName; 5] = [
        MetricName::ScrapeDurationSeconds,
        MetricName::CategoryScore,
        MetricName::AuditScore,
        MetricName::FirstMeaningfulPaintMs,
        MetricName::SpeedIndex,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            MetricName::ScrapeDurationSeconds => "scrape_duration_seconds",
            MetricName::CategoryScore => "category_score",
            MetricName::AuditScore => "audit_score",
            MetricName::FirstMeaningfulPaintMs => "first_meaningful_paint_ms",
            MetricName::SpeedIndex => "speed_index",
        }
    }
}

impl fmt::Display for MetricName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub const LABEL_INSTANCE: &str = "instance";
pub const LABEL_CATEGORY: &str = "category";
pub const LABEL_AUDIT_ID: &str = "id";

/// Ordered label set; `instance` always comes first
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Labels(Vec<(&'static str, String)>);

impl Labels {
    pub fn instance(url: impl Into<String>) -> Self {
        Self(vec![(LABEL_INSTANCE, url.into())])
    }

    /// Append a label after the existing ones
    #[must_use]
    pub fn with(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.0.push((key, value.into()));
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.0.iter().map(|(k, v)| (*k, v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// An immutable sample
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    metric: MetricName,
    labels: Labels,
    value: f64,
}

impl Sample {
    pub fn new(metric: MetricName, labels: Labels, value: f64) -> Self {
        Self {
            metric,
            labels,
            value,
        }
    }

    pub fn metric(&self) -> MetricName {
        self.metric
    }

    pub fn labels(&self) -> &Labels {
        &self.labels
    }

    pub fn value(&self) -> f64 {
        self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_keep_insertion_order() {
        let labels = Labels::instance("https://example.com")
            .with(LABEL_CATEGORY, "performance")
            .with(LABEL_AUDIT_ID, "speed-index");

        let keys: Vec<&str> = labels.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["instance", "category", "id"]);
        assert_eq!(labels.get("category"), Some("performance"));
        assert_eq!(labels.get("event"), None);
    }

    #[test]
    fn test_metric_names_are_unique() {
        let mut names: Vec<&str> = MetricName::ALL.iter().map(|m| m.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), MetricName::ALL.len());
    }
}
