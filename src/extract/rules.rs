//! # Extraction Rules
//!
//! Which categories are skipped and which audits produce extra metrics. Both
//! are plain tables, so adding a category or a derived metric is a data change.

use crate::constants::DEFAULT_SKIPPED_CATEGORIES;
use crate::extract::sample::MetricName;
use std::collections::HashSet;

/// An extra metric carrying the `numericValue` of one specific audit id
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DerivedMetric {
    pub audit_id: &'static str,
    pub metric: MetricName,
}

pub const DEFAULT_DERIVED_METRICS: &[DerivedMetric] = &[
    DerivedMetric {
        audit_id: "first-meaningful-paint",
        metric: MetricName::FirstMeaningfulPaintMs,
    },
    DerivedMetric {
        audit_id: "speed-index",
        metric: MetricName::SpeedIndex,
    },
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionRules {
    skipped_categories: HashSet<String>,
    derived: Vec<DerivedMetric>,
}

impl Default for ExtractionRules {
    fn default() -> Self {
        Self::new(DEFAULT_SKIPPED_CATEGORIES.iter().copied())
    }
}

impl ExtractionRules {
    /// Rules skipping `skipped_categories`, with the default derived metrics
    pub fn new<I, S>(skipped_categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            skipped_categories: skipped_categories.into_iter().map(Into::into).collect(),
            derived: DEFAULT_DERIVED_METRICS.to_vec(),
        }
    }

    pub fn is_skipped(&self, category_id: &str) -> bool {
        self.skipped_categories.contains(category_id)
    }

    /// Skipped category ids, sorted
    pub fn skipped_categories(&self) -> Vec<&str> {
        let mut skipped: Vec<&str> = self.skipped_categories.iter().map(String::as_str).collect();
        skipped.sort_unstable();
        skipped
    }

    /// Derived metrics triggered by `audit_id`
    pub fn derived_for<'a>(&'a self, audit_id: &'a str) -> impl Iterator<Item = &'a DerivedMetric> {
        self.derived.iter().filter(move |d| d.audit_id == audit_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rules() {
        let rules = ExtractionRules::default();
        assert!(rules.is_skipped("accessibility"));
        assert!(rules.is_skipped("pwa"));
        assert!(!rules.is_skipped("performance"));
        assert!(!rules.is_skipped("seo"));
    }

    #[test]
    fn test_custom_skip_list_replaces_default() {
        let rules = ExtractionRules::new(["seo"]);
        assert!(rules.is_skipped("seo"));
        assert!(!rules.is_skipped("accessibility"));
    }

    #[test]
    fn test_derived_lookup() {
        let rules = ExtractionRules::default();
        let derived: Vec<MetricName> = rules.derived_for("speed-index").map(|d| d.metric).collect();
        assert_eq!(derived, vec![MetricName::SpeedIndex]);
        assert_eq!(rules.derived_for("interactive").count(), 0);
    }

    #[test]
    fn test_skipped_categories_are_sorted() {
        let rules = ExtractionRules::new(["seo", "accessibility", "pwa"]);
        assert_eq!(rules.skipped_categories(), vec!["accessibility", "pwa", "seo"]);
        assert!(ExtractionRules::new(Vec::<String>::new()).skipped_categories().is_empty());
    }
}
