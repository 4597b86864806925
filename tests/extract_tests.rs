//! # Extraction Tests
//!
//! Report to exposition text, end to end, using a recorded Lighthouse report.
//!
//! These tests verify:
//! - Sample order and values for a full report
//! - Skipped categories never show up in the output
//! - One `audit_score` per retained (category, audit) pair
//! - Derived metrics appear only when the audit has a numeric value

use lighthouse_push::audit::Report;
use lighthouse_push::extract::{extract_samples, ExtractionRules, MetricName, Sample};
use lighthouse_push::pushgateway::render;

const FIXTURE: &str = include_str!("fixtures/lighthouse_report.json");

const HEADERS: &str = "# TYPE scrape_duration_seconds gauge
# TYPE category_score gauge
# TYPE audit_score gauge
# TYPE first_meaningful_paint_ms gauge
# TYPE speed_index gauge
";

fn fixture() -> Report {
    Report::from_json(FIXTURE).unwrap()
}

fn count(samples: &[Sample], metric: MetricName) -> usize {
    samples.iter().filter(|s| s.metric() == metric).count()
}

#[test]
fn test_minimal_report_renders_exact_payload() {
    let report = Report::from_json(
        r#"{
            "requestedUrl": "https://example.com",
            "timing": {"total": 1234},
            "categories": {
                "performance": {"score": 0.9, "auditRefs": [{"id": "speed-index"}]}
            },
            "audits": {
                "speed-index": {"score": 0.8, "numericValue": 1500}
            }
        }"#,
    )
    .unwrap();

    let samples = extract_samples(&report, &ExtractionRules::default()).unwrap();
    let expected = format!(
        "{HEADERS}\
scrape_duration_seconds{{instance=\"https://example.com\"}} 1234
category_score{{instance=\"https://example.com\",category=\"performance\"}} 0.9
audit_score{{instance=\"https://example.com\",category=\"performance\",id=\"speed-index\"}} 0.8
speed_index{{instance=\"https://example.com\"}} 1500
"
    );
    assert_eq!(render(&samples), expected);
}

#[test]
fn test_recorded_report_with_default_rules() {
    let samples = extract_samples(&fixture(), &ExtractionRules::default()).unwrap();
    let body = render(&samples);
    let lines: Vec<&str> = body.lines().skip(MetricName::ALL.len()).collect();

    assert_eq!(
        lines,
        vec![
            r#"scrape_duration_seconds{instance="https://example.com"} 10532.7"#,
            r#"category_score{instance="https://example.com",category="performance"} 0.87"#,
            r#"audit_score{instance="https://example.com",category="performance",id="first-meaningful-paint"} 0.94"#,
            r#"first_meaningful_paint_ms{instance="https://example.com"} 1823.5"#,
            r#"audit_score{instance="https://example.com",category="performance",id="speed-index"} 0.81"#,
            r#"speed_index{instance="https://example.com"} 3412"#,
            r#"audit_score{instance="https://example.com",category="performance",id="interactive"} 0.76"#,
            r#"category_score{instance="https://example.com",category="best-practices"} 0.93"#,
            r#"audit_score{instance="https://example.com",category="best-practices",id="uses-http2"} 1"#,
            r#"category_score{instance="https://example.com",category="seo"} 1"#,
            r#"audit_score{instance="https://example.com",category="seo",id="document-title"} 1"#,
            r#"audit_score{instance="https://example.com",category="seo",id="viewport"} 1"#,
        ]
    );
}

#[test]
fn test_skipped_categories_never_appear() {
    let rules = ExtractionRules::new(["performance", "seo"]);
    let samples = extract_samples(&fixture(), &rules).unwrap();

    for sample in &samples {
        let category = sample.labels().get("category");
        assert_ne!(category, Some("performance"));
        assert_ne!(category, Some("seo"));
    }
    let body = render(&samples);
    assert!(!body.contains("category=\"performance\""));
    assert!(!body.contains("category=\"seo\""));
    assert!(body.contains("category=\"accessibility\""));
    assert!(body.contains("category=\"pwa\""));
    // Derived metrics only come from audits of retained categories
    assert_eq!(count(&samples, MetricName::SpeedIndex), 0);
    assert_eq!(count(&samples, MetricName::FirstMeaningfulPaintMs), 0);
}

#[test]
fn test_one_audit_score_per_scored_audit_ref() {
    let report = fixture();
    let rules = ExtractionRules::new(Vec::<String>::new());
    let samples = extract_samples(&report, &rules).unwrap();

    let scored_refs: usize = report
        .categories
        .iter()
        .flat_map(|(_, category)| category.audit_refs.iter())
        .filter(|r| report.audit(&r.id).and_then(|a| a.score).is_some())
        .count();
    assert_eq!(count(&samples, MetricName::AuditScore), scored_refs);
    assert_eq!(count(&samples, MetricName::CategoryScore), report.categories.len());
    assert_eq!(count(&samples, MetricName::ScrapeDurationSeconds), 1);
}

#[test]
fn test_derived_metric_requires_numeric_value() {
    let report = Report::from_json(
        r#"{
            "requestedUrl": "https://example.org",
            "timing": {"total": 500},
            "categories": {
                "performance": {
                    "score": 0.5,
                    "auditRefs": [{"id": "speed-index"}, {"id": "first-meaningful-paint"}]
                }
            },
            "audits": {
                "speed-index": {"score": 0.4},
                "first-meaningful-paint": {"score": 0.6, "numericValue": 2100}
            }
        }"#,
    )
    .unwrap();

    let samples = extract_samples(&report, &ExtractionRules::default()).unwrap();
    assert_eq!(count(&samples, MetricName::SpeedIndex), 0);
    assert_eq!(count(&samples, MetricName::FirstMeaningfulPaintMs), 1);
    assert_eq!(count(&samples, MetricName::AuditScore), 2);
}

#[test]
fn test_extraction_is_idempotent() {
    let report = fixture();
    let rules = ExtractionRules::default();
    let first = render(&extract_samples(&report, &rules).unwrap());
    let second = render(&extract_samples(&report, &rules).unwrap());
    assert_eq!(first, second);
}

#[test]
fn test_payload_line_count() {
    let samples = extract_samples(&fixture(), &ExtractionRules::default()).unwrap();
    let body = render(&samples);
    assert!(body.ends_with('\n'));
    assert!(!body.ends_with("\n\n"));
    assert_eq!(body.lines().count(), MetricName::ALL.len() + samples.len());
}
