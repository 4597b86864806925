//! # Exposition Text Rendering
//!
//! Renders samples in the Prometheus text exposition format:
//!
//! ```text
//! # TYPE scrape_duration_seconds gauge
//! ...
//! audit_score{instance="https://example.com",category="performance",id="speed-index"} 0.8
//! ```
//!
//! The payload starts with one `# TYPE` line per known metric and ends with
//! exactly one newline; the Pushgateway rejects a body without it.

use crate::extract::{MetricName, Sample};
use std::borrow::Cow;

/// `# TYPE` lines for every known metric, in header order
pub fn header_lines() -> impl Iterator<Item = String> {
    MetricName::ALL
        .into_iter()
        .map(|metric| format!("# TYPE {metric} gauge"))
}

/// Render one sample as `name{k="v",...} value`
pub fn render_sample(sample: &Sample) -> String {
    let mut line = String::from(sample.metric().as_str());
    if !sample.labels().is_empty() {
        line.push('{');
        for (i, (key, value)) in sample.labels().iter().enumerate() {
            if i > 0 {
                line.push(',');
            }
            line.push_str(key);
            line.push_str("=\"");
            line.push_str(&escape_label_value(value));
            line.push('"');
        }
        line.push('}');
    }
    line.push(' ');
    line.push_str(&format_value(sample.value()));
    line
}

/// Render the full payload: headers, one line per sample, trailing newline
pub fn render(samples: &[Sample]) -> String {
    let mut lines: Vec<String> = header_lines().collect();
    lines.extend(samples.iter().map(render_sample));
    let mut body = lines.join("\n");
    body.push('\n');
    body
}

/// Escape a label value: backslash, double quote and line feed
pub fn escape_label_value(value: &str) -> Cow<'_, str> {
    if !value.contains(['\\', '"', '\n']) {
        return Cow::Borrowed(value);
    }

    let mut escaped = String::with_capacity(value.len() + 8);
    for c in value.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            other => escaped.push(other),
        }
    }
    Cow::Owned(escaped)
}

/// Format a sample value, spelling non-finite values the way Prometheus does
pub fn format_value(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value == f64::INFINITY {
        "+Inf".to_string()
    } else if value == f64::NEG_INFINITY {
        "-Inf".to_string()
    } else {
        value.to_string()
    }
}
