//! # Extract Module
//!
//! Maps a Lighthouse report to a flat sequence of metric samples.
//!
//! ## Sub-modules
//!
//! - `sample` - Metric names, label sets and samples
//! - `rules` - Skipped categories and derived-metric tables
//! - `extractor` - The report to samples flattening

pub mod extractor;
pub mod rules;
pub mod sample;

pub use extractor::{extract_samples, ExtractError};
pub use rules::{DerivedMetric, ExtractionRules, DEFAULT_DERIVED_METRICS};
pub use sample::{Labels, MetricName, Sample};
