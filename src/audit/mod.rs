//! # Audit Module
//!
//! Produces one parsed Lighthouse report per URL, either by running the tool
//! or by loading a cached report.
//!
//! ## Sub-modules
//!
//! - `report` - Report data model
//! - `runner` - Lighthouse subprocess execution
//! - `cache` - On-disk report cache keyed by URL
//! - `producer` - `ReportProducer` trait and the caching decorator
//! - `error` - Audit and cache error types

pub mod cache;
pub mod error;
pub mod producer;
pub mod report;
pub mod runner;

pub use cache::ReportCache;
pub use error::{AuditError, CacheError};
pub use producer::{AuditedReport, CachingProducer, ReportProducer};
pub use report::{Audit, AuditRef, Categories, Category, Report, Timing};
pub use runner::LighthouseRunner;
