//! # Lighthouse Push
//!
//! Runs Lighthouse against a list of sites and pushes the resulting scores to
//! a Prometheus Pushgateway as gauges.
//!
//! ## Overview
//!
//! 1. **Audit** - run the `lighthouse` CLI per URL (or load a cached report)
//! 2. **Extract** - flatten each report into labeled samples
//! 3. **Push** - render all samples in the text exposition format and POST
//!    them once
//!
//! Any failure before the push aborts the run, so a partial batch is never
//! published.

pub mod audit;
pub mod cli;
pub mod config;
pub mod constants;
pub mod extract;
pub mod observability;
pub mod pushgateway;
pub mod runtime;
