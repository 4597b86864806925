//! # Pushgateway Module
//!
//! Serializes samples to the text exposition format and pushes them.

pub mod client;
pub mod exposition;

pub use client::{PushError, PushSummary, PushgatewayClient};
pub use exposition::render;
