//! # Runtime Module
//!
//! Process initialization and the audit-to-push pipeline.

pub mod initialization;
pub mod pipeline;

pub use initialization::*;
pub use pipeline::*;
