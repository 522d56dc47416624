//! Port contracts for task ingestion.
//!
//! Ports define infrastructure-agnostic interfaces used by planning
//! services.

pub mod source;

pub use source::{TaskSource, TaskSourceError, TaskSourceResult};
