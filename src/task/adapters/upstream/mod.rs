//! Upstream task-tracker normalization adapter.
//!
//! Third-party trackers deliver loosely-typed records: nested status
//! and priority objects, string-or-number timestamps, string-or-object
//! tags. This adapter owns the duck-typed access and maps every record
//! into the canonical [`crate::task::domain::Task`] shape so that no
//! optional or ambiguous field leaks into the planner.

mod normalize;
mod record;

pub use normalize::{normalize, normalize_all};
pub use record::{
    RawMillis, UpstreamDependency, UpstreamPriority, UpstreamStatus, UpstreamTag, UpstreamTask,
    UpstreamTasksResponse,
};
