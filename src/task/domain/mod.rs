//! Domain model for the canonical task record.
//!
//! The task domain models the normalized shape every upstream record is
//! mapped into before planning: an opaque identifier, workflow status,
//! priority, optional scheduling metadata, dependency edges, and an
//! optional parent reference establishing the milestone hierarchy.

mod error;
mod ids;
mod priority;
mod scalars;
mod status;
mod task;

pub use error::{ParseTaskPriorityError, ParseTaskStatusError, TaskDomainError};
pub use ids::TaskId;
pub use priority::TaskPriority;
pub use scalars::{EstimateMinutes, Progress};
pub use status::TaskStatus;
pub use task::Task;
