//! Source port supplying the task snapshot for one planning pass.

use crate::task::domain::Task;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task source operations.
pub type TaskSourceResult<T> = Result<T, TaskSourceError>;

/// Upstream task snapshot contract.
///
/// Implementations translate a third-party task-tracking format into
/// the canonical [`Task`] shape; field-by-field mapping (status and
/// priority normalization, duration-unit conversion, due-date parsing)
/// is the adapter's responsibility, never the planner's.
#[async_trait]
pub trait TaskSource: Send + Sync {
    /// Returns a fresh, ordered snapshot of the full task set.
    ///
    /// Every planning pass consumes exactly one snapshot; the planner
    /// treats it as immutable.
    ///
    /// # Errors
    ///
    /// Returns [`TaskSourceError::Unavailable`] when the upstream
    /// system cannot be reached or its payload cannot be normalized.
    async fn snapshot(&self) -> TaskSourceResult<Vec<Task>>;
}

/// Errors returned by task source implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskSourceError {
    /// The upstream system failed to produce a usable snapshot.
    #[error("task source unavailable: {0}")]
    Unavailable(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskSourceError {
    /// Wraps an upstream failure.
    pub fn unavailable(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Unavailable(Arc::new(err))
    }
}
