//! Canonical task record consumed by the planner.

use super::{EstimateMinutes, Progress, TaskDomainError, TaskId, TaskPriority, TaskStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Immutable snapshot of one externally-sourced task.
///
/// Records are produced fresh on every planning pass by an upstream
/// adapter; the planner never creates, mutates, or deletes them. A task
/// with no parent but with children is a milestone; a task with a
/// parent is grouped under that parent's bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    title: String,
    status: TaskStatus,
    priority: TaskPriority,
    due: Option<DateTime<Utc>>,
    estimate: Option<EstimateMinutes>,
    deps: Vec<TaskId>,
    tags: Vec<String>,
    progress: Option<Progress>,
    parent_id: Option<TaskId>,
}

impl Task {
    /// Creates a task with the required fields and defaults everywhere
    /// else: status `todo`, priority `medium`, no scheduling metadata.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] when the title is empty
    /// after trimming.
    pub fn new(id: TaskId, title: impl Into<String>) -> Result<Self, TaskDomainError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(TaskDomainError::EmptyTitle);
        }
        Ok(Self {
            id,
            title,
            status: TaskStatus::Todo,
            priority: TaskPriority::default(),
            due: None,
            estimate: None,
            deps: Vec::new(),
            tags: Vec::new(),
            progress: None,
            parent_id: None,
        })
    }

    /// Sets the workflow status.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    /// Sets the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the due timestamp.
    #[must_use]
    pub const fn with_due(mut self, due: DateTime<Utc>) -> Self {
        self.due = Some(due);
        self
    }

    /// Sets the time estimate.
    #[must_use]
    pub const fn with_estimate(mut self, estimate: EstimateMinutes) -> Self {
        self.estimate = Some(estimate);
        self
    }

    /// Sets the dependency edges.
    #[must_use]
    pub fn with_deps(mut self, deps: impl IntoIterator<Item = TaskId>) -> Self {
        self.deps = deps.into_iter().collect();
        self
    }

    /// Sets the free-text tags.
    #[must_use]
    pub fn with_tags(mut self, tags: impl IntoIterator<Item = String>) -> Self {
        self.tags = tags.into_iter().collect();
        self
    }

    /// Sets the advisory completion percentage.
    #[must_use]
    pub const fn with_progress(mut self, progress: Progress) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Sets the parent task reference.
    #[must_use]
    pub fn with_parent(mut self, parent_id: TaskId) -> Self {
        self.parent_id = Some(parent_id);
        self
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> &TaskId {
        &self.id
    }

    /// Returns the display title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the workflow status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> TaskPriority {
        self.priority
    }

    /// Returns the due timestamp, if any.
    #[must_use]
    pub const fn due(&self) -> Option<DateTime<Utc>> {
        self.due
    }

    /// Returns the time estimate, if any.
    #[must_use]
    pub const fn estimate(&self) -> Option<EstimateMinutes> {
        self.estimate
    }

    /// Returns the dependency edges.
    #[must_use]
    pub fn deps(&self) -> &[TaskId] {
        &self.deps
    }

    /// Returns the free-text tags.
    #[must_use]
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Returns the advisory completion percentage, if any.
    #[must_use]
    pub const fn progress(&self) -> Option<Progress> {
        self.progress
    }

    /// Returns the parent task reference, if any.
    #[must_use]
    pub const fn parent_id(&self) -> Option<&TaskId> {
        self.parent_id.as_ref()
    }

    /// Returns `true` when the task is finished.
    #[must_use]
    pub const fn is_done(&self) -> bool {
        self.status.is_done()
    }

    /// Returns `true` when the task is due strictly before `threshold`.
    ///
    /// Tasks without a due timestamp are never considered at risk.
    #[must_use]
    pub fn is_due_before(&self, threshold: DateTime<Utc>) -> bool {
        self.due.is_some_and(|due| due < threshold)
    }
}
