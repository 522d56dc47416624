//! Thread-safe in-memory task store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use thiserror::Error;

use crate::task::{
    domain::{EstimateMinutes, Progress, Task, TaskDomainError, TaskId, TaskPriority, TaskStatus},
    ports::{TaskSource, TaskSourceError, TaskSourceResult},
};

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors returned by the in-memory store.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    /// A record with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    Duplicate(TaskId),

    /// The record was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// Domain validation failed while building a record.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),

    /// The store lock was poisoned by a panicking writer.
    #[error("task store lock poisoned")]
    LockPoisoned,
}

/// Input payload for creating a task record in the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
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

impl TaskDraft {
    /// Creates a draft with the given title and defaults elsewhere.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            status: TaskStatus::Todo,
            priority: TaskPriority::default(),
            due: None,
            estimate: None,
            deps: Vec::new(),
            tags: Vec::new(),
            progress: None,
            parent_id: None,
        }
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

    fn build(self, id: TaskId) -> Result<Task, TaskDomainError> {
        let mut task = Task::new(id, self.title)?
            .with_status(self.status)
            .with_priority(self.priority)
            .with_deps(self.deps)
            .with_tags(self.tags);
        if let Some(due) = self.due {
            task = task.with_due(due);
        }
        if let Some(estimate) = self.estimate {
            task = task.with_estimate(estimate);
        }
        if let Some(progress) = self.progress {
            task = task.with_progress(progress);
        }
        if let Some(parent_id) = self.parent_id {
            task = task.with_parent(parent_id);
        }
        Ok(task)
    }
}

/// Stored record envelope with lifecycle timestamps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredTask {
    task: Task,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl StoredTask {
    /// Returns the task record.
    #[must_use]
    pub const fn task(&self) -> &Task {
        &self.task
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest modification timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

#[derive(Debug, Default)]
struct StoreState {
    records: HashMap<TaskId, StoredTask>,
    order: Vec<TaskId>,
}

/// Thread-safe in-memory task store.
///
/// Snapshots preserve insertion order, satisfying the ordered-sequence
/// input contract of the planning pipeline.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskStore {
    state: Arc<RwLock<StoreState>>,
}

impl InMemoryTaskStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a record from a draft, assigning a fresh identifier.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Domain`] when the draft fails validation.
    pub fn create(&self, draft: TaskDraft, clock: &impl Clock) -> StoreResult<Task> {
        let task = draft.build(TaskId::generate())?;
        self.insert(task.clone(), clock)?;
        Ok(task)
    }

    /// Inserts an externally-built record under its own identifier.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Duplicate`] when the identifier is already
    /// present.
    pub fn insert(&self, task: Task, clock: &impl Clock) -> StoreResult<()> {
        let mut state = self.state.write().map_err(|_| StoreError::LockPoisoned)?;
        if state.records.contains_key(task.id()) {
            return Err(StoreError::Duplicate(task.id().clone()));
        }
        let now = clock.utc();
        let id = task.id().clone();
        state.order.push(id.clone());
        state.records.insert(
            id,
            StoredTask {
                task,
                created_at: now,
                updated_at: now,
            },
        );
        Ok(())
    }

    /// Replaces an existing record, preserving its creation timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] when the record does not exist.
    pub fn update(&self, task: Task, clock: &impl Clock) -> StoreResult<StoredTask> {
        let mut state = self.state.write().map_err(|_| StoreError::LockPoisoned)?;
        let record = state
            .records
            .get_mut(task.id())
            .ok_or_else(|| StoreError::NotFound(task.id().clone()))?;
        record.task = task;
        record.updated_at = clock.utc();
        Ok(record.clone())
    }

    /// Removes a record.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] when the record does not exist.
    pub fn remove(&self, id: &TaskId) -> StoreResult<()> {
        let mut state = self.state.write().map_err(|_| StoreError::LockPoisoned)?;
        if state.records.remove(id).is_none() {
            return Err(StoreError::NotFound(id.clone()));
        }
        state.order.retain(|ordered| ordered != id);
        Ok(())
    }

    /// Returns a record by identifier, or `None` when absent.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::LockPoisoned`] when the store lock is
    /// poisoned.
    pub fn get(&self, id: &TaskId) -> StoreResult<Option<StoredTask>> {
        let state = self.state.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(state.records.get(id).cloned())
    }

    /// Returns all records in insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::LockPoisoned`] when the store lock is
    /// poisoned.
    pub fn list(&self) -> StoreResult<Vec<StoredTask>> {
        let state = self.state.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(state
            .order
            .iter()
            .filter_map(|id| state.records.get(id).cloned())
            .collect())
    }
}

#[async_trait]
impl TaskSource for InMemoryTaskStore {
    async fn snapshot(&self) -> TaskSourceResult<Vec<Task>> {
        let records = self.list().map_err(TaskSourceError::unavailable)?;
        Ok(records.into_iter().map(|record| record.task).collect())
    }
}
