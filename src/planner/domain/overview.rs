//! Snapshot-wide overview derivations.

use super::filter::due_order;
use crate::task::domain::{Progress, Task, TaskStatus};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// A task anchored on the delivery timeline by its due timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimelineEntry {
    task: Task,
    due: DateTime<Utc>,
}

impl TimelineEntry {
    /// Returns the task record.
    #[must_use]
    pub const fn task(&self) -> &Task {
        &self.task
    }

    /// Returns the due timestamp anchoring the entry.
    #[must_use]
    pub const fn due(&self) -> DateTime<Utc> {
        self.due
    }
}

/// Returns every task with a due timestamp, ascending by due date.
///
/// The sort is stable; tasks sharing a due timestamp keep snapshot
/// order.
#[must_use]
pub fn timeline(tasks: &[Task]) -> Vec<TimelineEntry> {
    let mut entries: Vec<TimelineEntry> = tasks
        .iter()
        .filter_map(|task| {
            task.due().map(|due| TimelineEntry {
                task: task.clone(),
                due,
            })
        })
        .collect();
    entries.sort_by(|a, b| a.due.cmp(&b.due));
    entries
}

/// Tasks sharing one workflow status, ordered by due date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusBucket {
    status: TaskStatus,
    tasks: Vec<Task>,
}

impl StatusBucket {
    /// Returns the bucket's workflow status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the bucket members, due date ascending, absent last.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }
}

/// The full snapshot grouped into workflow-ordered status buckets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusBoard {
    buckets: Vec<StatusBucket>,
}

impl StatusBoard {
    /// Returns all four buckets in workflow order, empty ones included.
    #[must_use]
    pub fn buckets(&self) -> &[StatusBucket] {
        &self.buckets
    }

    /// Returns the bucket for one status.
    #[must_use]
    pub fn bucket(&self, status: TaskStatus) -> Option<&StatusBucket> {
        self.buckets.iter().find(|bucket| bucket.status == status)
    }
}

/// Groups a snapshot into status buckets in workflow order.
#[must_use]
pub fn status_board(tasks: &[Task]) -> StatusBoard {
    let buckets = TaskStatus::WORKFLOW
        .into_iter()
        .map(|status| {
            let mut members: Vec<Task> = tasks
                .iter()
                .filter(|task| task.status() == status)
                .cloned()
                .collect();
            members.sort_by(|a, b| due_order(a, b));
            StatusBucket {
                status,
                tasks: members,
            }
        })
        .collect();
    StatusBoard { buckets }
}

/// Returns the rounded mean completion percentage over the snapshot.
///
/// Tasks without a recorded progress count as zero; an empty snapshot
/// reports zero.
#[must_use]
pub fn overall_progress(tasks: &[Task]) -> u8 {
    if tasks.is_empty() {
        return 0;
    }
    let sum: u64 = tasks
        .iter()
        .map(|task| u64::from(task.progress().unwrap_or(Progress::ZERO).percent()))
        .sum();
    let count = tasks.len() as u64;
    #[expect(
        clippy::integer_division,
        reason = "Round-half-up mean over percentages is exact in integers"
    )]
    let mean = (sum + count / 2) / count;
    u8::try_from(mean).unwrap_or(100)
}
