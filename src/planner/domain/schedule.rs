//! Greedy single-day scheduling of focus blocks.

use super::filter::due_order;
use crate::task::domain::{Task, TaskId};
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use std::collections::HashSet;

/// Block length substituted for tasks without a time estimate.
pub const DEFAULT_BLOCK_MINUTES: u32 = 60;

/// Sort sentinel placing unestimated tasks after estimated ones.
const UNESTIMATED_SORT_MINUTES: u32 = 9999;

/// One scheduled, time-bounded assignment of a single task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FocusBlock {
    task: Task,
    from: DateTime<Utc>,
    to: DateTime<Utc>,
}

impl FocusBlock {
    /// Returns the scheduled task.
    #[must_use]
    pub const fn task(&self) -> &Task {
        &self.task
    }

    /// Returns the block start.
    #[must_use]
    pub const fn from(&self) -> DateTime<Utc> {
        self.from
    }

    /// Returns the block end.
    #[must_use]
    pub const fn to(&self) -> DateTime<Utc> {
        self.to
    }

    /// Returns the block length in whole minutes.
    #[must_use]
    pub fn minutes(&self) -> i64 {
        (self.to - self.from).num_minutes().max(0)
    }
}

/// Derived totals over a day plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PlanSummary {
    /// Sum of block lengths in minutes.
    pub total_minutes: i64,
    /// Start of the first block.
    pub start: DateTime<Utc>,
    /// End of the last block.
    pub end: DateTime<Utc>,
}

/// Ordered, non-overlapping focus blocks for one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
pub struct DayPlan {
    blocks: Vec<FocusBlock>,
}

impl DayPlan {
    /// Returns the blocks in schedule order.
    #[must_use]
    pub fn blocks(&self) -> &[FocusBlock] {
        &self.blocks
    }

    /// Returns `true` when nothing was scheduled.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Returns the identifiers of every scheduled task.
    #[must_use]
    pub fn scheduled_ids(&self) -> HashSet<TaskId> {
        self.blocks
            .iter()
            .map(|block| block.task.id().clone())
            .collect()
    }

    /// Returns the plan window and total minutes, or `None` when the
    /// plan is empty.
    #[must_use]
    pub fn summary(&self) -> Option<PlanSummary> {
        let first = self.blocks.first()?;
        let last = self.blocks.last()?;
        Some(PlanSummary {
            total_minutes: self.blocks.iter().map(FocusBlock::minutes).sum(),
            start: first.from,
            end: last.to,
        })
    }
}

/// Produces a greedy, dependency-aware plan of focus blocks.
///
/// Finished tasks never schedule. The remaining queue is sorted once by
/// the composite base key — due date (absent last), then priority rank,
/// then estimate (absent treated as a large sentinel) — after which the
/// loop repeatedly selects the first *ready* task: one whose every
/// dependency id has already been scheduled in this pass. Readiness
/// gates selection before the base order is consulted, so a dependency
/// always precedes its dependents regardless of due dates.
///
/// Each block runs for the task's estimate, or
/// [`DEFAULT_BLOCK_MINUTES`] when absent, starting where the previous
/// block ended. When no remaining task is ready — a dependency cycle or
/// an id outside the candidate set — the loop stops and the remainder
/// is silently left unscheduled: a shorter-than-expected plan is a
/// valid result, not an error.
///
/// The iteration guard is sized to the queue length at entry, bounding
/// work on malformed dependency data without ever truncating a
/// legitimate queue.
#[must_use]
pub fn suggest_day_plan(candidates: &[Task], start: DateTime<Utc>) -> DayPlan {
    let mut queue: Vec<Task> = candidates
        .iter()
        .filter(|task| !task.is_done())
        .cloned()
        .collect();
    queue.sort_by(|a, b| {
        due_order(a, b)
            .then_with(|| a.priority().rank().cmp(&b.priority().rank()))
            .then_with(|| sort_estimate(a).cmp(&sort_estimate(b)))
    });

    let mut scheduled: Vec<FocusBlock> = Vec::with_capacity(queue.len());
    let mut done: HashSet<TaskId> = HashSet::with_capacity(queue.len());
    let mut cursor = start;
    let mut guard = queue.len();

    while !queue.is_empty() && guard > 0 {
        guard -= 1;
        let Some(position) = queue
            .iter()
            .position(|task| task.deps().iter().all(|dep| done.contains(dep)))
        else {
            break;
        };
        let task = queue.remove(position);
        let minutes = task
            .estimate()
            .map_or(DEFAULT_BLOCK_MINUTES, crate::task::domain::EstimateMinutes::minutes);
        let to = cursor + Duration::minutes(i64::from(minutes));
        done.insert(task.id().clone());
        scheduled.push(FocusBlock {
            task,
            from: cursor,
            to,
        });
        cursor = to;
    }

    DayPlan { blocks: scheduled }
}

/// Returns the estimate used by the base ordering, substituting the
/// sentinel for unestimated tasks.
fn sort_estimate(task: &Task) -> u32 {
    task.estimate()
        .map_or(UNESTIMATED_SORT_MINUTES, crate::task::domain::EstimateMinutes::minutes)
}
