//! Per-milestone rollup statistics.

use super::hierarchy::TaskHierarchy;
use crate::task::domain::Task;
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use super::filter::AT_RISK_WINDOW_HOURS;

/// Aggregated statistics for one milestone.
///
/// Descendants are the milestone's direct children followed by each
/// child's subtasks, in snapshot encounter order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MilestoneRollup {
    milestone: Task,
    total: usize,
    done_count: usize,
    active_count: usize,
    progress_percent: u8,
    total_estimate_min: u32,
    risk_count: usize,
    next_due: Option<Task>,
}

impl MilestoneRollup {
    /// Returns the milestone task record.
    #[must_use]
    pub const fn milestone(&self) -> &Task {
        &self.milestone
    }

    /// Returns the descendant count.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.total
    }

    /// Returns the count of finished descendants.
    #[must_use]
    pub const fn done_count(&self) -> usize {
        self.done_count
    }

    /// Returns the count of unfinished descendants.
    #[must_use]
    pub const fn active_count(&self) -> usize {
        self.active_count
    }

    /// Returns the rounded completion percentage, zero when the
    /// milestone has no descendants.
    #[must_use]
    pub const fn progress_percent(&self) -> u8 {
        self.progress_percent
    }

    /// Returns the summed time estimate in minutes, absent estimates
    /// counting as zero.
    #[must_use]
    pub const fn total_estimate_min(&self) -> u32 {
        self.total_estimate_min
    }

    /// Returns the count of descendants due inside the at-risk window.
    #[must_use]
    pub const fn risk_count(&self) -> usize {
        self.risk_count
    }

    /// Returns the descendant with the earliest due timestamp, first
    /// encountered winning ties, or `None` when no descendant has one.
    #[must_use]
    pub const fn next_due(&self) -> Option<&Task> {
        self.next_due.as_ref()
    }
}

/// Computes rollup statistics for every milestone in the hierarchy.
///
/// Aggregation always runs over the unfiltered hierarchy so that
/// search and risk toggles never change the reported totals.
#[must_use]
pub fn summarize(hierarchy: &TaskHierarchy, now: DateTime<Utc>) -> Vec<MilestoneRollup> {
    let threshold = now + Duration::hours(AT_RISK_WINDOW_HOURS);
    hierarchy
        .groups()
        .iter()
        .map(|group| {
            let descendants: Vec<&Task> = group
                .children()
                .iter()
                .flat_map(|child| std::iter::once(child.task()).chain(child.subtasks().iter()))
                .collect();

            let total = descendants.len();
            let done_count = descendants.iter().filter(|task| task.is_done()).count();
            let total_estimate_min = descendants
                .iter()
                .filter_map(|task| task.estimate())
                .map(crate::task::domain::EstimateMinutes::minutes)
                .sum();
            let risk_count = descendants
                .iter()
                .filter(|task| task.is_due_before(threshold))
                .count();

            let mut next_due: Option<&Task> = None;
            for task in &descendants {
                let Some(due) = task.due() else { continue };
                let earlier = next_due.and_then(Task::due).is_none_or(|best| due < best);
                if earlier {
                    next_due = Some(task);
                }
            }

            MilestoneRollup {
                milestone: group.milestone().clone(),
                total,
                done_count,
                active_count: total - done_count,
                progress_percent: completion_percent(done_count, total),
                total_estimate_min,
                risk_count,
                next_due: next_due.cloned(),
            }
        })
        .collect()
}

/// Rounds `done / total` to a whole percentage, zero when empty.
fn completion_percent(done: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    #[expect(
        clippy::integer_division,
        reason = "Round-half-up percentage over counts is exact in integers"
    )]
    let percent = (done * 100 + total / 2) / total;
    u8::try_from(percent).unwrap_or(100)
}
