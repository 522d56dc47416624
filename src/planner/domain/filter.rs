//! Query and at-risk filtering with selectable ordering.

use super::hierarchy::TaskHierarchy;
use crate::task::domain::{Progress, Task};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use thiserror::Error;

/// Width of the at-risk window ahead of the reference time, in hours.
pub const AT_RISK_WINDOW_HOURS: i64 = 24;

/// Selectable ordering applied to children and subtasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    /// Ascending by due timestamp, tasks without one last.
    Due,
    /// Ascending by priority rank (urgent first).
    Priority,
    /// Ascending by completion percentage, absent treated as zero.
    Progress,
    /// Ascending lexicographic by title.
    Alpha,
}

impl SortKey {
    /// Returns the canonical string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Due => "due",
            Self::Priority => "priority",
            Self::Progress => "progress",
            Self::Alpha => "alpha",
        }
    }

    /// Compares two tasks under this key.
    ///
    /// All keys are total orders; callers rely on stable sorting to
    /// keep encounter order for exact ties.
    #[must_use]
    pub fn compare(self, a: &Task, b: &Task) -> Ordering {
        match self {
            Self::Due => due_order(a, b),
            Self::Priority => a.priority().rank().cmp(&b.priority().rank()),
            Self::Progress => {
                let lhs = a.progress().unwrap_or(Progress::ZERO);
                let rhs = b.progress().unwrap_or(Progress::ZERO);
                lhs.cmp(&rhs)
            }
            Self::Alpha => a.title().cmp(b.title()),
        }
    }
}

impl Default for SortKey {
    fn default() -> Self {
        Self::Due
    }
}

/// Error returned while parsing sort keys from external input.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown sort key: {0}")]
pub struct ParseSortKeyError(pub String);

impl TryFrom<&str> for SortKey {
    type Error = ParseSortKeyError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "due" => Ok(Self::Due),
            "priority" => Ok(Self::Priority),
            "progress" => Ok(Self::Progress),
            "alpha" => Ok(Self::Alpha),
            _ => Err(ParseSortKeyError(value.to_owned())),
        }
    }
}

/// Orders tasks ascending by due timestamp, absent timestamps last.
pub(crate) fn due_order(a: &Task, b: &Task) -> Ordering {
    match (a.due(), b.due()) {
        (Some(lhs), Some(rhs)) => lhs.cmp(&rhs),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Filter and ordering parameters for one planning pass.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterParams {
    query: String,
    at_risk_only: bool,
    sort: SortKey,
}

impl FilterParams {
    /// Creates parameters with an empty query, the at-risk filter off,
    /// and due-date ordering.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the free-text query.
    #[must_use]
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    /// Restricts matches to tasks due inside the at-risk window.
    #[must_use]
    pub const fn with_at_risk_only(mut self, at_risk_only: bool) -> Self {
        self.at_risk_only = at_risk_only;
        self
    }

    /// Sets the ordering applied to children and subtasks.
    #[must_use]
    pub const fn with_sort(mut self, sort: SortKey) -> Self {
        self.sort = sort;
        self
    }

    /// Returns the free-text query.
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Returns whether the at-risk filter is active.
    #[must_use]
    pub const fn at_risk_only(&self) -> bool {
        self.at_risk_only
    }

    /// Returns the selected ordering.
    #[must_use]
    pub const fn sort(&self) -> SortKey {
        self.sort
    }
}

/// A retained child with its full subtask set.
///
/// When a child is retained only because one of its subtasks matched,
/// the complete subtask list is kept for navigability rather than the
/// matching subset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilteredChild {
    task: Task,
    subtasks: Vec<Task>,
}

impl FilteredChild {
    /// Returns the child task record.
    #[must_use]
    pub const fn task(&self) -> &Task {
        &self.task
    }

    /// Returns the full subtask set under the selected ordering.
    #[must_use]
    pub fn subtasks(&self) -> &[Task] {
        &self.subtasks
    }
}

/// A milestone that retained at least one child through the filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilteredMilestone {
    milestone: Task,
    children: Vec<FilteredChild>,
}

impl FilteredMilestone {
    /// Returns the milestone task record.
    #[must_use]
    pub const fn milestone(&self) -> &Task {
        &self.milestone
    }

    /// Returns the retained children under the selected ordering.
    #[must_use]
    pub fn children(&self) -> &[FilteredChild] {
        &self.children
    }
}

/// Applies the combined query and at-risk filter to a hierarchy.
///
/// A task matches when the case-folded query is empty or a substring of
/// its title or any tag, and — with the at-risk flag set — when it is
/// due strictly within [`AT_RISK_WINDOW_HOURS`] of `now`. A child is
/// retained when it matches or when at least one of its subtasks
/// matches; a milestone is retained when at least one child survives.
/// Children and subtasks are sorted by the selected key; sorts are
/// stable, so exact ties keep snapshot order.
#[must_use]
pub fn filter_hierarchy(
    hierarchy: &TaskHierarchy,
    params: &FilterParams,
    now: DateTime<Utc>,
) -> Vec<FilteredMilestone> {
    let threshold = now + Duration::hours(AT_RISK_WINDOW_HOURS);
    let query = params.query().trim().to_lowercase();

    let matches = |task: &Task| -> bool {
        let query_hit = query.is_empty()
            || task.title().to_lowercase().contains(&query)
            || task
                .tags()
                .iter()
                .any(|tag| tag.to_lowercase().contains(&query));
        let risk_hit = !params.at_risk_only() || task.is_due_before(threshold);
        query_hit && risk_hit
    };

    hierarchy
        .groups()
        .iter()
        .filter_map(|group| {
            let mut children: Vec<FilteredChild> = group
                .children()
                .iter()
                .filter(|child| {
                    matches(child.task()) || child.subtasks().iter().any(|subtask| matches(subtask))
                })
                .map(|child| {
                    let mut subtasks = child.subtasks().to_vec();
                    subtasks.sort_by(|a, b| params.sort().compare(a, b));
                    FilteredChild {
                        task: child.task().clone(),
                        subtasks,
                    }
                })
                .collect();
            if children.is_empty() {
                return None;
            }
            children.sort_by(|a, b| params.sort().compare(&a.task, &b.task));
            Some(FilteredMilestone {
                milestone: group.milestone().clone(),
                children,
            })
        })
        .collect()
}
