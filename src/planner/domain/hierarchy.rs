//! Milestone hierarchy construction.

use crate::task::domain::{Task, TaskId};
use serde::Serialize;
use std::collections::HashMap;

/// A direct child of a milestone together with its own subtasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChildTask {
    task: Task,
    subtasks: Vec<Task>,
}

impl ChildTask {
    /// Returns the child task record.
    #[must_use]
    pub const fn task(&self) -> &Task {
        &self.task
    }

    /// Returns the child's subtasks in snapshot order.
    #[must_use]
    pub fn subtasks(&self) -> &[Task] {
        &self.subtasks
    }
}

/// A milestone and its direct children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MilestoneGroup {
    milestone: Task,
    children: Vec<ChildTask>,
}

impl MilestoneGroup {
    /// Returns the milestone task record.
    #[must_use]
    pub const fn milestone(&self) -> &Task {
        &self.milestone
    }

    /// Returns the direct children in snapshot order.
    #[must_use]
    pub fn children(&self) -> &[ChildTask] {
        &self.children
    }
}

/// Two-level milestone view over one task snapshot.
///
/// A milestone is a parentless task with at least one child; parentless
/// tasks without children are orphans and do not appear here. Deeper
/// nesting in the source data flattens onto the nearest parent: a task
/// whose parent itself has a parent lands in that parent's subtask
/// bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskHierarchy {
    groups: Vec<MilestoneGroup>,
}

impl TaskHierarchy {
    /// Builds the milestone hierarchy from a task snapshot.
    ///
    /// Milestones are ordered ascending by title; children and subtasks
    /// keep their snapshot order. Absent children yield an empty
    /// hierarchy, never an error.
    #[must_use]
    pub fn build(tasks: &[Task]) -> Self {
        let mut child_buckets: HashMap<&TaskId, Vec<&Task>> = HashMap::new();
        for task in tasks {
            if let Some(parent_id) = task.parent_id() {
                child_buckets.entry(parent_id).or_default().push(task);
            }
        }

        let mut groups: Vec<MilestoneGroup> = tasks
            .iter()
            .filter(|task| task.parent_id().is_none())
            .filter_map(|task| {
                let bucket = child_buckets.get(task.id())?;
                let children = bucket
                    .iter()
                    .map(|child| ChildTask {
                        task: (*child).clone(),
                        subtasks: child_buckets
                            .get(child.id())
                            .map(|subtasks| {
                                subtasks.iter().map(|subtask| (*subtask).clone()).collect()
                            })
                            .unwrap_or_default(),
                    })
                    .collect();
                Some(MilestoneGroup {
                    milestone: task.clone(),
                    children,
                })
            })
            .collect();

        groups.sort_by(|a, b| a.milestone.title().cmp(b.milestone.title()));
        Self { groups }
    }

    /// Returns the milestone groups in title order.
    #[must_use]
    pub fn groups(&self) -> &[MilestoneGroup] {
        &self.groups
    }

    /// Returns `true` when no milestone has children.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}
