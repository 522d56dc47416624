//! Shared fixtures for in-memory integration tests.

use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;
use olmsted::task::domain::{Task, TaskId};
use once_cell::sync::Lazy;

/// Reference time shared by every integration scenario.
pub static NOW: Lazy<DateTime<Utc>> = Lazy::new(|| {
    Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0)
        .single()
        .expect("valid reference time")
});

/// Clock pinned to a fixed instant for deterministic passes.
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Builds a validated task id.
///
/// # Panics
///
/// Panics when the id is empty; integration fixtures always pass
/// non-empty literals.
pub fn id(value: &str) -> TaskId {
    TaskId::new(value).expect("valid task id")
}

/// Builds a bare task record.
///
/// # Panics
///
/// Panics when the title is empty; integration fixtures always pass
/// non-empty literals.
pub fn bare_task(task_id: &str, title: &str) -> Task {
    Task::new(id(task_id), title).expect("valid task")
}

/// Builds a task parented under `parent`.
pub fn child_task(task_id: &str, title: &str, parent: &str) -> Task {
    bare_task(task_id, title).with_parent(id(parent))
}
