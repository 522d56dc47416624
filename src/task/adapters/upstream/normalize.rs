//! Mapping from raw upstream records to canonical task records.

use super::record::{UpstreamPriority, UpstreamStatus, UpstreamTask};
use crate::task::domain::{
    EstimateMinutes, Task, TaskDomainError, TaskId, TaskPriority, TaskStatus,
};
use chrono::{DateTime, TimeZone, Utc};

/// Title substituted for unnamed upstream records.
const PLACEHOLDER_TITLE: &str = "(untitled)";

/// Normalizes a full upstream listing, preserving its order.
///
/// # Errors
///
/// Returns [`TaskDomainError`] when a record carries an empty
/// identifier; every other malformed field degrades to a default.
pub fn normalize_all(records: &[UpstreamTask]) -> Result<Vec<Task>, TaskDomainError> {
    records.iter().map(normalize).collect()
}

/// Normalizes one upstream record into the canonical task shape.
///
/// Status and priority synonyms collapse onto the workflow enums, due
/// dates parse from epoch milliseconds, estimates convert from
/// milliseconds to whole minutes (rounding to zero drops the
/// estimate), and dependency edges keep only non-empty ids.
///
/// # Errors
///
/// Returns [`TaskDomainError::EmptyTaskId`] when the record identifier
/// is empty.
pub fn normalize(record: &UpstreamTask) -> Result<Task, TaskDomainError> {
    let id = TaskId::new(record.id.clone())?;
    let title = record
        .name
        .as_deref()
        .filter(|name| !name.trim().is_empty())
        .unwrap_or(PLACEHOLDER_TITLE);

    let deps = record
        .dependencies
        .iter()
        .flatten()
        .filter_map(|dep| dep.task_id.as_deref())
        .filter(|dep_id| !dep_id.trim().is_empty())
        .map(TaskId::new)
        .collect::<Result<Vec<_>, _>>()?;

    let tags: Vec<String> = record
        .tags
        .iter()
        .flatten()
        .filter_map(|tag| tag.text().map(str::to_owned))
        .collect();

    let mut task = Task::new(id, title)?
        .with_status(map_status(record.status.as_ref()))
        .with_priority(map_priority(record.priority.as_ref()))
        .with_deps(deps)
        .with_tags(tags);

    if let Some(due) = record.due_date.as_ref().and_then(due_from_millis) {
        task = task.with_due(due);
    }
    if let Some(estimate) = record
        .time_estimate
        .as_ref()
        .and_then(super::RawMillis::as_millis)
        .and_then(estimate_from_millis)
    {
        task = task.with_estimate(estimate);
    }
    if let Some(parent) = record.parent.as_deref().filter(|p| !p.trim().is_empty()) {
        task = task.with_parent(TaskId::new(parent)?);
    }

    Ok(task)
}

/// Collapses upstream status synonyms onto the workflow enum.
///
/// Unknown or absent statuses fall back to `todo`, the upstream
/// convention for freshly-imported work.
fn map_status(raw: Option<&UpstreamStatus>) -> TaskStatus {
    let name = raw
        .and_then(|status| status.status.as_deref().or(status.kind.as_deref()))
        .unwrap_or_default()
        .to_lowercase();
    match name.as_str() {
        "inprogress" | "in progress" | "in_progress" | "doing" => TaskStatus::InProgress,
        "review" => TaskStatus::Review,
        "done" | "closed" => TaskStatus::Done,
        _ => TaskStatus::Todo,
    }
}

/// Collapses upstream priority synonyms onto the priority enum.
fn map_priority(raw: Option<&UpstreamPriority>) -> TaskPriority {
    let name = raw
        .and_then(|priority| priority.priority.as_deref().or(priority.id.as_deref()))
        .unwrap_or("normal")
        .to_lowercase();
    match name.as_str() {
        "urgent" => TaskPriority::Urgent,
        "high" => TaskPriority::High,
        "low" => TaskPriority::Low,
        _ => TaskPriority::Medium,
    }
}

fn due_from_millis(raw: &super::RawMillis) -> Option<DateTime<Utc>> {
    Utc.timestamp_millis_opt(raw.as_millis()?).single()
}

/// Converts a millisecond estimate to whole minutes, rounding half up.
fn estimate_from_millis(millis: i64) -> Option<EstimateMinutes> {
    if millis <= 0 {
        return None;
    }
    #[expect(
        clippy::integer_division,
        reason = "Round-half-up conversion from milliseconds to minutes is exact in integers"
    )]
    let minutes = (millis + 30_000) / 60_000;
    let whole = u32::try_from(minutes).ok()?;
    EstimateMinutes::new(whole).ok()
}
