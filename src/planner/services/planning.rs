//! Planning pass orchestration over the task source port.

use crate::planner::domain::{
    DayPlan, FilterParams, FilteredMilestone, MilestoneRollup, StatusBoard, TaskHierarchy,
    TimelineEntry, filter_hierarchy, overall_progress, status_board, suggest_day_plan, summarize,
    timeline,
};
use crate::task::{
    domain::Task,
    ports::{TaskSource, TaskSourceError},
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;

/// Default bound on the candidate queue handed to the scheduler.
pub const DEFAULT_QUEUE_CAP: usize = 8;

/// Default display count for the up-next list.
pub const DEFAULT_UP_NEXT_CAP: usize = 5;

/// Parameters for one planning pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanRequest {
    filter: FilterParams,
    start: Option<DateTime<Utc>>,
    queue_cap: usize,
    up_next_cap: usize,
}

impl PlanRequest {
    /// Creates a request with an empty filter, the schedule starting at
    /// the reference time, and the default queue bounds.
    #[must_use]
    pub fn new() -> Self {
        Self {
            filter: FilterParams::new(),
            start: None,
            queue_cap: DEFAULT_QUEUE_CAP,
            up_next_cap: DEFAULT_UP_NEXT_CAP,
        }
    }

    /// Sets the filter and ordering parameters.
    #[must_use]
    pub fn with_filter(mut self, filter: FilterParams) -> Self {
        self.filter = filter;
        self
    }

    /// Sets an explicit schedule start time.
    #[must_use]
    pub const fn with_start(mut self, start: DateTime<Utc>) -> Self {
        self.start = Some(start);
        self
    }

    /// Bounds the candidate queue handed to the scheduler.
    #[must_use]
    pub const fn with_queue_cap(mut self, queue_cap: usize) -> Self {
        self.queue_cap = queue_cap;
        self
    }

    /// Bounds the up-next display list.
    #[must_use]
    pub const fn with_up_next_cap(mut self, up_next_cap: usize) -> Self {
        self.up_next_cap = up_next_cap;
        self
    }

    /// Returns the filter and ordering parameters.
    #[must_use]
    pub const fn filter(&self) -> &FilterParams {
        &self.filter
    }

    /// Returns the explicit schedule start, if any.
    #[must_use]
    pub const fn start(&self) -> Option<DateTime<Utc>> {
        self.start
    }

    /// Returns the candidate queue bound.
    #[must_use]
    pub const fn queue_cap(&self) -> usize {
        self.queue_cap
    }

    /// Returns the up-next display bound.
    #[must_use]
    pub const fn up_next_cap(&self) -> usize {
        self.up_next_cap
    }
}

impl Default for PlanRequest {
    fn default() -> Self {
        Self::new()
    }
}

/// Complete output of one planning pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanView {
    milestones: Vec<FilteredMilestone>,
    rollups: Vec<MilestoneRollup>,
    plan: DayPlan,
    up_next: Vec<Task>,
    timeline: Vec<TimelineEntry>,
    board: StatusBoard,
    overall_progress: u8,
}

impl PlanView {
    /// Returns the filtered, sorted milestone hierarchy.
    #[must_use]
    pub fn milestones(&self) -> &[FilteredMilestone] {
        &self.milestones
    }

    /// Returns the rollup summaries over the unfiltered hierarchy.
    #[must_use]
    pub fn rollups(&self) -> &[MilestoneRollup] {
        &self.rollups
    }

    /// Returns the scheduled day plan.
    #[must_use]
    pub const fn plan(&self) -> &DayPlan {
        &self.plan
    }

    /// Returns the unscheduled remainder of the candidate queue,
    /// bounded to the display count.
    #[must_use]
    pub fn up_next(&self) -> &[Task] {
        &self.up_next
    }

    /// Returns the due-date timeline over the whole snapshot.
    #[must_use]
    pub fn timeline(&self) -> &[TimelineEntry] {
        &self.timeline
    }

    /// Returns the workflow status board over the whole snapshot.
    #[must_use]
    pub const fn board(&self) -> &StatusBoard {
        &self.board
    }

    /// Returns the rounded mean completion percentage.
    #[must_use]
    pub const fn overall_progress(&self) -> u8 {
        self.overall_progress
    }
}

/// Service-level errors for planning passes.
#[derive(Debug, Error)]
pub enum PlanningError {
    /// The task source failed to deliver a snapshot.
    #[error(transparent)]
    Source(#[from] TaskSourceError),
}

/// Result type for planning service operations.
pub type PlanningResult<T> = Result<T, PlanningError>;

/// Runs the full planning pipeline over one snapshot.
///
/// The candidate queue is the filtered hierarchy's children flattened
/// in milestone order; its first `queue_cap` entries feed the
/// scheduler, and the up-next list is the full queue minus every
/// scheduled id, bounded to `up_next_cap`. The pass is a pure function
/// of its arguments: repeated invocation with an unchanged snapshot,
/// reference time, and request yields identical output.
#[must_use]
pub fn compute_plan(tasks: &[Task], now: DateTime<Utc>, request: &PlanRequest) -> PlanView {
    let hierarchy = TaskHierarchy::build(tasks);
    let milestones = filter_hierarchy(&hierarchy, request.filter(), now);
    let rollups = summarize(&hierarchy, now);

    let queue: Vec<Task> = milestones
        .iter()
        .flat_map(|milestone| milestone.children().iter().map(|child| child.task().clone()))
        .collect();
    let capped: Vec<Task> = queue.iter().take(request.queue_cap()).cloned().collect();
    let start = request.start().unwrap_or(now);
    let plan = suggest_day_plan(&capped, start);

    let scheduled = plan.scheduled_ids();
    let up_next: Vec<Task> = queue
        .iter()
        .filter(|task| !scheduled.contains(task.id()))
        .take(request.up_next_cap())
        .cloned()
        .collect();

    PlanView {
        milestones,
        rollups,
        plan,
        up_next,
        timeline: timeline(tasks),
        board: status_board(tasks),
        overall_progress: overall_progress(tasks),
    }
}

/// Planning facade over a task source and an injected clock.
///
/// The clock is read exactly once per pass; every downstream stage
/// receives that single reference time, keeping the pass deterministic.
#[derive(Clone)]
pub struct PlanningService<S, C>
where
    S: TaskSource,
    C: Clock + Send + Sync,
{
    source: Arc<S>,
    clock: Arc<C>,
}

impl<S, C> PlanningService<S, C>
where
    S: TaskSource,
    C: Clock + Send + Sync,
{
    /// Creates a planning service.
    #[must_use]
    pub const fn new(source: Arc<S>, clock: Arc<C>) -> Self {
        Self { source, clock }
    }

    /// Fetches a fresh snapshot and runs one planning pass over it.
    ///
    /// # Errors
    ///
    /// Returns [`PlanningError::Source`] when the task source cannot
    /// deliver a snapshot; the pipeline itself never fails.
    pub async fn plan(&self, request: &PlanRequest) -> PlanningResult<PlanView> {
        let tasks = self.source.snapshot().await?;
        let now = self.clock.utc();
        Ok(compute_plan(&tasks, now, request))
    }
}
