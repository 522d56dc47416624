//! Pure planning computations.
//!
//! Every function here is deterministic: identical snapshots, reference
//! times, and parameters produce identical outputs, with no clock reads
//! or randomness inside any stage.

mod filter;
mod hierarchy;
mod overview;
mod rollup;
mod schedule;

pub use filter::{
    AT_RISK_WINDOW_HOURS, FilterParams, FilteredChild, FilteredMilestone, ParseSortKeyError,
    SortKey, filter_hierarchy,
};
pub use hierarchy::{ChildTask, MilestoneGroup, TaskHierarchy};
pub use overview::{
    StatusBoard, StatusBucket, TimelineEntry, overall_progress, status_board, timeline,
};
pub use rollup::{MilestoneRollup, summarize};
pub use schedule::{DEFAULT_BLOCK_MINUTES, DayPlan, FocusBlock, PlanSummary, suggest_day_plan};
