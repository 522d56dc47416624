//! Application services orchestrating planning passes.

mod planning;

pub use planning::{
    DEFAULT_QUEUE_CAP, DEFAULT_UP_NEXT_CAP, PlanRequest, PlanView, PlanningError,
    PlanningResult, PlanningService, compute_plan,
};
