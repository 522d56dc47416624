//! When steps for day planning BDD scenarios.

use super::world::{DayPlanWorld, FixedClock, run_async};
use eyre::WrapErr;
use olmsted::planner::domain::FilterParams;
use olmsted::planner::services::{PlanRequest, PlanningService};
use olmsted::task::adapters::memory::InMemoryTaskStore;
use rstest_bdd_macros::when;
use std::sync::Arc;

#[when("the day is planned")]
fn plan_day(world: &mut DayPlanWorld) -> Result<(), eyre::Report> {
    let store = InMemoryTaskStore::new();
    let clock = FixedClock(world.now);
    for task in world.tasks.drain(..) {
        store
            .insert(task, &clock)
            .wrap_err("seed scenario task into store")?;
    }

    let service = PlanningService::new(Arc::new(store), Arc::new(FixedClock(world.now)));
    let request = PlanRequest::new()
        .with_filter(FilterParams::new().with_at_risk_only(world.at_risk_only));

    let view = run_async(service.plan(&request)).wrap_err("run planning pass")?;
    world.view = Some(view);
    Ok(())
}
