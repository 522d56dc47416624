//! Given steps for day planning BDD scenarios.

use super::world::DayPlanWorld;
use chrono::Duration;
use olmsted::task::domain::{EstimateMinutes, Task, TaskId};
use rstest_bdd_macros::given;

fn task_named(name: &str) -> Result<Task, eyre::Report> {
    Ok(Task::new(TaskId::new(name)?, name)?)
}

#[given(r#"a milestone "{name}""#)]
fn milestone(world: &mut DayPlanWorld, name: String) -> Result<(), eyre::Report> {
    world.tasks.push(task_named(&name)?);
    Ok(())
}

#[given(r#"a task "{name}" under "{milestone}""#)]
fn task_under_milestone(
    world: &mut DayPlanWorld,
    name: String,
    milestone: String,
) -> Result<(), eyre::Report> {
    let task = task_named(&name)?.with_parent(TaskId::new(milestone)?);
    world.tasks.push(task);
    Ok(())
}

#[given("it is estimated at {minutes:u32} minutes")]
fn estimated(world: &mut DayPlanWorld, minutes: u32) -> Result<(), eyre::Report> {
    let task = world
        .tasks
        .pop()
        .ok_or_else(|| eyre::eyre!("no task declared yet in scenario"))?;
    world.tasks.push(task.with_estimate(EstimateMinutes::new(minutes)?));
    Ok(())
}

#[given("it is due in {hours:i64} hours")]
fn due_in_hours(world: &mut DayPlanWorld, hours: i64) -> Result<(), eyre::Report> {
    let task = world
        .tasks
        .pop()
        .ok_or_else(|| eyre::eyre!("no task declared yet in scenario"))?;
    let due = world.now + Duration::hours(hours);
    world.tasks.push(task.with_due(due));
    Ok(())
}

#[given(r#"it depends on "{dependency}""#)]
fn depends_on(world: &mut DayPlanWorld, dependency: String) -> Result<(), eyre::Report> {
    let task = world
        .tasks
        .pop()
        .ok_or_else(|| eyre::eyre!("no task declared yet in scenario"))?;
    let mut deps = task.deps().to_vec();
    deps.push(TaskId::new(dependency)?);
    world.tasks.push(task.with_deps(deps));
    Ok(())
}

#[given("the at-risk filter is enabled")]
fn at_risk_enabled(world: &mut DayPlanWorld) {
    world.at_risk_only = true;
}
