//! Then steps for day planning BDD scenarios.

use super::world::DayPlanWorld;
use olmsted::planner::services::PlanView;
use rstest_bdd_macros::then;

fn view(world: &DayPlanWorld) -> Result<&PlanView, eyre::Report> {
    world
        .view
        .as_ref()
        .ok_or_else(|| eyre::eyre!("the day has not been planned yet"))
}

fn scheduled_titles(world: &DayPlanWorld) -> Result<Vec<String>, eyre::Report> {
    Ok(view(world)?
        .plan()
        .blocks()
        .iter()
        .map(|block| block.task().title().to_owned())
        .collect())
}

#[then("{count:usize} focus blocks are scheduled")]
fn blocks_scheduled(world: &DayPlanWorld, count: usize) -> Result<(), eyre::Report> {
    let scheduled = scheduled_titles(world)?;
    eyre::ensure!(
        scheduled.len() == count,
        "expected {count} blocks, found {scheduled:?}"
    );
    Ok(())
}

#[then(r#"block {index:usize} is task "{name}""#)]
fn block_is_task(world: &DayPlanWorld, index: usize, name: String) -> Result<(), eyre::Report> {
    let scheduled = scheduled_titles(world)?;
    let position = index
        .checked_sub(1)
        .ok_or_else(|| eyre::eyre!("block indices are one-based"))?;
    let found = scheduled
        .get(position)
        .ok_or_else(|| eyre::eyre!("no block at position {index}, plan is {scheduled:?}"))?;
    eyre::ensure!(
        *found == name,
        "expected block {index} to be {name}, found {found}"
    );
    Ok(())
}

#[then(r#"task "{before}" is scheduled before "{after}""#)]
fn scheduled_before(
    world: &DayPlanWorld,
    before: String,
    after: String,
) -> Result<(), eyre::Report> {
    let scheduled = scheduled_titles(world)?;
    let first = scheduled
        .iter()
        .position(|title| *title == before)
        .ok_or_else(|| eyre::eyre!("{before} was never scheduled"))?;
    let second = scheduled
        .iter()
        .position(|title| *title == after)
        .ok_or_else(|| eyre::eyre!("{after} was never scheduled"))?;
    eyre::ensure!(
        first < second,
        "expected {before} before {after}, plan is {scheduled:?}"
    );
    Ok(())
}

#[then(r#"task "{name}" is not scheduled"#)]
fn task_not_scheduled(world: &DayPlanWorld, name: String) -> Result<(), eyre::Report> {
    let scheduled = scheduled_titles(world)?;
    eyre::ensure!(
        !scheduled.contains(&name),
        "{name} unexpectedly appears in {scheduled:?}"
    );
    Ok(())
}

#[then("the plan runs for {minutes:i64} minutes in total")]
fn plan_total_minutes(world: &DayPlanWorld, minutes: i64) -> Result<(), eyre::Report> {
    let summary = view(world)?
        .plan()
        .summary()
        .ok_or_else(|| eyre::eyre!("the plan is empty"))?;
    eyre::ensure!(
        summary.total_minutes == minutes,
        "expected {minutes} total minutes, found {}",
        summary.total_minutes
    );
    Ok(())
}

#[then(r#"task "{name}" waits in the up next list"#)]
fn task_waits_up_next(world: &DayPlanWorld, name: String) -> Result<(), eyre::Report> {
    let waiting: Vec<&str> = view(world)?
        .up_next()
        .iter()
        .map(|task| task.title())
        .collect();
    eyre::ensure!(
        waiting.contains(&name.as_str()),
        "{name} is not waiting, up next is {waiting:?}"
    );
    Ok(())
}
