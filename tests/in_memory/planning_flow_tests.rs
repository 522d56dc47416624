//! Full planning passes over seeded in-memory stores.

use super::helpers::{FixedClock, NOW, bare_task, child_task, id};
use chrono::Duration;
use eyre::ensure;
use olmsted::planner::domain::{FilterParams, SortKey};
use olmsted::planner::services::{PlanRequest, PlanningService, PlanView};
use olmsted::task::adapters::memory::InMemoryTaskStore;
use olmsted::task::domain::{EstimateMinutes, Task, TaskStatus};
use rstest::rstest;
use std::sync::Arc;

type TestService = PlanningService<InMemoryTaskStore, FixedClock>;

fn service_over(tasks: Vec<Task>) -> TestService {
    let store = InMemoryTaskStore::new();
    let clock = FixedClock(*NOW);
    for task in tasks {
        store.insert(task, &clock).expect("seed insert succeeds");
    }
    PlanningService::new(Arc::new(store), Arc::new(FixedClock(*NOW)))
}

fn release_fixture() -> Vec<Task> {
    vec![
        bare_task("m-api", "API rollout"),
        child_task("c-schema", "Freeze the schema", "m-api")
            .with_due(*NOW + Duration::hours(6))
            .with_estimate(EstimateMinutes::new(45).expect("estimate")),
        child_task("c-docs", "Document the endpoints", "m-api")
            .with_deps(vec![id("c-schema")])
            .with_estimate(EstimateMinutes::new(60).expect("estimate")),
        child_task("s-examples", "Write request examples", "c-docs")
            .with_tags(vec!["docs".to_owned()]),
        bare_task("m-billing", "Billing cleanup"),
        child_task("c-dunning", "Retire dunning emails", "m-billing")
            .with_status(TaskStatus::Done),
        child_task("c-invoice", "Reconcile invoices", "m-billing")
            .with_due(*NOW + Duration::hours(20)),
        bare_task("orphan", "Unfiled note"),
    ]
}

/// Asserts the scheduled ids match `expected`, in order.
fn assert_scheduled(view: &PlanView, expected: &[&str]) -> Result<(), eyre::Report> {
    let scheduled: Vec<&str> = view
        .plan()
        .blocks()
        .iter()
        .map(|block| block.task().id().as_str())
        .collect();
    ensure!(
        scheduled == expected,
        "expected schedule {expected:?}, found {scheduled:?}"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn full_pass_produces_consistent_views() -> Result<(), eyre::Report> {
    let service = service_over(release_fixture());

    let view = service.plan(&PlanRequest::new()).await?;

    // Milestones sort alphabetically; the orphan never appears.
    let milestone_ids: Vec<&str> = view
        .milestones()
        .iter()
        .map(|group| group.milestone().id().as_str())
        .collect();
    ensure!(
        milestone_ids == vec!["m-api", "m-billing"],
        "unexpected milestones: {milestone_ids:?}"
    );

    // The done child is filtered into the view but never scheduled;
    // dependency order holds within the schedule.
    assert_scheduled(&view, &["c-schema", "c-invoice", "c-docs"])?;

    // Rollups aggregate the unfiltered hierarchy, subtasks included.
    let api_rollup = view
        .rollups()
        .iter()
        .find(|rollup| rollup.milestone().id().as_str() == "m-api")
        .ok_or_else(|| eyre::eyre!("missing api rollup"))?;
    ensure!(api_rollup.total() == 3, "api rollup counts its subtask");
    ensure!(
        api_rollup.total_estimate_min() == 105,
        "api rollup sums estimates"
    );

    let billing_rollup = view
        .rollups()
        .iter()
        .find(|rollup| rollup.milestone().id().as_str() == "m-billing")
        .ok_or_else(|| eyre::eyre!("missing billing rollup"))?;
    ensure!(billing_rollup.done_count() == 1, "billing counts done work");
    ensure!(
        billing_rollup.progress_percent() == 50,
        "billing is half complete"
    );
    ensure!(billing_rollup.risk_count() == 1, "one invoice is at risk");

    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn repeated_passes_are_identical() {
    let service = service_over(release_fixture());
    let request = PlanRequest::new().with_filter(FilterParams::new().with_sort(SortKey::Priority));

    let first = service.plan(&request).await.expect("plan succeeds");
    let second = service.plan(&request).await.expect("plan succeeds");

    assert_eq!(first, second);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn at_risk_passes_schedule_only_imminent_work() -> Result<(), eyre::Report> {
    let service = service_over(release_fixture());
    let request =
        PlanRequest::new().with_filter(FilterParams::new().with_at_risk_only(true));

    let view = service.plan(&request).await?;

    // Only the children due inside 24 hours survive the filter.
    assert_scheduled(&view, &["c-schema", "c-invoice"])?;
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn tag_queries_reach_children_through_their_subtasks() -> Result<(), eyre::Report> {
    let service = service_over(release_fixture());
    let request = PlanRequest::new().with_filter(FilterParams::new().with_query("docs"));

    let view = service.plan(&request).await?;

    // Only a subtask tag matches; the child is retained for context
    // and carries its full subtask set.
    let retained: Vec<&str> = view
        .milestones()
        .iter()
        .flat_map(|group| {
            group
                .children()
                .iter()
                .map(|entry| entry.task().id().as_str())
        })
        .collect();
    ensure!(
        retained == vec!["c-docs"],
        "expected only the docs child, found {retained:?}"
    );

    let subtasks: Vec<&str> = view
        .milestones()
        .iter()
        .flat_map(|group| group.children())
        .flat_map(|entry| entry.subtasks().iter().map(|subtask| subtask.id().as_str()))
        .collect();
    ensure!(
        subtasks == vec!["s-examples"],
        "expected the full subtask set, found {subtasks:?}"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn board_and_timeline_cover_the_whole_snapshot() {
    let service = service_over(release_fixture());

    let view = service
        .plan(&PlanRequest::new())
        .await
        .expect("plan succeeds");

    let timeline_ids: Vec<&str> = view
        .timeline()
        .iter()
        .map(|entry| entry.task().id().as_str())
        .collect();
    assert_eq!(timeline_ids, vec!["c-schema", "c-invoice"]);

    let done_bucket = view
        .board()
        .bucket(TaskStatus::Done)
        .expect("done bucket present");
    let done_ids: Vec<&str> = done_bucket
        .tasks()
        .iter()
        .map(|task| task.id().as_str())
        .collect();
    assert_eq!(done_ids, vec!["c-dunning"]);
}
