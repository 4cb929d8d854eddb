//! Integration tests for status aggregation and the client facade

use std::sync::Arc;

use chrono::{Duration, Utc};

use orgforge_core::error::LedgerError;
use orgforge_core::{
    CoreConfig, CreateRequestParams, Error, ExecutionStatus, MemoryStore, OrgforgeClient,
    RequestFilter, RequestStatus, RequestStore, RequestUpdate, StatusAggregator,
};
use orgforge_test_utils::{MockDirectoryService, MockPipelineService, RequestBuilder, seed_org};

fn client(
    directory: &Arc<MockDirectoryService>,
    pipelines: &Arc<MockPipelineService>,
    ledger: &Arc<MemoryStore>,
) -> OrgforgeClient {
    OrgforgeClient::new(
        CoreConfig::test(),
        directory.clone(),
        pipelines.clone(),
        ledger.clone(),
    )
}

#[tokio::test]
async fn report_combines_ledger_and_pipeline_without_altering_the_ledger() {
    let directory = Arc::new(MockDirectoryService::new());
    seed_org(&directory);
    let pipelines = Arc::new(MockPipelineService::new());
    pipelines.add_pipeline("account-factory-customizations");
    pipelines.add_execution(
        "account-factory-customizations",
        "exec-0001",
        ExecutionStatus::InProgress,
        Some(Utc::now() - Duration::minutes(3)),
        None,
    );
    let ledger = Arc::new(MemoryStore::new());
    let client = client(&directory, &pipelines, &ledger);

    let created = client
        .create_request(
            CreateRequestParams::new("client", "dev@example.com", "Dev Account", "Sandbox")
                .with_client_id("acme")
                .with_request_id("migrate-2025-01-10-abc12345"),
        )
        .await
        .unwrap();
    assert_eq!(created.status, RequestStatus::Pending);

    let report = client
        .report_status("migrate-2025-01-10-abc12345")
        .await
        .unwrap();

    assert_eq!(report.request.status, RequestStatus::Pending);
    assert_eq!(report.pipeline.status, ExecutionStatus::InProgress);
    assert_eq!(report.pipeline.execution_id.as_deref(), Some("exec-0001"));
    assert!(!report.pipeline.degraded);

    // Reporting must not mutate the record
    let after = client.get_request("migrate-2025-01-10-abc12345").await.unwrap();
    assert_eq!(after, created);
}

#[tokio::test]
async fn report_of_unknown_request_is_not_found() {
    let directory = Arc::new(MockDirectoryService::new());
    let pipelines = Arc::new(MockPipelineService::new());
    let ledger = Arc::new(MemoryStore::new());
    let client = client(&directory, &pipelines, &ledger);

    let err = client.report_status("ghost").await.unwrap_err();
    assert!(matches!(err, Error::Ledger(LedgerError::NotFound { .. })));
}

#[tokio::test]
async fn pipeline_outage_degrades_but_does_not_fail_the_report() {
    let pipelines = Arc::new(MockPipelineService::new());
    pipelines.inject_outage("throttled");
    let ledger = Arc::new(MemoryStore::new());
    ledger
        .put(
            &RequestBuilder::new("req-1")
                .with_status(RequestStatus::Completed)
                .build(),
        )
        .await
        .unwrap();

    let aggregator = StatusAggregator::new(ledger, pipelines, &CoreConfig::test());
    let report = aggregator.report("req-1").await.unwrap();

    assert!(report.pipeline.degraded);
    assert!(report.pipeline.pipeline_name.is_none());
    // Degraded status is derived from the authoritative ledger state
    assert_eq!(report.pipeline.status, ExecutionStatus::Succeeded);
}

#[tokio::test]
async fn missing_pipelines_also_degrade() {
    let pipelines = Arc::new(MockPipelineService::new());
    pipelines.add_pipeline("unrelated-deploy");
    let ledger = Arc::new(MemoryStore::new());
    ledger
        .put(&RequestBuilder::new("req-1").build())
        .await
        .unwrap();

    let aggregator = StatusAggregator::new(ledger, pipelines, &CoreConfig::test());
    let report = aggregator.report("req-1").await.unwrap();

    assert!(report.pipeline.degraded);
    assert_eq!(report.pipeline.status, ExecutionStatus::InProgress);
}

#[tokio::test]
async fn freshest_execution_wins_across_matching_pipelines() {
    let pipelines = Arc::new(MockPipelineService::new());
    pipelines.add_pipeline("account-factory-global");
    pipelines.add_pipeline("account-factory-customizations");
    let now = Utc::now();
    pipelines.add_execution(
        "account-factory-global",
        "exec-old",
        ExecutionStatus::Succeeded,
        Some(now - Duration::hours(2)),
        Some(now - Duration::hours(1)),
    );
    pipelines.add_execution(
        "account-factory-customizations",
        "exec-new",
        ExecutionStatus::InProgress,
        Some(now - Duration::minutes(2)),
        None,
    );
    let ledger = Arc::new(MemoryStore::new());
    ledger
        .put(&RequestBuilder::new("req-1").build())
        .await
        .unwrap();

    let aggregator = StatusAggregator::new(ledger, pipelines, &CoreConfig::test());
    let report = aggregator.report("req-1").await.unwrap();

    assert_eq!(report.pipeline.execution_id.as_deref(), Some("exec-new"));
    assert_eq!(
        report.pipeline.pipeline_name.as_deref(),
        Some("account-factory-customizations")
    );
}

#[tokio::test]
async fn summary_of_empty_ledger_is_all_zeros() {
    let pipelines = Arc::new(MockPipelineService::new());
    let ledger = Arc::new(MemoryStore::new());

    let aggregator = StatusAggregator::new(ledger, pipelines, &CoreConfig::test());
    let summary = aggregator.summarize(10).await.unwrap();

    assert_eq!(summary.total, 0);
    assert_eq!(summary.pending, 0);
    assert_eq!(summary.in_progress, 0);
    assert_eq!(summary.completed, 0);
    assert_eq!(summary.failed, 0);
}

#[tokio::test]
async fn summary_counts_by_status_over_recent_entries() {
    let pipelines = Arc::new(MockPipelineService::new());
    let ledger = Arc::new(MemoryStore::new());
    for (i, status) in [
        RequestStatus::Pending,
        RequestStatus::Pending,
        RequestStatus::InProgress,
        RequestStatus::Completed,
        RequestStatus::Failed,
    ]
    .iter()
    .enumerate()
    {
        ledger
            .put(
                &RequestBuilder::new(&format!("req-{i}"))
                    .with_status(*status)
                    .build(),
            )
            .await
            .unwrap();
    }

    let aggregator = StatusAggregator::new(ledger, pipelines, &CoreConfig::test());
    let summary = aggregator.summarize(10).await.unwrap();

    assert_eq!(summary.total, 5);
    assert_eq!(summary.pending, 2);
    assert_eq!(summary.in_progress, 1);
    assert_eq!(summary.completed, 1);
    assert_eq!(summary.failed, 1);
}

#[tokio::test]
async fn pipeline_overview_lists_matching_pipelines_only() {
    let directory = Arc::new(MockDirectoryService::new());
    let pipelines = Arc::new(MockPipelineService::new());
    pipelines.add_pipeline("account-factory-customizations");
    pipelines.add_pipeline("unrelated-deploy");
    pipelines.add_execution(
        "account-factory-customizations",
        "exec-1",
        ExecutionStatus::Succeeded,
        Some(Utc::now() - Duration::hours(1)),
        Some(Utc::now()),
    );
    let ledger = Arc::new(MemoryStore::new());
    let client = client(&directory, &pipelines, &ledger);

    let overview = client.pipeline_overview().await.unwrap();

    assert_eq!(overview.len(), 1);
    assert_eq!(overview[0].name, "account-factory-customizations");
    assert_eq!(overview[0].executions.len(), 1);
    assert!(overview[0].executions[0].duration().is_some());
}

#[tokio::test]
async fn health_reflects_pipeline_visibility() {
    let directory = Arc::new(MockDirectoryService::new());
    let pipelines = Arc::new(MockPipelineService::new());
    let ledger = Arc::new(MemoryStore::new());
    let client = client(&directory, &pipelines, &ledger);

    let health = client.health().await.unwrap();
    assert!(health.ledger.healthy);
    assert!(!health.pipelines.healthy);

    pipelines.add_pipeline("account-factory-customizations");
    let health = client.health().await.unwrap();
    assert!(health.pipelines.healthy);
}

#[tokio::test]
async fn facade_crud_and_resolution_round_trip() {
    let directory = Arc::new(MockDirectoryService::new());
    seed_org(&directory);
    let pipelines = Arc::new(MockPipelineService::new());
    let ledger = Arc::new(MemoryStore::new());
    let client = client(&directory, &pipelines, &ledger);

    let created = client
        .create_request(
            CreateRequestParams::new("client", "dev@example.com", "Dev Account", "Sandbox")
                .with_client_id("acme"),
        )
        .await
        .unwrap();
    assert!(created.request_id.starts_with("client-"));

    let updated = client
        .update_request(
            &created.request_id,
            &RequestUpdate::new()
                .with_status(RequestStatus::Completed)
                .with_account_id("111122223333"),
        )
        .await
        .unwrap();
    assert_eq!(updated.status, RequestStatus::Completed);

    let listed = client
        .list_requests(&RequestFilter::new().with_client_id("acme"), 5)
        .await
        .unwrap();
    assert_eq!(listed.len(), 1);

    let node = client.resolve_ou("Sandbox").await.unwrap();
    assert_eq!(node.id, "ou-sandbox");

    let ous = client.list_ous().await.unwrap();
    assert_eq!(ous.len(), 2);

    client.delete_request(&created.request_id).await.unwrap();
    assert!(client.get_request(&created.request_id).await.is_err());
}
