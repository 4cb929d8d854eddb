//! Integration tests for the request ledger

use std::time::Duration;

use orgforge_core::error::LedgerError;
use orgforge_core::{
    MemoryStore, RequestFilter, RequestStatus, RequestStore, RequestUpdate,
};
use orgforge_test_utils::RequestBuilder;

#[tokio::test]
async fn put_then_get_returns_the_same_value() {
    let store = MemoryStore::new();
    let request = RequestBuilder::new("migrate-2025-01-10-abc12345")
        .with_client_id("acme")
        .with_customization("migration_type", "ou_change")
        .build();

    store.put(&request).await.unwrap();
    let fetched = store.get("migrate-2025-01-10-abc12345").await.unwrap();

    assert_eq!(fetched, request);
}

#[tokio::test]
async fn colliding_put_fails_and_leaves_existing_record_unchanged() {
    let store = MemoryStore::new();
    let original = RequestBuilder::new("req-1").with_client_id("acme").build();
    store.put(&original).await.unwrap();

    let collision = RequestBuilder::new("req-1")
        .with_client_id("globex")
        .with_email("other@example.com")
        .build();
    let err = store.put(&collision).await.unwrap_err();

    assert!(matches!(err, LedgerError::AlreadyExists { .. }));
    assert_eq!(store.get("req-1").await.unwrap(), original);
}

#[tokio::test]
async fn repeated_identical_update_advances_only_updated_at() {
    let store = MemoryStore::new();
    store
        .put(&RequestBuilder::new("req-1").build())
        .await
        .unwrap();

    let update = RequestUpdate::new()
        .with_status(RequestStatus::InProgress)
        .with_account_id("198610579545");

    let first = store.update("req-1", &update).await.unwrap();
    tokio::time::sleep(Duration::from_millis(5)).await;
    let second = store.update("req-1", &update).await.unwrap();

    assert!(second.updated_at > first.updated_at);

    let mut comparable = second.clone();
    comparable.updated_at = first.updated_at;
    assert_eq!(comparable, first);
}

#[tokio::test]
async fn update_of_absent_record_is_not_found() {
    let store = MemoryStore::new();
    let err = store
        .update("ghost", &RequestUpdate::new().with_status(RequestStatus::Failed))
        .await
        .unwrap_err();

    assert!(matches!(err, LedgerError::NotFound { .. }));
}

#[tokio::test]
async fn empty_update_still_stamps_updated_at() {
    let store = MemoryStore::new();
    store
        .put(&RequestBuilder::new("req-1").build())
        .await
        .unwrap();
    let before = store.get("req-1").await.unwrap();

    tokio::time::sleep(Duration::from_millis(5)).await;
    let after = store.update("req-1", &RequestUpdate::new()).await.unwrap();

    assert!(after.updated_at > before.updated_at);
    assert_eq!(after.status, before.status);
}

#[tokio::test]
async fn delete_is_idempotent() {
    let store = MemoryStore::new();
    store
        .put(&RequestBuilder::new("req-1").build())
        .await
        .unwrap();

    store.delete("req-1").await.unwrap();
    store.delete("req-1").await.unwrap();
    store.delete("never-created").await.unwrap();
}

#[tokio::test]
async fn client_filtered_list_respects_limit_and_client() {
    let store = MemoryStore::new();
    for i in 0..8 {
        store
            .put(
                &RequestBuilder::new(&format!("acme-{i}"))
                    .with_client_id("acme")
                    .build(),
            )
            .await
            .unwrap();
    }
    for i in 0..3 {
        store
            .put(
                &RequestBuilder::new(&format!("globex-{i}"))
                    .with_client_id("globex")
                    .build(),
            )
            .await
            .unwrap();
    }

    let hits = store
        .list(&RequestFilter::new().with_client_id("acme"), 5)
        .await
        .unwrap();

    assert_eq!(hits.len(), 5);
    assert!(hits.iter().all(|r| r.client_id == "acme"));
}

#[tokio::test]
async fn list_returns_newest_first() {
    use chrono::{Duration as ChronoDuration, Utc};

    let store = MemoryStore::new();
    let base = Utc::now();
    for (i, age_minutes) in [30i64, 10, 20].iter().enumerate() {
        store
            .put(
                &RequestBuilder::new(&format!("req-{i}"))
                    .with_created_at(base - ChronoDuration::minutes(*age_minutes))
                    .build(),
            )
            .await
            .unwrap();
    }

    let hits = store.list(&RequestFilter::new(), 10).await.unwrap();
    let ids: Vec<&str> = hits.iter().map(|r| r.request_id.as_str()).collect();
    assert_eq!(ids, vec!["req-1", "req-2", "req-0"]);
}

mod properties {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        /// Filtered listings never exceed the limit and never leak a foreign
        /// client's records.
        #[test]
        fn list_never_exceeds_limit_or_leaks_clients(
            records in prop::collection::vec((0u8..3, 0u8..4), 0..24),
            limit in 0usize..8,
        ) {
            let rt = tokio::runtime::Runtime::new().unwrap();
            rt.block_on(async move {
                let store = MemoryStore::new();
                for (i, (client, status)) in records.iter().enumerate() {
                    let status = RequestStatus::ALL[*status as usize];
                    let request = RequestBuilder::new(&format!("req-{i}"))
                        .with_client_id(&format!("client-{client}"))
                        .with_status(status)
                        .build();
                    store.put(&request).await.unwrap();
                }

                let filter = RequestFilter::new().with_client_id("client-0");
                let hits = store.list(&filter, limit).await.unwrap();

                prop_assert!(hits.len() <= limit);
                prop_assert!(hits.iter().all(|r| r.client_id == "client-0"));

                let narrowed = filter.with_status(RequestStatus::Pending);
                let hits = store.list(&narrowed, limit).await.unwrap();
                prop_assert!(hits.len() <= limit);
                prop_assert!(hits
                    .iter()
                    .all(|r| r.client_id == "client-0" && r.status == RequestStatus::Pending));
                Ok(())
            })?;
        }
    }
}
