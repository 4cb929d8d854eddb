//! In-memory request store
//!
//! Keeps the full record map plus a `(client_id, status)` secondary index so
//! that client-scoped listings are keyed lookups, mirroring the persisted
//! index shape used by the durable store.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::error::ledger::{LedgerError, LedgerResult};
use crate::ledger::store::RequestStore;
use crate::ledger::types::{AccountRequest, RequestFilter, RequestStatus, RequestUpdate};

#[derive(Default)]
struct Inner {
    records: HashMap<String, AccountRequest>,
    by_client: HashMap<(String, RequestStatus), BTreeSet<String>>,
}

impl Inner {
    fn index_insert(&mut self, request: &AccountRequest) {
        self.by_client
            .entry((request.client_id.clone(), request.status))
            .or_default()
            .insert(request.request_id.clone());
    }

    fn index_remove(&mut self, client_id: &str, status: RequestStatus, request_id: &str) {
        if let Some(ids) = self
            .by_client
            .get_mut(&(client_id.to_string(), status))
        {
            ids.remove(request_id);
            if ids.is_empty() {
                self.by_client.remove(&(client_id.to_string(), status));
            }
        }
    }

}

fn newest_first(mut hits: Vec<AccountRequest>, limit: usize) -> Vec<AccountRequest> {
    hits.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| a.request_id.cmp(&b.request_id))
    });
    hits.truncate(limit);
    hits
}

/// In-memory request store backed by a `RwLock`ed map
#[derive(Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<Inner>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RequestStore for MemoryStore {
    async fn put(&self, request: &AccountRequest) -> LedgerResult<()> {
        let mut inner = self.inner.write().await;

        if inner.records.contains_key(&request.request_id) {
            return Err(LedgerError::already_exists(&request.request_id));
        }

        inner.index_insert(request);
        inner
            .records
            .insert(request.request_id.clone(), request.clone());
        Ok(())
    }

    async fn get(&self, request_id: &str) -> LedgerResult<AccountRequest> {
        let inner = self.inner.read().await;
        inner
            .records
            .get(request_id)
            .cloned()
            .ok_or_else(|| LedgerError::not_found(request_id))
    }

    async fn list(
        &self,
        filter: &RequestFilter,
        limit: usize,
    ) -> LedgerResult<Vec<AccountRequest>> {
        let inner = self.inner.read().await;

        let hits: Vec<AccountRequest> = match (&filter.client_id, filter.status) {
            // Keyed lookup on the (client_id, status) index
            (Some(client_id), Some(status)) => inner
                .by_client
                .get(&(client_id.clone(), status))
                .into_iter()
                .flatten()
                .filter_map(|id| inner.records.get(id).cloned())
                .collect(),
            // Keyed lookup across the client's index partitions
            (Some(client_id), None) => RequestStatus::ALL
                .iter()
                .filter_map(|status| inner.by_client.get(&(client_id.clone(), *status)))
                .flatten()
                .filter_map(|id| inner.records.get(id).cloned())
                .collect(),
            // Bounded scan with filter
            _ => inner
                .records
                .values()
                .filter(|request| filter.matches(request))
                .cloned()
                .collect(),
        };

        Ok(newest_first(hits, limit))
    }

    async fn update(
        &self,
        request_id: &str,
        update: &RequestUpdate,
    ) -> LedgerResult<AccountRequest> {
        let mut inner = self.inner.write().await;

        let mut request = inner
            .records
            .get(request_id)
            .cloned()
            .ok_or_else(|| LedgerError::not_found(request_id))?;

        let old_status = request.status;
        request.apply(update, Utc::now());

        if request.status != old_status {
            let client_id = request.client_id.clone();
            inner.index_remove(&client_id, old_status, request_id);
            inner.index_insert(&request);
        }
        inner
            .records
            .insert(request_id.to_string(), request.clone());

        Ok(request)
    }

    async fn delete(&self, request_id: &str) -> LedgerResult<()> {
        let mut inner = self.inner.write().await;

        if let Some(removed) = inner.records.remove(request_id) {
            inner.index_remove(&removed.client_id, removed.status, request_id);
        }
        Ok(())
    }
}
