//! Request store trait definition

use async_trait::async_trait;

use crate::error::ledger::LedgerResult;
use crate::ledger::types::{AccountRequest, RequestFilter, RequestUpdate};

/// Trait for request-store implementations
///
/// The store is the only resource shared across concurrent callers; every
/// implementation must provide per-record atomic update semantics. No
/// cross-record invariants exist beyond `request_id` uniqueness.
#[async_trait]
pub trait RequestStore: Send + Sync {
    /// Insert a new request
    ///
    /// Fails with `AlreadyExists` when `request_id` collides; the existing
    /// record is left unchanged. Callers are responsible for generating
    /// collision-free ids (see [`new_request_id`](crate::ledger::new_request_id)).
    async fn put(&self, request: &AccountRequest) -> LedgerResult<()>;

    /// Fetch a request by id; no side effects
    async fn get(&self, request_id: &str) -> LedgerResult<AccountRequest>;

    /// List up to `limit` requests matching `filter`, newest first
    ///
    /// When `client_id` is part of the filter the lookup is index-backed;
    /// a status-only or unfiltered listing is a bounded scan.
    async fn list(
        &self,
        filter: &RequestFilter,
        limit: usize,
    ) -> LedgerResult<Vec<AccountRequest>>;

    /// Merge a partial update into an existing request
    ///
    /// Fails with `NotFound` when absent. The caller's field set is applied
    /// atomically and `updated_at` is always stamped. Returns the updated
    /// record.
    async fn update(
        &self,
        request_id: &str,
        update: &RequestUpdate,
    ) -> LedgerResult<AccountRequest>;

    /// Delete a request; deleting a non-existent id is not an error
    async fn delete(&self, request_id: &str) -> LedgerResult<()>;
}
