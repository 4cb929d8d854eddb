//! Directory-service client trait
//!
//! The backend is consumed as an opaque, error-returning service. Every call
//! is a suspension point and carries its own timeout, applied by the caller
//! through [`timed`].

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;

use crate::directory::types::{Account, OuNode, Page, ParentRef};
use crate::error::BackendError;
use crate::error::directory::{DirectoryError, DirectoryResult};

/// Service name used in backend error messages
pub(crate) const SERVICE_NAME: &str = "directory service";

/// Trait for directory backends
///
/// Mutating calls are limited to [`move_account`](DirectoryService::move_account);
/// everything else is read-only. `move_account` is not guaranteed idempotent by
/// the backend and must never be retried automatically.
#[async_trait]
pub trait DirectoryService: Send + Sync {
    /// Describe a single account by id
    async fn describe_account(&self, account_id: &str) -> DirectoryResult<Account>;

    /// List the parents of an account or OU
    async fn list_parents(&self, child_id: &str) -> DirectoryResult<Vec<ParentRef>>;

    /// List the organization roots
    async fn list_roots(&self) -> DirectoryResult<Vec<OuNode>>;

    /// List the child OUs of a parent, one page at a time
    async fn list_ous_for_parent(
        &self,
        parent_id: &str,
        cursor: Option<&str>,
    ) -> DirectoryResult<Page<OuNode>>;

    /// List all accounts in the organization, one page at a time
    async fn list_accounts(&self, cursor: Option<&str>) -> DirectoryResult<Page<Account>>;

    /// Move an account from one parent to another
    ///
    /// All-or-nothing from the orchestrator's perspective; a failure surfaces
    /// verbatim and requires a fresh orchestration attempt.
    async fn move_account(
        &self,
        account_id: &str,
        source_parent_id: &str,
        destination_parent_id: &str,
    ) -> DirectoryResult<()>;
}

/// Apply the per-call timeout budget to a single directory call
pub(crate) async fn timed<T, F>(budget: Duration, call: F) -> DirectoryResult<T>
where
    F: Future<Output = DirectoryResult<T>>,
{
    match tokio::time::timeout(budget, call).await {
        Ok(result) => result,
        Err(_) => Err(DirectoryError::Backend(BackendError::timeout(
            SERVICE_NAME,
            budget,
        ))),
    }
}
