//! Migration orchestrator
//!
//! Drives a safe move of an account from its current parent to a target
//! parent. Planning is read-only; the mutating `move_account` call is issued
//! only from [`execute_move`](MigrationOrchestrator::execute_move), after the
//! confirmation gate, and is never retried: the backend's move is not
//! guaranteed idempotent in all failure modes, so a failed move surfaces
//! verbatim and requires a fresh orchestration attempt.
//!
//! Moves against a single account are non-reentrant by caller discipline;
//! once the live call has been issued, cancellation has no effect.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use log::{debug, info};

use crate::CoreConfig;
use crate::directory::resolver::OuResolver;
use crate::directory::service::{DirectoryService, timed};
use crate::directory::types::{Account, ParentRef};
use crate::error::directory::{DirectoryError, DirectoryResult};
use crate::error::{BackendError, Error, MigrationError, Result};
use crate::ledger::store::RequestStore;
use crate::ledger::types::{AccountRequest, new_request_id};
use crate::migration::plan::{
    Confirmation, MovePlan, MoveReceipt, MoveSource, ProvisioningParams,
};

/// Template applied to provisioning-flavored migrations
const MIGRATION_TEMPLATE: &str = "client";

/// Orchestrates account moves and provisioning-flavored migrations
pub struct MigrationOrchestrator {
    directory: Arc<dyn DirectoryService>,
    ledger: Arc<dyn RequestStore>,
    resolver: OuResolver,
    call_timeout: Duration,
}

impl MigrationOrchestrator {
    pub fn new(
        directory: Arc<dyn DirectoryService>,
        ledger: Arc<dyn RequestStore>,
        config: &CoreConfig,
    ) -> Self {
        let resolver = OuResolver::new(directory.clone(), config);
        Self {
            directory,
            ledger,
            resolver,
            call_timeout: config.call_timeout(),
        }
    }

    /// Resolve the account, its current parent and the target OU into a plan
    ///
    /// Read-only: no mutating call is issued unless planning fully succeeded
    /// and the caller goes on to [`execute_move`](Self::execute_move). A plan
    /// whose source parent equals the resolved target parent is reported as
    /// `AlreadyInTargetOu` instead of being handed back for execution.
    pub async fn plan_move(&self, source: &MoveSource, target_ou: &str) -> Result<MovePlan> {
        let account = self.resolve_account(source).await.map_err(Error::Directory)?;
        let parent = self
            .current_parent(&account.id)
            .await
            .map_err(Error::Directory)?;

        let root = self.resolver.default_root().await.map_err(Error::Directory)?;
        let target = self
            .resolver
            .resolve(target_ou, &root.id)
            .await
            .map_err(Error::Directory)?;

        if parent.id == target.id {
            return Err(Error::Migration(MigrationError::already_in_target(
                &account.id,
                &target.id,
            )));
        }

        debug!(
            "planned move of {} ({}) from {} to {} ({})",
            account.name, account.id, parent.id, target.name, target.id
        );

        Ok(MovePlan {
            account_id: account.id,
            account_name: account.name,
            source_parent_id: parent.id,
            target_parent_id: target.id,
            target_ou_name: target.name,
        })
    }

    /// Execute a planned move against the directory backend
    ///
    /// Requires explicit operator confirmation. The move is a single backend
    /// call, all-or-nothing from the orchestrator's perspective; an
    /// authoritative denial surfaces as `MoveRejected`.
    pub async fn execute_move(
        &self,
        plan: &MovePlan,
        confirmation: Confirmation,
    ) -> Result<MoveReceipt> {
        if confirmation != Confirmation::Confirmed {
            return Err(Error::Migration(MigrationError::ConfirmationRequired));
        }

        let result = timed(
            self.call_timeout,
            self.directory.move_account(
                &plan.account_id,
                &plan.source_parent_id,
                &plan.target_parent_id,
            ),
        )
        .await;

        match result {
            Ok(()) => {
                info!(
                    "moved account {} from {} to {}",
                    plan.account_id, plan.source_parent_id, plan.target_parent_id
                );
                Ok(MoveReceipt {
                    account_id: plan.account_id.clone(),
                    source_parent_id: plan.source_parent_id.clone(),
                    target_parent_id: plan.target_parent_id.clone(),
                    moved_at: Utc::now(),
                })
            }
            Err(DirectoryError::Backend(BackendError::Api { code, message, .. })) => Err(
                Error::Migration(MigrationError::move_rejected(code, message)),
            ),
            Err(other) => Err(Error::Directory(other)),
        }
    }

    /// Create a provisioning-flavored migration request
    ///
    /// Instead of moving the existing account, a NEW account is provisioned
    /// via the pipeline; the request lands in the ledger as `pending`, tagged
    /// as a migration, and is tracked asynchronously by the status
    /// aggregator.
    pub async fn provision_replacement(
        &self,
        params: ProvisioningParams,
    ) -> Result<AccountRequest> {
        let mut customizations = BTreeMap::new();
        customizations.insert(
            "migration_source".to_string(),
            "existing_account".to_string(),
        );
        customizations.insert(
            "original_account_id".to_string(),
            params.original_account_id.clone(),
        );
        customizations.insert("migration_type".to_string(), "ou_change".to_string());

        let request = AccountRequest::new(
            new_request_id("migrate"),
            MIGRATION_TEMPLATE,
            params.email,
            params.account_name,
            params.client_id,
            params.requested_by,
            params.target_ou,
        )
        .with_customizations(customizations);

        self.ledger.put(&request).await.map_err(Error::Ledger)?;
        info!(
            "created migration request {} for account {}",
            request.request_id, params.original_account_id
        );
        Ok(request)
    }

    /// Resolve the account identity by id, or by case-insensitive exact name
    /// across the paginated account listing (first match wins, same ambiguity
    /// policy as OU resolution)
    async fn resolve_account(&self, source: &MoveSource) -> DirectoryResult<Account> {
        match source {
            MoveSource::AccountId(id) => {
                timed(self.call_timeout, self.directory.describe_account(id)).await
            }
            MoveSource::AccountName(name) => {
                let wanted = name.to_lowercase();
                let mut cursor: Option<String> = None;

                loop {
                    let page = timed(
                        self.call_timeout,
                        self.directory.list_accounts(cursor.as_deref()),
                    )
                    .await?;

                    if let Some(account) = page
                        .items
                        .into_iter()
                        .find(|account| account.name.to_lowercase() == wanted)
                    {
                        return Ok(account);
                    }

                    match page.next_cursor {
                        Some(next) => cursor = Some(next),
                        None => return Err(DirectoryError::account_not_found(name)),
                    }
                }
            }
        }
    }

    /// Fetch the account's current parent via the parent listing
    async fn current_parent(&self, account_id: &str) -> DirectoryResult<ParentRef> {
        let parents = timed(self.call_timeout, self.directory.list_parents(account_id)).await?;
        parents.into_iter().next().ok_or_else(|| {
            DirectoryError::malformed(format!("account {account_id} has no parent"))
        })
    }
}
