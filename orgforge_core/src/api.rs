//! Core API module
//!
//! This module contains the main public API structures for the orgforge core
//! library: the client facade the presentation layer drives, and the
//! parameter types for creating requests.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::CoreConfig;
use crate::directory::resolver::{OuEntry, OuResolver};
use crate::directory::service::DirectoryService;
use crate::directory::types::OuNode;
use crate::error::{Error, Result};
use crate::ledger::memory::MemoryStore;
use crate::ledger::store::RequestStore;
use crate::ledger::types::{
    AccountRequest, RequestFilter, RequestUpdate, new_request_id,
};
use crate::migration::orchestrator::MigrationOrchestrator;
use crate::migration::plan::{
    Confirmation, MovePlan, MoveReceipt, MoveSource, ProvisioningParams,
};
use crate::status::aggregator::{
    CombinedStatus, HealthReport, PipelineReport, StatusAggregator, SystemSummary,
};
use crate::pipeline::service::PipelineService;

/// Parameters for creating a new account request
///
/// # Examples
///
/// ```
/// use orgforge_core::CreateRequestParams;
///
/// let params = CreateRequestParams::new("client", "dev@example.com", "Dev Account", "Sandbox")
///     .with_client_id("acme")
///     .with_requested_by("alex");
/// ```
#[derive(Debug, Clone)]
pub struct CreateRequestParams {
    template: String,
    email: String,
    name: String,
    target_ou: String,
    client_id: String,
    requested_by: String,
    customizations: BTreeMap<String, String>,
    request_id: Option<String>,
}

impl CreateRequestParams {
    pub fn new(
        template: impl Into<String>,
        email: impl Into<String>,
        name: impl Into<String>,
        target_ou: impl Into<String>,
    ) -> Self {
        Self {
            template: template.into(),
            email: email.into(),
            name: name.into(),
            target_ou: target_ou.into(),
            client_id: "default".to_string(),
            requested_by: "operator".to_string(),
            customizations: BTreeMap::new(),
            request_id: None,
        }
    }

    pub fn with_client_id(mut self, client_id: impl Into<String>) -> Self {
        self.client_id = client_id.into();
        self
    }

    pub fn with_requested_by(mut self, requested_by: impl Into<String>) -> Self {
        self.requested_by = requested_by.into();
        self
    }

    pub fn with_customizations(mut self, customizations: BTreeMap<String, String>) -> Self {
        self.customizations = customizations;
        self
    }

    /// Override the generated request id; the caller then owns collision
    /// avoidance
    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }
}

/// Main client facade composing the ledger, directory and pipeline backends
///
/// Every operation returns a result-or-error value and runs to completion
/// before returning; there is no background scheduling.
pub struct OrgforgeClient {
    ledger: Arc<dyn RequestStore>,
    resolver: OuResolver,
    orchestrator: MigrationOrchestrator,
    aggregator: StatusAggregator,
}

impl OrgforgeClient {
    /// Create a client over explicit backend implementations
    pub fn new(
        config: CoreConfig,
        directory: Arc<dyn DirectoryService>,
        pipelines: Arc<dyn PipelineService>,
        ledger: Arc<dyn RequestStore>,
    ) -> Self {
        let resolver = OuResolver::new(directory.clone(), &config);
        let orchestrator = MigrationOrchestrator::new(directory, ledger.clone(), &config);
        let aggregator = StatusAggregator::new(ledger.clone(), pipelines, &config);

        Self {
            ledger,
            resolver,
            orchestrator,
            aggregator,
        }
    }

    /// Create a client with a fresh in-memory ledger
    pub fn with_memory_store(
        config: CoreConfig,
        directory: Arc<dyn DirectoryService>,
        pipelines: Arc<dyn PipelineService>,
    ) -> Self {
        Self::new(config, directory, pipelines, Arc::new(MemoryStore::new()))
    }

    // --- Request ledger ---

    /// Create a new account request in the ledger
    pub async fn create_request(&self, params: CreateRequestParams) -> Result<AccountRequest> {
        let request_id = params
            .request_id
            .unwrap_or_else(|| new_request_id(&params.template));

        let request = AccountRequest::new(
            request_id,
            params.template,
            params.email,
            params.name,
            params.client_id,
            params.requested_by,
            params.target_ou,
        )
        .with_customizations(params.customizations);

        self.ledger.put(&request).await.map_err(Error::Ledger)?;
        Ok(request)
    }

    /// Fetch a request by id
    pub async fn get_request(&self, request_id: &str) -> Result<AccountRequest> {
        self.ledger.get(request_id).await.map_err(Error::Ledger)
    }

    /// List up to `limit` requests matching `filter`, newest first
    pub async fn list_requests(
        &self,
        filter: &RequestFilter,
        limit: usize,
    ) -> Result<Vec<AccountRequest>> {
        self.ledger
            .list(filter, limit)
            .await
            .map_err(Error::Ledger)
    }

    /// Merge a partial update into an existing request
    pub async fn update_request(
        &self,
        request_id: &str,
        update: &RequestUpdate,
    ) -> Result<AccountRequest> {
        self.ledger
            .update(request_id, update)
            .await
            .map_err(Error::Ledger)
    }

    /// Delete a request; idempotent
    pub async fn delete_request(&self, request_id: &str) -> Result<()> {
        self.ledger.delete(request_id).await.map_err(Error::Ledger)
    }

    // --- OU hierarchy ---

    /// Resolve an OU name to its node; first match in pre-order traversal wins
    pub async fn resolve_ou(&self, name: &str) -> Result<OuNode> {
        let root = self.resolver.default_root().await.map_err(Error::Directory)?;
        self.resolver
            .resolve(name, &root.id)
            .await
            .map_err(Error::Directory)
    }

    /// List every OU in the organization, annotated with depth
    pub async fn list_ous(&self) -> Result<Vec<OuEntry>> {
        let root = self.resolver.default_root().await.map_err(Error::Directory)?;
        self.resolver
            .list_all(&root.id)
            .await
            .map_err(Error::Directory)
    }

    // --- Migration ---

    /// Plan a move; read-only, never touches the mutating backend API
    pub async fn plan_move(&self, source: &MoveSource, target_ou: &str) -> Result<MovePlan> {
        self.orchestrator.plan_move(source, target_ou).await
    }

    /// Execute a planned move; requires explicit operator confirmation
    pub async fn execute_move(
        &self,
        plan: &MovePlan,
        confirmation: Confirmation,
    ) -> Result<MoveReceipt> {
        self.orchestrator.execute_move(plan, confirmation).await
    }

    /// Create a provisioning-flavored migration request
    pub async fn provision_replacement(
        &self,
        params: ProvisioningParams,
    ) -> Result<AccountRequest> {
        self.orchestrator.provision_replacement(params).await
    }

    // --- Status ---

    /// Combined ledger + pipeline status of one request
    pub async fn report_status(&self, request_id: &str) -> Result<CombinedStatus> {
        self.aggregator.report(request_id).await
    }

    /// System-health counts over the most recent `limit` requests
    pub async fn system_summary(&self, limit: usize) -> Result<SystemSummary> {
        self.aggregator.summarize(limit).await
    }

    /// All convention-matching pipelines with recent executions
    pub async fn pipeline_overview(&self) -> Result<Vec<PipelineReport>> {
        self.aggregator.pipeline_overview().await
    }

    /// Component reachability report
    pub async fn health(&self) -> Result<HealthReport> {
        self.aggregator.health().await
    }
}
