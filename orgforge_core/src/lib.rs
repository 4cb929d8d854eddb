//! orgforge core library
//!
//! Provisions and relocates cloud-account resources inside a hierarchical
//! organizational structure: account requests are stored in a ledger and
//! tracked to completion by an external provisioning pipeline, and existing
//! accounts are moved between organizational units through the directory
//! backend. The textual presentation layer is an external collaborator; this
//! library returns structured result values only.

use std::time::Duration;

pub mod api;
pub mod config;
pub mod directory;
pub mod error;
pub mod ledger;
pub mod migration;
pub mod pipeline;
pub mod provisioning;
pub mod status;

// Re-export main types
pub use api::{CreateRequestParams, OrgforgeClient};
pub use config::{AppConfig, ConfigManager, LedgerConfig};
pub use directory::{Account, DirectoryService, OuEntry, OuNode, OuResolver, Page, ParentKind, ParentRef};
pub use error::{BackendError, DirectoryError, Error, LedgerError, MigrationError, PipelineError, Result};
pub use ledger::{
    AccountRequest, MemoryStore, RequestFilter, RequestStatus, RequestStore, RequestUpdate,
    new_request_id,
};
#[cfg(feature = "database")]
pub use ledger::SqliteStore;
pub use migration::{
    Confirmation, MigrationOrchestrator, MovePlan, MoveReceipt, MoveSource, ProvisioningParams,
};
pub use pipeline::{ExecutionStatus, ExecutionSummary, PipelineService, PipelineSummary};
pub use provisioning::ProvisioningSpec;
pub use status::{
    CombinedStatus, ComponentHealth, HealthReport, PipelineReport, PipelineStatus,
    StatusAggregator, SystemSummary,
};

use serde::{Deserialize, Serialize};

/// Core configuration
///
/// Passed into every composing service; each external-service call carries
/// its own timeout derived from `backend_timeout_secs`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoreConfig {
    /// Backend region handed to client constructors
    pub region: String,
    /// Credential profile handed to client constructors
    pub profile: String,
    /// Per-call timeout budget for every backend suspension point
    pub backend_timeout_secs: u64,
    /// Depth guard for hierarchy traversal; exceeding it is a malformed hierarchy
    pub max_ou_depth: usize,
    /// Case-insensitive substring selecting provisioning pipelines by name
    pub pipeline_name_filter: String,
    /// Executions fetched per pipeline when aggregating status
    pub executions_per_pipeline: usize,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            region: "eu-west-3".to_string(),
            profile: "default".to_string(),
            backend_timeout_secs: 30,
            max_ou_depth: 10,
            pipeline_name_filter: "account-factory".to_string(),
            executions_per_pipeline: 5,
        }
    }
}

impl CoreConfig {
    /// Create a test configuration
    pub fn test() -> Self {
        Self {
            region: "test-region".to_string(),
            profile: "test".to_string(),
            backend_timeout_secs: 5,
            max_ou_depth: 6,
            pipeline_name_filter: "account-factory".to_string(),
            executions_per_pipeline: 5,
        }
    }

    /// Per-call timeout budget
    pub(crate) fn call_timeout(&self) -> Duration {
        Duration::from_secs(self.backend_timeout_secs)
    }
}
