//! Migration orchestration
//!
//! Plans and executes moves of existing accounts between OUs, and creates
//! provisioning-flavored migration requests tracked through the ledger.

pub mod orchestrator;
pub mod plan;

pub use orchestrator::MigrationOrchestrator;
pub use plan::{Confirmation, MovePlan, MoveReceipt, MoveSource, ProvisioningParams};
