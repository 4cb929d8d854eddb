//! Request ledger
//!
//! Durable store of account provisioning requests and their lifecycle state.
//! The persisted shape keys records by `request_id` and carries a secondary
//! index on `(client_id, status)` so filtered listings stay keyed lookups
//! rather than full-store scans.

pub mod memory;
#[cfg(feature = "database")]
pub mod schema;
#[cfg(feature = "database")]
pub mod sqlite;
pub mod store;
pub mod types;

pub use memory::MemoryStore;
#[cfg(feature = "database")]
pub use sqlite::SqliteStore;
pub use store::RequestStore;
pub use types::{AccountRequest, RequestFilter, RequestStatus, RequestUpdate, new_request_id};
