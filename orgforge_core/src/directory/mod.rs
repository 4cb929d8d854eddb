//! Directory-service integration
//!
//! The directory backend owns the account/OU hierarchy; this module holds the
//! read-through view of it, the client trait the backend is consumed through,
//! and the name-to-node resolver.

pub mod resolver;
pub mod service;
pub mod types;

pub use resolver::{OuEntry, OuResolver};
pub use service::DirectoryService;
pub use types::{Account, OuNode, Page, ParentKind, ParentRef};
