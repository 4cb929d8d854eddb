//! Error types for the orgforge core library
//!
//! This module contains all error types used throughout the library, organized
//! into logical categories for better maintainability and clarity.

use thiserror::Error;

pub mod backend;
pub mod directory;
pub mod ledger;
pub mod migration;
pub mod pipeline;

pub use self::backend::BackendError;
pub use self::directory::{DirectoryError, DirectoryResult};
pub use self::ledger::{LedgerError, LedgerResult};
pub use self::migration::MigrationError;
pub use self::pipeline::{PipelineError, PipelineResult};

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the orgforge core library
///
/// Errors are categorized into four main types:
/// - Ledger errors: request store lookups and writes
/// - Directory errors: account/OU hierarchy reads and moves
/// - Pipeline errors: provisioning-pipeline visibility
/// - Migration errors: plan/execute failures of a single move attempt
#[derive(Error, Debug)]
pub enum Error {
    /// Request ledger errors
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// Directory service errors
    #[error(transparent)]
    Directory(#[from] DirectoryError),

    /// Pipeline service errors
    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    /// Migration orchestration errors
    #[error(transparent)]
    Migration(#[from] MigrationError),
}

impl Error {
    /// Check if this error is transient and safe for the caller to retry.
    ///
    /// The core never retries on its own; retry policy belongs to the caller.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Directory(DirectoryError::Backend(err)) => err.is_transient(),
            Self::Pipeline(PipelineError::Backend(err)) => err.is_transient(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as StdError;
    use std::time::Duration;

    #[test]
    fn test_not_found_error_creation() {
        let error = Error::Ledger(LedgerError::not_found("req-123"));

        match error {
            Error::Ledger(LedgerError::NotFound { request_id }) => {
                assert_eq!(request_id, "req-123");
            }
            _ => panic!("Expected Ledger::NotFound error"),
        }
    }

    #[test]
    fn test_already_exists_error_display() {
        let error = Error::Ledger(LedgerError::already_exists("req-123"));

        assert!(error.to_string().contains("req-123"));
        assert!(error.to_string().contains("already exists"));
    }

    #[test]
    fn test_ou_not_found_error() {
        let error = Error::Directory(DirectoryError::ou_not_found("Sandbox"));

        assert!(matches!(
            error,
            Error::Directory(DirectoryError::OuNotFound { .. })
        ));
        assert!(error.to_string().contains("Sandbox"));
    }

    #[test]
    fn test_move_rejected_error() {
        let error = Error::Migration(MigrationError::move_rejected(
            "AccessDenied",
            "missing move permission",
        ));

        assert!(matches!(
            error,
            Error::Migration(MigrationError::MoveRejected { .. })
        ));
        assert!(error.to_string().contains("AccessDenied"));
        assert!(!error.is_transient());
    }

    #[test]
    fn test_transient_classification() {
        let timeout = Error::Directory(DirectoryError::Backend(BackendError::timeout(
            "directory service",
            Duration::from_secs(30),
        )));
        let rejected = Error::Directory(DirectoryError::Backend(BackendError::api(
            "directory service",
            "ConstraintViolation",
            "policy restriction",
        )));

        assert!(timeout.is_transient());
        assert!(!rejected.is_transient());
    }

    #[test]
    fn test_error_source_chain() {
        let error = Error::Directory(DirectoryError::Backend(BackendError::unavailable(
            "directory service",
            "connection refused",
        )));

        let _: &dyn StdError = &error;
        assert!(error.source().is_some());
    }

    #[test]
    fn test_error_is_send_and_sync() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}

        assert_send::<Error>();
        assert_sync::<Error>();
    }

    #[test]
    fn test_error_display_formatting() {
        let errors = vec![
            Error::Ledger(LedgerError::not_found("req-1")),
            Error::Ledger(LedgerError::already_exists("req-1")),
            Error::Directory(DirectoryError::account_not_found("198610579545")),
            Error::Directory(DirectoryError::ou_not_found("Workloads")),
            Error::Directory(DirectoryError::malformed("cycle below ou-abc")),
            Error::Migration(MigrationError::ConfirmationRequired),
            Error::Migration(MigrationError::already_in_target("123", "ou-x")),
        ];

        for error in errors {
            assert!(!error.to_string().is_empty());
        }
    }
}
