//! Directory-service error types

use thiserror::Error;

use super::backend::BackendError;

/// Result type alias for directory operations
pub type DirectoryResult<T> = std::result::Result<T, DirectoryError>;

/// Errors raised while reading or mutating the account hierarchy
#[derive(Error, Debug)]
pub enum DirectoryError {
    /// No account matched the given id or name
    #[error("account not found: {query}")]
    AccountNotFound { query: String },

    /// OU-name resolution exhausted the tree without a match
    #[error("organizational unit '{name}' not found")]
    OuNotFound { name: String },

    /// The organization reports no root to traverse from
    #[error("organization has no root")]
    NoRoot,

    /// Structural anomaly in the hierarchy, fatal to the current operation only
    #[error("malformed hierarchy: {detail}")]
    MalformedHierarchy { detail: String },

    /// Underlying backend call failed
    #[error(transparent)]
    Backend(#[from] BackendError),
}

impl DirectoryError {
    /// Create an account-not-found error
    pub fn account_not_found(query: impl Into<String>) -> Self {
        Self::AccountNotFound {
            query: query.into(),
        }
    }

    /// Create an OU-not-found error
    pub fn ou_not_found(name: impl Into<String>) -> Self {
        Self::OuNotFound { name: name.into() }
    }

    /// Create a malformed-hierarchy error
    pub fn malformed(detail: impl Into<String>) -> Self {
        Self::MalformedHierarchy {
            detail: detail.into(),
        }
    }
}
