//! Request-ledger error types

use thiserror::Error;

/// Result type alias for ledger operations
pub type LedgerResult<T> = std::result::Result<T, LedgerError>;

/// Errors raised by a request store
#[derive(Error, Debug)]
pub enum LedgerError {
    /// No record exists under the given request id
    #[error("account request not found: {request_id}")]
    NotFound { request_id: String },

    /// A record already exists under the given request id; the existing record is left unchanged
    #[error("account request already exists: {request_id}")]
    AlreadyExists { request_id: String },

    /// The backing store failed
    #[error("ledger storage error: {message}")]
    Storage { message: String },
}

impl LedgerError {
    /// Create a not-found error
    pub fn not_found(request_id: impl Into<String>) -> Self {
        Self::NotFound {
            request_id: request_id.into(),
        }
    }

    /// Create an already-exists error
    pub fn already_exists(request_id: impl Into<String>) -> Self {
        Self::AlreadyExists {
            request_id: request_id.into(),
        }
    }

    /// Create a storage error
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }
}

#[cfg(feature = "database")]
impl From<sqlx::Error> for LedgerError {
    fn from(err: sqlx::Error) -> Self {
        Self::storage(err.to_string())
    }
}
