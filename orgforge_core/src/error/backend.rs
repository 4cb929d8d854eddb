//! Backend-call error types shared by the directory and pipeline clients

use std::time::Duration;
use thiserror::Error;

/// Failure of a single call against an external backend service
#[derive(Error, Debug)]
pub enum BackendError {
    /// Transient infrastructure failure, safe for the caller to retry with backoff
    #[error("{service} unavailable: {message}")]
    Unavailable {
        service: &'static str,
        message: String,
    },

    /// Per-call timeout expired before the backend answered
    #[error("{service} call timed out after {timeout:?}")]
    Timeout {
        service: &'static str,
        timeout: Duration,
    },

    /// Authoritative denial from the backend, surfaced with its machine-readable code
    #[error("{service} error: {code} - {message}")]
    Api {
        service: &'static str,
        code: String,
        message: String,
    },
}

impl BackendError {
    /// Create an unavailable error
    pub fn unavailable(service: &'static str, message: impl Into<String>) -> Self {
        Self::Unavailable {
            service,
            message: message.into(),
        }
    }

    /// Create a timeout error
    pub fn timeout(service: &'static str, timeout: Duration) -> Self {
        Self::Timeout { service, timeout }
    }

    /// Create an API error with the backend's error code
    pub fn api(
        service: &'static str,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::Api {
            service,
            code: code.into(),
            message: message.into(),
        }
    }

    /// Check if this error is transient and can be retried by the caller
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Unavailable { .. } | Self::Timeout { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_errors() {
        let errors = vec![
            BackendError::unavailable("directory service", "connection reset"),
            BackendError::timeout("pipeline service", Duration::from_secs(30)),
        ];

        for err in errors {
            assert!(err.is_transient(), "{err:?} should be transient");
        }
    }

    #[test]
    fn test_api_errors_are_not_transient() {
        let err = BackendError::api("directory service", "AccessDenied", "no permission");
        assert!(!err.is_transient());
        assert!(err.to_string().contains("AccessDenied"));
    }

    #[test]
    fn test_timeout_display_includes_budget() {
        let err = BackendError::timeout("directory service", Duration::from_secs(5));
        assert!(err.to_string().contains("5s"));
    }
}
