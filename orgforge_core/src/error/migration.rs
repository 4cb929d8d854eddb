//! Migration-orchestration error types

use thiserror::Error;

/// Errors raised while planning or executing a single move attempt
#[derive(Error, Debug)]
pub enum MigrationError {
    /// The account already sits under the resolved target parent; no move is attempted
    #[error("account {account_id} is already in target OU {ou_id}")]
    AlreadyInTargetOu { account_id: String, ou_id: String },

    /// The directory backend denied the move; never retried by the core
    #[error("move rejected by directory backend: {code} - {message}")]
    MoveRejected { code: String, message: String },

    /// A live move was requested without operator confirmation
    #[error("live move requires explicit operator confirmation")]
    ConfirmationRequired,
}

impl MigrationError {
    /// Create an already-in-target error
    pub fn already_in_target(account_id: impl Into<String>, ou_id: impl Into<String>) -> Self {
        Self::AlreadyInTargetOu {
            account_id: account_id.into(),
            ou_id: ou_id.into(),
        }
    }

    /// Create a move-rejected error carrying the backend's denial verbatim
    pub fn move_rejected(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MoveRejected {
            code: code.into(),
            message: message.into(),
        }
    }
}
