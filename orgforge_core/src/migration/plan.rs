//! Move-plan types
//!
//! A [`MovePlan`] is the computed plan for a single move: it exists only for
//! the duration of one orchestration call and is never persisted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How the caller identifies the account to move
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveSource {
    AccountId(String),
    AccountName(String),
}

impl MoveSource {
    /// Classify a raw identifier: a 12-digit string is an account id,
    /// anything else is treated as an account name
    pub fn parse(raw: &str) -> Self {
        if raw.len() == 12 && raw.chars().all(|c| c.is_ascii_digit()) {
            Self::AccountId(raw.to_string())
        } else {
            Self::AccountName(raw.to_string())
        }
    }
}

/// The computed plan for a single move
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MovePlan {
    pub account_id: String,
    pub account_name: String,
    pub source_parent_id: String,
    pub target_parent_id: String,
    pub target_ou_name: String,
}

/// Operator confirmation gate for live moves
///
/// A live move is issued only with [`Confirmation::Confirmed`]; a dry run
/// never needs one because planning alone performs no mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Confirmed,
    Withheld,
}

/// Receipt of a completed move
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MoveReceipt {
    pub account_id: String,
    pub source_parent_id: String,
    pub target_parent_id: String,
    pub moved_at: DateTime<Utc>,
}

/// Inputs for a provisioning-flavored migration: a NEW account is created via
/// the pipeline while the existing account stays in place
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvisioningParams {
    /// The existing account being migrated away from
    pub original_account_id: String,
    pub account_name: String,
    pub email: String,
    pub target_ou: String,
    pub client_id: String,
    pub requested_by: String,
}
