//! Account-request data model

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Lifecycle state of an account request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    Pending,
    InProgress,
    Completed,
    Failed,
}

impl RequestStatus {
    /// All lifecycle states, in progression order
    pub const ALL: [RequestStatus; 4] = [
        RequestStatus::Pending,
        RequestStatus::InProgress,
        RequestStatus::Completed,
        RequestStatus::Failed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RequestStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "in_progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            "failed" => Ok(Self::Failed),
            other => Err(format!("unknown request status: {other}")),
        }
    }
}

/// A provisioning intent tracked to completion by the external pipeline
///
/// `request_id` is unique across the ledger. The descriptive fields set at
/// creation are never mutated afterwards; only `status`, `account_id`,
/// `error_message` and `updated_at` change over a record's lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountRequest {
    pub request_id: String,
    pub template: String,
    pub email: String,
    pub name: String,
    pub client_id: String,
    pub requested_by: String,
    pub target_ou: String,
    #[serde(default)]
    pub customizations: BTreeMap<String, String>,
    pub status: RequestStatus,
    /// Populated only on transition into `completed`
    pub account_id: Option<String>,
    /// Populated only on transition into `failed`
    pub error_message: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl AccountRequest {
    /// Create a new pending request
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        request_id: impl Into<String>,
        template: impl Into<String>,
        email: impl Into<String>,
        name: impl Into<String>,
        client_id: impl Into<String>,
        requested_by: impl Into<String>,
        target_ou: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            request_id: request_id.into(),
            template: template.into(),
            email: email.into(),
            name: name.into(),
            client_id: client_id.into(),
            requested_by: requested_by.into(),
            target_ou: target_ou.into(),
            customizations: BTreeMap::new(),
            status: RequestStatus::Pending,
            account_id: None,
            error_message: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Attach an opaque customization payload forwarded to the provisioning backend
    pub fn with_customizations(mut self, customizations: BTreeMap<String, String>) -> Self {
        self.customizations = customizations;
        self
    }

    /// Merge a partial update into this record, stamping `updated_at`
    pub(crate) fn apply(&mut self, update: &RequestUpdate, now: DateTime<Utc>) {
        if let Some(status) = update.status {
            self.status = status;
        }
        if let Some(account_id) = &update.account_id {
            self.account_id = Some(account_id.clone());
        }
        if let Some(error_message) = &update.error_message {
            self.error_message = Some(error_message.clone());
        }
        self.updated_at = now;
    }
}

/// Partial-field update merged into an existing request
///
/// Absent fields are left untouched; applying any update rewrites
/// `updated_at`, even when every field is absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestUpdate {
    pub status: Option<RequestStatus>,
    pub account_id: Option<String>,
    pub error_message: Option<String>,
}

impl RequestUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_status(mut self, status: RequestStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_account_id(mut self, account_id: impl Into<String>) -> Self {
        self.account_id = Some(account_id.into());
        self
    }

    pub fn with_error_message(mut self, error_message: impl Into<String>) -> Self {
        self.error_message = Some(error_message.into());
        self
    }
}

/// Filter for ledger listings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestFilter {
    pub client_id: Option<String>,
    pub status: Option<RequestStatus>,
}

impl RequestFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client_id(mut self, client_id: impl Into<String>) -> Self {
        self.client_id = Some(client_id.into());
        self
    }

    pub fn with_status(mut self, status: RequestStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Check whether a record satisfies this filter
    pub fn matches(&self, request: &AccountRequest) -> bool {
        if let Some(client_id) = &self.client_id
            && &request.client_id != client_id
        {
            return false;
        }
        if let Some(status) = self.status
            && request.status != status
        {
            return false;
        }
        true
    }
}

/// Generate a collision-resistant request id: date-stamped prefix plus a
/// random 8-hex-char suffix, e.g. `migrate-2025-01-10-abc12345`
pub fn new_request_id(prefix: &str) -> String {
    let date = Utc::now().format("%Y-%m-%d");
    let suffix: u32 = rand::rng().random();
    format!("{prefix}-{date}-{suffix:08x}")
}
