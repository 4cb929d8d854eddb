//! Provisioning payload rendering
//!
//! Translates an [`AccountRequest`] into the payload shape the provisioning
//! backend consumes. Rendering is pure; handing the payload to the backend
//! is the pipeline's job, not this library's.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::ledger::types::AccountRequest;

/// Account-baseline parameters of a provisioning payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ControlTowerParameters {
    pub account_email: String,
    pub account_name: String,
    pub managed_organizational_unit: String,
    #[serde(rename = "SSOUserEmail")]
    pub sso_user_email: String,
    #[serde(rename = "SSOUserFirstName")]
    pub sso_user_first_name: String,
    #[serde(rename = "SSOUserLastName")]
    pub sso_user_last_name: String,
}

/// The full payload handed to the provisioning backend for one request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvisioningSpec {
    pub control_tower_parameters: ControlTowerParameters,
    pub account_tags: BTreeMap<String, String>,
    pub account_customizations_name: String,
    pub custom_fields: BTreeMap<String, String>,
}

impl ProvisioningSpec {
    /// Render the payload for a request
    pub fn render(request: &AccountRequest) -> Self {
        let (first_name, last_name) = split_sso_name(&request.name);

        let mut account_tags = BTreeMap::new();
        account_tags.insert("client".to_string(), request.client_id.clone());
        if request.customizations.contains_key("migration_source") {
            account_tags.insert("migration".to_string(), "true".to_string());
            if let Some(original) = request.customizations.get("original_account_id") {
                account_tags.insert("original_account_id".to_string(), original.clone());
            }
        }

        let account_customizations_name = if request.customizations.contains_key("migration_source")
        {
            "migration-customization".to_string()
        } else {
            format!("{}-customization", request.template)
        };

        Self {
            control_tower_parameters: ControlTowerParameters {
                account_email: request.email.clone(),
                account_name: request.name.clone(),
                managed_organizational_unit: request.target_ou.clone(),
                sso_user_email: request.email.clone(),
                sso_user_first_name: first_name,
                sso_user_last_name: last_name,
            },
            account_tags,
            account_customizations_name,
            custom_fields: request.customizations.clone(),
        }
    }

    /// Serialize the payload for forwarding
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Derive SSO first/last name from the account name: first and last
/// whitespace-separated words, with a fixed fallback for single-word names
fn split_sso_name(account_name: &str) -> (String, String) {
    let mut words = account_name.split_whitespace();
    match (words.next(), words.next_back()) {
        (Some(first), Some(last)) => (first.to_string(), last.to_string()),
        _ => (account_name.to_string(), "User".to_string()),
    }
}
