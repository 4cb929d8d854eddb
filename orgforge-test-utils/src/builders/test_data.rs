//! Test data builders for creating test scenarios

use chrono::{DateTime, Utc};

use orgforge_core::{AccountRequest, RequestStatus};

use crate::mocks::MockDirectoryService;

/// Builder for account requests in test scenarios
///
/// Defaults to a pending "client"-template request for client "acme".
pub struct RequestBuilder {
    request_id: String,
    template: String,
    email: String,
    name: String,
    client_id: String,
    requested_by: String,
    target_ou: String,
    status: RequestStatus,
    created_at: Option<DateTime<Utc>>,
    customizations: Vec<(String, String)>,
}

impl RequestBuilder {
    pub fn new(request_id: &str) -> Self {
        Self {
            request_id: request_id.to_string(),
            template: "client".to_string(),
            email: format!("{request_id}@example.com"),
            name: format!("Account {request_id}"),
            client_id: "acme".to_string(),
            requested_by: "operator".to_string(),
            target_ou: "Sandbox".to_string(),
            status: RequestStatus::Pending,
            created_at: None,
            customizations: Vec::new(),
        }
    }

    pub fn with_template(mut self, template: &str) -> Self {
        self.template = template.to_string();
        self
    }

    pub fn with_email(mut self, email: &str) -> Self {
        self.email = email.to_string();
        self
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    pub fn with_client_id(mut self, client_id: &str) -> Self {
        self.client_id = client_id.to_string();
        self
    }

    pub fn with_target_ou(mut self, target_ou: &str) -> Self {
        self.target_ou = target_ou.to_string();
        self
    }

    pub fn with_status(mut self, status: RequestStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }

    pub fn with_customization(mut self, key: &str, value: &str) -> Self {
        self.customizations.push((key.to_string(), value.to_string()));
        self
    }

    pub fn build(self) -> AccountRequest {
        let mut request = AccountRequest::new(
            self.request_id,
            self.template,
            self.email,
            self.name,
            self.client_id,
            self.requested_by,
            self.target_ou,
        )
        .with_customizations(self.customizations.into_iter().collect());

        request.status = self.status;
        if let Some(created_at) = self.created_at {
            request.created_at = created_at;
            request.updated_at = created_at;
        }
        request
    }
}

/// Seed a small organization: one root, `Sandbox` and `Production` OUs, and
/// one account sitting under the root. Returns the root id.
pub fn seed_org(directory: &MockDirectoryService) -> String {
    directory.add_root("r-root", "Root");
    directory.add_ou("r-root", "ou-sandbox", "Sandbox");
    directory.add_ou("r-root", "ou-production", "Production");
    directory.add_account("198610579545", "dev-account", "dev@example.com", "r-root");
    "r-root".to_string()
}

/// Seed the ambiguous-name fixture: `root -> { A -> Sandbox, B -> Sandbox }`
/// with `A` ahead of `B` in sibling order. Pre-order resolution must pick the
/// `Sandbox` under `A` (`ou-a-sandbox`).
pub fn seed_duplicate_sandbox_tree(directory: &MockDirectoryService) -> String {
    directory.add_root("r-root", "Root");
    directory.add_ou("r-root", "ou-a", "A");
    directory.add_ou("r-root", "ou-b", "B");
    directory.add_ou("ou-a", "ou-a-sandbox", "Sandbox");
    directory.add_ou("ou-b", "ou-b-sandbox", "Sandbox");
    "r-root".to_string()
}
