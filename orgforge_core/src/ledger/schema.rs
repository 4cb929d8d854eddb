//! Database schema definitions for the durable request store

/// Current schema version
pub const CURRENT_SCHEMA_VERSION: i32 = 1;

/// Initial schema creation SQL
pub const SCHEMA_V1: &str = r#"
-- Schema version tracking
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER PRIMARY KEY,
    applied_at TEXT NOT NULL
);

-- Account provisioning requests
CREATE TABLE IF NOT EXISTS account_requests (
    request_id TEXT PRIMARY KEY,
    template TEXT NOT NULL,
    email TEXT NOT NULL,
    name TEXT NOT NULL,
    client_id TEXT NOT NULL,
    requested_by TEXT NOT NULL,
    target_ou TEXT NOT NULL,
    customizations TEXT NOT NULL DEFAULT '{}',
    status TEXT NOT NULL DEFAULT 'pending',
    account_id TEXT,
    error_message TEXT,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

-- Secondary index: exact-match queries on (client_id) or (client_id, status)
CREATE INDEX IF NOT EXISTS idx_requests_client_status
    ON account_requests (client_id, status);
"#;
