//! SQLite-backed request store
//!
//! Durable implementation of [`RequestStore`] with a WAL-mode connection pool.
//! Partial updates are a single UPDATE statement, so a caller's field set is
//! applied atomically.

use std::collections::BTreeMap;
use std::path::Path;
use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Row, SqlitePool, sqlite::SqliteRow};

use crate::error::ledger::{LedgerError, LedgerResult};
use crate::ledger::schema::{CURRENT_SCHEMA_VERSION, SCHEMA_V1};
use crate::ledger::store::RequestStore;
use crate::ledger::types::{AccountRequest, RequestFilter, RequestStatus, RequestUpdate};

const SELECT_COLUMNS: &str = "request_id, template, email, name, client_id, requested_by, \
     target_ou, customizations, status, account_id, error_message, created_at, updated_at";

/// SQLite request store with connection pooling
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Open (or create) the store at `db_path` and run migrations
    pub async fn open(db_path: &Path) -> LedgerResult<Self> {
        if let Some(parent) = db_path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| LedgerError::storage(format!("create {}: {e}", parent.display())))?;
        }

        let connect_options =
            SqliteConnectOptions::from_str(&format!("sqlite://{}", db_path.display()))
                .map_err(|e| LedgerError::storage(e.to_string()))?
                .create_if_missing(true)
                .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
                .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .min_connections(1)
            .max_connections(5)
            .connect_with(connect_options)
            .await?;

        let store = Self { pool };
        store.migrate().await?;
        Ok(store)
    }

    /// Open an in-memory store, used by tests
    pub async fn in_memory() -> LedgerResult<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await?;

        let store = Self { pool };
        store.migrate().await?;
        Ok(store)
    }

    async fn migrate(&self) -> LedgerResult<()> {
        sqlx::raw_sql(SCHEMA_V1).execute(&self.pool).await?;

        sqlx::query("INSERT OR IGNORE INTO schema_version (version, applied_at) VALUES (?, ?)")
            .bind(CURRENT_SCHEMA_VERSION)
            .bind(Utc::now().to_rfc3339())
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    fn row_to_request(row: &SqliteRow) -> LedgerResult<AccountRequest> {
        let customizations: String = row.try_get("customizations")?;
        let customizations: BTreeMap<String, String> = serde_json::from_str(&customizations)
            .map_err(|e| LedgerError::storage(format!("bad customizations payload: {e}")))?;

        let status: String = row.try_get("status")?;
        let status = status
            .parse::<RequestStatus>()
            .map_err(LedgerError::storage)?;

        Ok(AccountRequest {
            request_id: row.try_get("request_id")?,
            template: row.try_get("template")?,
            email: row.try_get("email")?,
            name: row.try_get("name")?,
            client_id: row.try_get("client_id")?,
            requested_by: row.try_get("requested_by")?,
            target_ou: row.try_get("target_ou")?,
            customizations,
            status,
            account_id: row.try_get("account_id")?,
            error_message: row.try_get("error_message")?,
            created_at: parse_timestamp(row, "created_at")?,
            updated_at: parse_timestamp(row, "updated_at")?,
        })
    }
}

fn parse_timestamp(row: &SqliteRow, column: &str) -> LedgerResult<DateTime<Utc>> {
    let raw: String = row.try_get(column)?;
    DateTime::parse_from_rfc3339(&raw)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| LedgerError::storage(format!("bad {column} timestamp: {e}")))
}

#[async_trait]
impl RequestStore for SqliteStore {
    async fn put(&self, request: &AccountRequest) -> LedgerResult<()> {
        let customizations = serde_json::to_string(&request.customizations)
            .map_err(|e| LedgerError::storage(e.to_string()))?;

        let result = sqlx::query(
            r#"
            INSERT INTO account_requests
                (request_id, template, email, name, client_id, requested_by,
                 target_ou, customizations, status, account_id, error_message,
                 created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&request.request_id)
        .bind(&request.template)
        .bind(&request.email)
        .bind(&request.name)
        .bind(&request.client_id)
        .bind(&request.requested_by)
        .bind(&request.target_ou)
        .bind(&customizations)
        .bind(request.status.as_str())
        .bind(&request.account_id)
        .bind(&request.error_message)
        .bind(request.created_at.to_rfc3339())
        .bind(request.updated_at.to_rfc3339())
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
                Err(LedgerError::already_exists(&request.request_id))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn get(&self, request_id: &str) -> LedgerResult<AccountRequest> {
        let row = sqlx::query(&format!(
            "SELECT {SELECT_COLUMNS} FROM account_requests WHERE request_id = ?"
        ))
        .bind(request_id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Self::row_to_request(&row),
            None => Err(LedgerError::not_found(request_id)),
        }
    }

    async fn list(
        &self,
        filter: &RequestFilter,
        limit: usize,
    ) -> LedgerResult<Vec<AccountRequest>> {
        let limit = limit as i64;

        let rows = match (&filter.client_id, filter.status) {
            (Some(client_id), Some(status)) => {
                sqlx::query(&format!(
                    "SELECT {SELECT_COLUMNS} FROM account_requests \
                     WHERE client_id = ? AND status = ? \
                     ORDER BY created_at DESC, request_id ASC LIMIT ?"
                ))
                .bind(client_id)
                .bind(status.as_str())
                .bind(limit)
                .fetch_all(&self.pool)
                .await?
            }
            (Some(client_id), None) => {
                sqlx::query(&format!(
                    "SELECT {SELECT_COLUMNS} FROM account_requests \
                     WHERE client_id = ? \
                     ORDER BY created_at DESC, request_id ASC LIMIT ?"
                ))
                .bind(client_id)
                .bind(limit)
                .fetch_all(&self.pool)
                .await?
            }
            (None, Some(status)) => {
                sqlx::query(&format!(
                    "SELECT {SELECT_COLUMNS} FROM account_requests \
                     WHERE status = ? \
                     ORDER BY created_at DESC, request_id ASC LIMIT ?"
                ))
                .bind(status.as_str())
                .bind(limit)
                .fetch_all(&self.pool)
                .await?
            }
            (None, None) => {
                sqlx::query(&format!(
                    "SELECT {SELECT_COLUMNS} FROM account_requests \
                     ORDER BY created_at DESC, request_id ASC LIMIT ?"
                ))
                .bind(limit)
                .fetch_all(&self.pool)
                .await?
            }
        };

        let mut requests = Vec::with_capacity(rows.len());
        for row in &rows {
            requests.push(Self::row_to_request(row)?);
        }
        Ok(requests)
    }

    async fn update(
        &self,
        request_id: &str,
        update: &RequestUpdate,
    ) -> LedgerResult<AccountRequest> {
        let result = sqlx::query(
            r#"
            UPDATE account_requests SET
                status = COALESCE(?, status),
                account_id = COALESCE(?, account_id),
                error_message = COALESCE(?, error_message),
                updated_at = ?
            WHERE request_id = ?
            "#,
        )
        .bind(update.status.map(|s| s.as_str()))
        .bind(&update.account_id)
        .bind(&update.error_message)
        .bind(Utc::now().to_rfc3339())
        .bind(request_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(LedgerError::not_found(request_id));
        }

        self.get(request_id).await
    }

    async fn delete(&self, request_id: &str) -> LedgerResult<()> {
        sqlx::query("DELETE FROM account_requests WHERE request_id = ?")
            .bind(request_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
