use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use hera_application::{ActionOutcome, AuditLogQuery, AuditRecordStore};
use hera_core::{AppError, AppResult};
use hera_domain::{AuditEntry, AuditEntryId, OperationAction};

/// PostgreSQL-backed operation log store.
#[derive(Clone)]
pub struct PostgresAuditRecordStore {
    pool: PgPool,
}

impl PostgresAuditRecordStore {
    /// Creates a store with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct OperationLogRow {
    id: i64,
    operator_name: String,
    module_name: String,
    interface_name: String,
    request_url: String,
    action: String,
    result_desc: Option<String>,
    created_at: DateTime<Utc>,
}

impl TryFrom<OperationLogRow> for AuditEntry {
    type Error = AppError;

    fn try_from(row: OperationLogRow) -> Result<Self, Self::Error> {
        let action = OperationAction::from_str(row.action.as_str()).map_err(|error| {
            AppError::Internal(format!(
                "operation log {} has invalid action: {error}",
                row.id
            ))
        })?;

        Ok(AuditEntry::restore(
            AuditEntryId::new(row.id),
            row.operator_name,
            row.module_name,
            row.interface_name,
            row.request_url,
            action,
            row.result_desc,
            row.created_at,
        ))
    }
}

#[async_trait]
impl AuditRecordStore for PostgresAuditRecordStore {
    async fn create(&self, entry: &AuditEntry) -> AppResult<Option<AuditEntryId>> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO operation_logs (
                operator_name,
                module_name,
                interface_name,
                request_url,
                action,
                created_at,
                updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $6)
            RETURNING id
            "#,
        )
        .bind(entry.operator_name())
        .bind(entry.module_name())
        .bind(entry.interface_name())
        .bind(entry.request_url())
        .bind(entry.action().as_str())
        .bind(entry.created_at())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| {
            AppError::Unavailable(format!("failed to create operation log entry: {error}"))
        })?;

        Ok(id.map(AuditEntryId::new))
    }

    async fn update(
        &self,
        id: AuditEntryId,
        entry: &AuditEntry,
        outcome: &ActionOutcome,
    ) -> AppResult<()> {
        let payload = outcome.payload.as_ref().map(ToString::to_string);
        let result = sqlx::query(
            r#"
            UPDATE operation_logs
            SET result_desc = $2,
                result_payload = $3,
                updated_at = now()
            WHERE id = $1
            "#,
        )
        .bind(id.as_i64())
        .bind(entry.result_desc())
        .bind(payload)
        .execute(&self.pool)
        .await
        .map_err(|error| {
            AppError::Unavailable(format!("failed to finalize operation log entry: {error}"))
        })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("operation log entry {id}")));
        }

        Ok(())
    }

    async fn find(&self, id: AuditEntryId) -> AppResult<Option<AuditEntry>> {
        let row = sqlx::query_as::<_, OperationLogRow>(
            r#"
            SELECT
                id,
                operator_name,
                module_name,
                interface_name,
                request_url,
                action,
                result_desc,
                created_at
            FROM operation_logs
            WHERE id = $1
            "#,
        )
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to find operation log: {error}")))?;

        row.map(AuditEntry::try_from).transpose()
    }

    async fn list_recent(&self, query: AuditLogQuery) -> AppResult<Vec<AuditEntry>> {
        let limit = i64::try_from(query.limit).unwrap_or(i64::MAX);
        let offset = i64::try_from(query.offset).unwrap_or(i64::MAX);
        let rows = sqlx::query_as::<_, OperationLogRow>(
            r#"
            SELECT
                id,
                operator_name,
                module_name,
                interface_name,
                request_url,
                action,
                result_desc,
                created_at
            FROM operation_logs
            WHERE ($1::TEXT IS NULL OR action = $1)
                AND ($2::TEXT IS NULL OR operator_name = $2)
            ORDER BY id DESC
            LIMIT $3
            OFFSET $4
            "#,
        )
        .bind(query.action.map(|action| action.as_str()))
        .bind(query.operator)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to list operation logs: {error}")))?;

        rows.into_iter().map(AuditEntry::try_from).collect()
    }
}

#[cfg(test)]
mod tests;
