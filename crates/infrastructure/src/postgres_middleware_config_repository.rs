use async_trait::async_trait;
use sqlx::{FromRow, PgPool};

use hera_application::MiddlewareConfigLookup;
use hera_core::{AppError, AppResult};
use hera_domain::{MiddlewareConfig, MiddlewareConnection};

/// PostgreSQL-backed middleware config lookup.
#[derive(Clone)]
pub struct PostgresMiddlewareConfigRepository {
    pool: PgPool,
}

impl PostgresMiddlewareConfigRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct MiddlewareConfigRow {
    id: i64,
    alias: String,
    type_code: i32,
    region_en: String,
    name_server: Option<String>,
    service_url: Option<String>,
    access_key: Option<String>,
    secret_key: Option<String>,
    authorization_token: Option<String>,
    org_id: Option<String>,
    team_id: Option<String>,
}

impl TryFrom<MiddlewareConfigRow> for MiddlewareConfig {
    type Error = AppError;

    fn try_from(row: MiddlewareConfigRow) -> Result<Self, Self::Error> {
        Ok(
            MiddlewareConfig::new(row.id, row.alias, row.type_code, row.region_en)?
                .with_connection(MiddlewareConnection {
                    name_server: row.name_server,
                    service_url: row.service_url,
                    access_key: row.access_key,
                    secret_key: row.secret_key,
                    authorization: row.authorization_token,
                })
                .with_scope(row.org_id, row.team_id),
        )
    }
}

#[async_trait]
impl MiddlewareConfigLookup for PostgresMiddlewareConfigRepository {
    async fn list_by_region(&self, region_key: &str) -> AppResult<Vec<MiddlewareConfig>> {
        let rows = sqlx::query_as::<_, MiddlewareConfigRow>(
            r#"
            SELECT
                id,
                alias,
                type_code,
                region_en,
                name_server,
                service_url,
                access_key,
                secret_key,
                authorization_token,
                org_id,
                team_id
            FROM middleware_configs
            WHERE region_en = $1
            ORDER BY id
            "#,
        )
        .bind(region_key)
        .fetch_all(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to list middleware configs: {error}"))
        })?;

        rows.into_iter().map(MiddlewareConfig::try_from).collect()
    }
}
