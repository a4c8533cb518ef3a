//! Hera console runtime: prints the dictionary snapshot and recent operation logs.

#![forbid(unsafe_code)]

mod console_config;
mod database;

use std::str::FromStr;
use std::sync::Arc;

use hera_application::{
    AuditLogQuery, AuditLogService, AuditRecordStore, DictionaryService, MiddlewareConfigLookup,
};
use hera_core::AppError;
use hera_domain::{AuditEntry, DictionaryEntry, MachineRegion};
use hera_infrastructure::{
    InMemoryAuditRecordStore, InMemoryMiddlewareConfigRepository, PostgresAuditRecordStore,
    PostgresMiddlewareConfigRepository,
};
use serde::Serialize;
use tracing::{info, warn};

use crate::console_config::{ConsoleConfig, init_tracing};
use crate::database::connect_and_migrate;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DictionarySnapshot {
    region: String,
    middleware_configs: Vec<DictionaryEntry>,
    resources: Vec<DictionaryEntry>,
    resource_types: Vec<DictionaryEntry>,
    app_types: Vec<DictionaryEntry>,
    regions: Vec<DictionaryEntry>,
    deploy_ways: Vec<DictionaryEntry>,
    mq_sources: Vec<DictionaryEntry>,
    recent_operation_logs: Vec<AuditEntry>,
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = ConsoleConfig::load()?;

    let (config_lookup, audit_store): (Arc<dyn MiddlewareConfigLookup>, Arc<dyn AuditRecordStore>) =
        match config.database_url.as_deref() {
            Some(database_url) => {
                let pool = connect_and_migrate(database_url, config.max_connections).await?;
                if config.migrate_only {
                    info!("migrations applied successfully");
                    return Ok(());
                }

                (
                    Arc::new(PostgresMiddlewareConfigRepository::new(pool.clone())),
                    Arc::new(PostgresAuditRecordStore::new(pool)),
                )
            }
            None => {
                warn!("DATABASE_URL is not set; using in-memory stores");
                (
                    Arc::new(InMemoryMiddlewareConfigRepository::new()),
                    Arc::new(InMemoryAuditRecordStore::new()),
                )
            }
        };

    if MachineRegion::from_str(config.region.as_str()).is_err() {
        warn!(
            region = %config.region,
            "HERA_REGION is not a known machine region; middleware tree will be empty"
        );
    }

    let dictionary_service = DictionaryService::new(config_lookup);
    let audit_log_service = AuditLogService::new(audit_store);

    let recent_operation_logs = audit_log_service
        .list_recent(AuditLogQuery {
            limit: config.audit_list_limit,
            ..AuditLogQuery::default()
        })
        .await?;

    let snapshot = DictionarySnapshot {
        middleware_configs: dictionary_service
            .query_middleware_config_tree(config.region.as_str())
            .await,
        resources: dictionary_service.query_resource_tree(),
        resource_types: dictionary_service.query_resource_type_tree(),
        app_types: dictionary_service.query_app_type_list(),
        regions: dictionary_service.query_region_list(),
        deploy_ways: dictionary_service.query_deploy_way_list(),
        mq_sources: dictionary_service.query_mq_source_list(),
        recent_operation_logs,
        region: config.region,
    };

    let rendered = serde_json::to_string_pretty(&snapshot)
        .map_err(|error| AppError::Internal(format!("failed to render snapshot: {error}")))?;
    println!("{rendered}");

    info!(
        middleware_configs = snapshot.middleware_configs.len(),
        operation_logs = snapshot.recent_operation_logs.len(),
        "dictionary snapshot printed"
    );

    Ok(())
}
