use hera_application::{ActionOutcome, AuditLogQuery, AuditRecordStore, MiddlewareConfigLookup};
use hera_domain::{AuditEntry, OperationAction, RequestContext, ResultSummary};
use serde_json::json;
use sqlx::PgPool;
use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;

use crate::PostgresMiddlewareConfigRepository;

use super::PostgresAuditRecordStore;

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

async fn test_pool() -> Option<PgPool> {
    let Ok(database_url) = std::env::var("DATABASE_URL") else {
        return None;
    };

    let pool = match PgPoolOptions::new()
        .max_connections(2)
        .connect(database_url.as_str())
        .await
    {
        Ok(pool) => pool,
        Err(error) => panic!("failed to connect to DATABASE_URL in test: {error}"),
    };

    if let Err(error) = MIGRATOR.run(&pool).await {
        panic!("failed to run migrations for postgres operation log tests: {error}");
    }

    Some(pool)
}

#[tokio::test]
async fn create_then_finalize_round_trips_through_postgres() {
    let Some(pool) = test_pool().await else {
        return;
    };

    let store = PostgresAuditRecordStore::new(pool);
    let operator = format!("alice-{}", uuid::Uuid::new_v4());
    let context = RequestContext::new(
        operator.as_str(),
        "alert",
        "addAlertGroup",
        "/api/alert/group/add",
    );
    let entry = AuditEntry::capture(&context, OperationAction::AlertGroupAdd);

    let Ok(Some(id)) = store.create(&entry).await else {
        panic!("postgres store must assign an id");
    };
    let finalized = match entry.with_id(id).with_result_summary(&ResultSummary {
        code: 0,
        message: "ok".to_owned(),
    }) {
        Ok(entry) => entry,
        Err(error) => panic!("failed to build finalized entry: {error}"),
    };
    let outcome = ActionOutcome {
        code: 0,
        message: "ok".to_owned(),
        payload: Some(json!({ "id": 7 })),
    };

    assert!(store.update(id, &finalized, &outcome).await.is_ok());
    assert!(store.update(id, &finalized, &outcome).await.is_ok());

    let stored = store.find(id).await;
    assert!(matches!(
        stored,
        Ok(Some(ref entry)) if entry.result_desc() == Some(r#"{"code":0,"message":"ok"}"#)
    ));

    let listed = store
        .list_recent(AuditLogQuery {
            operator: Some(operator),
            ..AuditLogQuery::default()
        })
        .await
        .unwrap_or_default();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id(), Some(id));
}

#[tokio::test]
async fn middleware_configs_are_listed_per_region_in_id_order() {
    let Some(pool) = test_pool().await else {
        return;
    };

    let region_key = format!("test-{}", uuid::Uuid::new_v4());
    for (alias, type_code) in [("k1", 4), ("r1", 2), ("k2", 4)] {
        let insert = sqlx::query(
            r#"
            INSERT INTO middleware_configs (alias, type_code, region_en, secret_key)
            VALUES ($1, $2, $3, 'sk')
            "#,
        )
        .bind(alias)
        .bind(type_code)
        .bind(region_key.as_str())
        .execute(&pool)
        .await;
        assert!(insert.is_ok());
    }

    let repository = PostgresMiddlewareConfigRepository::new(pool);
    let configs = repository
        .list_by_region(region_key.as_str())
        .await
        .unwrap_or_default();
    let aliases: Vec<&str> = configs.iter().map(|config| config.alias()).collect();

    assert_eq!(aliases, vec!["k1", "r1", "k2"]);
    assert!(
        configs
            .iter()
            .all(|config| config.connection().secret_key.as_deref() == Some("sk"))
    );
}
