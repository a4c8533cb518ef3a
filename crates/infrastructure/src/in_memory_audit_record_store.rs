use std::collections::BTreeMap;

use async_trait::async_trait;
use hera_application::{ActionOutcome, AuditLogQuery, AuditRecordStore};
use hera_core::{AppError, AppResult};
use hera_domain::{AuditEntry, AuditEntryId};
use tokio::sync::RwLock;

#[derive(Debug, Clone, PartialEq, Eq)]
struct StoredOperationLog {
    entry: AuditEntry,
    outcome: Option<ActionOutcome>,
}

/// In-memory operation log store.
#[derive(Debug, Default)]
pub struct InMemoryAuditRecordStore {
    entries: RwLock<BTreeMap<AuditEntryId, StoredOperationLog>>,
}

impl InMemoryAuditRecordStore {
    /// Creates an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(BTreeMap::new()),
        }
    }

    /// Returns the outcome recorded for an entry, if finalized.
    pub async fn outcome(&self, id: AuditEntryId) -> Option<ActionOutcome> {
        self.entries
            .read()
            .await
            .get(&id)
            .and_then(|stored| stored.outcome.clone())
    }
}

#[async_trait]
impl AuditRecordStore for InMemoryAuditRecordStore {
    async fn create(&self, entry: &AuditEntry) -> AppResult<Option<AuditEntryId>> {
        let mut entries = self.entries.write().await;
        let id = AuditEntryId::new(
            entries
                .keys()
                .next_back()
                .map_or(1, |last| last.as_i64() + 1),
        );

        entries.insert(
            id,
            StoredOperationLog {
                entry: entry.clone().with_id(id),
                outcome: None,
            },
        );

        Ok(Some(id))
    }

    async fn update(
        &self,
        id: AuditEntryId,
        entry: &AuditEntry,
        outcome: &ActionOutcome,
    ) -> AppResult<()> {
        let mut entries = self.entries.write().await;
        let Some(stored) = entries.get_mut(&id) else {
            return Err(AppError::NotFound(format!("operation log entry {id}")));
        };

        stored.entry = entry.clone().with_id(id);
        stored.outcome = Some(outcome.clone());
        Ok(())
    }

    async fn find(&self, id: AuditEntryId) -> AppResult<Option<AuditEntry>> {
        Ok(self
            .entries
            .read()
            .await
            .get(&id)
            .map(|stored| stored.entry.clone()))
    }

    async fn list_recent(&self, query: AuditLogQuery) -> AppResult<Vec<AuditEntry>> {
        let entries = self.entries.read().await;

        Ok(entries
            .values()
            .rev()
            .filter(|stored| {
                query
                    .action
                    .is_none_or(|action| stored.entry.action() == action)
            })
            .filter(|stored| {
                query
                    .operator
                    .as_deref()
                    .is_none_or(|operator| stored.entry.operator_name() == operator)
            })
            .skip(query.offset)
            .take(query.limit)
            .map(|stored| stored.entry.clone())
            .collect())
    }
}
