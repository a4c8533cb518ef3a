use std::sync::Arc;

use hera_core::{AppError, AppResult};
use hera_domain::{AuditEntry, AuditEntryId};

use crate::{AuditLogQuery, AuditRecordStore};

const MAX_LIST_LIMIT: usize = 200;
const MAX_LIST_OFFSET: usize = 5_000;

/// Read side of the operation log.
#[derive(Clone)]
pub struct AuditLogService {
    store: Arc<dyn AuditRecordStore>,
}

impl AuditLogService {
    /// Creates a service from a record store implementation.
    #[must_use]
    pub fn new(store: Arc<dyn AuditRecordStore>) -> Self {
        Self { store }
    }

    /// Lists recent entries, newest first, with paging bounds clamped.
    pub async fn list_recent(&self, query: AuditLogQuery) -> AppResult<Vec<AuditEntry>> {
        let operator = query
            .operator
            .map(|operator| operator.trim().to_owned())
            .filter(|operator| !operator.is_empty());

        self.store
            .list_recent(AuditLogQuery {
                limit: query.limit.clamp(1, MAX_LIST_LIMIT),
                offset: query.offset.min(MAX_LIST_OFFSET),
                action: query.action,
                operator,
            })
            .await
    }

    /// Returns one entry by identifier.
    pub async fn find(&self, id: AuditEntryId) -> AppResult<AuditEntry> {
        self.store
            .find(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("operation log entry {id}")))
    }
}
