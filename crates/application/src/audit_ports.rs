use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use hera_core::{AppError, AppResult};
use hera_domain::{AuditEntry, AuditEntryId, OperationAction, ResultSummary};

/// Outcome of an administrative action as handed to the audit store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionOutcome {
    /// Outcome code, `0` on success.
    pub code: i32,
    /// Outcome message.
    pub message: String,
    /// Optional snapshot of the returned payload for store-side enrichment.
    pub payload: Option<Value>,
}

impl ActionOutcome {
    /// Captures the outcome of a delegate result.
    #[must_use]
    pub fn from_result<R>(result: &R) -> Self
    where
        R: OperationOutcome + ?Sized,
    {
        Self {
            code: result.code(),
            message: result.message(),
            payload: result.payload(),
        }
    }

    /// Returns the code and message pair persisted on the entry.
    #[must_use]
    pub fn summary(&self) -> ResultSummary {
        ResultSummary {
            code: self.code,
            message: self.message.clone(),
        }
    }
}

/// Result of a business operation wrapped by an audited action.
pub trait OperationOutcome {
    /// Returns the outcome code, `0` on success.
    fn code(&self) -> i32;

    /// Returns the outcome message.
    fn message(&self) -> String;

    /// Returns a JSON snapshot of the result payload, if any.
    fn payload(&self) -> Option<Value> {
        None
    }
}

/// Response envelope returned by console operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiResult<T> {
    /// Outcome code, `0` on success.
    pub code: i32,
    /// Outcome message.
    pub message: String,
    /// Returned payload.
    pub data: Option<T>,
}

impl<T> ApiResult<T> {
    /// Creates a successful envelope.
    #[must_use]
    pub fn success(data: T) -> Self {
        Self {
            code: 0,
            message: "success".to_owned(),
            data: Some(data),
        }
    }

    /// Creates a failed envelope without payload.
    #[must_use]
    pub fn failure(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
        }
    }
}

impl<T> OperationOutcome for ApiResult<T>
where
    T: Serialize,
{
    fn code(&self) -> i32 {
        self.code
    }

    fn message(&self) -> String {
        self.message.clone()
    }

    fn payload(&self) -> Option<Value> {
        self.data
            .as_ref()
            .and_then(|data| serde_json::to_value(data).ok())
    }
}

impl<T> OperationOutcome for Result<T, AppError>
where
    T: Serialize,
{
    fn code(&self) -> i32 {
        match self {
            Ok(_) => 0,
            Err(error) => error.code(),
        }
    }

    fn message(&self) -> String {
        match self {
            Ok(_) => "success".to_owned(),
            Err(error) => error.to_string(),
        }
    }

    fn payload(&self) -> Option<Value> {
        self.as_ref()
            .ok()
            .and_then(|data| serde_json::to_value(data).ok())
    }
}

/// Query parameters for operation log listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditLogQuery {
    /// Maximum rows returned.
    pub limit: usize,
    /// Number of rows skipped for offset pagination.
    pub offset: usize,
    /// Optional action filter.
    pub action: Option<OperationAction>,
    /// Optional operator filter.
    pub operator: Option<String>,
}

impl Default for AuditLogQuery {
    fn default() -> Self {
        Self {
            limit: 20,
            offset: 0,
            action: None,
            operator: None,
        }
    }
}

/// Port for persisting and looking up operation log entries.
#[async_trait]
pub trait AuditRecordStore: Send + Sync {
    /// Persists a pending entry and returns its assigned identifier.
    ///
    /// `Ok(None)` means the store declined the entry; callers treat it the
    /// same as an error and continue without auditing.
    async fn create(&self, entry: &AuditEntry) -> AppResult<Option<AuditEntryId>>;

    /// Finalizes a previously created entry. Repeating the call with the same
    /// arguments leaves the stored entry unchanged.
    async fn update(
        &self,
        id: AuditEntryId,
        entry: &AuditEntry,
        outcome: &ActionOutcome,
    ) -> AppResult<()>;

    /// Finds one entry by identifier.
    async fn find(&self, id: AuditEntryId) -> AppResult<Option<AuditEntry>>;

    /// Lists most recent entries first.
    async fn list_recent(&self, query: AuditLogQuery) -> AppResult<Vec<AuditEntry>>;
}
