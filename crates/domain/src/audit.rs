use std::str::FromStr;

use chrono::{DateTime, Utc};
use hera_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Administrative operations recorded in the operation log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OperationAction {
    /// An alert group was created.
    AlertGroupAdd,
    /// An alert group was edited.
    AlertGroupEdit,
    /// An alert group was deleted.
    AlertGroupDelete,
    /// An alarm strategy was created.
    StrategyAdd,
    /// An alarm strategy was edited.
    StrategyEdit,
    /// An alarm strategy was deleted.
    StrategyDelete,
    /// An alarm strategy was enabled.
    StrategyEnable,
    /// An alarm strategy was disabled.
    StrategyDisable,
}

impl OperationAction {
    /// Returns a stable storage value for this action.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AlertGroupAdd => "alert-group-add",
            Self::AlertGroupEdit => "alert-group-edit",
            Self::AlertGroupDelete => "alert-group-delete",
            Self::StrategyAdd => "strategy-add",
            Self::StrategyEdit => "strategy-edit",
            Self::StrategyDelete => "strategy-delete",
            Self::StrategyEnable => "strategy-enable",
            Self::StrategyDisable => "strategy-disable",
        }
    }

    /// Returns all known actions.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[OperationAction] = &[
            OperationAction::AlertGroupAdd,
            OperationAction::AlertGroupEdit,
            OperationAction::AlertGroupDelete,
            OperationAction::StrategyAdd,
            OperationAction::StrategyEdit,
            OperationAction::StrategyDelete,
            OperationAction::StrategyEnable,
            OperationAction::StrategyDisable,
        ];

        ALL
    }
}

impl FromStr for OperationAction {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|action| action.as_str() == value)
            .ok_or_else(|| AppError::Validation(format!("unknown operation action '{value}'")))
    }
}

/// Store-assigned identifier of an operation log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AuditEntryId(i64);

impl AuditEntryId {
    /// Wraps a persisted identifier.
    #[must_use]
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the underlying value.
    #[must_use]
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for AuditEntryId {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// Code and message pair summarizing the outcome of an administrative action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultSummary {
    /// Outcome code, `0` on success.
    pub code: i32,
    /// Outcome message.
    pub message: String,
}

/// Operation log entry describing who ran which administrative action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEntry {
    id: Option<AuditEntryId>,
    operator_name: String,
    module_name: String,
    interface_name: String,
    request_url: String,
    action: OperationAction,
    result_desc: Option<String>,
    created_at: DateTime<Utc>,
}

impl AuditEntry {
    /// Captures a new entry from the request context of a command.
    #[must_use]
    pub fn capture(context: &RequestContext, action: OperationAction) -> Self {
        Self {
            id: None,
            operator_name: context.operator().to_owned(),
            module_name: context.module_name().to_owned(),
            interface_name: context.interface_name().to_owned(),
            request_url: context.request_url().to_owned(),
            action,
            result_desc: None,
            created_at: Utc::now(),
        }
    }

    /// Rebuilds an entry from persisted columns.
    #[allow(clippy::too_many_arguments)]
    #[must_use]
    pub fn restore(
        id: AuditEntryId,
        operator_name: String,
        module_name: String,
        interface_name: String,
        request_url: String,
        action: OperationAction,
        result_desc: Option<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Some(id),
            operator_name,
            module_name,
            interface_name,
            request_url,
            action,
            result_desc,
            created_at,
        }
    }

    /// Returns the entry with the store-assigned identifier attached.
    #[must_use]
    pub fn with_id(mut self, id: AuditEntryId) -> Self {
        self.id = Some(id);
        self
    }

    /// Returns the entry with the serialized outcome summary attached.
    pub fn with_result_summary(mut self, summary: &ResultSummary) -> AppResult<Self> {
        let serialized = serde_json::to_string(summary).map_err(|error| {
            AppError::Internal(format!("failed to serialize result summary: {error}"))
        })?;
        self.result_desc = Some(serialized);
        Ok(self)
    }

    /// Returns the store-assigned identifier, absent until created.
    #[must_use]
    pub fn id(&self) -> Option<AuditEntryId> {
        self.id
    }

    /// Returns the operator who issued the command.
    #[must_use]
    pub fn operator_name(&self) -> &str {
        self.operator_name.as_str()
    }

    /// Returns the logical module name.
    #[must_use]
    pub fn module_name(&self) -> &str {
        self.module_name.as_str()
    }

    /// Returns the logical interface name.
    #[must_use]
    pub fn interface_name(&self) -> &str {
        self.interface_name.as_str()
    }

    /// Returns the request URL.
    #[must_use]
    pub fn request_url(&self) -> &str {
        self.request_url.as_str()
    }

    /// Returns the recorded action.
    #[must_use]
    pub fn action(&self) -> OperationAction {
        self.action
    }

    /// Returns the serialized outcome summary, set only after finalization.
    #[must_use]
    pub fn result_desc(&self) -> Option<&str> {
        self.result_desc.as_deref()
    }

    /// Returns when the entry was captured.
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Audit progress of one administrative command.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AuditState {
    /// No audit entry has been attempted yet.
    #[default]
    New,
    /// The entry was persisted and awaits the outcome.
    Pending(AuditEntry),
    /// The entry could not be persisted; the command runs unaudited.
    Skipped,
    /// The entry carries the outcome summary.
    Finalized(AuditEntry),
}

impl AuditState {
    /// Returns a stable label for logs.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Pending(_) => "pending",
            Self::Skipped => "skipped",
            Self::Finalized(_) => "finalized",
        }
    }
}

/// Request-scoped context of one administrative command.
///
/// Each audit phase consumes the context and returns the next one, so the
/// phase order and an absent entry stay visible in the types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    request_id: Uuid,
    operator: String,
    module_name: String,
    interface_name: String,
    request_url: String,
    audit: AuditState,
}

impl RequestContext {
    /// Creates a context for an inbound command.
    #[must_use]
    pub fn new(
        operator: impl Into<String>,
        module_name: impl Into<String>,
        interface_name: impl Into<String>,
        request_url: impl Into<String>,
    ) -> Self {
        Self {
            request_id: Uuid::new_v4(),
            operator: operator.into(),
            module_name: module_name.into(),
            interface_name: interface_name.into(),
            request_url: request_url.into(),
            audit: AuditState::New,
        }
    }

    /// Returns the context moved to the given audit state.
    #[must_use]
    pub fn with_audit(mut self, audit: AuditState) -> Self {
        self.audit = audit;
        self
    }

    /// Returns the correlation identifier of the command.
    #[must_use]
    pub fn request_id(&self) -> Uuid {
        self.request_id
    }

    /// Returns the invoking operator.
    #[must_use]
    pub fn operator(&self) -> &str {
        self.operator.as_str()
    }

    /// Returns the logical module name.
    #[must_use]
    pub fn module_name(&self) -> &str {
        self.module_name.as_str()
    }

    /// Returns the logical interface name.
    #[must_use]
    pub fn interface_name(&self) -> &str {
        self.interface_name.as_str()
    }

    /// Returns the request URL.
    #[must_use]
    pub fn request_url(&self) -> &str {
        self.request_url.as_str()
    }

    /// Returns the audit state.
    #[must_use]
    pub fn audit(&self) -> &AuditState {
        &self.audit
    }

    /// Returns the attached entry while pending or finalized.
    #[must_use]
    pub fn audit_entry(&self) -> Option<&AuditEntry> {
        match &self.audit {
            AuditState::Pending(entry) | AuditState::Finalized(entry) => Some(entry),
            AuditState::New | AuditState::Skipped => None,
        }
    }
}
