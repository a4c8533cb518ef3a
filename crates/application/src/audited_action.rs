//! Audit trail around administrative commands.
//!
//! An audited action runs three phases in order: `before_action` records a
//! pending operation log entry, the delegate performs the business operation,
//! and `after_action` finalizes the entry with the outcome. Auditing is best
//! effort. Store failures are logged and never change the delegate result.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info, warn};

use hera_domain::{AuditEntry, AuditState, OperationAction, RequestContext};

use crate::{ActionOutcome, AuditRecordStore, OperationOutcome};

/// Business operation wrapped by an audited action.
#[async_trait]
pub trait ActionDelegate<A1, A2>: Send + Sync {
    /// Result returned to the caller of the administrative command.
    type Output: OperationOutcome + Send + Sync;

    /// Runs the operation.
    async fn invoke(&self, arg1: &A1, arg2: &A2) -> Self::Output;
}

/// Two-argument administrative action with audit hooks.
#[async_trait]
pub trait AuditedAction<A1, A2>: Send + Sync
where
    A1: Sync,
    A2: Sync,
{
    /// Result returned to the caller of the administrative command.
    type Output: OperationOutcome + Send + Sync;

    /// Returns the action recorded for every invocation.
    fn action(&self) -> OperationAction;

    /// Records the pending entry and returns the context carrying it.
    async fn before_action(
        &self,
        arg1: &A1,
        arg2: &A2,
        context: RequestContext,
    ) -> RequestContext;

    /// Runs the wrapped business operation.
    async fn invoke(&self, arg1: &A1, arg2: &A2) -> Self::Output;

    /// Finalizes the pending entry with the operation outcome.
    async fn after_action(
        &self,
        arg1: &A1,
        arg2: &A2,
        context: RequestContext,
        result: &Self::Output,
    ) -> RequestContext;

    /// Runs both hooks around the business operation.
    ///
    /// The delegate result is returned unchanged together with the final
    /// context.
    async fn execute(
        &self,
        arg1: &A1,
        arg2: &A2,
        context: RequestContext,
    ) -> (Self::Output, RequestContext) {
        let context = self.before_action(arg1, arg2, context).await;
        let result = self.invoke(arg1, arg2).await;
        let context = self.after_action(arg1, arg2, context, &result).await;

        (result, context)
    }
}

/// Audited action backed by an [`AuditRecordStore`] and bound to one
/// [`OperationAction`].
#[derive(Clone)]
pub struct AuditedActionTemplate<D> {
    action: OperationAction,
    store: Arc<dyn AuditRecordStore>,
    delegate: D,
}

impl<D> AuditedActionTemplate<D> {
    /// Binds a delegate to an operation action and audit store.
    #[must_use]
    pub fn new(action: OperationAction, store: Arc<dyn AuditRecordStore>, delegate: D) -> Self {
        Self {
            action,
            store,
            delegate,
        }
    }

    /// Returns the wrapped delegate.
    #[must_use]
    pub fn delegate(&self) -> &D {
        &self.delegate
    }
}

#[async_trait]
impl<A1, A2, D> AuditedAction<A1, A2> for AuditedActionTemplate<D>
where
    A1: Sync,
    A2: Sync,
    D: ActionDelegate<A1, A2>,
{
    type Output = D::Output;

    fn action(&self) -> OperationAction {
        self.action
    }

    async fn before_action(
        &self,
        _arg1: &A1,
        _arg2: &A2,
        context: RequestContext,
    ) -> RequestContext {
        if context.audit() != &AuditState::New {
            warn!(
                request_id = %context.request_id(),
                action = self.action.as_str(),
                state = context.audit().as_str(),
                "operation log already attempted for request"
            );
            return context;
        }

        let entry = AuditEntry::capture(&context, self.action);
        let state = match self.store.create(&entry).await {
            Ok(Some(id)) => AuditState::Pending(entry.with_id(id)),
            Ok(None) => {
                warn!(
                    request_id = %context.request_id(),
                    action = self.action.as_str(),
                    operator = context.operator(),
                    "operation log entry was not assigned an id, continuing unaudited"
                );
                AuditState::Skipped
            }
            Err(error) => {
                warn!(
                    request_id = %context.request_id(),
                    action = self.action.as_str(),
                    operator = context.operator(),
                    error = %error,
                    "failed to create operation log entry, continuing unaudited"
                );
                AuditState::Skipped
            }
        };

        context.with_audit(state)
    }

    async fn invoke(&self, arg1: &A1, arg2: &A2) -> Self::Output {
        self.delegate.invoke(arg1, arg2).await
    }

    async fn after_action(
        &self,
        _arg1: &A1,
        _arg2: &A2,
        context: RequestContext,
        result: &Self::Output,
    ) -> RequestContext {
        let entry = match context.audit() {
            AuditState::Pending(entry) => entry.clone(),
            AuditState::New | AuditState::Skipped | AuditState::Finalized(_) => return context,
        };
        let Some(id) = entry.id() else {
            warn!(
                request_id = %context.request_id(),
                action = self.action.as_str(),
                "pending operation log entry has no id, skipping finalization"
            );
            return context.with_audit(AuditState::Skipped);
        };

        let outcome = ActionOutcome::from_result(result);
        let entry = match entry.with_result_summary(&outcome.summary()) {
            Ok(entry) => entry,
            Err(error) => {
                error!(
                    request_id = %context.request_id(),
                    audit_id = %id,
                    error = %error,
                    "failed to attach result summary to operation log entry"
                );
                return context;
            }
        };

        match self.store.update(id, &entry, &outcome).await {
            Ok(()) => info!(
                request_id = %context.request_id(),
                audit_id = %id,
                action = self.action.as_str(),
                operator = context.operator(),
                code = outcome.code,
                "operation log entry finalized"
            ),
            Err(error) => error!(
                request_id = %context.request_id(),
                audit_id = %id,
                action = self.action.as_str(),
                error = %error,
                "failed to finalize operation log entry"
            ),
        }

        context.with_audit(AuditState::Finalized(entry))
    }
}
