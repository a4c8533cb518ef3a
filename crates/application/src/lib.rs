//! Application services and ports.

#![forbid(unsafe_code)]

mod audit_log_service;
mod audit_ports;
mod audited_action;
mod dictionary_ports;
mod dictionary_service;

pub use audit_log_service::AuditLogService;
pub use audit_ports::{ActionOutcome, ApiResult, AuditLogQuery, AuditRecordStore, OperationOutcome};
pub use audited_action::{ActionDelegate, AuditedAction, AuditedActionTemplate};
pub use dictionary_ports::MiddlewareConfigLookup;
pub use dictionary_service::{DictionaryService, build_category_tree};
