//! Domain entities and invariants.

#![forbid(unsafe_code)]

mod audit;
mod catalog;
mod dictionary;
mod middleware;

pub use audit::{
    AuditEntry, AuditEntryId, AuditState, OperationAction, RequestContext, ResultSummary,
};
pub use catalog::{DeployWay, MachineRegion, MqSource, ProjectType, ResourceKind};
pub use dictionary::{DictionaryEntry, DictionaryFlags, DictionaryValue};
pub use middleware::{MiddlewareConfig, MiddlewareConnection};
