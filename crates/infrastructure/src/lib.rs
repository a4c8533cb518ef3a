//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod in_memory_audit_record_store;
mod in_memory_middleware_config_repository;
mod postgres_audit_record_store;
mod postgres_middleware_config_repository;

pub use in_memory_audit_record_store::InMemoryAuditRecordStore;
pub use in_memory_middleware_config_repository::InMemoryMiddlewareConfigRepository;
pub use postgres_audit_record_store::PostgresAuditRecordStore;
pub use postgres_middleware_config_repository::PostgresMiddlewareConfigRepository;
