use async_trait::async_trait;

use hera_core::AppResult;
use hera_domain::MiddlewareConfig;

/// Port for reading persisted middleware configs.
#[async_trait]
pub trait MiddlewareConfigLookup: Send + Sync {
    /// Lists every middleware config visible in a machine region.
    ///
    /// Unknown regions yield an empty list rather than an error.
    async fn list_by_region(&self, region_key: &str) -> AppResult<Vec<MiddlewareConfig>>;
}
