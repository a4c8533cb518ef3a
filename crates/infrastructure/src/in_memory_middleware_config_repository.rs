use async_trait::async_trait;
use hera_application::MiddlewareConfigLookup;
use hera_core::{AppError, AppResult};
use hera_domain::MiddlewareConfig;
use tokio::sync::RwLock;

/// In-memory middleware config repository keeping insertion order.
#[derive(Debug, Default)]
pub struct InMemoryMiddlewareConfigRepository {
    configs: RwLock<Vec<MiddlewareConfig>>,
}

impl InMemoryMiddlewareConfigRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self {
            configs: RwLock::new(Vec::new()),
        }
    }

    /// Stores a config, rejecting duplicate identifiers.
    pub async fn insert(&self, config: MiddlewareConfig) -> AppResult<()> {
        let mut configs = self.configs.write().await;
        if configs.iter().any(|stored| stored.id() == config.id()) {
            return Err(AppError::Conflict(format!(
                "middleware config {} already exists",
                config.id()
            )));
        }

        configs.push(config);
        Ok(())
    }
}

#[async_trait]
impl MiddlewareConfigLookup for InMemoryMiddlewareConfigRepository {
    async fn list_by_region(&self, region_key: &str) -> AppResult<Vec<MiddlewareConfig>> {
        Ok(self
            .configs
            .read()
            .await
            .iter()
            .filter(|config| config.region_key() == region_key)
            .cloned()
            .collect())
    }
}
