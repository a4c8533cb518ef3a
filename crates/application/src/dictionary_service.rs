//! Dictionary trees backing console selectors.
//!
//! Every list follows the declared catalog order. Persisted middleware
//! configs only ever add children; a failed or empty lookup leaves the
//! catalog skeleton intact.

use std::sync::Arc;

use tracing::warn;

use hera_domain::{
    DeployWay, DictionaryEntry, DictionaryFlags, MachineRegion, MiddlewareConfig, MqSource,
    ProjectType, ResourceKind,
};

use crate::MiddlewareConfigLookup;

/// Topic children under RocketMQ config entries are not expanded.
///
/// Flip together with a real `query_existing_topics` implementation.
const EXPAND_ROCKETMQ_TOPICS: bool = false;

/// Application service assembling console dictionaries.
#[derive(Clone)]
pub struct DictionaryService {
    config_lookup: Arc<dyn MiddlewareConfigLookup>,
}

impl DictionaryService {
    /// Creates a service from a middleware config lookup.
    #[must_use]
    pub fn new(config_lookup: Arc<dyn MiddlewareConfigLookup>) -> Self {
        Self { config_lookup }
    }

    /// Returns one entry per message queue source with the region's
    /// configured instances of that source as children.
    pub async fn query_middleware_config_tree(&self, region_key: &str) -> Vec<DictionaryEntry> {
        let configs = match self.config_lookup.list_by_region(region_key).await {
            Ok(configs) => configs,
            Err(error) => {
                warn!(
                    region = region_key,
                    error = %error,
                    "middleware config lookup failed, returning catalog skeleton"
                );
                Vec::new()
            }
        };

        let mut tree = Vec::with_capacity(MqSource::all().len());
        for source in MqSource::all() {
            let mut children = Vec::new();
            for config in configs
                .iter()
                .filter(|config| config.type_code() == source.code())
            {
                let mut child = DictionaryEntry::new(config.id(), config.alias());
                if EXPAND_ROCKETMQ_TOPICS && *source == MqSource::RocketMq {
                    child = child.with_children(self.query_existing_topics(config).await);
                }
                children.push(child);
            }

            tree.push(DictionaryEntry::new(source.code(), source.name()).with_children(children));
        }

        tree
    }

    /// Lists topics that already exist on a configured message queue.
    ///
    /// No broker is queried by default, so the list is always empty.
    pub async fn query_existing_topics(&self, _config: &MiddlewareConfig) -> Vec<DictionaryEntry> {
        Vec::new()
    }

    /// Returns every resource kind with the full region list as children.
    #[must_use]
    pub fn query_resource_tree(&self) -> Vec<DictionaryEntry> {
        build_category_tree(ResourceKind::all(), MachineRegion::all(), |_| true)
    }

    /// Returns the message queue and storage resource kinds with the full
    /// region list as children.
    #[must_use]
    pub fn query_resource_type_tree(&self) -> Vec<DictionaryEntry> {
        build_category_tree(ResourceKind::all(), MachineRegion::all(), |kind| {
            kind == ResourceKind::MessageQueue || kind == ResourceKind::Storage
        })
    }

    /// Returns project types, each enabling the full set of creation fields.
    #[must_use]
    pub fn query_app_type_list(&self) -> Vec<DictionaryEntry> {
        let flags = DictionaryFlags {
            show_deployment_type: true,
            show_env_group: true,
            show_service_ip: true,
            show_mq_config: true,
            show_broker_name: false,
        };

        ProjectType::all()
            .iter()
            .map(|project_type| {
                DictionaryEntry::new(project_type.code(), project_type.type_name()).with_flags(flags)
            })
            .collect()
    }

    /// Returns machine regions keyed by machine key.
    #[must_use]
    pub fn query_region_list(&self) -> Vec<DictionaryEntry> {
        region_entries(MachineRegion::all())
    }

    /// Returns deploy ways keyed by code.
    #[must_use]
    pub fn query_deploy_way_list(&self) -> Vec<DictionaryEntry> {
        DeployWay::all()
            .iter()
            .map(|deploy_way| DictionaryEntry::new(deploy_way.code(), deploy_way.name()))
            .collect()
    }

    /// Returns message queue sources; RocketMQ additionally asks for a
    /// broker name.
    #[must_use]
    pub fn query_mq_source_list(&self) -> Vec<DictionaryEntry> {
        MqSource::all()
            .iter()
            .map(|source| {
                let entry = DictionaryEntry::new(source.code(), source.name());
                if *source == MqSource::RocketMq {
                    entry.with_flags(DictionaryFlags {
                        show_broker_name: true,
                        ..DictionaryFlags::default()
                    })
                } else {
                    entry
                }
            })
            .collect()
    }
}

/// Builds one entry per resource kind accepted by `filter`, each carrying
/// every region as a child, preserving slice order at both levels.
pub fn build_category_tree<F>(
    kinds: &[ResourceKind],
    regions: &[MachineRegion],
    filter: F,
) -> Vec<DictionaryEntry>
where
    F: Fn(ResourceKind) -> bool,
{
    let region_children = region_entries(regions);

    kinds
        .iter()
        .copied()
        .filter(|kind| filter(*kind))
        .map(|kind| {
            DictionaryEntry::new(kind.code(), kind.name()).with_children(region_children.clone())
        })
        .collect()
}

fn region_entries(regions: &[MachineRegion]) -> Vec<DictionaryEntry> {
    regions
        .iter()
        .map(|region| DictionaryEntry::new(region.key(), region.localized_name()))
        .collect()
}

#[cfg(test)]
mod tests;
