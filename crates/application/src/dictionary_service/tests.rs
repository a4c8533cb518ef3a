use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use proptest::prelude::*;
use tokio::sync::Mutex;

use hera_core::{AppError, AppResult};
use hera_domain::{
    DictionaryEntry, DictionaryValue, MachineRegion, MiddlewareConfig, MqSource, ResourceKind,
};

use crate::MiddlewareConfigLookup;

use super::{DictionaryService, build_category_tree};

#[derive(Default)]
struct FakeConfigLookup {
    configs: HashMap<String, Vec<MiddlewareConfig>>,
    requested_regions: Mutex<Vec<String>>,
}

impl FakeConfigLookup {
    fn with_region(mut self, region_key: &str, configs: Vec<MiddlewareConfig>) -> Self {
        self.configs.insert(region_key.to_owned(), configs);
        self
    }
}

#[async_trait]
impl MiddlewareConfigLookup for FakeConfigLookup {
    async fn list_by_region(&self, region_key: &str) -> AppResult<Vec<MiddlewareConfig>> {
        self.requested_regions
            .lock()
            .await
            .push(region_key.to_owned());
        Ok(self.configs.get(region_key).cloned().unwrap_or_default())
    }
}

struct FailingConfigLookup;

#[async_trait]
impl MiddlewareConfigLookup for FailingConfigLookup {
    async fn list_by_region(&self, _region_key: &str) -> AppResult<Vec<MiddlewareConfig>> {
        Err(AppError::Unavailable("config database offline".to_owned()))
    }
}

fn config(id: i64, alias: &str, source: MqSource) -> MiddlewareConfig {
    match MiddlewareConfig::new(id, alias, source.code(), "cn-north") {
        Ok(config) => config,
        Err(error) => panic!("invalid test config: {error}"),
    }
}

fn service() -> DictionaryService {
    DictionaryService::new(Arc::new(FakeConfigLookup::default()))
}

fn labels(entries: &[DictionaryEntry]) -> Vec<&str> {
    entries.iter().map(DictionaryEntry::label).collect()
}

fn values(entries: &[DictionaryEntry]) -> Vec<DictionaryValue> {
    entries.iter().map(|entry| entry.value().clone()).collect()
}

#[tokio::test]
async fn middleware_tree_attaches_matching_configs_per_source() {
    let lookup = Arc::new(FakeConfigLookup::default().with_region(
        "cn-north",
        vec![config(1, "k1", MqSource::Kafka)],
    ));
    let service = DictionaryService::new(lookup.clone());

    let tree = service.query_middleware_config_tree("cn-north").await;

    assert_eq!(labels(&tree), vec!["RocketMQ", "Kafka"]);
    assert_eq!(
        values(&tree),
        vec![DictionaryValue::Code(2), DictionaryValue::Code(4)]
    );
    assert!(tree[0].children().is_empty());
    assert_eq!(
        tree[1].children(),
        &[DictionaryEntry::new(1_i64, "k1")][..]
    );
    assert_eq!(lookup.requested_regions.lock().await.as_slice(), ["cn-north"]);
}

#[tokio::test]
async fn middleware_tree_keeps_lookup_order_within_source() {
    let lookup = FakeConfigLookup::default().with_region(
        "cn-north",
        vec![
            config(9, "kafka-b", MqSource::Kafka),
            config(3, "rocket-a", MqSource::RocketMq),
            config(2, "kafka-a", MqSource::Kafka),
        ],
    );
    let service = DictionaryService::new(Arc::new(lookup));

    let tree = service.query_middleware_config_tree("cn-north").await;

    assert_eq!(labels(tree[0].children()), vec!["rocket-a"]);
    assert_eq!(labels(tree[1].children()), vec!["kafka-b", "kafka-a"]);
    assert!(tree.iter().all(|entry| entry.depth() <= 2));
}

#[tokio::test]
async fn middleware_tree_ignores_unknown_type_codes() {
    let unknown = match MiddlewareConfig::new(5, "talos", 3, "cn-north") {
        Ok(config) => config,
        Err(error) => panic!("invalid test config: {error}"),
    };
    let lookup = FakeConfigLookup::default().with_region("cn-north", vec![unknown]);
    let service = DictionaryService::new(Arc::new(lookup));

    let tree = service.query_middleware_config_tree("cn-north").await;

    assert_eq!(tree.len(), MqSource::all().len());
    assert!(tree.iter().all(|entry| entry.children().is_empty()));
}

#[tokio::test]
async fn middleware_tree_returns_skeleton_for_unknown_region() {
    let tree = service().query_middleware_config_tree("atlantis").await;

    assert_eq!(labels(&tree), vec!["RocketMQ", "Kafka"]);
    assert!(tree.iter().all(|entry| entry.children().is_empty()));
}

#[tokio::test]
async fn middleware_tree_degrades_when_lookup_fails() {
    let service = DictionaryService::new(Arc::new(FailingConfigLookup));

    let tree = service.query_middleware_config_tree("cn-north").await;

    assert_eq!(labels(&tree), vec!["RocketMQ", "Kafka"]);
    assert!(tree.iter().all(|entry| entry.children().is_empty()));
}

#[tokio::test]
async fn rocketmq_configs_do_not_expand_topics() {
    let lookup = FakeConfigLookup::default()
        .with_region("cn-north", vec![config(3, "rocket-a", MqSource::RocketMq)]);
    let service = DictionaryService::new(Arc::new(lookup));

    let tree = service.query_middleware_config_tree("cn-north").await;

    assert_eq!(tree[0].children().len(), 1);
    assert!(tree[0].children()[0].children().is_empty());
    assert!(
        service
            .query_existing_topics(&config(3, "rocket-a", MqSource::RocketMq))
            .await
            .is_empty()
    );
}

#[test]
fn resource_tree_lists_every_kind_with_every_region() {
    let tree = service().query_resource_tree();
    let region_labels = vec!["华北机房", "华东机房", "华南机房", "海外机房"];

    assert_eq!(labels(&tree), vec!["MQ", "Storage", "Config Center"]);
    for entry in &tree {
        assert_eq!(labels(entry.children()), region_labels);
        assert_eq!(
            values(entry.children()),
            vec![
                DictionaryValue::from("cn-north"),
                DictionaryValue::from("cn-east"),
                DictionaryValue::from("cn-south"),
                DictionaryValue::from("overseas"),
            ]
        );
    }
}

#[test]
fn resource_type_tree_keeps_message_queue_and_storage() {
    let tree = service().query_resource_type_tree();

    assert_eq!(
        values(&tree),
        vec![DictionaryValue::Code(1), DictionaryValue::Code(2)]
    );
    assert!(
        tree.iter()
            .all(|entry| entry.children().len() == MachineRegion::all().len())
    );
}

#[test]
fn app_type_list_enables_all_creation_fields() {
    let list = service().query_app_type_list();

    assert_eq!(labels(&list), vec!["application", "middleware", "bigdata"]);
    assert_eq!(
        values(&list),
        vec![
            DictionaryValue::Code(0),
            DictionaryValue::Code(1),
            DictionaryValue::Code(2)
        ]
    );
    for entry in &list {
        let flags = entry.flags();
        assert!(flags.show_deployment_type);
        assert!(flags.show_env_group);
        assert!(flags.show_service_ip);
        assert!(flags.show_mq_config);
        assert!(!flags.show_broker_name);
    }
}

#[test]
fn region_list_uses_localized_label_and_machine_key() {
    let list = service().query_region_list();

    assert_eq!(list.len(), MachineRegion::all().len());
    for (entry, region) in list.iter().zip(MachineRegion::all()) {
        assert_eq!(entry.label(), region.localized_name());
        assert_eq!(entry.value(), &DictionaryValue::from(region.key()));
    }
}

#[test]
fn deploy_way_list_uses_name_label_and_code_value() {
    let list = service().query_deploy_way_list();

    assert_eq!(labels(&list), vec!["machine", "container", "k8s"]);
    assert_eq!(
        values(&list),
        vec![
            DictionaryValue::Code(1),
            DictionaryValue::Code(2),
            DictionaryValue::Code(3)
        ]
    );
}

#[test]
fn mq_source_list_flags_broker_name_for_rocketmq_only() {
    let list = service().query_mq_source_list();

    assert_eq!(labels(&list), vec!["RocketMQ", "Kafka"]);
    let flagged: Vec<&str> = list
        .iter()
        .filter(|entry| entry.flags().show_broker_name)
        .map(DictionaryEntry::label)
        .collect();
    assert_eq!(flagged, vec!["RocketMQ"]);
}

fn resource_kind() -> impl Strategy<Value = ResourceKind> {
    prop::sample::select(ResourceKind::all().to_vec())
}

fn machine_region() -> impl Strategy<Value = MachineRegion> {
    prop::sample::select(MachineRegion::all().to_vec())
}

fn mq_source() -> impl Strategy<Value = MqSource> {
    prop::sample::select(MqSource::all().to_vec())
}

proptest! {
    #[test]
    fn category_tree_preserves_input_order(
        kinds in prop::collection::vec(resource_kind(), 0..8),
        regions in prop::collection::vec(machine_region(), 0..8),
    ) {
        let tree = build_category_tree(&kinds, &regions, |_| true);

        prop_assert_eq!(
            values(&tree),
            kinds.iter().map(|kind| DictionaryValue::Code(kind.code())).collect::<Vec<_>>()
        );
        for entry in &tree {
            prop_assert_eq!(
                values(entry.children()),
                regions.iter().map(|region| DictionaryValue::from(region.key())).collect::<Vec<_>>()
            );
        }
    }

    #[test]
    fn resource_type_filter_yields_subset(
        kinds in prop::collection::vec(resource_kind(), 0..8),
    ) {
        let tree = build_category_tree(&kinds, MachineRegion::all(), |kind| {
            kind == ResourceKind::MessageQueue || kind == ResourceKind::Storage
        });
        let allowed = [
            DictionaryValue::Code(ResourceKind::MessageQueue.code()),
            DictionaryValue::Code(ResourceKind::Storage.code()),
        ];

        prop_assert!(tree.iter().all(|entry| allowed.contains(entry.value())));
        prop_assert_eq!(
            tree.len(),
            kinds.iter().filter(|kind| **kind != ResourceKind::ConfigCenter).count()
        );
    }

    #[test]
    fn middleware_children_match_configs_of_same_source(
        sources in prop::collection::vec(mq_source(), 0..12),
    ) {
        let configs: Vec<MiddlewareConfig> = sources
            .iter()
            .enumerate()
            .map(|(index, source)| {
                let id = i64::try_from(index).unwrap_or(i64::MAX);
                config(id, &format!("mq-{index}"), *source)
            })
            .collect();
        let lookup = FakeConfigLookup::default().with_region("cn-north", configs.clone());
        let service = DictionaryService::new(Arc::new(lookup));
        let runtime = match tokio::runtime::Builder::new_current_thread().build() {
            Ok(runtime) => runtime,
            Err(error) => panic!("failed to build test runtime: {error}"),
        };

        let tree = runtime.block_on(service.query_middleware_config_tree("cn-north"));

        prop_assert_eq!(tree.len(), MqSource::all().len());
        for (entry, source) in tree.iter().zip(MqSource::all()) {
            let expected: Vec<DictionaryEntry> = configs
                .iter()
                .filter(|config| config.type_code() == source.code())
                .map(|config| DictionaryEntry::new(config.id(), config.alias()))
                .collect();
            prop_assert_eq!(entry.children(), expected.as_slice());
            prop_assert!(entry.has_unique_sibling_values());
        }
    }
}
