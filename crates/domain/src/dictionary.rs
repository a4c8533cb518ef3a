use serde::{Deserialize, Serialize};

/// Selection value carried by a dictionary entry.
///
/// Serialized untagged so UI selectors receive the raw number or string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DictionaryValue {
    /// Numeric catalog code.
    Code(i32),
    /// Persisted record identifier.
    Id(i64),
    /// Machine-readable string key.
    Key(String),
}

impl From<i32> for DictionaryValue {
    fn from(value: i32) -> Self {
        Self::Code(value)
    }
}

impl From<i64> for DictionaryValue {
    fn from(value: i64) -> Self {
        Self::Id(value)
    }
}

impl From<&str> for DictionaryValue {
    fn from(value: &str) -> Self {
        Self::Key(value.to_owned())
    }
}

impl From<String> for DictionaryValue {
    fn from(value: String) -> Self {
        Self::Key(value)
    }
}

/// UI affordances attached to a dictionary entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DictionaryFlags {
    /// Shows the deployment-type selector.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub show_deployment_type: bool,
    /// Shows the environment-group selector.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub show_env_group: bool,
    /// Shows the service IP field.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub show_service_ip: bool,
    /// Shows the message queue config selector.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub show_mq_config: bool,
    /// Shows the broker-name field.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub show_broker_name: bool,
}

/// One selectable option in a dictionary tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DictionaryEntry {
    value: DictionaryValue,
    label: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    children: Vec<DictionaryEntry>,
    #[serde(flatten)]
    flags: DictionaryFlags,
}

impl DictionaryEntry {
    /// Creates a leaf entry without flags.
    #[must_use]
    pub fn new(value: impl Into<DictionaryValue>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            children: Vec::new(),
            flags: DictionaryFlags::default(),
        }
    }

    /// Replaces the child list.
    #[must_use]
    pub fn with_children(mut self, children: Vec<DictionaryEntry>) -> Self {
        self.children = children;
        self
    }

    /// Replaces the UI flags.
    #[must_use]
    pub fn with_flags(mut self, flags: DictionaryFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Returns the selection value.
    #[must_use]
    pub fn value(&self) -> &DictionaryValue {
        &self.value
    }

    /// Returns the display label.
    #[must_use]
    pub fn label(&self) -> &str {
        self.label.as_str()
    }

    /// Returns nested options in display order.
    #[must_use]
    pub fn children(&self) -> &[DictionaryEntry] {
        &self.children
    }

    /// Returns the UI flags.
    #[must_use]
    pub fn flags(&self) -> DictionaryFlags {
        self.flags
    }

    /// Returns the depth of the subtree rooted at this entry, counting the
    /// entry itself as one level.
    #[must_use]
    pub fn depth(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(DictionaryEntry::depth)
            .max()
            .unwrap_or(0)
    }

    /// Returns whether every sibling list in this subtree has unique values.
    #[must_use]
    pub fn has_unique_sibling_values(&self) -> bool {
        let mut seen = std::collections::HashSet::new();
        self.children.iter().all(|child| seen.insert(&child.value))
            && self
                .children
                .iter()
                .all(DictionaryEntry::has_unique_sibling_values)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{DictionaryEntry, DictionaryFlags};

    #[test]
    fn serializes_flat_value_and_omits_unset_fields() {
        let entry = DictionaryEntry::new(4, "Kafka");
        let serialized = serde_json::to_value(&entry).unwrap_or_default();

        assert_eq!(serialized, json!({ "value": 4, "label": "Kafka" }));
    }

    #[test]
    fn serializes_children_and_flags_in_camel_case() {
        let entry = DictionaryEntry::new(2, "RocketMQ")
            .with_children(vec![DictionaryEntry::new(7_i64, "rocket-main")])
            .with_flags(DictionaryFlags {
                show_broker_name: true,
                ..DictionaryFlags::default()
            });
        let serialized = serde_json::to_value(&entry).unwrap_or_default();

        assert_eq!(
            serialized,
            json!({
                "value": 2,
                "label": "RocketMQ",
                "children": [{ "value": 7, "label": "rocket-main" }],
                "showBrokerName": true
            })
        );
    }

    #[test]
    fn depth_counts_nested_levels() {
        let leaf = DictionaryEntry::new("cn-north", "华北机房");
        let category = DictionaryEntry::new(1, "MQ").with_children(vec![leaf.clone()]);

        assert_eq!(leaf.depth(), 1);
        assert_eq!(category.depth(), 2);
    }

    #[test]
    fn duplicate_sibling_values_are_detected() {
        let category = DictionaryEntry::new(1, "MQ").with_children(vec![
            DictionaryEntry::new(5_i64, "a"),
            DictionaryEntry::new(5_i64, "b"),
        ]);

        assert!(!category.has_unique_sibling_values());
    }
}
