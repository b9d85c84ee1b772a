//! Typed views of the data structures a grid document declares.

use serde::{Deserialize, Serialize};

use crate::mapper::opt_parsed;
use crate::selector::StructureKind;

/// Name used by structures that omit their `name` attribute, and consulted
/// as a fallback by lookups such as [`super::GridConfig::map_config_or_default`].
pub const DEFAULT_STRUCTURE_NAME: &str = "default";

fn default_name() -> String {
    DEFAULT_STRUCTURE_NAME.to_owned()
}

/// Common behaviour of every named data structure.
pub trait Structure {
    /// Kind of element this structure is read from.
    const KIND: StructureKind;

    /// Name the structure is registered under.
    fn name(&self) -> &str;
}

/// Cluster membership credentials.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct GroupConfig {
    /// Cluster group name.
    pub name: Option<String>,
    /// Cluster group password.
    pub password: Option<String>,
}

/// Entry eviction strategy of a map.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EvictionPolicy {
    /// Never evict.
    None,
    /// Evict the least recently used entries.
    Lru,
    /// Evict the least frequently used entries.
    Lfu,
}

/// Settings of a distributed map.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct MapConfig {
    /// Map name.
    #[serde(default = "default_name")]
    pub name: String,
    /// Number of synchronous backups.
    #[serde(default, deserialize_with = "opt_parsed")]
    pub backup_count: Option<u32>,
    /// Number of asynchronous backups.
    #[serde(default, deserialize_with = "opt_parsed")]
    pub async_backup_count: Option<u32>,
    /// Entry lifetime in seconds; zero means forever.
    #[serde(default, deserialize_with = "opt_parsed")]
    pub time_to_live_seconds: Option<u64>,
    /// Maximum idle time of an entry in seconds.
    #[serde(default, deserialize_with = "opt_parsed")]
    pub max_idle_seconds: Option<u64>,
    /// Eviction strategy.
    #[serde(default)]
    pub eviction_policy: Option<EvictionPolicy>,
    /// Share of entries evicted when the map is full.
    #[serde(default, deserialize_with = "opt_parsed")]
    pub eviction_percentage: Option<u8>,
    /// Merge policy applied after a split brain.
    #[serde(default)]
    pub merge_policy: Option<String>,
    /// Whether reads may be served from backups.
    #[serde(default, deserialize_with = "opt_parsed")]
    pub read_backup_data: Option<bool>,
}

impl MapConfig {
    /// Map called `name` with every setting left unset.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            backup_count: None,
            async_backup_count: None,
            time_to_live_seconds: None,
            max_idle_seconds: None,
            eviction_policy: None,
            eviction_percentage: None,
            merge_policy: None,
            read_backup_data: None,
        }
    }
}

/// Settings of a distributed queue.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct QueueConfig {
    /// Queue name.
    #[serde(default = "default_name")]
    pub name: String,
    /// Upper bound on items held per member.
    #[serde(default, deserialize_with = "opt_parsed")]
    pub max_size_per_jvm: Option<u32>,
    /// Map that stores the queue items.
    #[serde(default)]
    pub backing_map_ref: Option<String>,
}

/// Collection used for the values of a multimap.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ValueCollectionType {
    /// Values are deduplicated.
    Set,
    /// Values keep insertion order and duplicates.
    List,
}

/// Settings of a distributed multimap.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct MultiMapConfig {
    /// Multimap name.
    #[serde(default = "default_name")]
    pub name: String,
    /// Value collection type.
    #[serde(default)]
    pub value_collection_type: Option<ValueCollectionType>,
}

/// Settings of a distributed topic.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct TopicConfig {
    /// Topic name.
    #[serde(default = "default_name")]
    pub name: String,
    /// Whether all members observe messages in the same order.
    #[serde(default, deserialize_with = "opt_parsed")]
    pub global_ordering_enabled: Option<bool>,
}

/// Settings of a distributed semaphore.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct SemaphoreConfig {
    /// Semaphore name.
    #[serde(default = "default_name")]
    pub name: String,
    /// Permits available when the semaphore is created.
    #[serde(default, deserialize_with = "opt_parsed")]
    pub initial_permits: Option<u32>,
    /// Factory that computes the initial permits.
    #[serde(default)]
    pub factory_class_name: Option<String>,
}

impl Structure for MapConfig {
    const KIND: StructureKind = StructureKind::Map;

    fn name(&self) -> &str {
        &self.name
    }
}

impl Structure for QueueConfig {
    const KIND: StructureKind = StructureKind::Queue;

    fn name(&self) -> &str {
        &self.name
    }
}

impl Structure for MultiMapConfig {
    const KIND: StructureKind = StructureKind::MultiMap;

    fn name(&self) -> &str {
        &self.name
    }
}

impl Structure for TopicConfig {
    const KIND: StructureKind = StructureKind::Topic;

    fn name(&self) -> &str {
        &self.name
    }
}

impl Structure for SemaphoreConfig {
    const KIND: StructureKind = StructureKind::Semaphore;

    fn name(&self) -> &str {
        &self.name
    }
}
