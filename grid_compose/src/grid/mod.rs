//! Typed grid configuration and the default [`ConfigMapper`] producing it.
//!
//! [`GridConfigMapper`] reads the children of a `<hazelcast>` root. Each data
//! structure element is keyed by its `name` attribute; when two declarations
//! share a name the later one wins. `group` and `properties` are mapped into
//! dedicated types and every other section is kept as a
//! [`serde_json::Value`].

mod structures;

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Serialize;
use serde::de::{DeserializeOwned, Error as _};
use serde_json::Value;
use tracing::{debug, warn};

pub use structures::{
    DEFAULT_STRUCTURE_NAME, EvictionPolicy, GroupConfig, MapConfig, MultiMapConfig,
    QueueConfig, SemaphoreConfig, Structure, TopicConfig, ValueCollectionType,
};

use crate::mapper::{ConfigMapper, XmlSourced, element_to_value, from_element};
use crate::selector::{GRID_ROOT, StructureKind};
use crate::tree::Element;
use crate::{ComposeError, ComposeResult};

/// Typed view of a composed grid configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct GridConfig {
    group: GroupConfig,
    properties: BTreeMap<String, String>,
    maps: BTreeMap<String, MapConfig>,
    queues: BTreeMap<String, QueueConfig>,
    multimaps: BTreeMap<String, MultiMapConfig>,
    topics: BTreeMap<String, TopicConfig>,
    semaphores: BTreeMap<String, SemaphoreConfig>,
    sections: BTreeMap<String, Value>,
    #[serde(skip)]
    xml_config: Option<String>,
}

impl GridConfig {
    /// Cluster group settings.
    #[must_use]
    pub const fn group(&self) -> &GroupConfig {
        &self.group
    }

    /// Grid properties keyed by name.
    #[must_use]
    pub const fn properties(&self) -> &BTreeMap<String, String> {
        &self.properties
    }

    /// Value of the property called `name`.
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&str> {
        self.properties.get(name).map(String::as_str)
    }

    /// Map declarations keyed by name.
    #[must_use]
    pub const fn maps(&self) -> &BTreeMap<String, MapConfig> {
        &self.maps
    }

    /// Queue declarations keyed by name.
    #[must_use]
    pub const fn queues(&self) -> &BTreeMap<String, QueueConfig> {
        &self.queues
    }

    /// Multimap declarations keyed by name.
    #[must_use]
    pub const fn multimaps(&self) -> &BTreeMap<String, MultiMapConfig> {
        &self.multimaps
    }

    /// Topic declarations keyed by name.
    #[must_use]
    pub const fn topics(&self) -> &BTreeMap<String, TopicConfig> {
        &self.topics
    }

    /// Semaphore declarations keyed by name.
    #[must_use]
    pub const fn semaphores(&self) -> &BTreeMap<String, SemaphoreConfig> {
        &self.semaphores
    }

    /// Map declared as `name`.
    #[must_use]
    pub fn map_config(&self, name: &str) -> Option<&MapConfig> {
        self.maps.get(name)
    }

    /// Map declared as `name`, falling back to the `default` map and then to
    /// an unconfigured map of that name.
    #[must_use]
    pub fn map_config_or_default(&self, name: &str) -> MapConfig {
        self.maps
            .get(name)
            .cloned()
            .or_else(|| {
                self.maps.get(DEFAULT_STRUCTURE_NAME).map(|fallback| MapConfig {
                    name: name.to_owned(),
                    ..fallback.clone()
                })
            })
            .unwrap_or_else(|| MapConfig::named(name))
    }

    /// Queue declared as `name`.
    #[must_use]
    pub fn queue_config(&self, name: &str) -> Option<&QueueConfig> {
        self.queues.get(name)
    }

    /// Multimap declared as `name`.
    #[must_use]
    pub fn multimap_config(&self, name: &str) -> Option<&MultiMapConfig> {
        self.multimaps.get(name)
    }

    /// Topic declared as `name`.
    #[must_use]
    pub fn topic_config(&self, name: &str) -> Option<&TopicConfig> {
        self.topics.get(name)
    }

    /// Semaphore declared as `name`.
    #[must_use]
    pub fn semaphore_config(&self, name: &str) -> Option<&SemaphoreConfig> {
        self.semaphores.get(name)
    }

    /// Names of the structures of `kind`, sorted.
    #[must_use]
    pub fn structure_names(&self, kind: StructureKind) -> Vec<&str> {
        match kind {
            StructureKind::Queue => self.queues.keys().map(String::as_str).collect(),
            StructureKind::Map => self.maps.keys().map(String::as_str).collect(),
            StructureKind::MultiMap => self.multimaps.keys().map(String::as_str).collect(),
            StructureKind::Topic => self.topics.keys().map(String::as_str).collect(),
            StructureKind::Semaphore => self.semaphores.keys().map(String::as_str).collect(),
        }
    }

    /// Any other top-level section, such as `network`, in its JSON form.
    #[must_use]
    pub fn section(&self, name: &str) -> Option<&Value> {
        self.sections.get(name)
    }
}

impl XmlSourced for GridConfig {
    fn set_xml_config(&mut self, xml: String) {
        self.xml_config = Some(xml);
    }

    fn xml_config(&self) -> Option<&str> {
        self.xml_config.as_deref()
    }
}

/// Maps grid documents onto [`GridConfig`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GridConfigMapper {
    root_name: String,
}

impl GridConfigMapper {
    /// Mapper expecting a root element called `root_name`.
    #[must_use]
    pub fn with_root(root_name: impl Into<String>) -> Self {
        Self {
            root_name: root_name.into(),
        }
    }

    /// Root element name this mapper accepts.
    #[must_use]
    pub fn root_name(&self) -> &str {
        &self.root_name
    }
}

impl Default for GridConfigMapper {
    fn default() -> Self {
        Self::with_root(GRID_ROOT)
    }
}

impl ConfigMapper for GridConfigMapper {
    type Output = GridConfig;

    fn map(&self, root: &Element) -> ComposeResult<GridConfig> {
        if root.name() != self.root_name {
            return Err(Arc::new(ComposeError::Mapping {
                element: root.name().to_owned(),
                source: serde_json::Error::custom(format!(
                    "expected root element <{}>",
                    self.root_name
                )),
            }));
        }
        let mut config = GridConfig::default();
        for section in root.child_elements() {
            match StructureKind::from_element_name(section.name()) {
                Some(StructureKind::Queue) => insert_structure(&mut config.queues, section)?,
                Some(StructureKind::Map) => insert_structure(&mut config.maps, section)?,
                Some(StructureKind::MultiMap) => insert_structure(&mut config.multimaps, section)?,
                Some(StructureKind::Topic) => insert_structure(&mut config.topics, section)?,
                Some(StructureKind::Semaphore) => {
                    insert_structure(&mut config.semaphores, section)?;
                }
                None => match section.name() {
                    "group" => config.group = from_element(section)?,
                    "properties" => read_properties(&mut config.properties, section),
                    other => {
                        if config
                            .sections
                            .insert(other.to_owned(), element_to_value(section))
                            .is_some()
                        {
                            debug!(section = other, "later section replaces earlier one");
                        }
                    }
                },
            }
        }
        Ok(config)
    }
}

fn insert_structure<T>(target: &mut BTreeMap<String, T>, element: &Element) -> ComposeResult<()>
where
    T: Structure + DeserializeOwned,
{
    let structure: T = from_element(element)?;
    let name = structure.name().to_owned();
    if target.insert(name, structure).is_some() {
        debug!(
            kind = %T::KIND,
            name = element.attribute("name").unwrap_or(DEFAULT_STRUCTURE_NAME),
            "later declaration replaces earlier one"
        );
    }
    Ok(())
}

fn read_properties(target: &mut BTreeMap<String, String>, section: &Element) {
    for property in section.child_elements() {
        let Some(name) = property.attribute("name") else {
            warn!(element = property.name(), "ignoring property without a name");
            continue;
        };
        target.insert(name.to_owned(), property.text().trim().to_owned());
    }
}

#[cfg(test)]
mod tests;
