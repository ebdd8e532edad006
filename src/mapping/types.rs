use crate::builder::ValueBuilder;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Association between a discovered key path and a target layer name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mapping {
    pub key_path: String,

    /// Target layer; blank means the mapping is inactive
    #[serde(default)]
    pub layer_name: String,
}

impl Mapping {
    pub fn new(key_path: impl Into<String>, layer_name: impl Into<String>) -> Self {
        Mapping {
            key_path: key_path.into(),
            layer_name: layer_name.into(),
        }
    }

    pub fn is_active(&self) -> bool {
        !self.layer_name.trim().is_empty()
    }
}

/// Text computed for one layer of one record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayerValue {
    pub layer_name: String,
    pub key_path: String,
    pub text: String,
}

/// Layer values for one record of a dataset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedRecord {
    pub index: usize,
    pub layers: Vec<LayerValue>,
}

/// The active mappings plus their value builders, keyed by key path
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MappingSet {
    mappings: Vec<Mapping>,
    builders: BTreeMap<String, ValueBuilder>,
}

impl MappingSet {
    pub fn new(mappings: Vec<Mapping>, builders: BTreeMap<String, ValueBuilder>) -> Self {
        MappingSet { mappings, builders }
    }

    /// One inactive mapping per key path
    pub fn from_keys<S: AsRef<str>>(keys: &[S]) -> Self {
        MappingSet {
            mappings: keys
                .iter()
                .map(|k| Mapping::new(k.as_ref(), ""))
                .collect(),
            builders: BTreeMap::new(),
        }
    }

    /// Rebuild the mappings for a freshly discovered key set
    ///
    /// Layer names and builders survive for key paths present in `keys`;
    /// everything else is dropped.
    pub fn sync_keys<S: AsRef<str>>(&mut self, keys: &[S]) {
        let mut previous: BTreeMap<String, String> = self
            .mappings
            .drain(..)
            .map(|m| (m.key_path, m.layer_name))
            .collect();

        self.mappings = keys
            .iter()
            .map(|k| {
                let key = k.as_ref();
                let layer_name = previous.remove(key).unwrap_or_default();
                Mapping::new(key, layer_name)
            })
            .collect();

        let mappings = &self.mappings;
        self.builders
            .retain(|key, _| mappings.iter().any(|m| &m.key_path == key));
    }

    pub fn clear(&mut self) {
        self.mappings.clear();
        self.builders.clear();
    }

    pub fn mappings(&self) -> &[Mapping] {
        &self.mappings
    }

    pub fn builders(&self) -> &BTreeMap<String, ValueBuilder> {
        &self.builders
    }

    pub fn get(&self, key_path: &str) -> Option<&Mapping> {
        self.mappings.iter().find(|m| m.key_path == key_path)
    }

    pub fn builder(&self, key_path: &str) -> Option<&ValueBuilder> {
        self.builders.get(key_path)
    }

    /// Set the target layer for a key path; returns false for unknown keys
    pub fn set_layer(&mut self, key_path: &str, layer_name: impl Into<String>) -> bool {
        match self.mappings.iter_mut().find(|m| m.key_path == key_path) {
            Some(mapping) => {
                mapping.layer_name = layer_name.into();
                true
            }
            None => false,
        }
    }

    /// Attach a builder to a mapped key path; returns false for unknown keys
    pub fn set_builder(&mut self, key_path: &str, builder: ValueBuilder) -> bool {
        if self.get(key_path).is_none() {
            return false;
        }
        self.builders.insert(key_path.to_string(), builder);
        true
    }

    pub fn remove_builder(&mut self, key_path: &str) -> Option<ValueBuilder> {
        self.builders.remove(key_path)
    }

    pub fn active(&self) -> impl Iterator<Item = &Mapping> {
        self.mappings.iter().filter(|m| m.is_active())
    }

    pub fn active_count(&self) -> usize {
        self.active().count()
    }
}
