//! Saved mapping configurations
//!
//! A configuration captures the mappings and builders of a session under a
//! name so they can be re-applied to later data from the same source.

use crate::builder::ValueBuilder;
use crate::data::types::DataSource;
use crate::error::DataError;
use crate::mapping::types::{Mapping, MappingSet};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedConfig {
    pub name: String,

    pub source: DataSource,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,

    #[serde(default)]
    pub mappings: Vec<Mapping>,

    #[serde(default)]
    pub builders: BTreeMap<String, ValueBuilder>,
}

impl SavedConfig {
    /// Snapshot the active mappings of a set; inactive mappings are not saved
    pub fn capture(
        name: impl Into<String>,
        source: DataSource,
        api_url: Option<String>,
        set: &MappingSet,
    ) -> Self {
        let mappings: Vec<Mapping> = set.active().cloned().collect();
        let builders = set
            .builders()
            .iter()
            .filter(|(key, _)| mappings.iter().any(|m| &m.key_path == *key))
            .map(|(key, builder)| (key.clone(), builder.clone()))
            .collect();

        SavedConfig {
            name: name.into(),
            source,
            api_url,
            mappings,
            builders,
        }
    }

    pub fn to_mapping_set(&self) -> MappingSet {
        MappingSet::new(self.mappings.clone(), self.builders.clone())
    }
}

/// Named configurations persisted together as one JSON document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigStore {
    #[serde(default)]
    configs: Vec<SavedConfig>,
}

impl ConfigStore {
    pub fn new() -> Self {
        ConfigStore::default()
    }

    /// Load a store from disk; a missing file yields an empty store
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(ConfigStore::new()),
            Err(e) => {
                return Err(e)
                    .context(format!("Failed to read config store: {}", path.display()))
            }
        };
        let store: ConfigStore = serde_json::from_str(&content)
            .context(format!("Failed to parse config store: {}", path.display()))?;

        tracing::debug!(path = %path.display(), configs = store.configs.len(), "loaded config store");
        Ok(store)
    }

    /// Write the store as pretty-printed JSON
    pub fn persist<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .context("Failed to create config directory")?;
            }
        }

        let json = serde_json::to_string_pretty(self)
            .context("Failed to serialize config store")?;
        std::fs::write(path, json)
            .context(format!("Failed to write config store: {}", path.display()))?;
        Ok(())
    }

    /// Insert a config, replacing any existing one with the same name
    pub fn save(&mut self, config: SavedConfig) {
        match self.configs.iter_mut().find(|c| c.name == config.name) {
            Some(existing) => *existing = config,
            None => self.configs.push(config),
        }
    }

    pub fn get(&self, name: &str) -> Result<&SavedConfig, DataError> {
        self.configs
            .iter()
            .find(|c| c.name == name)
            .ok_or_else(|| DataError::UnknownConfig(name.to_string()))
    }

    pub fn delete(&mut self, name: &str) -> Option<SavedConfig> {
        let idx = self.configs.iter().position(|c| c.name == name)?;
        Some(self.configs.remove(idx))
    }

    pub fn names(&self) -> Vec<&str> {
        self.configs.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.configs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.configs.is_empty()
    }
}
