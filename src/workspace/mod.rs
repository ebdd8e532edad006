//! Session state driven by the host's UI events
//!
//! The host forwards "data received", "layer name edited", "config applied"
//! and "clear" events as method calls and reads rendered layer values back.

pub mod log;

pub use self::log::{ActivityLog, LogEntry, LogLevel};

use crate::data::types::{DataSource, Dataset, KeyConfig};
use crate::error::DataError;
use crate::mapping::config::SavedConfig;
use crate::mapping::render::render_dataset;
use crate::mapping::types::{MappingSet, RenderedRecord};
use serde_json::Value;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default)]
pub struct Workspace {
    datasets: BTreeMap<DataSource, Dataset>,
    active: Option<DataSource>,
    mappings: MappingSet,
    // mappings of inactive channels, restored on activation
    parked: BTreeMap<DataSource, MappingSet>,
    log: ActivityLog,
    config: KeyConfig,
}

impl Workspace {
    pub fn new(config: KeyConfig) -> Self {
        Workspace {
            config,
            ..Workspace::default()
        }
    }

    /// Replace the dataset of a channel with freshly parsed data
    ///
    /// The channel becomes active and its mappings are synced to the new keys;
    /// other channels keep their own mappings. On failure the previous dataset
    /// is kept and the error is logged.
    pub fn ingest(&mut self, source: DataSource, value: Value) -> Result<&Dataset, DataError> {
        let dataset = match Dataset::from_value(value, &self.config) {
            Ok(dataset) => dataset,
            Err(e) => {
                self.log.error(format!("Failed to load {} data: {}", source, e));
                return Err(e);
            }
        };

        self.log.info(format!("Detected {}", dataset.shape));
        self.log.success(format!(
            "Loaded {} records with {} keys from {}",
            dataset.len(),
            dataset.keys.len(),
            source
        ));

        self.switch_to(source);
        self.mappings.sync_keys(&dataset.keys);
        self.datasets.insert(source, dataset);

        Ok(&self.datasets[&source])
    }

    /// Parse raw bytes, then [`ingest`](Self::ingest) them
    pub fn ingest_bytes(&mut self, source: DataSource, bytes: &[u8]) -> Result<&Dataset, DataError> {
        let value = match crate::parse_json(bytes) {
            Ok(value) => value,
            Err(e) => {
                self.log.error(format!("Failed to load {} data: {}", source, e));
                return Err(e);
            }
        };
        self.ingest(source, value)
    }

    /// Make a loaded channel the one mappings, rendering and configs act on
    ///
    /// Returns false when the channel has no dataset.
    pub fn activate(&mut self, source: DataSource) -> bool {
        let Some(keys) = self.datasets.get(&source).map(|d| d.keys.clone()) else {
            self.log.warning(format!("No {} data loaded", source));
            return false;
        };

        self.switch_to(source);
        self.mappings.sync_keys(&keys);
        self.log.info(format!("Switched to {} data", source));
        true
    }

    /// Discard a channel's dataset and its mappings
    ///
    /// Clearing the active channel activates the first remaining loaded
    /// channel, if any.
    pub fn clear(&mut self, source: DataSource) {
        if self.datasets.remove(&source).is_none() {
            return;
        }
        self.parked.remove(&source);
        self.log.info(format!("Cleared {} data", source));

        if self.active == Some(source) {
            self.active = None;
            self.mappings.clear();
            if let Some(next) = self.datasets.keys().next().copied() {
                self.activate(next);
            }
        }
    }

    fn switch_to(&mut self, source: DataSource) {
        if self.active == Some(source) {
            return;
        }

        let restored = self.parked.remove(&source).unwrap_or_default();
        let previous = std::mem::replace(&mut self.mappings, restored);
        if let Some(old) = self.active {
            self.parked.insert(old, previous);
        }
        self.active = Some(source);
    }

    pub fn active_source(&self) -> Option<DataSource> {
        self.active
    }

    pub fn active_dataset(&self) -> Option<&Dataset> {
        self.active.and_then(|source| self.datasets.get(&source))
    }

    pub fn dataset(&self, source: DataSource) -> Option<&Dataset> {
        self.datasets.get(&source)
    }

    pub fn mappings(&self) -> &MappingSet {
        &self.mappings
    }

    pub fn mappings_mut(&mut self) -> &mut MappingSet {
        &mut self.mappings
    }

    pub fn log(&self) -> &ActivityLog {
        &self.log
    }

    /// Render every record of the active dataset with the current mappings
    pub fn render_all(&mut self) -> Vec<RenderedRecord> {
        if self.active_dataset().is_none() {
            self.log.warning("No data loaded");
            return Vec::new();
        }

        if self.mappings.active_count() == 0 {
            self.log.warning("No active mappings");
            return Vec::new();
        }

        let rendered = match self.active_dataset() {
            Some(dataset) => render_dataset(&dataset.records, &self.mappings),
            None => Vec::new(),
        };
        self.log.success(format!(
            "Rendered {} records across {} layers",
            rendered.len(),
            self.mappings.active_count()
        ));
        rendered
    }

    /// Apply a saved configuration's layer names and builders to the current keys
    ///
    /// Saved mappings whose key path is absent from the active dataset are
    /// skipped and reported. Returns the number of mappings applied; zero is
    /// logged as an error.
    pub fn apply_config(&mut self, config: &SavedConfig) -> usize {
        let mut applied = 0;

        for mapping in &config.mappings {
            if !self.mappings.set_layer(&mapping.key_path, mapping.layer_name.clone()) {
                continue;
            }
            if let Some(builder) = config.builders.get(&mapping.key_path) {
                self.mappings.set_builder(&mapping.key_path, builder.clone());
            }
            applied += 1;
        }

        let skipped = config.mappings.len() - applied;
        if applied == 0 {
            self.log.error(format!(
                "Configuration '{}' matches none of the current data",
                config.name
            ));
            return 0;
        }

        if skipped > 0 {
            self.log.warning(format!(
                "{} mappings from '{}' do not match the current data",
                skipped, config.name
            ));
        }
        self.log.success(format!("Applied configuration '{}'", config.name));
        applied
    }

    /// Snapshot the current mappings as a named configuration
    pub fn capture_config(&mut self, name: impl Into<String>, api_url: Option<String>) -> SavedConfig {
        let source = self.active.unwrap_or(DataSource::File);
        let config = SavedConfig::capture(name, source, api_url, &self.mappings);
        self.log.success(format!("Saved configuration '{}'", config.name));
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{BuilderPart, ValueBuilder};
    use serde_json::json;

    fn people() -> Value {
        json!({
            "results": [
                {"name": "Ann", "team": {"name": "Core"}},
                {"name": "Ben", "team": {"name": "Web"}}
            ]
        })
    }

    #[test]
    fn test_ingest_and_render() {
        let mut ws = Workspace::default();
        let dataset = ws.ingest(DataSource::File, people()).unwrap();
        assert_eq!(dataset.keys, vec!["name", "team", "team.name"]);

        ws.mappings_mut().set_layer("name", "Title");
        ws.mappings_mut().set_layer("team.name", "Team");
        ws.mappings_mut().set_builder(
            "team.name",
            ValueBuilder::new(vec![BuilderPart::text("Team "), BuilderPart::key("team.name")]),
        );

        let rendered = ws.render_all();
        assert_eq!(rendered.len(), 2);
        assert_eq!(rendered[1].layers[0].text, "Ben");
        assert_eq!(rendered[1].layers[1].text, "Team Web");
        assert_eq!(ws.log().last().unwrap().level, LogLevel::Success);
    }

    #[test]
    fn test_failed_ingest_keeps_previous_data() {
        let mut ws = Workspace::default();
        ws.ingest(DataSource::Paste, people()).unwrap();

        let err = ws.ingest(DataSource::Paste, json!([])).unwrap_err();
        assert_eq!(err, DataError::EmptyDataset);
        assert_eq!(ws.active_dataset().unwrap().len(), 2);
        assert_eq!(ws.log().last().unwrap().level, LogLevel::Error);
    }

    #[test]
    fn test_ingest_bytes_reports_parse_errors() {
        let mut ws = Workspace::default();
        let bytes = b"{\"broken\": ".to_vec();

        assert!(matches!(
            ws.ingest_bytes(DataSource::Paste, &bytes),
            Err(DataError::Parse(_))
        ));
        assert!(ws.active_dataset().is_none());

        let bytes = br#"[{"id": 1}]"#.to_vec();
        let dataset = ws.ingest_bytes(DataSource::Paste, &bytes).unwrap();
        assert_eq!(dataset.keys, vec!["id"]);
    }

    #[test]
    fn test_reingest_keeps_layers_for_surviving_keys() {
        let mut ws = Workspace::default();
        ws.ingest(DataSource::Api, people()).unwrap();
        ws.mappings_mut().set_layer("name", "Title");

        ws.ingest(DataSource::Api, json!([{"name": "Cy", "age": 4}])).unwrap();

        assert_eq!(ws.mappings().get("name").unwrap().layer_name, "Title");
        assert!(ws.mappings().get("team").is_none());
        assert!(ws.mappings().get("age").is_some());
    }

    #[test]
    fn test_clear_active_channel_drops_mappings() {
        let mut ws = Workspace::default();
        ws.ingest(DataSource::File, people()).unwrap();
        ws.ingest(DataSource::Api, json!({"x": 1})).unwrap();
        ws.mappings_mut().set_layer("x", "X");

        ws.clear(DataSource::File);
        assert_eq!(ws.active_source(), Some(DataSource::Api));
        assert_eq!(ws.mappings().active_count(), 1);

        ws.clear(DataSource::Api);
        assert!(ws.active_dataset().is_none());
        assert!(ws.mappings().mappings().is_empty());
        assert!(ws.render_all().is_empty());
    }

    #[test]
    fn test_capture_and_apply_config() {
        let mut ws = Workspace::default();
        ws.ingest(DataSource::Api, people()).unwrap();
        ws.mappings_mut().set_layer("name", "Title");
        ws.mappings_mut()
            .set_builder("name", ValueBuilder::new(vec![BuilderPart::key("name")]));
        let config = ws.capture_config("people", Some("https://example.com/people".to_string()));
        assert_eq!(config.source, DataSource::Api);

        let mut fresh = Workspace::default();
        fresh.ingest(DataSource::File, json!([{"name": "Dee"}])).unwrap();
        fresh.apply_config(&config);

        assert_eq!(fresh.mappings().get("name").unwrap().layer_name, "Title");
        assert!(fresh.mappings().builder("name").is_some());
        assert_eq!(fresh.render_all()[0].layers[0].text, "Dee");
    }

    fn config_for(keys: &[&str]) -> SavedConfig {
        SavedConfig {
            name: "old".to_string(),
            source: DataSource::File,
            api_url: None,
            mappings: keys
                .iter()
                .map(|k| crate::mapping::Mapping::new(*k, "Layer"))
                .collect(),
            builders: BTreeMap::new(),
        }
    }

    #[test]
    fn test_apply_config_reports_unmatched_keys() {
        let mut ws = Workspace::default();
        ws.ingest(DataSource::File, json!([{"a": 1}])).unwrap();

        assert_eq!(ws.apply_config(&config_for(&["a", "gone"])), 1);

        let warnings = ws
            .log()
            .entries()
            .filter(|e| e.level == LogLevel::Warning)
            .count();
        assert_eq!(warnings, 1);
        assert_eq!(ws.log().last().unwrap().level, LogLevel::Success);
    }

    #[test]
    fn test_apply_config_matching_nothing_is_an_error() {
        let mut ws = Workspace::default();
        assert_eq!(ws.apply_config(&config_for(&["a"])), 0);
        assert_eq!(ws.log().last().unwrap().level, LogLevel::Error);

        ws.ingest(DataSource::File, json!([{"a": 1}])).unwrap();
        assert_eq!(ws.apply_config(&config_for(&["gone"])), 0);
        assert_eq!(ws.log().last().unwrap().level, LogLevel::Error);
        assert_eq!(ws.mappings().active_count(), 0);
    }

    #[test]
    fn test_channels_keep_their_own_mappings() {
        let mut ws = Workspace::default();
        ws.ingest(DataSource::File, json!([{"name": "Ann"}])).unwrap();
        ws.mappings_mut().set_layer("name", "Title");

        ws.ingest(DataSource::Api, json!([{"x": 1}])).unwrap();
        assert_eq!(ws.active_source(), Some(DataSource::Api));
        assert!(ws.mappings().get("name").is_none());
        ws.mappings_mut().set_layer("x", "X");

        assert!(ws.activate(DataSource::File));
        assert_eq!(ws.mappings().get("name").unwrap().layer_name, "Title");
        assert_eq!(ws.render_all()[0].layers[0].text, "Ann");

        assert!(ws.activate(DataSource::Api));
        assert_eq!(ws.mappings().get("x").unwrap().layer_name, "X");

        assert!(!ws.activate(DataSource::Paste));
        assert_eq!(ws.active_source(), Some(DataSource::Api));
    }

    #[test]
    fn test_clear_active_falls_back_to_remaining_channel() {
        let mut ws = Workspace::default();
        ws.ingest(DataSource::File, json!([{"name": "Ann"}])).unwrap();
        ws.mappings_mut().set_layer("name", "Title");
        ws.ingest(DataSource::Api, json!([{"x": 1}])).unwrap();

        ws.clear(DataSource::Api);

        assert_eq!(ws.active_source(), Some(DataSource::File));
        assert!(ws.active_dataset().is_some());
        assert_eq!(ws.mappings().get("name").unwrap().layer_name, "Title");

        let rendered = ws.render_all();
        assert_eq!(rendered.len(), 1);
        assert_eq!(rendered[0].layers[0].text, "Ann");
    }

    #[test]
    fn test_cleared_channel_forgets_mappings() {
        let mut ws = Workspace::default();
        ws.ingest(DataSource::File, json!([{"name": "Ann"}])).unwrap();
        ws.mappings_mut().set_layer("name", "Title");
        ws.ingest(DataSource::Api, json!([{"x": 1}])).unwrap();

        ws.clear(DataSource::File);
        ws.ingest(DataSource::File, json!([{"name": "Bo"}])).unwrap();

        assert_eq!(ws.mappings().get("name").unwrap().layer_name, "");
    }
}
