use crate::builder::display_value;
use crate::data::path::resolve_path;
use crate::mapping::types::{LayerValue, MappingSet, RenderedRecord};
use serde_json::Value;

impl MappingSet {
    /// Compute the text of every active mapping for one record
    ///
    /// A mapping with a builder uses the builder's output; otherwise the raw
    /// resolved value is displayed, or an empty string when absent.
    pub fn render(&self, record: &Value) -> Vec<LayerValue> {
        self.active()
            .map(|mapping| {
                let text = match self.builder(&mapping.key_path) {
                    Some(builder) => builder.evaluate(record),
                    None => resolve_path(record, &mapping.key_path)
                        .map(display_value)
                        .unwrap_or_default(),
                };

                LayerValue {
                    layer_name: mapping.layer_name.clone(),
                    key_path: mapping.key_path.clone(),
                    text,
                }
            })
            .collect()
    }
}

/// Render every record of a dataset
pub fn render_dataset(records: &[Value], mappings: &MappingSet) -> Vec<RenderedRecord> {
    records
        .iter()
        .enumerate()
        .map(|(index, record)| RenderedRecord {
            index,
            layers: mappings.render(record),
        })
        .collect()
}
