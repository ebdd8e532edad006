//! # Layermap - JSON to Layer Mapping Toolkit
//!
//! Maps fields of externally supplied JSON (file upload, API response, pasted
//! text) onto named layers of a design document.
//!
//! ## Modules
//!
//! - **data**: Normalize raw JSON into records, discover key paths, resolve paths
//! - **builder**: Value builders composing layer text from text, separators and keys
//! - **mapping**: Key-to-layer mappings, rendering and saved configurations
//! - **workspace**: Per-channel session state with an activity log
//!
//! ## Quick Start
//!
//! ```rust
//! use layermap::{BuilderPart, Dataset, KeyConfig, MappingSet, ValueBuilder};
//! use serde_json::json;
//!
//! # fn main() -> anyhow::Result<()> {
//! let data = json!({
//!     "results": [
//!         {"name": "Alice", "team": {"name": "Core"}},
//!         {"name": "Bob", "team": {"name": "Web"}}
//!     ]
//! });
//!
//! let dataset = Dataset::from_value(data, &KeyConfig::default())?;
//! assert_eq!(dataset.keys, vec!["name", "team", "team.name"]);
//!
//! let mut mappings = MappingSet::from_keys(&dataset.keys);
//! mappings.set_layer("name", "Title");
//! mappings.set_builder(
//!     "name",
//!     ValueBuilder::new(vec![
//!         BuilderPart::key("name"),
//!         BuilderPart::separator(" / "),
//!         BuilderPart::key("team.name"),
//!     ]),
//! );
//!
//! let layers = mappings.render(&dataset.records[0]);
//! assert_eq!(layers[0].text, "Alice / Core");
//! # Ok(())
//! # }
//! ```

use anyhow::{Context, Result};
use serde_json::Value;
use std::io::Read;

pub mod error;
pub mod data;
pub mod builder;
pub mod mapping;
pub mod workspace;

// Re-export commonly used types for convenience
pub use error::DataError;
pub use data::{extract_keys, normalize, resolve_path, DataSource, Dataset, KeyConfig, Normalized, Shape};
pub use builder::{display_value, evaluate_builder, BuilderPart, PartKind, ValueBuilder};
pub use mapping::{render_dataset, ConfigStore, LayerValue, Mapping, MappingSet, RenderedRecord, SavedConfig};
pub use workspace::{ActivityLog, LogEntry, LogLevel, Workspace};

/// Parse JSON bytes, using SIMD-accelerated parsing when possible
pub fn parse_json(bytes: &[u8]) -> Result<Value, DataError> {
    // simd-json parses in place, so it works on a scratch copy
    let mut scratch = bytes.to_vec();
    match simd_json::serde::from_slice::<Value>(&mut scratch) {
        Ok(value) => Ok(value),
        Err(simd_err) => {
            tracing::debug!(error = %simd_err, "simd-json parse failed, retrying with serde_json");
            serde_json::from_slice(bytes).map_err(|e| DataError::Parse(e.to_string()))
        }
    }
}

/// Main entry point: read, normalize and discover keys in one step
pub fn load_dataset<R: Read>(mut reader: R, config: &KeyConfig) -> Result<Dataset> {
    let mut content = Vec::new();
    reader
        .read_to_end(&mut content)
        .context("Failed to read input")?;

    let value = parse_json(&content)?;
    let dataset = Dataset::from_value(value, config)?;

    tracing::info!(
        records = dataset.len(),
        keys = dataset.keys.len(),
        shape = %dataset.shape,
        "loaded dataset"
    );
    Ok(dataset)
}
