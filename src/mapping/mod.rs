//! Mappings from key paths to layers, rendering, and saved configurations

pub mod types;
pub mod render;
pub mod config;

pub use types::{LayerValue, Mapping, MappingSet, RenderedRecord};
pub use render::render_dataset;
pub use config::{ConfigStore, SavedConfig};
