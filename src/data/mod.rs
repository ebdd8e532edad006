//! Data ingestion - shape normalization, key discovery and path resolution
//!
//! Raw JSON from a file, an API response or pasted text is normalized into a
//! list of records, then sampled to discover the key paths that mappings and
//! value builders can address.

pub mod types;
pub mod normalize;
pub mod keys;
pub mod path;

pub use types::{DataSource, Dataset, KeyConfig, Normalized, Shape};
pub use normalize::normalize;
pub use keys::extract_keys;
pub use path::resolve_path;
