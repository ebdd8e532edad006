use crate::data::keys::extract_keys;
use crate::data::normalize::normalize;
use crate::error::DataError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Configuration for key discovery
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyConfig {
    /// Maximum nesting depth walked (1 = top-level keys only)
    pub max_depth: usize,

    /// Number of leading records sampled for keys
    pub sample_size: usize,

    /// Number of leading array elements walked per array
    pub array_sample: usize,
}

impl Default for KeyConfig {
    fn default() -> Self {
        KeyConfig {
            max_depth: 3,
            sample_size: 10,
            array_sample: 3,
        }
    }
}

/// Ingestion channel a dataset arrived through
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    File,
    Api,
    Paste,
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DataSource::File => "file",
            DataSource::Api => "api",
            DataSource::Paste => "paste",
        };
        f.write_str(name)
    }
}

/// Which normalization branch produced the record list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Shape {
    /// Input was already an array
    Array,
    /// Object whose only property is an array
    Wrapped { property: String },
    /// First array-valued property of a larger object
    FirstArray { property: String },
    /// Plain object treated as a single record
    Single,
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shape::Array => write!(f, "array of records"),
            Shape::Wrapped { property } => write!(f, "array unwrapped from '{}'", property),
            Shape::FirstArray { property } => {
                write!(f, "first array property '{}'", property)
            }
            Shape::Single => write!(f, "single object as one record"),
        }
    }
}

/// Output of [`normalize`]
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized {
    pub records: Vec<Value>,
    pub shape: Shape,
}

/// Records and the key paths discovered in them, produced together on ingest
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub records: Vec<Value>,
    pub keys: Vec<String>,
    pub shape: Shape,
}

impl Dataset {
    /// Normalize a parsed JSON value and discover its keys
    pub fn from_value(value: Value, config: &KeyConfig) -> Result<Self, DataError> {
        let Normalized { records, shape } = normalize(value)?;
        let keys = extract_keys(&records, config);

        Ok(Dataset {
            records,
            keys,
            shape,
        })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn record(&self, index: usize) -> Option<&Value> {
        self.records.get(index)
    }
}
