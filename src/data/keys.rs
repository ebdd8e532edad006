//! Key path discovery over a sample of records

use crate::data::types::KeyConfig;
use serde_json::{Map, Value};
use std::collections::BTreeSet;

/// Discover the addressable key paths in a record list
///
/// Only the first `config.sample_size` records are walked; later records are
/// assumed to share their schema. Arrays contribute both index-qualified
/// (`tags[0].name`) and index-free (`tags[].name`) paths for their first
/// `config.array_sample` elements.
///
/// The result is sorted and de-duplicated.
pub fn extract_keys(records: &[Value], config: &KeyConfig) -> Vec<String> {
    let mut keys = BTreeSet::new();

    for record in records.iter().take(config.sample_size) {
        if let Value::Object(obj) = record {
            walk_object(obj, "", 0, config, &mut keys);
        }
    }

    keys.into_iter().collect()
}

fn walk_object(
    obj: &Map<String, Value>,
    prefix: &str,
    depth: usize,
    config: &KeyConfig,
    keys: &mut BTreeSet<String>,
) {
    if depth >= config.max_depth {
        return;
    }

    for (key, value) in obj.iter() {
        let path = join_path(prefix, key);

        match value {
            Value::Object(child) => {
                walk_object(child, &path, depth + 1, config, keys);
            }
            Value::Array(items) => {
                for (idx, item) in items.iter().take(config.array_sample).enumerate() {
                    if let Value::Object(child) = item {
                        walk_object(child, &format!("{}[{}]", path, idx), depth + 1, config, keys);
                        walk_object(child, &format!("{}[]", path), depth + 1, config, keys);
                    }
                }
            }
            _ => {}
        }

        keys.insert(path);
    }
}

fn join_path(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", prefix, key)
    }
}
