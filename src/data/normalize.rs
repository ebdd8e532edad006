use crate::data::types::{Normalized, Shape};
use crate::error::{type_name, DataError};
use serde_json::Value;

/// Classify a parsed JSON value into a uniform list of records
///
/// The first matching rule wins:
/// 1. an array is used as-is
/// 2. an object whose only property is an array is unwrapped
/// 3. otherwise the object's first array-valued property (document order) is used
/// 4. an object with no array-valued property becomes a single record
///
/// Anything else is [`DataError::InvalidFormat`]. A result with no records is
/// [`DataError::EmptyDataset`].
pub fn normalize(value: Value) -> Result<Normalized, DataError> {
    let (records, shape) = match value {
        Value::Array(arr) => (arr, Shape::Array),
        Value::Object(mut obj) => {
            let first_array = obj
                .iter()
                .find(|(_, v)| v.is_array())
                .map(|(k, _)| k.clone());

            match first_array {
                Some(property) => {
                    let wrapped = obj.len() == 1;
                    let records = match obj.remove(&property) {
                        Some(Value::Array(arr)) => arr,
                        _ => Vec::new(),
                    };
                    let shape = if wrapped {
                        Shape::Wrapped { property }
                    } else {
                        Shape::FirstArray { property }
                    };
                    (records, shape)
                }
                None => (vec![Value::Object(obj)], Shape::Single),
            }
        }
        other => {
            return Err(DataError::InvalidFormat {
                found: type_name(&other),
            })
        }
    };

    if records.is_empty() {
        return Err(DataError::EmptyDataset);
    }

    tracing::debug!(records = records.len(), shape = %shape, "normalized dataset");

    Ok(Normalized { records, shape })
}
