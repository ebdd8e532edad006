use thiserror::Error;

/// Recoverable, user-facing failures raised while ingesting or mapping data
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DataError {
    /// The parsed value is neither an object nor an array
    #[error("Invalid data format: expected an object or an array, found {found}")]
    InvalidFormat { found: &'static str },

    /// Normalization produced zero records
    #[error("Dataset is empty: no records found")]
    EmptyDataset,

    #[error("Failed to parse JSON: {0}")]
    Parse(String),

    #[error("No saved configuration named '{0}'")]
    UnknownConfig(String),
}

/// Short name of a JSON value's type, used in error messages
pub(crate) fn type_name(value: &serde_json::Value) -> &'static str {
    use serde_json::Value;

    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
