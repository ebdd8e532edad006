use crate::builder::part::{BuilderPart, PartKind, ValueBuilder};
use crate::data::path::resolve_path;
use serde_json::Value;

const DEFAULT_SEPARATOR: &str = " ";

impl ValueBuilder {
    /// Concatenate every part's contribution for `record`
    ///
    /// Nothing is inserted between parts. Missing keys contribute an empty
    /// string; evaluation never fails.
    pub fn evaluate(&self, record: &Value) -> String {
        self.parts
            .iter()
            .map(|part| evaluate_part(part, record))
            .collect()
    }

    /// Evaluate against the first record, as a live preview
    pub fn preview(&self, records: &[Value]) -> String {
        records
            .first()
            .map(|record| self.evaluate(record))
            .unwrap_or_default()
    }
}

/// Evaluate an optional builder; a missing builder yields an empty string
pub fn evaluate_builder(builder: Option<&ValueBuilder>, record: &Value) -> String {
    builder.map(|b| b.evaluate(record)).unwrap_or_default()
}

fn evaluate_part(part: &BuilderPart, record: &Value) -> String {
    match part.kind {
        PartKind::Text => part.value.clone().unwrap_or_default(),
        PartKind::Separator => part
            .value
            .clone()
            .unwrap_or_else(|| DEFAULT_SEPARATOR.to_string()),
        PartKind::Key => part
            .value
            .as_deref()
            .and_then(|path| resolve_path(record, path))
            .map(display_value)
            .unwrap_or_default(),
        PartKind::Unknown => String::new(),
    }
}

/// Render a resolved JSON value as layer text
///
/// Strings are unquoted, arrays join their elements with `,` (nulls become
/// empty), objects render as compact JSON.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                other => display_value(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => value.to_string(),
    }
}
