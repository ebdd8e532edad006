use serde::{Deserialize, Serialize};

/// Tag of a value-builder part
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartKind {
    /// Literal text
    Text,
    /// Literal separator, a single space when unset
    Separator,
    /// Key path resolved against the record
    Key,
    /// Any tag this version does not know; contributes nothing
    #[serde(other)]
    Unknown,
}

/// One part of a value builder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuilderPart {
    #[serde(rename = "type")]
    pub kind: PartKind,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl BuilderPart {
    pub fn text(value: impl Into<String>) -> Self {
        BuilderPart {
            kind: PartKind::Text,
            value: Some(value.into()),
        }
    }

    pub fn separator(value: impl Into<String>) -> Self {
        BuilderPart {
            kind: PartKind::Separator,
            value: Some(value.into()),
        }
    }

    pub fn key(path: impl Into<String>) -> Self {
        BuilderPart {
            kind: PartKind::Key,
            value: Some(path.into()),
        }
    }
}

/// Ordered parts composing a display string from one record
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueBuilder {
    #[serde(default)]
    pub parts: Vec<BuilderPart>,
}

impl ValueBuilder {
    pub fn new(parts: Vec<BuilderPart>) -> Self {
        ValueBuilder { parts }
    }

    pub fn push(mut self, part: BuilderPart) -> Self {
        self.parts.push(part);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }
}
