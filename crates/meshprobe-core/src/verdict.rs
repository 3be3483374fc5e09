//! Inspection results and the metadata they carry.

use crate::content::InspectionMode;
use crate::error::Error;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::fmt;

/// A single extracted metadata value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MetadataValue {
    /// Free-form text
    Text(String),
    /// A JSON number, integer or float, kept as parsed
    Number(serde_json::Number),
}

impl MetadataValue {
    /// Returns the text value, if any
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Number(_) => None,
        }
    }

    /// Returns the value as an unsigned integer, if it is one
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Self::Number(n) => n.as_u64(),
            Self::Text(_) => None,
        }
    }
}

impl fmt::Display for MetadataValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Number(n) => write!(f, "{n}"),
        }
    }
}

impl From<&str> for MetadataValue {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for MetadataValue {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<u64> for MetadataValue {
    fn from(n: u64) -> Self {
        Self::Number(n.into())
    }
}

impl From<usize> for MetadataValue {
    fn from(n: usize) -> Self {
        Self::Number((n as u64).into())
    }
}

/// Ordered mapping of field name to value with unique keys
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Metadata {
    fields: Vec<(String, MetadataValue)>,
}

impl Metadata {
    /// Creates an empty mapping
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a field, replacing the value in place if the key already exists
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<MetadataValue>) {
        let name = name.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(key, _)| *key == name) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((name, value)),
        }
    }

    /// Builder form of [`Metadata::insert`]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<MetadataValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// Looks up a field by name
    pub fn get(&self, name: &str) -> Option<&MetadataValue> {
        self.fields
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    /// Returns true if the field exists
    pub fn contains_key(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Iterates fields in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &MetadataValue)> {
        self.fields.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// Field names in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(key, _)| key.as_str())
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if there are no fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Merges another mapping into this one; later values win
    pub fn merge(&mut self, other: Metadata) {
        for (name, value) in other.fields {
            self.insert(name, value);
        }
    }
}

impl Serialize for Metadata {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// Outcome of a single inspection call
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InspectionVerdict {
    /// Whether the content passed validation
    pub is_valid: bool,
    /// Success summary or error detail
    pub message: String,
    /// Extracted fields; `None` on failure
    pub metadata: Option<Metadata>,
    /// The mode that was actually evaluated
    pub is_binary: bool,
    /// Set only for synthetic output produced without real content
    #[serde(skip_serializing_if = "is_false")]
    pub placeholder: bool,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl InspectionVerdict {
    /// Creates a successful verdict
    pub fn success(mode: InspectionMode, message: impl Into<String>, metadata: Metadata) -> Self {
        Self {
            is_valid: true,
            message: message.into(),
            metadata: Some(metadata),
            is_binary: mode.is_binary(),
            placeholder: false,
        }
    }

    /// Creates a failed verdict; failures never carry metadata
    pub fn failure(mode: InspectionMode, message: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            message: message.into(),
            metadata: None,
            is_binary: mode.is_binary(),
            placeholder: false,
        }
    }

    /// Converts an error into a failed verdict
    pub fn from_error(error: &Error, mode: InspectionMode) -> Self {
        Self::failure(mode, error.verdict_message())
    }

    /// Merges one caller-side display field into the metadata.
    ///
    /// Has no effect on verdicts without metadata.
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<MetadataValue>) -> Self {
        if let Some(metadata) = self.metadata.as_mut() {
            metadata.insert(name, value);
        }
        self
    }

    /// Looks up a metadata field
    pub fn field(&self, name: &str) -> Option<&MetadataValue> {
        self.metadata.as_ref().and_then(|m| m.get(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_metadata_preserves_order_and_unique_keys() {
        let mut metadata = Metadata::new()
            .with("AssetVersion", "2.0")
            .with("Meshes", 1usize)
            .with("Nodes", 2usize);
        metadata.insert("Meshes", 5usize);

        assert_eq!(metadata.len(), 3);
        assert_eq!(
            metadata.keys().collect::<Vec<_>>(),
            vec!["AssetVersion", "Meshes", "Nodes"]
        );
        assert_eq!(metadata.get("Meshes").and_then(|v| v.as_u64()), Some(5));
    }

    #[test]
    fn test_metadata_merge() {
        let mut base = Metadata::new().with("Version", 2u64).with("Note", "a");
        base.merge(Metadata::new().with("Note", "b").with("AlphaBleeding", "Enabled"));

        assert_eq!(
            base.keys().collect::<Vec<_>>(),
            vec!["Version", "Note", "AlphaBleeding"]
        );
        assert_eq!(base.get("Note").and_then(|v| v.as_text()), Some("b"));
        assert!(base.contains_key("AlphaBleeding"));
    }

    #[test]
    fn test_metadata_serializes_in_insertion_order() {
        let metadata = Metadata::new()
            .with("Zeta", "z")
            .with("Alpha", 1usize);
        let json = serde_json::to_string(&metadata).unwrap();
        assert_eq!(json, r#"{"Zeta":"z","Alpha":1}"#);
    }

    #[test]
    fn test_verdict_serialization() {
        let verdict = InspectionVerdict::failure(InspectionMode::Textual, "nope");
        let json = serde_json::to_value(&verdict).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "isValid": false,
                "message": "nope",
                "metadata": null,
                "isBinary": false
            })
        );
    }

    #[test]
    fn test_with_field_merges_only_into_metadata() {
        let ok = InspectionVerdict::success(
            InspectionMode::Binary,
            "ok",
            Metadata::new().with("Version", 2u64),
        )
        .with_field("AlphaBleeding", "Enabled");
        assert_eq!(
            ok.field("AlphaBleeding").and_then(|v| v.as_text()),
            Some("Enabled")
        );

        let failed = InspectionVerdict::failure(InspectionMode::Binary, "bad")
            .with_field("AlphaBleeding", "Enabled");
        assert!(failed.metadata.is_none());
    }

    #[test]
    fn test_metadata_value_display() {
        assert_eq!(MetadataValue::from("None").to_string(), "None");
        assert_eq!(MetadataValue::from(3usize).to_string(), "3");
        let float = MetadataValue::Number(serde_json::Number::from_f64(2.5).unwrap());
        assert_eq!(float.to_string(), "2.5");
    }
}
