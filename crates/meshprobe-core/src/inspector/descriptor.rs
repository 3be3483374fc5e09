//! Shallow structural summary of a parsed glTF JSON document.
//!
//! The document is kept as a loosely-typed [`serde_json::Value`] tree. Every
//! field lookup is an explicit presence-and-type guard: a key that exists with
//! the wrong type is treated exactly like a missing key.

use crate::error::{Error, Result};
use crate::verdict::{Metadata, MetadataValue};
use serde_json::{Map, Value};

/// Value reported when no extensions are declared
pub const NO_EXTENSIONS: &str = "None";

/// Separator used when joining `extensionsUsed`
const EXTENSION_SEPARATOR: &str = ", ";

/// Facts extracted from a descriptor that passed the schema check
#[derive(Debug, Clone, PartialEq)]
pub struct DescriptorSummary {
    /// `asset.version`, string or number as written
    pub asset_version: MetadataValue,
    /// Length of the top-level `meshes` array
    pub meshes: usize,
    /// Length of the top-level `nodes` array
    pub nodes: usize,
    /// Length of the top-level `materials` array
    pub materials: usize,
    /// Entries of `extensionsUsed` in document order; non-string entries in JSON form
    pub extensions_used: Vec<String>,
}

impl DescriptorSummary {
    /// Parses JSON text and summarizes it
    pub fn parse(text: &str) -> Result<Self> {
        let document: Value = serde_json::from_str(text)?;
        Self::from_value(&document)
    }

    /// Summarizes an already-parsed document
    pub fn from_value(document: &Value) -> Result<Self> {
        let root = document.as_object().ok_or(Error::MissingAssetVersion)?;
        let asset_version = asset_version(root).ok_or(Error::MissingAssetVersion)?;

        Ok(Self {
            asset_version,
            meshes: array_len(root, "meshes"),
            nodes: array_len(root, "nodes"),
            materials: array_len(root, "materials"),
            extensions_used: rendered_entries(root, "extensionsUsed"),
        })
    }

    /// Comma-joined extension list, or `"None"`
    pub fn extensions_label(&self) -> String {
        if self.extensions_used.is_empty() {
            NO_EXTENSIONS.to_string()
        } else {
            self.extensions_used.join(EXTENSION_SEPARATOR)
        }
    }

    /// Converts the summary into display metadata
    pub fn into_metadata(self) -> Metadata {
        let extensions = self.extensions_label();
        Metadata::new()
            .with("AssetVersion", self.asset_version)
            .with("Meshes", self.meshes)
            .with("Nodes", self.nodes)
            .with("Materials", self.materials)
            .with("ExtensionsUsed", extensions)
    }
}

/// `asset.version` if present as a non-empty string or a number
fn asset_version(root: &Map<String, Value>) -> Option<MetadataValue> {
    let asset = root.get("asset")?.as_object()?;
    match asset.get("version")? {
        Value::String(s) if !s.is_empty() => Some(MetadataValue::Text(s.clone())),
        Value::Number(n) => Some(MetadataValue::Number(n.clone())),
        _ => None,
    }
}

fn array_len(root: &Map<String, Value>, key: &str) -> usize {
    root.get(key)
        .and_then(Value::as_array)
        .map(Vec::len)
        .unwrap_or(0)
}

fn rendered_entries(root: &Map<String, Value>, key: &str) -> Vec<String> {
    root.get(key)
        .and_then(Value::as_array)
        .map(|items| items.iter().map(render_entry).collect())
        .unwrap_or_default()
}

/// Strings verbatim, anything else in its JSON form
fn render_entry(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
