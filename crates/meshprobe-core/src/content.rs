//! Raw inspection inputs: the content itself and the declared mode.

use crate::error::Error;
use bytes::Bytes;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// File suffix that selects binary inspection
const BINARY_SUFFIX: &str = ".glb";

/// Raw content handed to the inspector
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetContent {
    /// Text presumed to contain a JSON descriptor
    Text(String),
    /// Raw bytes of a binary asset container
    Binary(Bytes),
    /// Nothing has been loaded yet
    Absent,
}

impl AssetContent {
    /// Returns true if no content was supplied
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// Length of the content in bytes (0 when absent)
    pub fn len(&self) -> usize {
        match self {
            Self::Text(text) => text.len(),
            Self::Binary(data) => data.len(),
            Self::Absent => 0,
        }
    }

    /// Returns true if the content is absent or zero-length
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<String> for AssetContent {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&str> for AssetContent {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<Vec<u8>> for AssetContent {
    fn from(data: Vec<u8>) -> Self {
        Self::Binary(Bytes::from(data))
    }
}

impl From<Bytes> for AssetContent {
    fn from(data: Bytes) -> Self {
        Self::Binary(data)
    }
}

/// How the caller wants the content evaluated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InspectionMode {
    /// Binary container (GLB)
    Binary,
    /// JSON text (glTF)
    Textual,
}

impl InspectionMode {
    /// Derives the mode from a file name: `.glb` is binary, anything else textual
    pub fn from_file_name(name: &str) -> Self {
        let is_glb = name.len() >= BINARY_SUFFIX.len()
            && name.is_char_boundary(name.len() - BINARY_SUFFIX.len())
            && name[name.len() - BINARY_SUFFIX.len()..].eq_ignore_ascii_case(BINARY_SUFFIX);
        if is_glb {
            Self::Binary
        } else {
            Self::Textual
        }
    }

    /// Derives the mode from the final component of a path
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        path.as_ref()
            .file_name()
            .and_then(|n| n.to_str())
            .map(Self::from_file_name)
            .unwrap_or(Self::Textual)
    }

    /// Returns true for binary mode
    pub fn is_binary(&self) -> bool {
        matches!(self, Self::Binary)
    }

    /// Lowercase name of the mode
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Binary => "binary",
            Self::Textual => "textual",
        }
    }
}

impl fmt::Display for InspectionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InspectionMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "binary" | "glb" => Ok(Self::Binary),
            "textual" | "text" | "gltf" => Ok(Self::Textual),
            other => Err(Error::internal(format!("unknown inspection mode: {other}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_from_file_name() {
        assert_eq!(InspectionMode::from_file_name("scene.glb"), InspectionMode::Binary);
        assert_eq!(InspectionMode::from_file_name("SCENE.GLB"), InspectionMode::Binary);
        assert_eq!(InspectionMode::from_file_name("scene.gltf"), InspectionMode::Textual);
        assert_eq!(InspectionMode::from_file_name("scene.json"), InspectionMode::Textual);
        assert_eq!(InspectionMode::from_file_name("glb"), InspectionMode::Textual);
        assert_eq!(InspectionMode::from_file_name(""), InspectionMode::Textual);
    }

    #[test]
    fn test_mode_from_path() {
        assert_eq!(
            InspectionMode::from_path("/assets/models/duck.glb"),
            InspectionMode::Binary
        );
        assert_eq!(
            InspectionMode::from_path("/assets/duck.glb/readme"),
            InspectionMode::Textual
        );
    }

    #[test]
    fn test_mode_parse() {
        assert_eq!("GLB".parse::<InspectionMode>().unwrap(), InspectionMode::Binary);
        assert_eq!("text".parse::<InspectionMode>().unwrap(), InspectionMode::Textual);
        assert!("fbx".parse::<InspectionMode>().is_err());
    }

    #[test]
    fn test_content_len() {
        assert_eq!(AssetContent::from("abc").len(), 3);
        assert_eq!(AssetContent::from(vec![0u8; 12]).len(), 12);
        assert!(AssetContent::Absent.is_absent());
        assert!(AssetContent::Absent.is_empty());
    }
}
