//! Content acquisition from the filesystem.
//!
//! Reads a file into the shape the selected mode expects: raw bytes for
//! binary mode, UTF-8 text for textual mode.

use crate::content::{AssetContent, InspectionMode};
use crate::error::{Error, Result};
use crate::inspector::{InspectionStrategy, Inspector};
use crate::verdict::InspectionVerdict;
use bytes::Bytes;
use std::path::Path;
use tracing::{debug, trace};

/// Reads a file as content for the given mode
pub fn read_content(path: impl AsRef<Path>, mode: InspectionMode) -> Result<AssetContent> {
    let path = path.as_ref();
    trace!("Reading {} in {} mode", path.display(), mode);
    let data = std::fs::read(path).map_err(|e| Error::file_read(path, e))?;

    match mode {
        InspectionMode::Binary => Ok(AssetContent::Binary(Bytes::from(data))),
        InspectionMode::Textual => String::from_utf8(data)
            .map(AssetContent::Text)
            .map_err(|_| Error::file_decode(path)),
    }
}

/// Inspects a file, deriving the mode from its name
///
/// Read failures are folded into a failed verdict.
pub fn inspect_file(path: impl AsRef<Path>) -> InspectionVerdict {
    inspect_file_with(&Inspector::new(), path)
}

/// Inspects a file with a specific strategy, deriving the mode from its name
pub fn inspect_file_with<S: InspectionStrategy + ?Sized>(
    strategy: &S,
    path: impl AsRef<Path>,
) -> InspectionVerdict {
    let path = path.as_ref();
    let mode = InspectionMode::from_path(path);
    inspect_file_as(strategy, path, mode)
}

/// Inspects a file with an explicit mode
pub fn inspect_file_as<S: InspectionStrategy + ?Sized>(
    strategy: &S,
    path: impl AsRef<Path>,
    mode: InspectionMode,
) -> InspectionVerdict {
    let path = path.as_ref();
    match read_content(path, mode) {
        Ok(content) => strategy.inspect(&content, mode),
        Err(e) => {
            debug!("Acquisition failed for {}: {}", path.display(), e);
            InspectionVerdict::from_error(&e, mode)
        }
    }
}
