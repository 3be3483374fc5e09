//! Descriptor inspection: dispatch on content shape and mode.
//!
//! ## Branches
//!
//! 1. No content loaded: a synthetic placeholder verdict (see [`placeholder_verdict`])
//! 2. Binary content in binary mode: reports buffer size only, the container
//!    structure is not parsed
//! 3. Text content in textual mode: JSON parse plus a shallow schema check
//!    (see [`DescriptorSummary`])
//! 4. Anything else: mode mismatch
//!
//! Inspection never fails with an `Err`. Every fault ends in a verdict with
//! `is_valid = false`.
//!
//! ## Extensibility
//!
//! The [`InspectionStrategy`] trait allows alternative inspectors:
//!
//! ```no_run
//! use meshprobe_core::{AssetContent, InspectionMode, InspectionStrategy, InspectionVerdict};
//!
//! struct RejectAll;
//!
//! impl InspectionStrategy for RejectAll {
//!     fn inspect(&self, _content: &AssetContent, mode: InspectionMode) -> InspectionVerdict {
//!         InspectionVerdict::failure(mode, "rejected")
//!     }
//! }
//! ```

mod descriptor;
mod placeholder;

use crate::content::{AssetContent, InspectionMode};
use crate::error::Error;
use crate::verdict::{InspectionVerdict, Metadata};
use bytes::Bytes;
use tracing::{debug, trace};

pub use descriptor::{DescriptorSummary, NO_EXTENSIONS};
pub use placeholder::{placeholder_verdict, PLACEHOLDER_SOURCE};

/// Major version of the binary container format being emulated
pub const NOMINAL_BINARY_VERSION: u64 = 2;

/// Bytes per megabyte used for the `Length` field
const BYTES_PER_MB: f64 = 1_048_576.0;

/// Note attached to every binary verdict
pub const BINARY_NOTE: &str = "Detailed binary parsing requires specialized logic.";

/// Configuration for the inspector
#[derive(Debug, Clone)]
pub struct InspectorConfig {
    /// Return a placeholder verdict for absent content instead of failing
    pub allow_placeholder: bool,
    /// Version reported for binary containers
    pub nominal_binary_version: u64,
}

impl Default for InspectorConfig {
    fn default() -> Self {
        Self {
            allow_placeholder: true,
            nominal_binary_version: NOMINAL_BINARY_VERSION,
        }
    }
}

impl InspectorConfig {
    /// Creates a new inspector config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether absent content yields a placeholder verdict
    pub fn allow_placeholder(mut self, allow: bool) -> Self {
        self.allow_placeholder = allow;
        self
    }

    /// Sets the version reported for binary containers
    pub fn nominal_binary_version(mut self, version: u64) -> Self {
        self.nominal_binary_version = version;
        self
    }
}

/// Trait for implementing custom inspection strategies
pub trait InspectionStrategy: Send + Sync {
    /// Inspect the content under the declared mode
    fn inspect(&self, content: &AssetContent, mode: InspectionMode) -> InspectionVerdict;
}

/// Primary descriptor inspector
#[derive(Debug, Clone, Default)]
pub struct Inspector {
    config: InspectorConfig,
}

impl Inspector {
    /// Creates a new inspector with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new inspector with custom configuration
    pub fn with_config(config: InspectorConfig) -> Self {
        Self { config }
    }

    /// Returns the active configuration
    pub fn config(&self) -> &InspectorConfig {
        &self.config
    }

    fn inspect_absent(&self, mode: InspectionMode) -> InspectionVerdict {
        if self.config.allow_placeholder {
            trace!("No content supplied, returning placeholder for {} mode", mode);
            placeholder_verdict(mode)
        } else {
            InspectionVerdict::from_error(&Error::EmptyInput, mode)
        }
    }

    fn inspect_binary(&self, data: &Bytes) -> InspectionVerdict {
        let mode = InspectionMode::Binary;
        if data.is_empty() {
            return InspectionVerdict::from_error(&Error::EmptyInput, mode);
        }

        let metadata = Metadata::new()
            .with("Version", self.config.nominal_binary_version)
            .with("Length", format_megabytes(data.len()))
            .with("ByteLength", data.len())
            .with("Note", BINARY_NOTE);

        InspectionVerdict::success(
            mode,
            format!(
                "GLB binary detected ({} bytes). Container structure was not parsed.",
                data.len()
            ),
            metadata,
        )
    }

    fn inspect_text(&self, text: &str) -> InspectionVerdict {
        let mode = InspectionMode::Textual;
        match DescriptorSummary::parse(text) {
            Ok(summary) => {
                let message = format!(
                    "Valid glTF JSON (asset version {}).",
                    summary.asset_version
                );
                InspectionVerdict::success(mode, message, summary.into_metadata())
            }
            Err(e) => {
                trace!("Descriptor rejected: {}", e);
                InspectionVerdict::from_error(&e, mode)
            }
        }
    }
}

impl InspectionStrategy for Inspector {
    fn inspect(&self, content: &AssetContent, mode: InspectionMode) -> InspectionVerdict {
        debug!("Inspecting {} bytes in {} mode", content.len(), mode);

        let verdict = match (content, mode) {
            (AssetContent::Absent, mode) => self.inspect_absent(mode),
            (AssetContent::Binary(data), InspectionMode::Binary) => self.inspect_binary(data),
            (AssetContent::Text(text), InspectionMode::Textual) => self.inspect_text(text),
            (_, mode) => InspectionVerdict::from_error(&Error::ModeMismatch, mode),
        };

        debug!("Verdict: valid={} message={:?}", verdict.is_valid, verdict.message);
        verdict
    }
}

/// Inspects content with the default inspector
pub fn inspect(content: &AssetContent, mode: InspectionMode) -> InspectionVerdict {
    Inspector::new().inspect(content, mode)
}

/// Renders a byte count as megabytes with two decimals, e.g. `"2.00 MB"`
pub fn format_megabytes(len: usize) -> String {
    format!("{:.2} MB", len as f64 / BYTES_PER_MB)
}
