//! Error types for the meshprobe-core library.
//!
//! This module provides error handling using the `thiserror` crate. The
//! inspector itself never returns these to callers: every variant is folded
//! into an [`InspectionVerdict`](crate::InspectionVerdict) through
//! [`Error::verdict_message`]. Acquisition helpers do return them, so a caller
//! can decide how to surface a failed read.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for meshprobe operations
pub type Result<T> = std::result::Result<T, Error>;

/// Message used when a processing fault carries no description
pub const UNKNOWN_PROCESSING_ERROR: &str = "An unknown processing error occurred.";

/// Prefix applied to every parser fault surfaced in a verdict
pub const PROCESSING_ERROR_PREFIX: &str = "Processing Error: ";

/// Error type for all meshprobe operations
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Textual content is not a parseable JSON document
    #[error("malformed JSON: {0}")]
    MalformedJson(#[from] serde_json::Error),

    /// Parsed JSON lacks the mandatory `asset.version` field
    #[error("JSON is valid, but missing required 'asset' property with a 'version'.")]
    MissingAssetVersion,

    /// Supplied content does not match the declared inspection mode
    #[error("Invalid data format for the selected mode.")]
    ModeMismatch,

    /// No content was supplied and no fallback applies
    #[error("Please provide file data or paste JSON.")]
    EmptyInput,

    /// Failed to read input file
    #[error("failed to read file '{path}': {source}")]
    FileRead {
        /// Path to the file that failed to read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// File was read but its bytes are not valid UTF-8 text
    #[error("file '{path}' does not contain valid UTF-8 text")]
    FileDecode {
        /// Path to the undecodable file
        path: PathBuf,
    },

    /// Generic internal error
    #[error("internal error: {0}")]
    Internal(String),
}

/// Closed classification of inspection failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Content is not parseable as JSON in textual mode
    MalformedInput,
    /// Parsed JSON lacks `asset.version`
    SchemaViolation,
    /// Content shape does not match the declared mode
    ModeMismatch,
    /// Nothing to inspect
    EmptyInput,
    /// Content acquisition failed before inspection
    ReadFailure,
    /// Anything else
    Internal,
}

impl Error {
    /// Creates a new file read error
    pub fn file_read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileRead {
            path: path.into(),
            source,
        }
    }

    /// Creates a new file decode error
    pub fn file_decode(path: impl Into<PathBuf>) -> Self {
        Self::FileDecode { path: path.into() }
    }

    /// Creates a new internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Classifies this error
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::MalformedJson(_) => FailureKind::MalformedInput,
            Self::MissingAssetVersion => FailureKind::SchemaViolation,
            Self::ModeMismatch => FailureKind::ModeMismatch,
            Self::EmptyInput => FailureKind::EmptyInput,
            Self::FileRead { .. } | Self::FileDecode { .. } => FailureKind::ReadFailure,
            Self::Internal(_) => FailureKind::Internal,
        }
    }

    /// Renders the message shown to users in a failure verdict
    pub fn verdict_message(&self) -> String {
        match self {
            Self::MalformedJson(e) => processing_error(&e.to_string()),
            Self::Internal(msg) => processing_error(msg),
            Self::FileRead { .. } => "Error reading file.".to_string(),
            Self::FileDecode { .. } => "File data could not be read.".to_string(),
            other => other.to_string(),
        }
    }
}

/// Formats a caught fault as a verdict message
pub fn processing_error(description: &str) -> String {
    let description = description.trim();
    if description.is_empty() {
        format!("{PROCESSING_ERROR_PREFIX}{UNKNOWN_PROCESSING_ERROR}")
    } else {
        format!("{PROCESSING_ERROR_PREFIX}{description}")
    }
}
