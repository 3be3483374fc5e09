//! # meshprobe-core
//!
//! A library for shallow structural inspection of glTF and GLB asset descriptors.
//!
//! This crate provides the core functionality for:
//! - Validating glTF JSON text against the minimal `asset.version` contract
//! - Summarizing mesh, node, and material counts and declared extensions
//! - Reporting the size of GLB binary containers (without parsing them)
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`content`]: Inspection inputs and mode selection
//! - [`inspector`]: Branch dispatch and descriptor summaries
//! - [`verdict`]: Inspection results and ordered metadata
//! - [`acquire`]: Reading files into inspectable content
//! - [`session`]: Request tokens for discarding stale results
//! - [`error`]: Error types and handling
//!
//! ## Example
//!
//! ```
//! use meshprobe_core::{inspect, AssetContent, InspectionMode};
//!
//! let json = r#"{"asset":{"version":"2.0"},"meshes":[{}],"nodes":[{},{}]}"#;
//! let verdict = inspect(&AssetContent::from(json), InspectionMode::Textual);
//!
//! assert!(verdict.is_valid);
//! for (name, value) in verdict.metadata.iter().flat_map(|m| m.iter()) {
//!     println!("{name}: {value}");
//! }
//! ```
//!
//! ## Extensibility
//!
//! - [`InspectionStrategy`]: Customize how content is inspected
//!

#![deny(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unreachable_pub)]

pub mod acquire;
pub mod content;
pub mod error;
pub mod inspector;
pub mod session;
pub mod verdict;

// Re-export primary types for convenience
pub use acquire::{inspect_file, inspect_file_as, inspect_file_with, read_content};
pub use content::{AssetContent, InspectionMode};
pub use error::{Error, FailureKind, Result};
pub use inspector::{
    inspect, placeholder_verdict, DescriptorSummary, InspectionStrategy, Inspector,
    InspectorConfig,
};
pub use session::{InspectionSession, RequestToken};
pub use verdict::{InspectionVerdict, Metadata, MetadataValue};

/// Crate version for programmatic access
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
