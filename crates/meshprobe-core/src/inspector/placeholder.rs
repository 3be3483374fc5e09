//! Synthetic verdicts for inspections requested before any content exists.
//!
//! Nothing here looks at real data. The counts below are illustrative values
//! that let a caller show a success state immediately after a file is picked;
//! they carry no meaning and are flagged with `placeholder = true` and a
//! `Source: placeholder` field so they cannot be mistaken for real results.

use crate::content::InspectionMode;
use crate::verdict::{InspectionVerdict, Metadata};

/// Value of the `Source` field on every synthetic verdict
pub const PLACEHOLDER_SOURCE: &str = "placeholder";

/// Builds the synthetic verdict for the given mode
pub fn placeholder_verdict(mode: InspectionMode) -> InspectionVerdict {
    let (label, meshes, nodes, materials) = match mode {
        InspectionMode::Binary => ("GLB", 12usize, 48usize, 8usize),
        InspectionMode::Textual => ("glTF", 3usize, 7usize, 2usize),
    };

    let metadata = Metadata::new()
        .with("Source", PLACEHOLDER_SOURCE)
        .with("AssetVersion", "2.0")
        .with("Meshes", meshes)
        .with("Nodes", nodes)
        .with("Materials", materials);

    let mut verdict = InspectionVerdict::success(
        mode,
        format!("{label} file detected and header validated (placeholder, no content loaded)."),
        metadata,
    );
    verdict.placeholder = true;
    verdict
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_is_labelled() {
        for mode in [InspectionMode::Binary, InspectionMode::Textual] {
            let verdict = placeholder_verdict(mode);
            assert!(verdict.is_valid);
            assert!(verdict.placeholder);
            assert_eq!(verdict.is_binary, mode.is_binary());
            assert!(verdict.message.contains("placeholder"));
            assert_eq!(
                verdict.field("Source").and_then(|v| v.as_text()),
                Some(PLACEHOLDER_SOURCE)
            );
        }
    }

    #[test]
    fn test_binary_mock_counts_are_larger() {
        let binary = placeholder_verdict(InspectionMode::Binary);
        let textual = placeholder_verdict(InspectionMode::Textual);
        for field in ["Meshes", "Nodes", "Materials"] {
            let b = binary.field(field).and_then(|v| v.as_u64()).unwrap();
            let t = textual.field(field).and_then(|v| v.as_u64()).unwrap();
            assert!(b > t, "{field}: {b} <= {t}");
        }
    }
}
