//! meshprobe - Inspect glTF and GLB asset descriptors
//!
//! This tool feeds files, pasted JSON, or stdin to the descriptor inspector
//! and renders the resulting verdicts as text or JSON.

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, ValueEnum};
use meshprobe_core::{
    inspect_file_as, AssetContent, Error, InspectionMode, InspectionStrategy, InspectionVerdict,
    Inspector, InspectorConfig,
};
use std::collections::HashMap;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, info, trace, warn, Level};
use tracing_subscriber::EnvFilter;
use walkdir::WalkDir;

/// Display field echoing the alpha bleeding setting
const ALPHA_BLEEDING_FIELD: &str = "AlphaBleeding";

/// Inspect glTF and GLB asset descriptors
#[derive(Parser, Debug)]
#[command(name = "meshprobe")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(flatten)]
    input: InputMode,

    /// Inspection mode (auto derives it from the file name)
    #[arg(long, value_enum, default_value = "auto")]
    mode: ModeArg,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Enable alpha bleeding (echoed in the report)
    #[arg(long)]
    alpha_bleeding: bool,

    /// Fail instead of returning a placeholder when no content is available
    #[arg(long)]
    no_placeholder: bool,

    /// Exit with an error if any inspected asset is invalid
    #[arg(long)]
    strict: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
struct InputMode {
    /// Path to a single .gltf or .glb file to inspect
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Path to a directory of assets to inspect recursively
    #[arg(short, long)]
    directory: Option<PathBuf>,

    /// Inline glTF JSON to inspect
    #[arg(short, long)]
    json: Option<String>,

    /// Read content from standard input
    #[arg(long)]
    stdin: bool,
}

/// Mode selection on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ModeArg {
    /// Binary for .glb, textual otherwise (textual for inline and stdin input)
    Auto,
    /// Treat content as a GLB container
    Binary,
    /// Treat content as glTF JSON
    Textual,
}

impl ModeArg {
    /// Resolves the mode, deriving it from `path` when automatic
    fn resolve(self, path: Option<&Path>) -> InspectionMode {
        match self {
            ModeArg::Binary => InspectionMode::Binary,
            ModeArg::Textual => InspectionMode::Textual,
            ModeArg::Auto => path
                .map(InspectionMode::from_path)
                .unwrap_or(InspectionMode::Textual),
        }
    }
}

/// Output format for verdicts
#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Human-readable report
    Text,
    /// One pretty-printed JSON object per verdict
    Json,
}

/// Tracks seen assets for deduplication
#[derive(Default)]
struct AssetRegistry {
    /// Maps content hash -> first path seen with that content
    seen: HashMap<String, PathBuf>,
    /// Statistics
    stats: RegistryStats,
}

#[derive(Default)]
struct RegistryStats {
    total_found: usize,
    duplicates_skipped: usize,
    valid: usize,
    invalid: usize,
}

impl AssetRegistry {
    fn new() -> Self {
        Self::default()
    }

    /// Compute a short hash of the content (first 8 chars of blake3)
    fn content_hash(data: &[u8]) -> String {
        let hash = blake3::hash(data);
        hash.to_hex()[..8].to_string()
    }

    /// Register an asset; returns the earlier path if this content was already seen
    fn register(&mut self, path: &Path, content_hash: &str) -> Option<&Path> {
        self.stats.total_found += 1;

        if self.seen.contains_key(content_hash) {
            self.stats.duplicates_skipped += 1;
            return self.seen.get(content_hash).map(PathBuf::as_path);
        }

        self.seen.insert(content_hash.to_string(), path.to_path_buf());
        None
    }

    fn record(&mut self, verdict: &InspectionVerdict) {
        if verdict.is_valid {
            self.stats.valid += 1;
        } else {
            self.stats.invalid += 1;
        }
    }

    fn print_summary(&self) {
        info!(
            "Summary: {} found, {} duplicates skipped, {} valid, {} invalid",
            self.stats.total_found,
            self.stats.duplicates_skipped,
            self.stats.valid,
            self.stats.invalid
        );
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = InspectorConfig::new().allow_placeholder(!cli.no_placeholder);
    let inspector = Inspector::with_config(config);

    let mut registry = AssetRegistry::new();

    // Dispatch based on input mode
    if let Some(ref file) = cli.input.file {
        process_single_file(&cli, &inspector, file, &mut registry)?;
    } else if let Some(ref directory) = cli.input.directory {
        process_directory(&cli, &inspector, directory, &mut registry)?;
    } else if let Some(ref json) = cli.input.json {
        let mode = cli.mode.resolve(None);
        let verdict = inspect_pasted(&inspector, json, mode);
        emit(&cli, "<inline>", &verdict, &mut registry)?;
    } else if cli.input.stdin {
        process_stdin(&cli, &inspector, &mut registry)?;
    } else {
        bail!("One of --file, --directory, --json or --stdin must be specified")
    }

    if cli.strict && registry.stats.invalid > 0 {
        bail!(
            "{} of {} inspected asset(s) failed validation",
            registry.stats.invalid,
            registry.stats.valid + registry.stats.invalid
        );
    }

    Ok(())
}

/// Inspect a single asset file
fn process_single_file(
    cli: &Cli,
    inspector: &Inspector,
    file: &Path,
    registry: &mut AssetRegistry,
) -> Result<()> {
    if file.is_dir() {
        bail!("Input path is a directory: {}", file.display());
    }

    let mode = cli.mode.resolve(Some(file));
    let verdict = inspect_file_as(inspector, file, mode);
    emit(cli, &file.display().to_string(), &verdict, registry)
}

/// Inspect every .gltf and .glb file under a directory
fn process_directory(
    cli: &Cli,
    inspector: &Inspector,
    directory: &Path,
    registry: &mut AssetRegistry,
) -> Result<()> {
    if !directory.exists() {
        bail!("Directory does not exist: {}", directory.display());
    }
    if !directory.is_dir() {
        bail!("Path is not a directory: {}", directory.display());
    }

    info!("Scanning directory: {}", directory.display());

    for entry in WalkDir::new(directory)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();

        if !path.is_file() {
            continue;
        }

        // Skip hidden files
        if path
            .file_name()
            .and_then(|n| n.to_str())
            .map(|n| n.starts_with('.'))
            .unwrap_or(false)
        {
            continue;
        }

        if !is_asset_file(path) {
            trace!("Skipping non-asset: {}", path.display());
            continue;
        }

        let data = match fs::read(path) {
            Ok(data) => data,
            Err(e) => {
                warn!("Error reading {}: {}", path.display(), e);
                let verdict = InspectionVerdict::from_error(
                    &Error::file_read(path, e),
                    cli.mode.resolve(Some(path)),
                );
                emit(cli, &path.display().to_string(), &verdict, registry)?;
                continue;
            }
        };

        let hash = AssetRegistry::content_hash(&data);
        if let Some(original) = registry.register(path, &hash) {
            debug!(
                "Skipping duplicate: {} (same content as {})",
                path.display(),
                original.display()
            );
            continue;
        }

        let mode = cli.mode.resolve(Some(path));
        let verdict = inspect_bytes(inspector, data, mode, path);
        emit(cli, &path.display().to_string(), &verdict, registry)?;
    }

    registry.print_summary();

    Ok(())
}

/// Inspect content piped through standard input
fn process_stdin(cli: &Cli, inspector: &Inspector, registry: &mut AssetRegistry) -> Result<()> {
    let mut data = Vec::new();
    std::io::stdin()
        .read_to_end(&mut data)
        .context("Failed to read standard input")?;

    trace!("Read {} bytes from stdin", data.len());

    let mode = cli.mode.resolve(None);
    let verdict = if data.is_empty() {
        InspectionVerdict::from_error(&Error::EmptyInput, mode)
    } else {
        inspect_bytes(inspector, data, mode, Path::new("<stdin>"))
    };
    emit(cli, "<stdin>", &verdict, registry)
}

/// Inspect pasted JSON, surfacing blank input as an empty-input verdict
fn inspect_pasted<S: InspectionStrategy>(
    strategy: &S,
    text: &str,
    mode: InspectionMode,
) -> InspectionVerdict {
    if text.trim().is_empty() {
        return InspectionVerdict::from_error(&Error::EmptyInput, mode);
    }
    strategy.inspect(&AssetContent::from(text), mode)
}

/// Shape already-read bytes to the selected mode
fn content_for_mode(
    data: Vec<u8>,
    mode: InspectionMode,
    source: &Path,
) -> Result<AssetContent, Error> {
    match mode {
        InspectionMode::Binary => Ok(AssetContent::from(data)),
        InspectionMode::Textual => String::from_utf8(data)
            .map(AssetContent::Text)
            .map_err(|_| Error::file_decode(source)),
    }
}

/// Inspect already-read bytes, folding decode failures into the verdict
fn inspect_bytes(
    inspector: &Inspector,
    data: Vec<u8>,
    mode: InspectionMode,
    source: &Path,
) -> InspectionVerdict {
    match content_for_mode(data, mode, source) {
        Ok(content) => inspector.inspect(&content, mode),
        Err(e) => {
            warn!("{}", e);
            InspectionVerdict::from_error(&e, mode)
        }
    }
}

/// Check by extension whether a path looks like a glTF asset
fn is_asset_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("gltf") || ext.eq_ignore_ascii_case("glb"))
        .unwrap_or(false)
}

/// Merge caller-side fields, record the outcome, and print the verdict
fn emit(
    cli: &Cli,
    source: &str,
    verdict: &InspectionVerdict,
    registry: &mut AssetRegistry,
) -> Result<()> {
    let verdict = verdict.clone().with_field(
        ALPHA_BLEEDING_FIELD,
        if cli.alpha_bleeding {
            "Enabled"
        } else {
            "Disabled"
        },
    );
    registry.record(&verdict);

    match cli.format {
        OutputFormat::Text => print!("{}", render_text(source, &verdict)),
        OutputFormat::Json => println!("{}", render_json(source, &verdict)?),
    }

    Ok(())
}

/// Render a verdict as an indented text report
fn render_text(source: &str, verdict: &InspectionVerdict) -> String {
    let status = match (verdict.is_valid, verdict.placeholder) {
        (true, true) => "VALID (placeholder)",
        (true, false) => "VALID",
        (false, _) => "INVALID",
    };
    let kind = if verdict.is_binary { "binary" } else { "textual" };

    let mut out = format!("{source} [{kind}]: {status}\n  {}\n", verdict.message);
    if let Some(ref metadata) = verdict.metadata {
        let width = metadata.keys().map(str::len).max().unwrap_or(0);
        for (name, value) in metadata.iter() {
            out.push_str(&format!("    {name:<width$}  {value}\n"));
        }
    }
    out
}

/// Render a verdict as pretty JSON tagged with its source
fn render_json(source: &str, verdict: &InspectionVerdict) -> Result<String> {
    let mut value = serde_json::to_value(verdict).context("Failed to serialize verdict")?;
    if let Some(object) = value.as_object_mut() {
        object.insert("source".to_string(), serde_json::Value::from(source));
    }
    serde_json::to_string_pretty(&value).context("Failed to render verdict")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_asset_registry_deduplication() {
        let mut registry = AssetRegistry::new();
        let temp_dir = TempDir::new().unwrap();
        let first = temp_dir.path().join("a.gltf");
        let second = temp_dir.path().join("b.gltf");

        let hash = AssetRegistry::content_hash(br#"{"asset":{"version":"2.0"}}"#);

        assert!(registry.register(&first, &hash).is_none());
        assert_eq!(registry.register(&second, &hash), Some(first.as_path()));

        assert_eq!(registry.stats.total_found, 2);
        assert_eq!(registry.stats.duplicates_skipped, 1);
    }

    #[test]
    fn test_content_hash() {
        let hash1 = AssetRegistry::content_hash(b"hello");
        let hash2 = AssetRegistry::content_hash(b"hello");
        let hash3 = AssetRegistry::content_hash(b"world");

        assert_eq!(hash1, hash2);
        assert_ne!(hash1, hash3);
        assert_eq!(hash1.len(), 8);
    }

    #[test]
    fn test_mode_resolution() {
        assert_eq!(
            ModeArg::Auto.resolve(Some(Path::new("duck.glb"))),
            InspectionMode::Binary
        );
        assert_eq!(
            ModeArg::Auto.resolve(Some(Path::new("duck.gltf"))),
            InspectionMode::Textual
        );
        assert_eq!(ModeArg::Auto.resolve(None), InspectionMode::Textual);
        assert_eq!(
            ModeArg::Textual.resolve(Some(Path::new("duck.glb"))),
            InspectionMode::Textual
        );
    }

    #[test]
    fn test_is_asset_file() {
        assert!(is_asset_file(Path::new("/tmp/scene.gltf")));
        assert!(is_asset_file(Path::new("/tmp/scene.GLB")));
        assert!(!is_asset_file(Path::new("/tmp/scene.json")));
        assert!(!is_asset_file(Path::new("/tmp/gltf")));
    }

    #[test]
    fn test_blank_paste_is_empty_input() {
        let verdict = inspect_pasted(&Inspector::new(), "   \n", InspectionMode::Textual);
        assert!(!verdict.is_valid);
        assert_eq!(verdict.message, "Please provide file data or paste JSON.");
    }

    #[test]
    fn test_non_utf8_text_is_unreadable() {
        let inspector = Inspector::new();
        let verdict = inspect_bytes(
            &inspector,
            vec![0xFF, 0xFE],
            InspectionMode::Textual,
            Path::new("x.gltf"),
        );
        assert!(!verdict.is_valid);
        assert_eq!(verdict.message, "File data could not be read.");

        let verdict = inspect_bytes(
            &inspector,
            vec![0xFF, 0xFE],
            InspectionMode::Binary,
            Path::new("x.glb"),
        );
        assert!(verdict.is_valid);
    }

    #[test]
    fn test_directory_walk() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("models");
        fs::create_dir_all(&nested).unwrap();
        fs::write(nested.join("a.gltf"), r#"{"asset":{"version":"2.0"}}"#).unwrap();
        fs::write(nested.join("b.gltf"), r#"{"asset":{"version":"2.0"}}"#).unwrap();
        fs::write(nested.join("c.gltf"), r#"{"meshes":[]}"#).unwrap();
        fs::write(nested.join("d.glb"), [0u8; 16]).unwrap();
        fs::write(nested.join("notes.txt"), "ignored").unwrap();
        fs::write(nested.join(".hidden.gltf"), "ignored").unwrap();

        let cli = Cli::parse_from([
            "meshprobe",
            "--directory",
            temp_dir.path().to_str().unwrap(),
        ]);
        let mut registry = AssetRegistry::new();
        process_directory(&cli, &Inspector::new(), temp_dir.path(), &mut registry).unwrap();

        assert_eq!(registry.stats.total_found, 4);
        assert_eq!(registry.stats.duplicates_skipped, 1);
        assert_eq!(registry.stats.valid, 2);
        assert_eq!(registry.stats.invalid, 1);
    }

    #[test]
    fn test_render_text() {
        let verdict = inspect_pasted(
            &Inspector::new(),
            r#"{"asset":{"version":"2.0"},"meshes":[{}]}"#,
            InspectionMode::Textual,
        )
        .with_field(ALPHA_BLEEDING_FIELD, "Enabled");

        let text = render_text("scene.gltf", &verdict);
        assert!(text.starts_with("scene.gltf [textual]: VALID\n"));
        assert!(text.contains("AssetVersion"));
        assert!(text.contains("AlphaBleeding"));

        let lines: Vec<&str> = text.lines().collect();
        let asset_line = lines.iter().position(|l| l.contains("AssetVersion")).unwrap();
        let alpha_line = lines.iter().position(|l| l.contains("AlphaBleeding")).unwrap();
        assert!(asset_line < alpha_line);
    }

    #[test]
    fn test_render_json() {
        let verdict = inspect_pasted(&Inspector::new(), "not json", InspectionMode::Textual);
        let rendered = render_json("<inline>", &verdict).unwrap();
        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();

        assert_eq!(value["isValid"], false);
        assert_eq!(value["source"], "<inline>");
        assert!(value["metadata"].is_null());
        assert!(value["message"]
            .as_str()
            .unwrap()
            .starts_with("Processing Error:"));
    }

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
