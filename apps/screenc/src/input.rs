//! Compilation unit files.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use screenkit::CompilationUnit;
use screenkit::model::UnitSource;

/// Loads a `.yaml`/`.yml` or `.json` unit. An unnamed unit takes the file stem as its name.
///
/// # Errors
/// When the file cannot be read or parsed, or declares a name twice.
pub fn load_unit(path: &Path) -> Result<CompilationUnit> {
    let content =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    let mut source: UnitSource = match extension.as_deref() {
        Some("yaml" | "yml") => serde_saphyr::from_str(&content)
            .with_context(|| format!("invalid YAML in {}", path.display()))?,
        Some("json") => serde_json::from_str(&content)
            .with_context(|| format!("invalid JSON in {}", path.display()))?,
        _ => bail!(
            "unsupported unit file {} (expected .yaml, .yml or .json)",
            path.display()
        ),
    };
    if source.name.is_empty() {
        source.name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
    }
    CompilationUnit::try_from(source).with_context(|| format!("invalid unit {}", path.display()))
}
