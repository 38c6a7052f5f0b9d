//! Extraction template loading.
//!
//! The template is a JSON object describing the fields the model should fill.
//! It is read once at startup, pretty-printed, and shared read-only by every
//! request through `AppState`.

use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use tracing::info;

/// Reads and normalises the template file.
pub fn load_template(path: &Path) -> Result<Arc<str>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Cannot read extraction template '{}'", path.display()))?;

    let template = normalize_template(&raw)
        .with_context(|| format!("Invalid extraction template '{}'", path.display()))?;

    info!("Loaded extraction template from {}", path.display());
    Ok(Arc::from(template))
}

/// Parses the template and re-serialises it with two-space indentation.
/// Non-ASCII characters and the file's key order are kept as-is.
pub fn normalize_template(raw: &str) -> Result<String> {
    let value: serde_json::Value = serde_json::from_str(raw)?;
    if !value.is_object() {
        bail!("template must be a JSON object");
    }
    Ok(serde_json::to_string_pretty(&value)?)
}
