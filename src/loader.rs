//! Document loading: bytes on disk to a structurally valid `OpenAPI` value.
//!
//! Everything semantic (subset rules, reference discipline) belongs to the
//! normalize stage; this layer only deserializes and gates the version.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use openapiv3::OpenAPI;

/// Reads and deserializes an OpenAPI document. JSON is chosen by file
/// extension; everything else parses as YAML, which also accepts JSON.
pub fn load_document(path: &Path) -> Result<OpenAPI> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read spec file: {:?}", path))?;

    let json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    parse_document(&content, json)
        .with_context(|| format!("Failed to parse spec file: {:?}", path))
}

fn parse_document(content: &str, json: bool) -> Result<OpenAPI> {
    let doc: OpenAPI = if json {
        serde_json::from_str(content)?
    } else {
        serde_yaml::from_str(content)?
    };

    if !doc.openapi.starts_with("3.") {
        bail!("Unsupported OpenAPI version {:?}, expected 3.x", doc.openapi);
    }
    Ok(doc)
}
