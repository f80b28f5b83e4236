use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct Config {
    pub version: String,

    /// Path to the OpenAPI document.
    #[serde(default)]
    pub spec: Option<PathBuf>,

    /// Directory the generated files land in.
    #[serde(default)]
    pub output: Option<PathBuf>,

    /// Overrides `servers[0].url` from the document when set.
    #[serde(rename = "baseUrl", default)]
    pub base_url: Option<String>,

    /// Package name for the generated Go file.
    #[serde(rename = "goPackage", default)]
    pub go_package: Option<String>,

    /// Generator names to run; empty means all registered generators.
    #[serde(default)]
    pub targets: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            spec: None,
            output: Some(PathBuf::from("generated")),
            base_url: None,
            go_package: None,
            targets: vec![],
        }
    }
}
