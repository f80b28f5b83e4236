use super::schema::Config;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_PATH: &str = "./.config/duplexgen.yaml";

/// Load configuration from file or return default
pub fn load_config(custom_path: Option<&Path>) -> Result<Config> {
    let config_path = match custom_path {
        Some(path) => path.to_path_buf(),
        None => PathBuf::from(DEFAULT_CONFIG_PATH),
    };

    if config_path.exists() {
        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file: {:?}", config_path))?;

        let config: Config = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", config_path))?;

        Ok(config)
    } else if custom_path.is_some() {
        // Custom path specified but doesn't exist - error
        anyhow::bail!("Config file not found: {:?}", config_path);
    } else {
        // Default path doesn't exist - use built-in defaults
        Ok(Config::default())
    }
}

/// Merge config with CLI arguments (CLI takes precedence)
pub fn merge_with_cli_args(
    mut config: Config,
    spec: Option<PathBuf>,
    output: Option<PathBuf>,
    base_url: Option<String>,
    go_package: Option<String>,
    targets: Vec<String>,
) -> Config {
    if let Some(spec_path) = spec {
        config.spec = Some(spec_path);
    }
    if let Some(output_path) = output {
        config.output = Some(output_path);
    }
    if let Some(url) = base_url {
        config.base_url = Some(url);
    }
    if let Some(package) = go_package {
        config.go_package = Some(package);
    }
    if !targets.is_empty() {
        config.targets = targets;
    }
    config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_args_override_config() {
        let config: Config = serde_yaml::from_str(
            "version: \"1.0\"\nspec: ./api.yaml\nbaseUrl: https://from-config\ntargets: [ts-client]\n",
        )
        .unwrap();

        let merged = merge_with_cli_args(
            config,
            Some(PathBuf::from("./other.yaml")),
            None,
            Some("https://from-cli".to_string()),
            None,
            vec![],
        );

        assert_eq!(merged.spec, Some(PathBuf::from("./other.yaml")));
        assert_eq!(merged.base_url.as_deref(), Some("https://from-cli"));
        // Untouched CLI slots keep their config values.
        assert_eq!(merged.targets, vec!["ts-client".to_string()]);
        assert_eq!(merged.output, None);
    }
}
