//! CLI configuration.

use anyhow::{Context as _, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// CLI configuration file (TOML, under the user config directory by
/// default).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// Base URL of the storefront API.
    #[serde(default)]
    pub base_url: Option<String>,

    /// Directory for the durable session/cart slots.
    #[serde(default)]
    pub storage_dir: Option<PathBuf>,

    /// Whole-request timeout for remote calls, in seconds.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl CliConfig {
    /// Load config. An explicitly given path must exist; the default
    /// path is optional and its absence yields the default config.
    pub fn load(path: Option<&str>) -> Result<Self> {
        if let Some(path) = path {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {}", path))?;
            return toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path));
        }

        let Some(default_path) = Self::default_path() else {
            return Ok(Self::default());
        };
        match std::fs::read_to_string(&default_path) {
            Ok(content) => toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", default_path.display())),
            Err(_) => Ok(Self::default()),
        }
    }

    /// The default config location: `<config dir>/shopfront/config.toml`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("shopfront").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let config: CliConfig = toml::from_str(
            r#"
            base_url = "http://localhost:8000"
            timeout_secs = 30
            "#,
        )
        .unwrap();
        assert_eq!(config.base_url.as_deref(), Some("http://localhost:8000"));
        assert_eq!(config.timeout_secs, Some(30));
        assert_eq!(config.storage_dir, None);
    }

    #[test]
    fn test_empty_config_is_default() {
        let config: CliConfig = toml::from_str("").unwrap();
        assert!(config.base_url.is_none());
    }
}
