use serde::{Deserialize, Serialize};
use std::path::Path;
use url::Url;

use crate::error::{PenneError, PenneResult};

/// Top-level client configuration (loaded from penne.toml)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PenneConfig {
    pub log: LogConfig,
    pub share: ShareConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Log level (default: info)
    pub level: String,
    /// Log format: "json" or "text"
    pub format: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShareConfig {
    /// Base URL of the paste server
    pub base_url: String,
    /// Encrypt pastes client-side before upload (default: true)
    pub e2ee: bool,
    /// Title substituted for an empty paste name
    pub default_title: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: "text".into(),
        }
    }
}

impl Default for ShareConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".into(),
            e2ee: true,
            default_title: penne_crypto::DEFAULT_TITLE.into(),
        }
    }
}

impl ShareConfig {
    /// Parsed `base_url`.
    pub fn base_url(&self) -> PenneResult<Url> {
        Ok(Url::parse(&self.base_url)?)
    }
}

impl PenneConfig {
    pub fn from_toml_str(content: &str) -> PenneResult<Self> {
        toml::from_str(content).map_err(|e| PenneError::Config(e.to_string()))
    }

    /// Load from `path`, falling back to defaults when the file does not exist.
    pub fn load(path: &Path) -> PenneResult<Self> {
        if !path.exists() {
            tracing::warn!("config file not found: {}  (using defaults)", path.display());
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
            .map_err(|e| PenneError::Config(format!("parsing {}: {e}", path.display())))
    }

    pub fn to_toml_string(&self) -> PenneResult<String> {
        toml::to_string_pretty(self).map_err(|e| PenneError::Config(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let toml_str = r#"
[log]
level = "debug"
format = "json"

[share]
base_url = "https://paste.example.com"
e2ee = false
default_title = "Untitled"
"#;
        let config = PenneConfig::from_toml_str(toml_str).unwrap();

        assert_eq!(config.log.level, "debug");
        assert_eq!(config.log.format, "json");
        assert_eq!(config.share.base_url, "https://paste.example.com");
        assert!(!config.share.e2ee);
        assert_eq!(config.share.default_title, "Untitled");
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config = PenneConfig::from_toml_str("[log]\nlevel = \"warn\"\n").unwrap();

        assert_eq!(config.log.level, "warn");
        assert_eq!(config.log.format, "text");
        assert_eq!(config.share, ShareConfig::default());
        assert!(config.share.e2ee);
    }

    #[test]
    fn test_invalid_config() {
        let result = PenneConfig::from_toml_str("[share]\ne2ee = \"yes\"\n");
        assert!(matches!(result, Err(PenneError::Config(_))));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = PenneConfig::load(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, PenneConfig::default());
    }

    #[test]
    fn test_load_from_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("penne.toml");

        let mut config = PenneConfig::default();
        config.share.base_url = "https://paste.example.org".into();
        std::fs::write(&path, config.to_toml_string().unwrap()).unwrap();

        let loaded = PenneConfig::load(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_base_url_parse() {
        let share = ShareConfig::default();
        assert_eq!(share.base_url().unwrap().as_str(), "http://localhost:5000/");

        let bad = ShareConfig {
            base_url: "not a url".into(),
            ..ShareConfig::default()
        };
        assert!(matches!(bad.base_url(), Err(PenneError::Url(_))));
    }
}
