//! Configuration schema (rowbind.toml)

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Connection configuration for one named data source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataSourceConfig {
    /// Data source type (postgres, mock)
    #[serde(rename = "type")]
    pub source_type: String,

    /// Connection settings (source-specific)
    #[serde(flatten)]
    pub settings: HashMap<String, String>,
}

impl DataSourceConfig {
    /// Get a required setting, by key
    pub fn setting(&self, key: &str) -> Option<&str> {
        self.settings.get(key).map(|v| v.as_str())
    }
}

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Config {
    /// Named data sources available to mapping checks
    #[serde(default)]
    pub data_sources: HashMap<String, DataSourceConfig>,

    /// Member identity to tag reports with (defaults to "local")
    #[serde(default)]
    pub member: Option<String>,
}

impl Config {
    /// Load config from TOML file
    pub fn from_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| ConfigError::IoError(e.to_string()))?;

        toml::from_str(&contents).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Load config from TOML string
    pub fn from_toml(toml: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Save config to TOML file
    pub fn save_to_file(&self, path: &std::path::Path) -> Result<(), ConfigError> {
        let toml = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::SerializeError(e.to_string()))?;

        std::fs::write(path, toml).map_err(|e| ConfigError::IoError(e.to_string()))?;

        Ok(())
    }

    /// Member identity for reports
    pub fn member_name(&self) -> &str {
        self.member.as_deref().unwrap_or("local")
    }
}

/// Config error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Serialize error: {0}")]
    SerializeError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = Config::default();
        assert!(config.data_sources.is_empty());
        assert_eq!(config.member_name(), "local");
    }

    #[test]
    fn parse_data_source_section() {
        let config = Config::from_toml(
            r#"
            member = "server-1"

            [data_sources.orders-ds]
            type = "postgres"
            host = "localhost"
            port = "5432"
            dbname = "orders"
            user = "app"
            password = "secret"
            "#,
        )
        .unwrap();

        assert_eq!(config.member_name(), "server-1");
        let ds = config.data_sources.get("orders-ds").unwrap();
        assert_eq!(ds.source_type, "postgres");
        assert_eq!(ds.setting("host"), Some("localhost"));
        assert_eq!(ds.setting("missing"), None);
    }

    #[test]
    fn config_toml_roundtrip() {
        let mut config = Config::default();
        config.data_sources.insert(
            "inventory".to_string(),
            DataSourceConfig {
                source_type: "mock".to_string(),
                settings: HashMap::new(),
            },
        );

        let toml = toml::to_string(&config).unwrap();
        let parsed = Config::from_toml(&toml).unwrap();
        assert_eq!(config, parsed);
    }
}
