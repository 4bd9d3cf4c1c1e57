//! Configuration management.

use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;

use crate::output::OutputFormat;

/// Environment variable that points at an alternate config file.
pub const CONFIG_ENV: &str = "UDDR_CONFIG";

/// CLI configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// UDDR API key.
    pub api_key: Option<String>,

    /// Organization to use when the account has several.
    pub organization: Option<String>,

    /// DOH client id, overriding the one reported by the account.
    pub client_id: Option<String>,

    /// Default output format.
    pub output_format: Option<OutputFormat>,
}

/// Keys accepted by `uddr config set`.
pub const KEYS: &[(&str, &str)] = &[
    ("api_key", "Your UDDR API key"),
    ("organization", "Organization used for lookups when you have several"),
    ("client_id", "DOH client id, skips the organization lookup"),
    ("output_format", "Default output format (json/csv/xml)"),
];

impl Config {
    /// Get the config file path.
    pub fn path() -> Result<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return Ok(PathBuf::from(path));
        }

        let dirs = ProjectDirs::from("com", "uddr", "uddr")
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Load configuration from file.
    pub fn load() -> Result<Self> {
        let path = Self::path()?;

        if !path.exists() {
            debug!(path = %path.display(), "no config file");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path)?;
        let config: Self = toml::from_str(&content)?;

        Ok(config)
    }

    /// Save configuration to file.
    pub fn save(&self) -> Result<()> {
        let path = Self::path()?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(&path, content)?;

        Ok(())
    }

    /// Set one key from its string form.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "api_key" => self.api_key = Some(value.to_string()),
            "organization" | "org" => self.organization = Some(value.to_string()),
            "client_id" => self.client_id = Some(value.to_string()),
            "output_format" | "output" => self.output_format = Some(value.parse()?),
            _ => {
                let available = KEYS
                    .iter()
                    .map(|(k, desc)| format!("  {k:<16}- {desc}"))
                    .collect::<Vec<_>>()
                    .join("\n");
                anyhow::bail!("Unknown config key: {key}\n\nAvailable keys:\n{available}");
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_known_keys() {
        let mut config = Config::default();
        config.set("api_key", "secret").unwrap();
        config.set("org", "Acme").unwrap();
        config.set("output", "XML").unwrap();

        assert_eq!(config.api_key.as_deref(), Some("secret"));
        assert_eq!(config.organization.as_deref(), Some("Acme"));
        assert_eq!(config.output_format, Some(OutputFormat::Xml));
    }

    #[test]
    fn test_set_unknown_key_lists_keys() {
        let err = Config::default().set("colour", "red").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("Unknown config key: colour"));
        assert!(msg.contains("client_id"));
    }

    #[test]
    fn test_toml_round_trip() {
        let config = Config {
            api_key: Some("k".into()),
            output_format: Some(OutputFormat::Csv),
            ..Config::default()
        };
        let text = toml::to_string_pretty(&config).unwrap();
        assert!(text.contains("output_format = \"csv\""));
        assert_eq!(toml::from_str::<Config>(&text).unwrap(), config);
    }
}
