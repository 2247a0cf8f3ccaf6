use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DaylogConfig {
    /// Base URL of the daylog-api server, e.g. "http://localhost:8080"
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Linear personal API key. When set, issues and projects are fetched with it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linear_api_key: Option<String>,
}

fn default_api_url() -> String {
    "http://localhost:8080".to_string()
}

impl Default for DaylogConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            linear_api_key: None,
        }
    }
}

/// Directory holding the config file, the local session and the log file.
pub fn root_path() -> Result<PathBuf> {
    Ok(dirs::config_dir()
        .context("Cannot determine config directory")?
        .join("daylog-tui"))
}

impl DaylogConfig {
    pub fn config_path() -> Result<PathBuf> {
        Ok(root_path()?.join("config.toml"))
    }

    /// Load config from disk. Returns default config if file doesn't exist.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config at {}", path.display()))?;
        let config: Self = toml::from_str(&raw)
            .with_context(|| format!("Failed to parse config at {}", path.display()))?;
        Ok(config)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let raw = toml::to_string_pretty(self)?;
        std::fs::write(&path, raw)
            .with_context(|| format!("Failed to write config at {}", path.display()))?;
        Ok(())
    }

    pub fn api_key(&self) -> Option<&str> {
        self.linear_api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config: DaylogConfig = toml::from_str("").unwrap();
        assert_eq!(config.api_url, "http://localhost:8080");
        assert_eq!(config.api_key(), None);

        let config: DaylogConfig =
            toml::from_str("api_url = \"https://daylog.example\"\nlinear_api_key = \"  \"").unwrap();
        assert_eq!(config.api_url, "https://daylog.example");
        assert_eq!(config.api_key(), None);
    }
}
