use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::ui::theme::ThemePreset;

/// Environment variable overriding `api.base_url`
pub const API_URL_ENV: &str = "SEGUCHAMBA_API_URL";

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub launcher: LauncherConfig,
}

/// Remote document API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL the `/upload/`, `/delete/` and `/query/` paths hang off
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout in seconds (no timeout when unset)
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: None,
        }
    }
}

fn default_base_url() -> String {
    "http://127.0.0.1:8000/jorgito".to_string()
}

/// Window appearance and behavior settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LauncherConfig {
    /// Color theme
    #[serde(default)]
    pub theme: ThemePreset,
    /// Route shown when the window opens
    #[serde(default = "default_start_path")]
    pub start_path: String,
}

impl Default for LauncherConfig {
    fn default() -> Self {
        Self {
            theme: ThemePreset::default(),
            start_path: default_start_path(),
        }
    }
}

fn default_start_path() -> String {
    "/".to_string()
}

impl Config {
    /// Get the configuration file path
    pub fn config_path() -> Result<PathBuf> {
        let dirs = directories::ProjectDirs::from("com", "seguchamba", "SeguChamba")
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        let config_dir = dirs.config_dir();
        std::fs::create_dir_all(config_dir)?;

        Ok(config_dir.join("config.toml"))
    }

    /// Load configuration from file, then apply environment overrides
    pub fn load() -> Result<Self> {
        let mut config = Self::load_file()?;
        config.apply_env_overrides(std::env::var(API_URL_ENV).ok());
        Ok(config)
    }

    /// Load configuration from file only. Use this before `save` so
    /// environment overrides are not written back.
    pub fn load_file() -> Result<Self> {
        let path = Self::config_path()?;

        let config = if path.exists() {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read {:?}", path))?;
            let config = Self::parse(&content)
                .with_context(|| format!("Failed to parse {:?}", path))?;
            tracing::info!("Loaded configuration from {:?}", path);
            config
        } else {
            tracing::info!("No configuration file found, using defaults");
            Self::default()
        };

        Ok(config)
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    fn apply_env_overrides(&mut self, api_url: Option<String>) {
        if let Some(url) = api_url.filter(|u| !u.trim().is_empty()) {
            tracing::info!("Using API base URL from {}: {}", API_URL_ENV, url);
            self.api.base_url = url;
        }
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        let content = toml::to_string_pretty(self)?;
        std::fs::write(&path, content)?;
        tracing::info!("Saved configuration to {:?}", path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.api.base_url, "http://127.0.0.1:8000/jorgito");
        assert_eq!(config.api.timeout_secs, None);
        assert_eq!(config.launcher.start_path, "/");
        assert_eq!(config.launcher.theme, ThemePreset::Azul);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = Config::parse("[api]\ntimeout_secs = 30\n").unwrap();
        assert_eq!(config.api.timeout_secs, Some(30));
        assert_eq!(config.api.base_url, "http://127.0.0.1:8000/jorgito");
        assert_eq!(config.launcher.start_path, "/");
    }

    #[test]
    fn test_parse_full_file() {
        let config = Config::parse(
            r#"
            [api]
            base_url = "http://docs.internal:9000/jorgito"

            [launcher]
            theme = "oscuro"
            start_path = "/chat"
            "#,
        )
        .unwrap();
        assert_eq!(config.api.base_url, "http://docs.internal:9000/jorgito");
        assert_eq!(config.launcher.theme, ThemePreset::Oscuro);
        assert_eq!(config.launcher.start_path, "/chat");
    }

    #[test]
    fn test_env_override() {
        let mut config = Config::default();
        config.apply_env_overrides(Some("http://example.test/jorgito".to_string()));
        assert_eq!(config.api.base_url, "http://example.test/jorgito");

        let mut config = Config::default();
        config.apply_env_overrides(Some("   ".to_string()));
        assert_eq!(config.api.base_url, "http://127.0.0.1:8000/jorgito");
    }

    #[test]
    fn test_roundtrip_through_toml() {
        let mut config = Config::default();
        config.api.timeout_secs = Some(5);
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed = Config::parse(&text).unwrap();
        assert_eq!(parsed.api.timeout_secs, Some(5));
    }
}
