//! Configuration management commands

use anyhow::Result;
use clap::Subcommand;
use serde::Serialize;

use crate::cli::output::{print_done, print_formatted, OutputFormat};
use crate::config::Config;
use crate::ui::theme::ThemePreset;

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Get a specific config value
    Get {
        /// Config key (e.g., "api.base_url", "launcher.theme")
        key: String,
    },

    /// Set a config value
    Set {
        /// Config key (e.g., "api.base_url", "launcher.theme")
        key: String,

        /// Value to set
        value: String,
    },

    /// Show config file path
    Path,
}

#[derive(Serialize)]
struct ConfigPathResult {
    path: String,
    exists: bool,
}

pub async fn run(command: ConfigCommands, format: OutputFormat, quiet: bool) -> Result<()> {
    match command {
        ConfigCommands::Show => show(format),
        ConfigCommands::Get { key } => get(&key, format),
        ConfigCommands::Set { key, value } => set(&key, &value, quiet),
        ConfigCommands::Path => path(format),
    }
}

fn show(format: OutputFormat) -> Result<()> {
    let config = Config::load()?;

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&config)?;
            println!("{}", json);
        }
        OutputFormat::Text => {
            let toml = toml::to_string_pretty(&config)?;
            println!("{}", toml);
        }
    }

    Ok(())
}

fn get(key: &str, format: OutputFormat) -> Result<()> {
    let config = Config::load()?;
    let value = get_config_value(&config, key)?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string(&value)?);
        }
        OutputFormat::Text => {
            println!("{}", value);
        }
    }

    Ok(())
}

fn get_config_value(config: &Config, key: &str) -> Result<String> {
    let parts: Vec<&str> = key.split('.').collect();

    match parts.as_slice() {
        ["api", "base_url"] => Ok(config.api.base_url.clone()),
        ["api", "timeout_secs"] => Ok(config
            .api
            .timeout_secs
            .map(|s| s.to_string())
            .unwrap_or_else(|| "<not set>".to_string())),
        ["launcher", "theme"] => Ok(config.launcher.theme.name().to_lowercase()),
        ["launcher", "start_path"] => Ok(config.launcher.start_path.clone()),
        _ => anyhow::bail!("Unknown config key: {}", key),
    }
}

fn set(key: &str, value: &str, quiet: bool) -> Result<()> {
    let mut config = Config::load_file()?;

    set_config_value(&mut config, key, value)?;
    config.save()?;

    print_done(&format!("Guardado: {} = {}", key, value), quiet);
    Ok(())
}

fn set_config_value(config: &mut Config, key: &str, value: &str) -> Result<()> {
    let parts: Vec<&str> = key.split('.').collect();

    match parts.as_slice() {
        ["api", "base_url"] => {
            let url = reqwest::Url::parse(value)?;
            config.api.base_url = url.as_str().trim_end_matches('/').to_string();
        }
        ["api", "timeout_secs"] => {
            // "none" or 0 clears the timeout
            config.api.timeout_secs = match value.trim() {
                "" | "none" | "0" => None,
                secs => Some(secs.parse()?),
            };
        }
        ["launcher", "theme"] => {
            config.launcher.theme = ThemePreset::from_key(value)
                .ok_or_else(|| anyhow::anyhow!("Unknown theme: {} (expected azul or oscuro)", value))?;
        }
        ["launcher", "start_path"] => {
            config.launcher.start_path = value.to_string();
        }
        _ => anyhow::bail!("Unknown config key: {}", key),
    }

    Ok(())
}

fn path(format: OutputFormat) -> Result<()> {
    let config_path = Config::config_path()?;

    let result = ConfigPathResult {
        path: config_path.display().to_string(),
        exists: config_path.exists(),
    };

    print_formatted(&result, format, |r| {
        if r.exists {
            r.path.clone()
        } else {
            format!("{} (todavía no existe)", r.path)
        }
    })
}
