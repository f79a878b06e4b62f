//! CLI configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use calview_core::DisplayCap;
use chrono_tz::Tz;
use serde::Deserialize;

fn default_api_url() -> String {
    "http://127.0.0.1:3001".to_string()
}

fn default_events_path() -> String {
    "/api/events".to_string()
}

/// Global configuration at ~/.config/calview/config.toml
///
/// Every field is optional; a missing file means defaults. The API base URL
/// can also be overridden with the CALVIEW_API_URL environment variable.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Primary events route; `/events` is always tried as a fallback.
    #[serde(default = "default_events_path")]
    pub events_path: String,

    /// IANA timezone name. Defaults to the system timezone.
    pub timezone: Option<String>,

    /// Per-view display caps for day cells.
    #[serde(default)]
    pub display: DisplayCap,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_url: default_api_url(),
            events_path: default_events_path(),
            timezone: None,
            display: DisplayCap::default(),
        }
    }
}

impl Config {
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?
            .join("calview");

        Ok(config_dir.join("config.toml"))
    }

    /// Load the config file if present, then apply environment overrides.
    pub fn load() -> Result<Self> {
        let mut config = match Self::config_path() {
            Ok(path) if path.exists() => Self::load_from(&path)?,
            _ => Config::default(),
        };

        if let Ok(url) = std::env::var("CALVIEW_API_URL") {
            let url = url.trim();
            if !url.is_empty() {
                config.api_url = url.trim_end_matches('/').to_string();
            }
        }

        Ok(config)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Could not read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("Invalid config at {}", path.display()))
    }

    /// The working timezone: explicit config first, system zone otherwise.
    pub fn timezone(&self) -> Result<Tz> {
        let name = match &self.timezone {
            Some(name) => name.clone(),
            None => iana_time_zone::get_timezone()
                .context("Could not determine the system timezone")?,
        };

        name.parse::<Tz>()
            .map_err(|_| anyhow::anyhow!("Unknown timezone '{}'", name))
    }
}
