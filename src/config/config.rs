// SPDX-License-Identifier: GPL-3.0-only
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const CONFIG_PATH_VAR: &str = "OTA_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "ota.toml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// build.prop-style file backing system properties
    pub properties_path: PathBuf,

    /// JSON manifest document kept up to date by the fetcher
    pub manifest_path: PathBuf,

    /// Optional JSON seed for persisted update flags
    pub state_path: Option<PathBuf>,

    /// Property whose presence enables update checks
    pub compatibility_marker: String,

    /// Property holding the installed OS version
    pub version_property: String,

    /// Upper bound for a single manifest refresh, in seconds
    pub refresh_timeout_secs: u64,

    /// Logging level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Config {
    /// Load configuration from TOML file with environment variable overrides
    pub fn load() -> anyhow::Result<Self> {
        Self::load_with(|key| std::env::var(key).ok())
    }

    /// Same as [`Config::load`], reading variables through `env`
    pub fn load_with<F>(env: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config_path = env(CONFIG_PATH_VAR).unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());

        let mut config = if Path::new(&config_path).exists() {
            let contents = std::fs::read_to_string(&config_path)
                .with_context(|| format!("Failed to read {}", config_path))?;
            toml::from_str(&contents).with_context(|| format!("Invalid config {}", config_path))?
        } else {
            Config::default()
        };

        if let Some(val) = env("OTA_PROPERTIES_PATH") {
            config.properties_path = PathBuf::from(val);
        }
        if let Some(val) = env("OTA_MANIFEST_PATH") {
            config.manifest_path = PathBuf::from(val);
        }
        if let Some(val) = env("OTA_STATE_PATH") {
            config.state_path = Some(PathBuf::from(val));
        }
        if let Some(val) = env("OTA_COMPATIBILITY_MARKER") {
            config.compatibility_marker = val;
        }
        if let Some(val) = env("OTA_VERSION_PROPERTY") {
            config.version_property = val;
        }
        if let Some(val) = env("OTA_REFRESH_TIMEOUT_SECS") {
            config.refresh_timeout_secs = val
                .parse()
                .with_context(|| format!("OTA_REFRESH_TIMEOUT_SECS is not a number: {}", val))?;
        }
        if let Some(val) = env("OTA_LOG_LEVEL") {
            config.log_level = val;
        }

        Ok(config)
    }

    pub fn refresh_timeout(&self) -> Duration {
        Duration::from_secs(self.refresh_timeout_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            properties_path: PathBuf::from("/system/build.prop"),
            manifest_path: PathBuf::from("/data/ota/manifest.json"),
            state_path: None,
            compatibility_marker: String::from("ro.ota.manifest"),
            version_property: String::from("ro.ota.version"),
            refresh_timeout_secs: 30,
            log_level: String::from("info"),
        }
    }
}
