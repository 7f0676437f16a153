use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::cli::Args;
use crate::error::{PublishError, Result};

#[derive(Debug, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Debug, Deserialize, Serialize, Default)]
pub struct ServerConfig {
    pub base_url: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub channel: Option<String>,
}

/// Fully resolved publish configuration. A value of this type means all
/// required settings were present; no network call happens before that.
#[derive(Debug, Clone)]
pub struct PublishConfig {
    pub base_url: String,
    pub username: String,
    pub password: String,
    pub channel: Option<String>,
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content).map_err(|e| {
            PublishError::Config(format!("invalid config file {}: {}", path.display(), e))
        })?;
        Ok(config)
    }

    /// Get the default configuration file path
    pub fn default_path() -> PathBuf {
        directories::BaseDirs::new()
            .map(|dirs| dirs.config_dir().join("relpush.toml"))
            .unwrap_or_else(|| PathBuf::from("~/.config/relpush.toml"))
    }

    /// Merge file values with command line arguments (arguments win) and
    /// validate that every required setting is present and non-empty.
    pub fn resolve(&self, args: &Args) -> Result<PublishConfig> {
        let base_url = pick(args.base_url.as_deref(), self.server.base_url.as_deref());
        let username = pick(args.username.as_deref(), self.server.username.as_deref());
        let password = pick(args.password.as_deref(), self.server.password.as_deref());
        let channel = pick(args.channel.as_deref(), self.server.channel.as_deref());

        let mut missing = Vec::new();
        if base_url.is_none() {
            missing.push("base_url");
        }
        if username.is_none() {
            missing.push("username");
        }
        if password.is_none() {
            missing.push("password");
        }

        if !missing.is_empty() {
            return Err(PublishError::Config(format!(
                "missing required settings: {}",
                missing.join(", ")
            )));
        }

        Ok(PublishConfig {
            base_url: base_url.unwrap(),
            username: username.unwrap(),
            password: password.unwrap(),
            channel,
        })
    }
}

/// First non-empty value, if any. Empty strings count as absent.
fn pick(primary: Option<&str>, fallback: Option<&str>) -> Option<String> {
    primary
        .filter(|s| !s.is_empty())
        .or_else(|| fallback.filter(|s| !s.is_empty()))
        .map(str::to_string)
}
