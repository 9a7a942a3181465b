//! Application config (`~/.taskday/config.toml`)

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use super::{load_toml, save_toml, taskday_dir};
use crate::error::{Result, TaskdayError};

/// Application config
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub session: SessionConfig,
}

/// HTTP listener settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Open the browser once the server is up
    #[serde(default = "default_open_browser")]
    pub open_browser: bool,
}

/// Per-visitor session settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
    /// Sessions idle longer than this are dropped
    #[serde(default = "default_idle_timeout_secs")]
    pub idle_timeout_secs: u64,
    /// Beyond this, the least recently used session is evicted
    #[serde(default = "default_max_sessions")]
    pub max_sessions: usize,
}

pub const DEFAULT_PORT: u16 = 3002;

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_open_browser() -> bool {
    true
}

fn default_cookie_name() -> String {
    "taskday_session".to_string()
}

fn default_idle_timeout_secs() -> u64 {
    24 * 60 * 60
}

fn default_max_sessions() -> usize {
    10_000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            open_browser: default_open_browser(),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: default_cookie_name(),
            idle_timeout_secs: default_idle_timeout_secs(),
            max_sessions: default_max_sessions(),
        }
    }
}

impl Config {
    /// Reject values that would break the server at runtime.
    pub fn validate(&self) -> Result<()> {
        let name = &self.session.cookie_name;
        let bad_char = |c: char| c.is_whitespace() || c.is_control() || ";,=\"\\".contains(c);
        if name.is_empty() || name.chars().any(bad_char) {
            return Err(TaskdayError::config(format!(
                "invalid session.cookie_name {:?}",
                name
            )));
        }
        if self.session.idle_timeout_secs == 0 {
            return Err(TaskdayError::config(
                "session.idle_timeout_secs must be greater than 0",
            ));
        }
        if self.session.max_sessions == 0 {
            return Err(TaskdayError::config(
                "session.max_sessions must be greater than 0",
            ));
        }
        Ok(())
    }
}

/// Config file path
pub fn config_path() -> Result<PathBuf> {
    Ok(taskday_dir()?.join("config.toml"))
}

/// Load config from `path`; a missing file yields the defaults.
pub fn load_config_from(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }
    let config: Config = load_toml(path)?;
    config.validate()?;
    Ok(config)
}

/// Load config (defaults when missing or unreadable)
pub fn load_config() -> Config {
    let loaded = config_path().and_then(|path| load_config_from(&path));
    match loaded {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!("Failed to load config, using defaults: {}", e);
            Config::default()
        }
    }
}

/// Save config to `path`, creating parent directories
pub fn save_config_to(path: &Path, config: &Config) -> Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    save_toml(path, config)
}
