//! On-disk files. Tasks themselves are never written; only the config is.

pub mod config;

use std::path::{Path, PathBuf};

use crate::error::{Result, TaskdayError};

/// `~/.taskday/`
pub fn taskday_dir() -> Result<PathBuf> {
    dirs::home_dir()
        .map(|home| home.join(".taskday"))
        .ok_or_else(|| TaskdayError::config("cannot find home directory"))
}

/// Deserialize a TOML file
pub fn load_toml<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

/// Serialize data into a TOML file
pub fn save_toml<T: serde::Serialize>(path: &Path, data: &T) -> Result<()> {
    let content = toml::to_string_pretty(data)?;
    std::fs::write(path, content)?;
    Ok(())
}
