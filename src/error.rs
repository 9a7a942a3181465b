//! Error type for infrastructure failures (files, config, serialization).
//!
//! Bad user input is not an error here; see [`crate::model::Rejection`].

use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TaskdayError {
    /// I/O error (file reads/writes, sockets)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Config error
    #[error("Config error: {0}")]
    Config(String),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, TaskdayError>;

impl TaskdayError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TaskdayError::config("bad port");
        assert_eq!(err.to_string(), "Config error: bad port");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: TaskdayError = io_err.into();
        assert!(matches!(err, TaskdayError::Io(_)));
    }

    #[test]
    fn test_toml_error_conversion() {
        let parse_err = toml::from_str::<toml::Value>("= nope").unwrap_err();
        let err: TaskdayError = parse_err.into();
        assert!(err.to_string().starts_with("TOML parse error"));
    }
}
