//! Configuration errors.
//!
//! | Variant | Code | Numeric |
//! |---------|------|---------|
//! | [`ConfigError::ReadFile`] | `CONFIG_READ_FILE` | 4001 |
//! | [`ConfigError::ParseToml`] | `CONFIG_PARSE_TOML` | 4002 |
//! | [`ConfigError::Serialize`] | `CONFIG_SERIALIZE` | 4003 |
//! | [`ConfigError::InvalidEnvVar`] | `CONFIG_INVALID_ENV_VAR` | 4004 |
//! | [`ConfigError::InvalidValue`] | `CONFIG_INVALID_VALUE` | 4005 |
//!
//! None are recoverable.

use maplink_types::ErrorCode;
use std::path::PathBuf;
use thiserror::Error;

/// Configuration error type.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file.
    #[error("failed to read config file '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse TOML.
    #[error("failed to parse config file '{path}': {source}")]
    ParseToml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// Failed to serialize config.
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// Invalid environment variable value.
    #[error("invalid value for environment variable '{name}': {message}")]
    InvalidEnvVar { name: String, message: String },

    /// A loaded value is out of range.
    #[error("invalid value for '{field}': {message}")]
    InvalidValue { field: &'static str, message: String },
}

impl ConfigError {
    /// Creates a read file error.
    pub fn read_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ReadFile {
            path: path.into(),
            source,
        }
    }

    /// Creates a parse TOML error.
    pub fn parse_toml(path: impl Into<PathBuf>, source: toml::de::Error) -> Self {
        Self::ParseToml {
            path: path.into(),
            source,
        }
    }

    /// Creates an invalid env var error.
    pub fn invalid_env_var(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidEnvVar {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Creates an invalid value error.
    pub fn invalid_value(field: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            field,
            message: message.into(),
        }
    }
}

impl ErrorCode for ConfigError {
    fn code(&self) -> &'static str {
        match self {
            Self::ReadFile { .. } => "CONFIG_READ_FILE",
            Self::ParseToml { .. } => "CONFIG_PARSE_TOML",
            Self::Serialize(_) => "CONFIG_SERIALIZE",
            Self::InvalidEnvVar { .. } => "CONFIG_INVALID_ENV_VAR",
            Self::InvalidValue { .. } => "CONFIG_INVALID_VALUE",
        }
    }

    fn numeric_code(&self) -> u32 {
        match self {
            Self::ReadFile { .. } => 4001,
            Self::ParseToml { .. } => 4002,
            Self::Serialize(_) => 4003,
            Self::InvalidEnvVar { .. } => 4004,
            Self::InvalidValue { .. } => 4005,
        }
    }

    fn is_recoverable(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use maplink_types::assert_error_code;

    #[test]
    fn error_display() {
        let err = ConfigError::invalid_env_var("MAPLINK_DEBUG", "expected bool");
        assert!(err.to_string().contains("MAPLINK_DEBUG"));
        assert!(err.to_string().contains("expected bool"));
    }

    #[test]
    fn error_codes() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let parse = toml::from_str::<toml::Table>("= broken").expect_err("invalid toml");
        let errors = vec![
            ConfigError::read_file("/tmp/x.toml", io),
            ConfigError::parse_toml("/tmp/x.toml", parse),
            ConfigError::invalid_env_var("MAPLINK_X", "bad"),
            ConfigError::invalid_value("events.record_capacity", "must be > 0"),
        ];
        for err in &errors {
            assert_error_code(err, "CONFIG_");
            assert!(!err.is_recoverable());
        }
    }
}
