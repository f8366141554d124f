//! Configuration loading errors and the parsing helpers that raise them

use std::str::FromStr;

/// A setting that cannot be used as given
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// The variable is set but does not parse
    #[error("{key} has an invalid value: {value:?}")]
    Invalid { key: String, value: String },

    /// The variable parses but lies outside its accepted range
    #[error("{key} must be between {min} and {max}, got {value}")]
    OutOfRange {
        key: String,
        value: i64,
        min: i64,
        max: i64,
    },

    /// The configuration is fine for development but not for production
    #[error("refusing to start in production: {0}")]
    NotProductionReady(String),
}

/// Parses `raw` when present, falling back to `default` only when it is absent
pub fn parse_value<T: FromStr>(key: &str, raw: Option<String>, default: T) -> Result<T, ConfigError> {
    match raw {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|_| ConfigError::Invalid {
            key: key.to_string(),
            value,
        }),
    }
}

/// Rejects `value` unless `min <= value <= max`
pub fn check_range(key: &str, value: i64, min: i64, max: i64) -> Result<i64, ConfigError> {
    if (min..=max).contains(&value) {
        Ok(value)
    } else {
        Err(ConfigError::OutOfRange {
            key: key.to_string(),
            value,
            min,
            max,
        })
    }
}

/// Reads and parses an environment variable
pub(crate) fn env_parse<T: FromStr>(key: &str, default: T) -> Result<T, ConfigError> {
    parse_value(key, std::env::var(key).ok(), default)
}

/// Reads an integer environment variable and bounds it
pub(crate) fn env_parse_range(key: &str, default: i64, min: i64, max: i64) -> Result<i64, ConfigError> {
    check_range(key, env_parse(key, default)?, min, max)
}
