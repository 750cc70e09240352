//! Shared configuration types for the Genius artist tools
//!
//! This crate holds the configuration consumed by the API client and the
//! command-line front end. Everything is read from the environment once at
//! startup and then passed around by value.

mod error;
mod genius;

pub use error::{ConfigError, ConfigResult};
pub use genius::{
    GeniusConfig, ACCESS_TOKEN_VAR, DEFAULT_GENIUS_API_URL, LEGACY_ACCESS_TOKEN_VAR,
};

use std::env;

/// Configuration shared by every entry point
#[derive(Debug, Clone)]
pub struct CommonConfig {
    /// Genius API configuration
    pub genius: GeniusConfig,

    /// Log filter directive (from RUST_LOG or LOG_LEVEL)
    pub log_level: String,
}

impl CommonConfig {
    /// Load common configuration from environment variables
    pub fn from_env() -> ConfigResult<Self> {
        Ok(Self {
            genius: GeniusConfig::from_env()?,
            log_level: env::var("RUST_LOG")
                .or_else(|_| env::var("LOG_LEVEL"))
                .unwrap_or_else(|_| "info".to_string()),
        })
    }

    /// Check if an access token was supplied
    pub fn has_credential(&self) -> bool {
        self.genius.has_credential()
    }
}

/// Helper function to get an optional environment variable with a default
pub fn get_env_or_default(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

/// Helper function to parse an environment variable into a specific type
pub fn parse_env<T>(name: &str, default: T) -> ConfigResult<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(val) => val
            .parse()
            .map_err(|e| ConfigError::InvalidValue(name.to_string(), format!("{}", e))),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_env_default_when_unset() {
        temp_env::with_var_unset("GENIUS_TEST_PARSE", || {
            assert_eq!(parse_env("GENIUS_TEST_PARSE", 42u32).unwrap(), 42);
        });
    }

    #[test]
    fn test_parse_env_reads_value() {
        temp_env::with_var("GENIUS_TEST_PARSE", Some("7"), || {
            assert_eq!(parse_env("GENIUS_TEST_PARSE", 42u32).unwrap(), 7);
        });
    }

    #[test]
    fn test_parse_env_invalid_value() {
        temp_env::with_var("GENIUS_TEST_PARSE", Some("seven"), || {
            let result = parse_env("GENIUS_TEST_PARSE", 42u32);
            assert!(matches!(
                result,
                Err(ConfigError::InvalidValue(name, _)) if name == "GENIUS_TEST_PARSE"
            ));
        });
    }

    #[test]
    fn test_log_level_prefers_rust_log() {
        temp_env::with_vars(
            vec![
                ("RUST_LOG", Some("debug")),
                ("LOG_LEVEL", Some("warn")),
                ("GENIUS_API_URL", None),
                ("GENIUS_TIMEOUT", None),
                ("GENIUS_CONNECT_TIMEOUT", None),
            ],
            || {
                let config = CommonConfig::from_env().unwrap();
                assert_eq!(config.log_level, "debug");
            },
        );
    }

    #[test]
    fn test_log_level_default() {
        temp_env::with_vars(
            vec![
                ("RUST_LOG", None::<&str>),
                ("LOG_LEVEL", None),
                ("GENIUS_API_URL", None),
                ("GENIUS_TIMEOUT", None),
                ("GENIUS_CONNECT_TIMEOUT", None),
            ],
            || {
                let config = CommonConfig::from_env().unwrap();
                assert_eq!(config.log_level, "info");
            },
        );
    }
}
