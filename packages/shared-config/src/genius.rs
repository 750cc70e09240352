//! Genius API configuration types

use std::fmt;

use crate::{get_env_or_default, parse_env, ConfigError, ConfigResult};

/// Default Genius API base URL
pub const DEFAULT_GENIUS_API_URL: &str = "https://api.genius.com";

/// Preferred environment variable holding the access token
pub const ACCESS_TOKEN_VAR: &str = "GENIUS_ACCESS_TOKEN";

/// Legacy variable name, still honoured when the preferred one is unset
pub const LEGACY_ACCESS_TOKEN_VAR: &str = "ACCESS_TOKEN";

/// Genius API configuration
///
/// The access token is optional. Without it every client built from this
/// configuration runs in degraded mode: searches return nothing and artist
/// resolution goes through the fallback table.
#[derive(Clone)]
pub struct GeniusConfig {
    /// Access token sent as the `access_token` query parameter
    pub access_token: Option<String>,

    /// API base URL
    pub api_url: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Connection timeout in seconds
    pub connect_timeout_secs: u64,
}

impl fmt::Debug for GeniusConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeniusConfig")
            .field(
                "access_token",
                &self.access_token.as_ref().map(|_| "[REDACTED]"),
            )
            .field("api_url", &self.api_url)
            .field("timeout_secs", &self.timeout_secs)
            .field("connect_timeout_secs", &self.connect_timeout_secs)
            .finish()
    }
}

impl GeniusConfig {
    /// Load Genius configuration from environment variables
    ///
    /// A missing or blank token is not an error; it yields `access_token: None`.
    pub fn from_env() -> ConfigResult<Self> {
        let access_token =
            read_token(ACCESS_TOKEN_VAR).or_else(|| read_token(LEGACY_ACCESS_TOKEN_VAR));

        let api_url = get_env_or_default("GENIUS_API_URL", DEFAULT_GENIUS_API_URL);
        validate_api_url(&api_url)?;

        let timeout_secs: u64 = parse_env("GENIUS_TIMEOUT", 10)?;
        if timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "GENIUS_TIMEOUT must be greater than zero".to_string(),
            ));
        }

        Ok(Self {
            access_token,
            api_url,
            timeout_secs,
            connect_timeout_secs: parse_env("GENIUS_CONNECT_TIMEOUT", 5)?,
        })
    }

    /// Create a configuration with a custom URL and no token (useful for testing)
    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            api_url: url.into(),
            ..Self::default()
        }
    }

    /// Attach an access token; blank tokens are treated as absent
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        let token = token.into();
        self.access_token = if token.trim().is_empty() {
            None
        } else {
            Some(token)
        };
        self
    }

    /// Check whether an access token is configured
    pub fn has_credential(&self) -> bool {
        self.access_token.is_some()
    }

    /// Get the access token, if any
    pub fn credential(&self) -> Option<&str> {
        self.access_token.as_deref()
    }

    /// Get the full URL for the search endpoint
    pub fn search_url(&self) -> String {
        format!("{}/search", self.api_url.trim_end_matches('/'))
    }

    /// Get the full URL for an artist lookup
    pub fn artist_url(&self, artist_id: u64) -> String {
        format!("{}/artists/{}", self.api_url.trim_end_matches('/'), artist_id)
    }
}

impl Default for GeniusConfig {
    fn default() -> Self {
        Self {
            access_token: None,
            api_url: DEFAULT_GENIUS_API_URL.to_string(),
            timeout_secs: 10,
            connect_timeout_secs: 5,
        }
    }
}

fn read_token(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn validate_api_url(raw: &str) -> ConfigResult<()> {
    let parsed = url::Url::parse(raw)
        .map_err(|e| ConfigError::InvalidUrl("GENIUS_API_URL".to_string(), e.to_string()))?;

    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(ConfigError::InvalidUrl(
            "GENIUS_API_URL".to_string(),
            format!("unsupported scheme '{}'", other),
        )),
    }
}
