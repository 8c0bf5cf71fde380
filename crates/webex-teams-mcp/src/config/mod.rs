//! Configuration loading and resolution.

use std::time::Duration;

use webex_teams::{WebexClient, WebexError, DEFAULT_API_BASE, DEFAULT_TIMEOUT_SECS};

pub const TOKEN_VAR: &str = "WEBEX_ACCESS_TOKEN";
pub const API_BASE_VAR: &str = "WEBEX_API_BASE";
pub const TIMEOUT_VAR: &str = "WEBEX_TIMEOUT_SECS";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("WEBEX_ACCESS_TOKEN is not set; export a Webex access token before starting the server")]
    MissingToken,

    #[error("WEBEX_TIMEOUT_SECS must be a positive number of seconds, got {0:?}")]
    InvalidTimeout(String),

    #[error(transparent)]
    Client(#[from] WebexError),
}

/// Server settings, resolved once at startup.
#[derive(Clone)]
pub struct ServerConfig {
    pub token: String,
    pub api_base: String,
    pub timeout: Duration,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve settings through an arbitrary variable source.
    /// Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let token = get(TOKEN_VAR).ok_or(ConfigError::MissingToken)?;
        let api_base = get(API_BASE_VAR).unwrap_or_else(|| DEFAULT_API_BASE.to_string());

        let timeout_secs = match get(TIMEOUT_VAR) {
            None => DEFAULT_TIMEOUT_SECS,
            Some(raw) => match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => return Err(ConfigError::InvalidTimeout(raw)),
            },
        };

        Ok(Self {
            token,
            api_base,
            timeout: Duration::from_secs(timeout_secs),
        })
    }

    pub fn build_client(&self) -> Result<WebexClient, ConfigError> {
        Ok(WebexClient::with_options(
            &self.token,
            &self.api_base,
            self.timeout,
        )?)
    }
}

impl std::fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerConfig")
            .field("token", &"<redacted>")
            .field("api_base", &self.api_base)
            .field("timeout", &self.timeout)
            .finish()
    }
}
