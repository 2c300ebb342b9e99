//! Client configuration.
//!
//! Defaults suit a backend running locally. Every field can be overridden
//! with a `with_*` builder method or from the environment:
//!
//! | Variable | Field | Notes |
//! |----------|-------|-------|
//! | `CLAUDEAPI_BASE_URL` | `base_url` | trailing `/` is trimmed |
//! | `CLAUDEAPI_CONNECT_TIMEOUT_SECS` | `connect_timeout` | |
//! | `CLAUDEAPI_IDLE_TIMEOUT_SECS` | `idle_timeout` | `0` disables the deadline |

use std::time::Duration;

use thiserror::Error;

/// Base URL used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";

pub const BASE_URL_ENV: &str = "CLAUDEAPI_BASE_URL";
pub const CONNECT_TIMEOUT_ENV: &str = "CLAUDEAPI_CONNECT_TIMEOUT_SECS";
pub const IDLE_TIMEOUT_ENV: &str = "CLAUDEAPI_IDLE_TIMEOUT_SECS";

const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(120);

/// Error loading configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable was set but could not be parsed.
    #[error("Invalid value for {name}: {value:?} (expected whole seconds)")]
    InvalidValue { name: String, value: String },

    /// The base URL is not an http(s) URL.
    #[error("Invalid base URL {0:?}: must start with http:// or https://")]
    InvalidBaseUrl(String),
}

/// Settings for [`ApiClient`](crate::client::ApiClient).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Scheme and authority of the backend, without a trailing slash.
    pub base_url: String,
    /// Limit on establishing a connection.
    pub connect_timeout: Duration,
    /// Longest wait for the next chunk of a chat stream. `None` waits forever.
    pub idle_timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            idle_timeout: Some(DEFAULT_IDLE_TIMEOUT),
        }
    }
}

impl ClientConfig {
    /// Create a config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from the process environment, falling back to defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load using `lookup` to read variables.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup(BASE_URL_ENV) {
            config = config.with_base_url(&url)?;
        }
        if let Some(secs) = parse_secs(&lookup, CONNECT_TIMEOUT_ENV)? {
            config.connect_timeout = Duration::from_secs(secs);
        }
        if let Some(secs) = parse_secs(&lookup, IDLE_TIMEOUT_ENV)? {
            config.idle_timeout = (secs > 0).then(|| Duration::from_secs(secs));
        }

        Ok(config)
    }

    /// Set the base URL.
    pub fn with_base_url(mut self, url: &str) -> Result<Self, ConfigError> {
        let url = url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::InvalidBaseUrl(url.to_string()));
        }
        self.base_url = url.trim_end_matches('/').to_string();
        Ok(self)
    }

    /// Set the connect timeout.
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Set or disable the idle deadline for chat streams.
    pub fn with_idle_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.idle_timeout = timeout;
        self
    }

    /// `GET` endpoint listing organizations.
    pub fn organizations_url(&self) -> String {
        format!("{}/api/organizations", self.base_url)
    }

    /// `POST` endpoint streaming a chat reply for `org_id`.
    pub fn chat_url(&self, org_id: &str) -> String {
        format!("{}/api/chat/{}", self.base_url, urlencoding::encode(org_id))
    }
}

fn parse_secs<F>(lookup: &F, name: &str) -> Result<Option<u64>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(value) = lookup(name) else {
        return Ok(None);
    };
    match value.trim().parse::<u64>() {
        Ok(secs) => Ok(Some(secs)),
        Err(_) => Err(ConfigError::InvalidValue {
            name: name.to_string(),
            value,
        }),
    }
}
