//! Client configuration.

use std::time::Duration;

use crate::error::{RegistrarError, Result};

/// Production API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.fabulous.com";
/// Default total request timeout (seconds).
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
/// Default connect timeout (seconds).
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

pub const ENV_USERNAME: &str = "FABULOUS_USERNAME";
pub const ENV_PASSWORD: &str = "FABULOUS_PASSWORD";
pub const ENV_BASE_URL: &str = "FABULOUS_BASE_URL";
pub const ENV_TIMEOUT_SECS: &str = "FABULOUS_TIMEOUT_SECS";
pub const ENV_CONNECT_TIMEOUT_SECS: &str = "FABULOUS_CONNECT_TIMEOUT_SECS";

/// Connection settings for one client instance.
///
/// There is no process-wide default; every [`FabulousClient`](crate::FabulousClient)
/// is built from its own value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub username: Option<String>,
    pub password: Option<String>,
    pub base_url: String,
    /// Total time allowed for one request, body included.
    pub timeout: Duration,
    pub connect_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            username: None,
            password: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
        }
    }
}

impl ClientConfig {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: Some(username.into()),
            password: Some(password.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_connect_timeout(mut self, connect_timeout: Duration) -> Self {
        self.connect_timeout = connect_timeout;
        self
    }

    /// Read `FABULOUS_*` variables from the process environment.
    ///
    /// Credentials may be missing here; [`validate`](Self::validate)
    /// reports that. Unparseable timeouts are rejected.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with a custom variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self {
            username: non_empty(ENV_USERNAME),
            password: non_empty(ENV_PASSWORD),
            ..Self::default()
        };
        if let Some(base_url) = non_empty(ENV_BASE_URL) {
            config.base_url = base_url;
        }
        if let Some(raw) = non_empty(ENV_TIMEOUT_SECS) {
            config.timeout = parse_secs(ENV_TIMEOUT_SECS, &raw)?;
        }
        if let Some(raw) = non_empty(ENV_CONNECT_TIMEOUT_SECS) {
            config.connect_timeout = parse_secs(ENV_CONNECT_TIMEOUT_SECS, &raw)?;
        }
        Ok(config)
    }

    /// Both credentials must be present.
    pub fn validate(&self) -> Result<()> {
        if self.username.is_none() || self.password.is_none() {
            return Err(RegistrarError::Configuration(
                "Username and password are required".to_string(),
            ));
        }
        Ok(())
    }
}

fn parse_secs(key: &str, raw: &str) -> Result<Duration> {
    raw.trim()
        .parse::<u64>()
        .map(Duration::from_secs)
        .map_err(|_| RegistrarError::Configuration(format!("{key} must be a whole number of seconds, got '{raw}'")))
}
