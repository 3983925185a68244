//! Client configuration read from the environment.

use std::time::Duration;

use url::Url;

use crate::error::ConfigError;

pub const BASE_URL_VAR: &str = "TODO_API_BASE_URL";
pub const TIMEOUT_VAR: &str = "TODO_API_TIMEOUT_SECS";

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000/api/todos";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ClientConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build a config from any variable source. Unset or blank variables
    /// fall back to the defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());

        if let Some(url) = get(BASE_URL_VAR) {
            config.base_url = parse_base_url(BASE_URL_VAR, &url)?;
        }
        if let Some(secs) = get(TIMEOUT_VAR) {
            config.timeout = parse_timeout(TIMEOUT_VAR, &secs)?;
        }
        Ok(config)
    }
}

/// Accept an absolute `http`/`https` URL with a host. The trimmed input is
/// kept as written so no trailing slash is added.
pub fn parse_base_url(var: &'static str, value: &str) -> Result<String, ConfigError> {
    let trimmed = value.trim();
    let valid = Url::parse(trimmed).is_ok_and(|url| {
        matches!(url.scheme(), "http" | "https") && url.host_str().is_some_and(|h| !h.is_empty())
    });
    if valid {
        Ok(trimmed.to_string())
    } else {
        Err(ConfigError::InvalidBaseUrl {
            var,
            value: value.to_string(),
        })
    }
}

pub fn parse_timeout(var: &'static str, value: &str) -> Result<Duration, ConfigError> {
    match value.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(ConfigError::InvalidTimeout {
            var,
            value: value.to_string(),
        }),
    }
}
