//! Client configuration.
//!
//! Built in code with `ClientConfig::new(consumer_key)` and the `with_*`
//! setters, or loaded from the environment:
//!
//! - `POCKET_CONSUMER_KEY` (required)
//! - `POCKET_BASE_URL`
//! - `POCKET_AUTHORIZE_URL`
//! - `POCKET_TIMEOUT_SECS`

use std::time::Duration;

use crate::error::{PocketError, Result};

/// Environment variable prefix
const ENV_PREFIX: &str = "POCKET";

pub const DEFAULT_BASE_URL: &str = "https://getpocket.com/v3";
pub const DEFAULT_AUTHORIZE_URL: &str = "https://getpocket.com/auth/authorize";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Settings shared by every request a client makes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Application key, sent with every request.
    pub consumer_key: String,

    /// API root the endpoint paths are appended to.
    pub base_url: String,

    /// Page the user is sent to for granting access.
    pub authorize_url: String,

    /// Ceiling for a whole request, connect to last body byte.
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(consumer_key: impl Into<String>) -> Self {
        Self {
            consumer_key: consumer_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            authorize_url: DEFAULT_AUTHORIZE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Load configuration from `POCKET_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as `from_env`, reading variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |suffix: &str| {
            lookup(&format!("{}_{}", ENV_PREFIX, suffix)).filter(|value| !value.trim().is_empty())
        };

        let consumer_key = var("CONSUMER_KEY").ok_or(PocketError::EmptyConsumerKey)?;
        let mut config = Self::new(consumer_key);

        if let Some(url) = var("BASE_URL") {
            config = config.with_base_url(url);
        }
        if let Some(url) = var("AUTHORIZE_URL") {
            config = config.with_authorize_url(url);
        }
        if let Some(secs) = var("TIMEOUT_SECS") {
            let secs: u64 = secs.trim().parse().map_err(|_| {
                PocketError::InvalidConfig(format!(
                    "{}_TIMEOUT_SECS is not a number: {secs}",
                    ENV_PREFIX
                ))
            })?;
            config = config.with_timeout(Duration::from_secs(secs));
        }

        Ok(config)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_authorize_url(mut self, authorize_url: impl Into<String>) -> Self {
        self.authorize_url = authorize_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| vars.get(name).cloned()
    }

    #[test]
    fn defaults() {
        let config = ClientConfig::new("key");
        assert_eq!(config.base_url, "https://getpocket.com/v3");
        assert_eq!(config.authorize_url, "https://getpocket.com/auth/authorize");
        assert_eq!(config.timeout, Duration::from_secs(10));
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let config = ClientConfig::new("key").with_base_url("http://localhost:3000/v3/");
        assert_eq!(config.base_url, "http://localhost:3000/v3");
    }

    #[test]
    fn env_requires_consumer_key() {
        let err = ClientConfig::from_lookup(lookup(&[])).unwrap_err();
        assert!(matches!(err, PocketError::EmptyConsumerKey));

        let err = ClientConfig::from_lookup(lookup(&[("POCKET_CONSUMER_KEY", " ")])).unwrap_err();
        assert!(matches!(err, PocketError::EmptyConsumerKey));
    }

    #[test]
    fn env_overrides_defaults() {
        let config = ClientConfig::from_lookup(lookup(&[
            ("POCKET_CONSUMER_KEY", "key"),
            ("POCKET_BASE_URL", "http://127.0.0.1:3000/v3/"),
            ("POCKET_AUTHORIZE_URL", "http://127.0.0.1:3000/auth/authorize"),
            ("POCKET_TIMEOUT_SECS", "3"),
        ]))
        .unwrap();
        assert_eq!(config.consumer_key, "key");
        assert_eq!(config.base_url, "http://127.0.0.1:3000/v3");
        assert_eq!(config.authorize_url, "http://127.0.0.1:3000/auth/authorize");
        assert_eq!(config.timeout, Duration::from_secs(3));
    }

    #[test]
    fn env_rejects_bad_timeout() {
        let err = ClientConfig::from_lookup(lookup(&[
            ("POCKET_CONSUMER_KEY", "key"),
            ("POCKET_TIMEOUT_SECS", "soon"),
        ]))
        .unwrap_err();
        assert!(matches!(err, PocketError::InvalidConfig(_)));
    }
}
