//! Configuration structures for gridscale clients.
//!
//! This module provides the configuration for connecting to the gridscale API:
//! endpoint, credentials, timeouts, and request polling, with validation and
//! environment loading.

use crate::types::DEFAULT_API_URL;
use crate::Error;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;
use validator::Validate;

/// Environment variable holding the API endpoint.
pub const ENV_API_URL: &str = "GRIDSCALE_URL";
/// Environment variable holding the user UUID.
pub const ENV_USER_UUID: &str = "GRIDSCALE_UUID";
/// Environment variable holding the API token.
pub const ENV_API_TOKEN: &str = "GRIDSCALE_TOKEN";

/// Configuration for a gridscale client instance.
///
/// The API token is never serialized and is redacted from `Debug` output.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct GridscaleClientConfig {
    /// API base URL
    #[validate(url)]
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// User UUID sent as `X-Auth-UserId`
    #[validate(length(min = 1))]
    pub user_uuid: String,

    /// API token sent as `X-Auth-Token`
    #[serde(skip_serializing)]
    pub api_token: SecretString,

    /// Timeout of a single HTTP request in seconds
    #[validate(range(min = 1, max = 300))]
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// How long to wait for an asynchronous request to complete, in seconds
    #[validate(range(min = 1, max = 3600))]
    #[serde(default = "default_request_check_timeout_secs")]
    pub request_check_timeout_secs: u64,

    /// Delay between two request status checks, in milliseconds
    #[validate(range(min = 10, max = 60000))]
    #[serde(default = "default_request_poll_interval_ms")]
    pub request_poll_interval_ms: u64,

    /// Optional `User-Agent` override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

const fn default_request_timeout_secs() -> u64 {
    30
}

const fn default_request_check_timeout_secs() -> u64 {
    120
}

const fn default_request_poll_interval_ms() -> u64 {
    500
}

impl GridscaleClientConfig {
    /// Create a new client configuration with required parameters.
    ///
    /// # Arguments
    ///
    /// * `api_url` - The base URL of the API (e.g., "https://api.gridscale.io")
    /// * `user_uuid` - The UUID of the API user
    /// * `api_token` - The API token of that user
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid or validation fails.
    pub fn new(
        api_url: impl Into<String>,
        user_uuid: impl Into<String>,
        api_token: impl Into<String>,
    ) -> Result<Self, Error> {
        let config = Self {
            api_url: api_url.into(),
            user_uuid: user_uuid.into(),
            api_token: SecretString::from(api_token.into()),
            request_timeout_secs: default_request_timeout_secs(),
            request_check_timeout_secs: default_request_check_timeout_secs(),
            request_poll_interval_ms: default_request_poll_interval_ms(),
            user_agent: None,
        };

        config.check()?;
        Ok(config)
    }

    /// Load the configuration from `GRIDSCALE_URL`, `GRIDSCALE_UUID` and
    /// `GRIDSCALE_TOKEN`.
    ///
    /// # Errors
    ///
    /// Returns an error if a required variable is missing or validation fails.
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load the configuration through an arbitrary key lookup.
    ///
    /// `GRIDSCALE_URL` is optional and falls back to the public endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if a required key is missing or validation fails.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key)
                .filter(|value| !value.trim().is_empty())
                .ok_or_else(|| Error::ConfigError(format!("{key} is not set")))
        };

        let user_uuid = required(ENV_USER_UUID)?;
        let api_token = required(ENV_API_TOKEN)?;
        let api_url = lookup(ENV_API_URL)
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(default_api_url);

        Self::new(api_url, user_uuid, api_token)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] describing the first invalid field.
    pub fn check(&self) -> Result<(), Error> {
        self.validate()
            .map_err(|e| Error::ConfigError(format!("Invalid configuration: {e}")))?;
        if self.api_token.expose_secret().is_empty() {
            return Err(Error::ConfigError(
                "Invalid configuration: api_token is empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Set request timeout in seconds.
    #[must_use]
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.request_timeout_secs = seconds;
        self
    }

    /// Set how long asynchronous requests are awaited, in seconds.
    #[must_use]
    pub fn with_request_check_timeout(mut self, seconds: u64) -> Self {
        self.request_check_timeout_secs = seconds;
        self
    }

    /// Set the delay between request status checks, in milliseconds.
    #[must_use]
    pub fn with_request_poll_interval(mut self, millis: u64) -> Self {
        self.request_poll_interval_ms = millis;
        self
    }

    /// Override the `User-Agent` header.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Get the request timeout as a Duration.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Get the request check timeout as a Duration.
    #[must_use]
    pub const fn request_check_timeout(&self) -> Duration {
        Duration::from_secs(self.request_check_timeout_secs)
    }

    /// Get the poll interval as a Duration.
    #[must_use]
    pub const fn request_poll_interval(&self) -> Duration {
        Duration::from_millis(self.request_poll_interval_ms)
    }

    /// Parse and validate the API URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL cannot be parsed.
    pub fn parse_api_url(&self) -> Result<Url, Error> {
        Url::parse(&self.api_url)
            .map_err(|e| Error::ConfigError(format!("Invalid API URL: {e}")))
    }
}
