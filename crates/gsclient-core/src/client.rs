//! HTTP client configuration and the shared request executor.
//!
//! Every resource crate talks to the API through [`ServiceClient`], which adds the
//! authentication headers, maps error statuses, and decodes JSON bodies.

use std::fmt;
use std::time::Duration;

use reqwest::{Client, ClientBuilder, Method, Response, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{info, warn};
use url::Url;

use crate::config::GridscaleClientConfig;
use crate::error::{ApiErrorBody, Error, Result};
use crate::request::{self, RequestStatus, RequestStatusSource};
use crate::types::REQUESTS_PATH;
use crate::uuid::RequestUuid;

/// Default timeout for a single API request (seconds)
pub const DEFAULT_TIMEOUT: u64 = 30;

/// Default connect timeout (seconds)
pub const DEFAULT_CONNECT_TIMEOUT: u64 = 10;

/// Default delay between two request status checks (milliseconds)
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 500;

/// Default time to wait for an asynchronous request (seconds)
pub const DEFAULT_REQUEST_CHECK_TIMEOUT: u64 = 120;

/// Header carrying the user UUID.
pub const HEADER_USER_ID: &str = "X-Auth-UserId";

/// Header carrying the API token.
pub const HEADER_TOKEN: &str = "X-Auth-Token";

/// Header the API uses to echo the request id.
pub const HEADER_REQUEST_ID: &str = "x-request-id";

const USER_AGENT: &str = concat!("gsclient-rs/", env!("CARGO_PKG_VERSION"));

/// Polling policy for asynchronous requests.
///
/// Controls how often the request status endpoint is queried and how long the
/// client waits before giving up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    /// Delay between two status checks
    pub interval: Duration,

    /// Maximum time to wait for completion
    pub timeout: Duration,
}

impl PollPolicy {
    /// Create a new poll policy with default values.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
            timeout: Duration::from_secs(DEFAULT_REQUEST_CHECK_TIMEOUT),
        }
    }

    /// Set the delay between status checks.
    #[must_use]
    pub const fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Set the maximum time to wait.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self::new()
    }
}

/// HTTP client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Request timeout
    pub timeout: Duration,

    /// Poll policy for asynchronous requests
    pub poll_policy: PollPolicy,

    /// Enable response compression
    pub enable_compression: bool,
}

impl ClientConfig {
    /// Create a new client configuration with default values.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT),
            poll_policy: PollPolicy::new(),
            enable_compression: true,
        }
    }

    /// Set request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set poll policy.
    #[must_use]
    pub const fn with_poll_policy(mut self, policy: PollPolicy) -> Self {
        self.poll_policy = policy;
        self
    }

    /// Enable or disable compression.
    #[must_use]
    pub const fn with_compression(mut self, enabled: bool) -> Self {
        self.enable_compression = enabled;
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for [`ServiceClient`].
#[derive(Debug, Clone)]
pub struct ServiceClientBuilder {
    base_url: Url,
    user_uuid: String,
    token: SecretString,
    http_config: ClientConfig,
    user_agent: String,
}

impl ServiceClientBuilder {
    /// Create a builder from the API base URL and credentials.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if the URL cannot be parsed.
    pub fn new(
        base_url: impl AsRef<str>,
        user_uuid: impl Into<String>,
        token: impl Into<String>,
    ) -> Result<Self> {
        let url = Url::parse(base_url.as_ref()).map_err(|err| {
            Error::ConfigError(format!(
                "Invalid gridscale base URL `{}`: {err}",
                base_url.as_ref()
            ))
        })?;

        Ok(Self {
            base_url: with_trailing_slash(url),
            user_uuid: user_uuid.into(),
            token: SecretString::from(token.into()),
            http_config: ClientConfig::new(),
            user_agent: USER_AGENT.to_string(),
        })
    }

    /// Create a builder from a validated [`GridscaleClientConfig`].
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn from_config(config: &GridscaleClientConfig) -> Result<Self> {
        config.check()?;
        let http_config = ClientConfig::new()
            .with_timeout(config.timeout())
            .with_poll_policy(
                PollPolicy::new()
                    .with_interval(config.request_poll_interval())
                    .with_timeout(config.request_check_timeout()),
            );

        let mut builder = Self {
            base_url: with_trailing_slash(config.parse_api_url()?),
            user_uuid: config.user_uuid.clone(),
            token: config.api_token.clone(),
            http_config,
            user_agent: USER_AGENT.to_string(),
        };
        if let Some(user_agent) = &config.user_agent {
            builder = builder.with_user_agent(user_agent.clone());
        }
        Ok(builder)
    }

    /// Override the HTTP client configuration.
    #[must_use]
    pub fn with_http_config(mut self, config: ClientConfig) -> Self {
        self.http_config = config;
        self
    }

    /// Override the poll policy for asynchronous requests.
    #[must_use]
    pub fn with_poll_policy(mut self, policy: PollPolicy) -> Self {
        self.http_config.poll_policy = policy;
        self
    }

    /// Override the `User-Agent` header.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Build the client instance.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if the HTTP client cannot be constructed.
    pub fn build(self) -> Result<ServiceClient> {
        let mut builder = ClientBuilder::new()
            .timeout(self.http_config.timeout)
            .user_agent(self.user_agent)
            .connect_timeout(Duration::from_secs(DEFAULT_CONNECT_TIMEOUT));

        if !self.http_config.enable_compression {
            builder = builder.no_gzip();
        }

        let http = builder.build().map_err(|err| {
            Error::ConfigError(format!("Failed to build gridscale HTTP client: {err}"))
        })?;

        Ok(ServiceClient {
            http,
            base_url: self.base_url,
            user_uuid: self.user_uuid,
            token: self.token,
            poll_policy: self.http_config.poll_policy,
        })
    }
}

/// Asynchronous request executor shared by all resource clients.
#[derive(Clone)]
pub struct ServiceClient {
    http: Client,
    base_url: Url,
    user_uuid: String,
    token: SecretString,
    poll_policy: PollPolicy,
}

impl fmt::Debug for ServiceClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceClient")
            .field("base_url", &self.base_url.as_str())
            .field("user_uuid", &self.user_uuid)
            .field("poll_policy", &self.poll_policy)
            .finish_non_exhaustive()
    }
}

impl ServiceClient {
    /// Construct a client from a configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn from_config(config: &GridscaleClientConfig) -> Result<Self> {
        ServiceClientBuilder::from_config(config)?.build()
    }

    /// Access the base URL.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Access the poll policy used for asynchronous requests.
    #[must_use]
    pub const fn poll_policy(&self) -> PollPolicy {
        self.poll_policy
    }

    /// GET a path and decode the JSON response.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failures, non-success statuses, or
    /// undecodable bodies.
    pub async fn get_json<T>(&self, path: &str) -> Result<T>
    where
        T: DeserializeOwned,
    {
        self.send_json::<(), T>(Method::GET, path, None).await
    }

    /// Send a request with an optional JSON body and decode the JSON response.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failures, non-success statuses, or
    /// undecodable bodies.
    pub async fn send_json<B, R>(&self, method: Method, path: &str, body: Option<&B>) -> Result<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let response = self.execute(method, path, body).await?;
        let status = response.status();
        let bytes = response.bytes().await.map_err(|err| {
            Error::HttpError(format!("Failed to read gridscale response body: {err}"))
        })?;
        deserialize_body(path, status, &bytes)
    }

    /// Send a request and discard the response body.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failures or non-success statuses.
    pub async fn send_empty<B>(&self, method: Method, path: &str, body: Option<&B>) -> Result<()>
    where
        B: Serialize + ?Sized,
    {
        self.execute(method, path, body).await.map(|_| ())
    }

    /// Execute a request and return the successful response.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failures or non-success statuses.
    pub async fn execute<B>(&self, method: Method, path: &str, body: Option<&B>) -> Result<Response>
    where
        B: Serialize + ?Sized,
    {
        let url = self.build_url(path)?;
        let mut request = self
            .http
            .request(method.clone(), url)
            .header(HEADER_USER_ID, &self.user_uuid)
            .header(HEADER_TOKEN, self.token.expose_secret())
            .header("Accept", "application/json");
        if let Some(payload) = body {
            request = request.json(payload);
        }

        info!(%method, path, "gridscale request");

        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let request_id = response
            .headers()
            .get(HEADER_REQUEST_ID)
            .and_then(|value| value.to_str().ok())
            .map(ToString::to_string);
        let text = response.text().await.unwrap_or_default();
        let mut message = ApiErrorBody::message_from(&text);
        if let Some(id) = request_id {
            message = format!("{message} (request id {id})");
        }

        warn!(%method, path, %status, "gridscale request failed");
        Err(Error::from_status(status, message))
    }

    /// Fetch the status of an asynchronous request.
    ///
    /// # Errors
    ///
    /// Returns an error if the status endpoint cannot be queried.
    pub async fn request_status(&self, request_uuid: &RequestUuid) -> Result<RequestStatus> {
        let path = format!("{REQUESTS_PATH}/{request_uuid}");
        let raw: std::collections::HashMap<String, RequestStatus> = self.get_json(&path).await?;
        Ok(RequestStatus::select(raw, request_uuid))
    }

    /// Block until the asynchronous request completes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RequestFailed`] if the API reports a failure and
    /// [`Error::Timeout`] if the poll policy's timeout elapses first.
    pub async fn wait_for_request_completion(&self, request_uuid: &RequestUuid) -> Result<()> {
        request::wait_for_completion(self, request_uuid, self.poll_policy)
            .await
    }

    /// Block until the request that creates `object_uuid` completes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ProvisioningIncomplete`] wrapping the cause when the
    /// request fails, times out or cannot be polled. The object UUID stays
    /// available through [`Error::object_uuid`] so callers can clean up.
    pub async fn wait_for_provisioning(
        &self,
        request_uuid: &RequestUuid,
        object_uuid: impl fmt::Display,
    ) -> Result<()> {
        self.wait_for_request_completion(request_uuid)
            .await
            .map_err(|source| {
                warn!(
                    %request_uuid,
                    object = %object_uuid,
                    error = %source,
                    "provisioning incomplete"
                );
                Error::ProvisioningIncomplete {
                    object_uuid: object_uuid.to_string(),
                    source: Box::new(source),
                }
            })
    }

    fn build_url(&self, path: &str) -> Result<Url> {
        let normalized = path.trim_start_matches('/');
        self.base_url.join(normalized).map_err(|err| {
            Error::InvalidEndpoint(format!("Invalid gridscale path `{path}`: {err}"))
        })
    }
}

#[async_trait::async_trait]
impl RequestStatusSource for ServiceClient {
    async fn request_status(&self, request_uuid: &RequestUuid) -> Result<RequestStatus> {
        ServiceClient::request_status(self, request_uuid).await
    }
}

/// Relative paths are joined below the base path, which requires a trailing slash.
fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

fn deserialize_body<R>(path: &str, status: StatusCode, bytes: &[u8]) -> Result<R>
where
    R: DeserializeOwned,
{
    if status == StatusCode::NO_CONTENT || bytes.is_empty() {
        serde_json::from_value(serde_json::Value::Null).map_err(|err| {
            Error::ParseError(format!(
                "Failed to parse empty gridscale response for `{path}`: {err}"
            ))
        })
    } else {
        serde_json::from_slice(bytes).map_err(|err| {
            Error::ParseError(format!(
                "Failed to parse gridscale response for `{path}`: {err}"
            ))
        })
    }
}
