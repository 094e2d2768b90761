//! Error types for gridscale operations.
//!
//! This module provides the error type shared by every gridscale client crate,
//! including HTTP status code mapping and parsing of the API's error bodies.

use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

/// Main error type for gridscale operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// The API is unavailable or answered with a server error
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// Operation timed out
    #[error("Timeout: {0}")]
    Timeout(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Authentication or authorization failed
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Bad request with details
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Validation error
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Conflict error
    #[error("Conflict: {0}")]
    Conflict(String),

    /// The object depends on another object that is not in the right state
    #[error("Failed dependency: {0}")]
    FailedDependency(String),

    /// Failed to parse an API response
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Invalid UUID format
    #[error("Invalid UUID: {0}")]
    InvalidUuid(String),

    /// Invalid endpoint
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),

    /// An asynchronous request finished with status `failed`
    #[error("Request {request_uuid} failed: {message}")]
    RequestFailed {
        /// UUID of the failed request
        request_uuid: String,
        /// Message reported by the API
        message: String,
    },

    /// An object was created but waiting for its provisioning request failed
    #[error("Object {object_uuid} was created but did not finish provisioning: {source}")]
    ProvisioningIncomplete {
        /// UUID of the created object
        object_uuid: String,
        /// Why waiting for the request ended
        #[source]
        source: Box<Error>,
    },
}

/// Specialized result type for gridscale operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error body returned by the gridscale API on non-success responses.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct ApiErrorBody {
    /// Short error title
    #[serde(default)]
    pub title: Option<String>,
    /// Longer error description
    #[serde(default)]
    pub description: Option<String>,
}

impl ApiErrorBody {
    /// Build a human-readable message from a raw response body.
    ///
    /// Falls back to the raw text when the body is not a recognised error document.
    #[must_use]
    pub fn message_from(raw: &str) -> String {
        match serde_json::from_str::<Self>(raw) {
            Ok(Self {
                title: Some(title),
                description: Some(description),
            }) => format!("{title}: {description}"),
            Ok(Self {
                title: Some(text), ..
            })
            | Ok(Self {
                description: Some(text),
                ..
            }) => text,
            _ => raw.trim().to_string(),
        }
    }
}

impl Error {
    /// Returns the error code for this error type.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::ServiceUnavailable(_) => "SERVICE_UNAVAILABLE",
            Self::ConfigError(_) => "CONFIG_ERROR",
            Self::HttpError(_) => "HTTP_ERROR",
            Self::Timeout(_) => "TIMEOUT",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Unauthorized(_) => "UNAUTHORIZED",
            Self::BadRequest(_) => "BAD_REQUEST",
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::Conflict(_) => "CONFLICT",
            Self::FailedDependency(_) => "FAILED_DEPENDENCY",
            Self::ParseError(_) => "PARSE_ERROR",
            Self::InvalidUuid(_) => "INVALID_UUID",
            Self::InvalidEndpoint(_) => "INVALID_ENDPOINT",
            Self::RequestFailed { .. } => "REQUEST_FAILED",
            Self::ProvisioningIncomplete { .. } => "PROVISIONING_INCOMPLETE",
        }
    }

    /// Map a non-success HTTP status and its message to an error.
    #[must_use]
    pub fn from_status(status: StatusCode, message: String) -> Self {
        match status {
            StatusCode::NOT_FOUND => Self::NotFound(message),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                Self::Unauthorized(format!("gridscale authentication failed: {message}"))
            }
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                Self::BadRequest(message)
            }
            StatusCode::CONFLICT => Self::Conflict(message),
            StatusCode::FAILED_DEPENDENCY => Self::FailedDependency(message),
            StatusCode::TOO_MANY_REQUESTS
            | StatusCode::BAD_GATEWAY
            | StatusCode::SERVICE_UNAVAILABLE
            | StatusCode::GATEWAY_TIMEOUT => {
                Self::ServiceUnavailable(format!("gridscale temporarily unavailable: {message}"))
            }
            status if status.is_server_error() => {
                Self::ServiceUnavailable(format!("gridscale server error {status}: {message}"))
            }
            _ => Self::HttpError(format!("gridscale error {status}: {message}")),
        }
    }

    /// Returns true if the API reported the object as missing.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// UUID of an object that exists although its creation did not complete.
    #[must_use]
    pub fn object_uuid(&self) -> Option<&str> {
        match self {
            Self::ProvisioningIncomplete { object_uuid, .. } => Some(object_uuid),
            _ => None,
        }
    }
}

// Conversions from external error types
impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(err.to_string())
        } else if err.is_connect() {
            Self::ServiceUnavailable(err.to_string())
        } else {
            Self::HttpError(err.to_string())
        }
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Self::InvalidEndpoint(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::ParseError(err.to_string())
    }
}

impl From<validator::ValidationErrors> for Error {
    fn from(err: validator::ValidationErrors) -> Self {
        Self::ValidationError(err.to_string())
    }
}

impl From<uuid::Error> for Error {
    fn from(err: uuid::Error) -> Self {
        Self::InvalidUuid(err.to_string())
    }
}
