//! Asynchronous request status and completion polling.
//!
//! Creating most gridscale objects returns a request UUID. The object is only
//! usable once `GET /requests/{uuid}` reports the request as `done`.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::time::{sleep, Instant};
use tracing::{debug, warn};

use crate::client::PollPolicy;
use crate::error::{Error, Result};
use crate::uuid::RequestUuid;

/// State of an asynchronous request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RequestState {
    /// Still being processed
    Pending,
    /// Completed successfully
    Done,
    /// Completed with an error
    Failed,
    /// Any state this client does not know about
    Other(String),
}

impl RequestState {
    /// Returns the state as reported by the API.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending => "pending",
            Self::Done => "done",
            Self::Failed => "failed",
            Self::Other(value) => value,
        }
    }
}

impl From<String> for RequestState {
    fn from(value: String) -> Self {
        match value.as_str() {
            "pending" => Self::Pending,
            "done" => Self::Done,
            "failed" => Self::Failed,
            _ => Self::Other(value),
        }
    }
}

impl From<RequestState> for String {
    fn from(state: RequestState) -> Self {
        state.as_str().to_string()
    }
}

/// Status of a single asynchronous request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RequestStatus {
    /// Current state
    pub status: RequestState,
    /// Message attached by the API, usually set on failure
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// When the request was created
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_time: Option<DateTime<Utc>>,
}

impl RequestStatus {
    /// A status that has not progressed yet.
    #[must_use]
    pub const fn pending() -> Self {
        Self {
            status: RequestState::Pending,
            message: None,
            create_time: None,
        }
    }

    /// Pick the entry for `request_uuid` out of the `{"<uuid>": {...}}` document.
    ///
    /// A missing entry is reported as pending.
    #[must_use]
    pub fn select(mut raw: HashMap<String, Self>, request_uuid: &RequestUuid) -> Self {
        raw.remove(&request_uuid.to_string())
            .unwrap_or_else(Self::pending)
    }
}

/// Source of request statuses.
///
/// Implemented by the HTTP client; abstracted so the polling loop can be tested
/// without a server.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait RequestStatusSource: Send + Sync {
    /// Fetch the current status of a request.
    ///
    /// # Errors
    ///
    /// Returns an error if the status cannot be fetched.
    async fn request_status(&self, request_uuid: &RequestUuid) -> Result<RequestStatus>;
}

/// Poll `source` until the request is done, failed, or the policy times out.
///
/// # Errors
///
/// Returns [`Error::RequestFailed`] when the API reports `failed`,
/// [`Error::Timeout`] when `policy.timeout` elapses, and propagates any error
/// from the status source.
pub async fn wait_for_completion<S>(
    source: &S,
    request_uuid: &RequestUuid,
    policy: PollPolicy,
) -> Result<()>
where
    S: RequestStatusSource + ?Sized,
{
    let deadline = Instant::now() + policy.timeout;
    let mut checks = 0u32;

    loop {
        let status = source.request_status(request_uuid).await?;
        checks += 1;

        match status.status {
            RequestState::Done => return Ok(()),
            RequestState::Failed => {
                let message = status
                    .message
                    .unwrap_or_else(|| "no message provided".to_string());
                warn!(%request_uuid, %message, "gridscale request failed");
                return Err(Error::RequestFailed {
                    request_uuid: request_uuid.to_string(),
                    message,
                });
            }
            RequestState::Pending | RequestState::Other(_) => {}
        }

        if Instant::now() >= deadline {
            return Err(Error::Timeout(format!(
                "request {request_uuid} did not complete within {:?} ({checks} checks)",
                policy.timeout
            )));
        }

        debug!(%request_uuid, state = status.status.as_str(), checks, "waiting for request");
        sleep(policy.interval).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    fn fast_policy() -> PollPolicy {
        PollPolicy::new()
            .with_interval(Duration::from_millis(1))
            .with_timeout(Duration::from_millis(200))
    }

    fn status(state: RequestState, message: Option<&str>) -> RequestStatus {
        RequestStatus {
            status: state,
            message: message.map(ToString::to_string),
            create_time: None,
        }
    }

    #[test]
    fn test_request_state_from_string() {
        assert_eq!(RequestState::from("done".to_string()), RequestState::Done);
        assert_eq!(
            RequestState::from("pending".to_string()),
            RequestState::Pending
        );
        assert_eq!(RequestState::from("failed".to_string()), RequestState::Failed);
        assert_eq!(
            RequestState::from("queued".to_string()),
            RequestState::Other("queued".to_string())
        );
    }

    #[test]
    fn test_request_status_deserialize() {
        let raw: HashMap<String, RequestStatus> = serde_json::from_str(
            r#"{"a7d2ef3a-0a5b-4e29-9b8c-0d6b3c1f2e01": {"status": "done", "message": "Request successful.", "create_time": "2019-05-07T11:53:29Z"}}"#,
        )
        .unwrap();
        let uuid = RequestUuid::parse_str("a7d2ef3a-0a5b-4e29-9b8c-0d6b3c1f2e01").unwrap();

        let status = RequestStatus::select(raw, &uuid);
        assert_eq!(status.status, RequestState::Done);
        assert_eq!(status.message.as_deref(), Some("Request successful."));
        assert!(status.create_time.is_some());
    }

    #[test]
    fn test_select_missing_entry_is_pending() {
        let status = RequestStatus::select(HashMap::new(), &RequestUuid::new_v4());
        assert_eq!(status, RequestStatus::pending());
    }

    #[tokio::test]
    async fn completes_when_done() {
        let request = RequestUuid::new_v4();
        let calls = Arc::new(AtomicU32::new(0));
        let counter = Arc::clone(&calls);

        let mut source = MockRequestStatusSource::new();
        source.expect_request_status().returning(move |_| {
            let call = counter.fetch_add(1, Ordering::SeqCst);
            if call < 2 {
                Ok(status(RequestState::Pending, None))
            } else {
                Ok(status(RequestState::Done, None))
            }
        });

        wait_for_completion(&source, &request, fast_policy())
            .await
            .unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn reports_failure() {
        let request = RequestUuid::new_v4();
        let mut source = MockRequestStatusSource::new();
        source
            .expect_request_status()
            .times(1)
            .returning(|_| Ok(status(RequestState::Failed, Some("quota exceeded"))));

        let err = wait_for_completion(&source, &request, fast_policy())
            .await
            .unwrap_err();
        assert_eq!(
            err,
            Error::RequestFailed {
                request_uuid: request.to_string(),
                message: "quota exceeded".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn times_out_when_never_done() {
        let request = RequestUuid::new_v4();
        let mut source = MockRequestStatusSource::new();
        source
            .expect_request_status()
            .returning(|_| Ok(status(RequestState::Pending, None)));

        let policy = PollPolicy::new()
            .with_interval(Duration::from_millis(5))
            .with_timeout(Duration::from_millis(20));
        let err = wait_for_completion(&source, &request, policy)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Timeout(_)));
    }

    #[tokio::test]
    async fn propagates_source_errors() {
        let request = RequestUuid::new_v4();
        let mut source = MockRequestStatusSource::new();
        source
            .expect_request_status()
            .times(1)
            .returning(|_| Err(Error::Unauthorized("bad token".to_string())));

        let err = wait_for_completion(&source, &request, fast_policy())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Unauthorized(_)));
    }

    #[tokio::test]
    async fn unknown_states_keep_polling() {
        let request = RequestUuid::new_v4();
        let calls = Arc::new(AtomicU32::new(0));
        let counter = Arc::clone(&calls);

        let mut source = MockRequestStatusSource::new();
        source.expect_request_status().returning(move |_| {
            if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                Ok(status(RequestState::Other("queued".to_string()), None))
            } else {
                Ok(status(RequestState::Done, None))
            }
        });

        wait_for_completion(&source, &request, fast_policy())
            .await
            .unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
