//! Wire types shared by every gridscale resource.
//!
//! Most objects share the same create response and the same event log format,
//! so those live here instead of being repeated per resource crate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::uuid::{ObjectUuid, RequestUuid, UserUuid};

/// Default gridscale API endpoint.
pub const DEFAULT_API_URL: &str = "https://api.gridscale.io";

/// Path prefix of the asynchronous request status endpoint.
pub const REQUESTS_PATH: &str = "requests";

/// Response returned when creating most objects.
///
/// The request UUID identifies the asynchronous provisioning request; the object
/// UUID identifies the object being created.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreateResponse {
    /// Asynchronous request UUID.
    pub request_uuid: RequestUuid,
    /// UUID of the created object.
    pub object_uuid: ObjectUuid,
}

/// An entry of an object's event log.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Event {
    /// Type of the object the event refers to.
    #[serde(default)]
    pub object_type: String,
    /// Request that caused the event.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_uuid: Option<RequestUuid>,
    /// Object the event refers to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object_uuid: Option<ObjectUuid>,
    /// Performed activity.
    #[serde(default)]
    pub activity: String,
    /// HTTP verb of the request.
    #[serde(default)]
    pub request_type: String,
    /// Outcome of the request.
    #[serde(default)]
    pub request_status: String,
    /// Human-readable description of the change.
    #[serde(default)]
    pub change: String,
    /// When the event happened.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    /// User who triggered the event.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_uuid: Option<UserUuid>,
}

/// Deserialize a field that the API may send as `null`, falling back to the
/// type's default.
///
/// Use together with `#[serde(default)]` so a missing key is covered as well.
///
/// # Errors
///
/// Returns the deserializer's error if the value is neither `null` nor a valid `T`.
pub fn deserialize_null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// `{"events": [...]}` envelope returned by every `/events` endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct EventList {
    /// Events in the order returned by the API.
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub events: Vec<Event>,
}

impl EventList {
    /// Unwrap the envelope.
    #[must_use]
    pub fn into_events(self) -> Vec<Event> {
        self.events
    }
}
