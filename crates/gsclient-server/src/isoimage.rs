//! Server to ISO image relation models.

use chrono::{DateTime, Utc};
use gsclient_core::uuid::IsoImageUuid;
use serde::{Deserialize, Serialize};

/// ISO image inserted into a server.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServerIsoImageRelation {
    /// UUID of the ISO image.
    pub object_uuid: IsoImageUuid,
    /// ISO image name.
    #[serde(default)]
    pub object_name: String,
    /// Whether the image belongs to the account rather than being public.
    #[serde(default)]
    pub private: bool,
    /// Whether the server boots from the image.
    #[serde(default)]
    pub bootdevice: bool,
    /// Creation time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_time: Option<DateTime<Utc>>,
}

/// Request payload to insert an ISO image into a server.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServerIsoImageCreateRequest {
    /// ISO image to insert.
    pub object_uuid: IsoImageUuid,
}

/// Request payload to update a server to ISO image link.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServerIsoImageUpdateRequest {
    /// Boot from the image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bootdevice: Option<bool>,
    /// Relation name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct IsoImageRelationList {
    #[serde(default)]
    isoimage_relations: Option<Vec<ServerIsoImageRelation>>,
}

impl IsoImageRelationList {
    pub(crate) fn into_vec(self) -> Vec<ServerIsoImageRelation> {
        self.isoimage_relations.unwrap_or_default()
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct IsoImageRelationEnvelope {
    pub(crate) isoimage_relation: ServerIsoImageRelation,
}
