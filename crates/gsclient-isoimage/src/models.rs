//! ISO image models.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use gsclient_core::types::deserialize_null_default;
use gsclient_core::uuid::{IsoImageUuid, LocationUuid, ServerUuid};
use serde::{Deserialize, Serialize};

/// ISO image as returned by `/objects/isoimages`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IsoImage {
    /// ISO image UUID.
    pub object_uuid: IsoImageUuid,
    /// Image name.
    #[serde(default)]
    pub name: String,
    /// Object status.
    #[serde(default)]
    pub status: String,
    /// URL the image was downloaded from.
    #[serde(default)]
    pub source_url: String,
    /// Description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Version string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Whether the image belongs to the account.
    #[serde(default)]
    pub private: bool,
    /// Size in GB.
    #[serde(default)]
    pub capacity: u64,
    /// Location UUID.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_uuid: Option<LocationUuid>,
    /// Location country.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_country: Option<String>,
    /// Location IATA code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_iata: Option<String>,
    /// Location name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_name: Option<String>,
    /// Accumulated usage in minutes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage_in_minutes: Option<u64>,
    /// Current price.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_price: Option<f64>,
    /// Creation time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_time: Option<DateTime<Utc>>,
    /// Last change time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub change_time: Option<DateTime<Utc>>,
    /// Labels.
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub labels: Vec<String>,
    /// Servers the image is attached to.
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub relations: IsoImageRelations,
}

/// Objects related to an ISO image.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct IsoImageRelations {
    /// Servers the image is attached to.
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub servers: Vec<IsoImageServer>,
}

/// Server an ISO image is attached to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IsoImageServer {
    /// Server UUID.
    pub object_uuid: ServerUuid,
    /// Server name.
    #[serde(default)]
    pub object_name: String,
    /// Whether the server boots from the image.
    #[serde(default)]
    pub bootdevice: bool,
    /// When the relation was created.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_time: Option<DateTime<Utc>>,
}

/// Request payload to create an ISO image.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IsoImageCreateRequest {
    /// Image name.
    pub name: String,
    /// URL to download the image from.
    pub source_url: String,
    /// Location UUID.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_uuid: Option<LocationUuid>,
    /// Labels.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<String>,
}

/// Request payload to update an ISO image.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct IsoImageUpdateRequest {
    /// New name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Replacement labels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct IsoImageList {
    #[serde(default)]
    isoimages: Option<BTreeMap<String, IsoImage>>,
}

impl IsoImageList {
    pub(crate) fn into_vec(self) -> Vec<IsoImage> {
        self.isoimages.unwrap_or_default().into_values().collect()
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct IsoImageEnvelope {
    pub(crate) isoimage: IsoImage,
}
