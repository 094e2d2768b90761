//! Template models.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use gsclient_core::types::deserialize_null_default;
use gsclient_core::uuid::{LocationUuid, SnapshotUuid, TemplateUuid};
use serde::{Deserialize, Serialize};

/// Template as returned by `/objects/templates`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Template {
    /// Template UUID.
    pub object_uuid: TemplateUuid,
    /// Template name.
    #[serde(default)]
    pub name: String,
    /// Object status.
    #[serde(default)]
    pub status: String,
    /// Operating system type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ostype: Option<String>,
    /// Distribution name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distro: Option<String>,
    /// Distribution version.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Whether the template belongs to the account.
    #[serde(default)]
    pub private: bool,
    /// Capacity in GB.
    #[serde(default)]
    pub capacity: u64,
    /// License product number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license_product_no: Option<u64>,
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
}

/// Request payload to create a template from a snapshot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TemplateCreateRequest {
    /// Template name.
    pub name: String,
    /// Snapshot to build the template from.
    pub snapshot_uuid: SnapshotUuid,
    /// Labels.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<String>,
}

/// Request payload to update a template.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TemplateUpdateRequest {
    /// New name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Replacement labels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TemplateList {
    #[serde(default)]
    templates: Option<BTreeMap<String, Template>>,
}

impl TemplateList {
    pub(crate) fn into_vec(self) -> Vec<Template> {
        self.templates.unwrap_or_default().into_values().collect()
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct TemplateEnvelope {
    pub(crate) template: Template,
}
