//! PaaS security zone models.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use gsclient_core::types::deserialize_null_default;
use gsclient_core::uuid::{LocationUuid, PaasServiceUuid, RequestUuid, SecurityZoneUuid};
use serde::{Deserialize, Serialize};

/// Network zone isolating PaaS services.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PaasSecurityZone {
    /// Zone UUID.
    pub object_uuid: SecurityZoneUuid,
    /// Zone name.
    #[serde(default)]
    pub name: String,
    /// Object status.
    #[serde(default)]
    pub status: String,
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
    /// Creation time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_time: Option<DateTime<Utc>>,
    /// Last change time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub change_time: Option<DateTime<Utc>>,
    /// Labels.
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub labels: Vec<String>,
    /// Services placed in the zone.
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub relations: SecurityZoneRelations,
}

/// Objects related to a security zone.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SecurityZoneRelations {
    /// Services placed in the zone.
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub services: Vec<SecurityZoneService>,
}

/// Service placed in a security zone.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SecurityZoneService {
    /// Service UUID.
    pub object_uuid: PaasServiceUuid,
}

/// Request payload to create a security zone.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SecurityZoneCreateRequest {
    /// Zone name.
    pub name: String,
    /// Location UUID.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_uuid: Option<LocationUuid>,
}

/// Response of a security zone creation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SecurityZoneCreateResponse {
    /// Asynchronous request UUID.
    pub request_uuid: RequestUuid,
    /// UUID of the new zone.
    pub object_uuid: SecurityZoneUuid,
    /// Zone UUID, as echoed by the API.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paas_security_zone_uuid: Option<SecurityZoneUuid>,
}

/// Request payload to update a security zone.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SecurityZoneUpdateRequest {
    /// New name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_uuid: Option<LocationUuid>,
    /// Zone UUID.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paas_security_zone_uuid: Option<SecurityZoneUuid>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SecurityZoneList {
    #[serde(default)]
    paas_security_zones: Option<BTreeMap<String, PaasSecurityZone>>,
}

impl SecurityZoneList {
    pub(crate) fn into_vec(self) -> Vec<PaasSecurityZone> {
        self.paas_security_zones
            .unwrap_or_default()
            .into_values()
            .collect()
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct SecurityZoneEnvelope {
    pub(crate) paas_security_zone: PaasSecurityZone,
}
