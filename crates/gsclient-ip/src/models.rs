//! IP address models.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use gsclient_core::types::deserialize_null_default;
use gsclient_core::uuid::{
    IpUuid, LoadbalancerUuid, LocationUuid, RequestUuid, ServerUuid, StorageUuid, TemplateUuid,
};
use serde::{Deserialize, Serialize};

/// Address family of an IP.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum IpFamily {
    /// IPv4
    V4,
    /// IPv6
    V6,
}

impl IpFamily {
    /// Numeric family as used on the wire.
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        match self {
            Self::V4 => 4,
            Self::V6 => 6,
        }
    }
}

impl TryFrom<u8> for IpFamily {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            4 => Ok(Self::V4),
            6 => Ok(Self::V6),
            other => Err(format!("unsupported IP family {other}")),
        }
    }
}

impl From<IpFamily> for u8 {
    fn from(family: IpFamily) -> Self {
        family.as_u8()
    }
}

impl fmt::Display for IpFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "IPv{}", self.as_u8())
    }
}

/// IP address as returned by `/objects/ips`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Ip {
    /// IP UUID.
    pub object_uuid: IpUuid,
    /// Human-readable name.
    #[serde(default)]
    pub name: String,
    /// Address family.
    pub family: IpFamily,
    /// The address itself.
    #[serde(default)]
    pub ip: String,
    /// Address with prefix length.
    #[serde(default)]
    pub prefix: String,
    /// Reverse DNS entry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reverse_dns: Option<String>,
    /// Object status.
    #[serde(default)]
    pub status: String,
    /// Whether the address is a failover IP.
    #[serde(default)]
    pub failover: bool,
    /// Whether deletion is blocked.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delete_block: Option<bool>,
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
    /// Accumulated usage in minutes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage_in_minutes: Option<f64>,
    /// Current price.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_price: Option<f64>,
    /// Labels.
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub labels: Vec<String>,
    /// Objects the IP is attached to.
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub relations: IpRelations,
}

/// Objects related to an IP.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct IpRelations {
    /// Load balancers using the IP.
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub loadbalancers: Vec<IpLoadbalancer>,
    /// Servers using the IP.
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub servers: Vec<IpServer>,
    /// Server to IP relations.
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub public_ips: Vec<IpPublicIpRelation>,
    /// Server to storage relations.
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub storages: Vec<IpStorageRelation>,
}

/// Load balancer using an IP.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IpLoadbalancer {
    /// Load balancer UUID.
    pub loadbalancer_uuid: LoadbalancerUuid,
    /// Load balancer name.
    #[serde(default)]
    pub loadbalancer_name: String,
    /// When the relation was created.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_time: Option<DateTime<Utc>>,
}

/// Server using an IP.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IpServer {
    /// Server UUID.
    pub server_uuid: ServerUuid,
    /// Server name.
    #[serde(default)]
    pub server_name: String,
    /// When the relation was created.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_time: Option<DateTime<Utc>>,
}

/// Server to IP relation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IpPublicIpRelation {
    /// IP UUID.
    pub object_uuid: IpUuid,
    /// Server UUID.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server_uuid: Option<ServerUuid>,
    /// Address.
    #[serde(default)]
    pub ip: String,
    /// Address with prefix length.
    #[serde(default)]
    pub prefix: String,
    /// Address family.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub family: Option<IpFamily>,
    /// When the relation was created.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_time: Option<DateTime<Utc>>,
}

/// Server to storage relation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IpStorageRelation {
    /// Storage UUID.
    pub object_uuid: StorageUuid,
    /// Storage name.
    #[serde(default)]
    pub object_name: String,
    /// Server UUID.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server_uuid: Option<ServerUuid>,
    /// Capacity in GB.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<u64>,
    /// Storage type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_type: Option<String>,
    /// Whether the storage is the boot device.
    #[serde(default)]
    pub bootdevice: bool,
    /// SCSI bus.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bus: Option<u32>,
    /// SCSI controller.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub controller: Option<u32>,
    /// SCSI target.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<u32>,
    /// SCSI LUN.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lun: Option<u32>,
    /// Template the storage was last created from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_used_template: Option<TemplateUuid>,
    /// License product number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license_product_no: Option<u64>,
    /// When the relation was created.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_time: Option<DateTime<Utc>>,
}

/// Request payload to create an IP.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IpCreateRequest {
    /// Address family.
    pub family: IpFamily,
    /// Location to allocate the address in.
    pub location_uuid: LocationUuid,
    /// Optional name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Allocate as failover IP.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub failover: bool,
    /// Optional reverse DNS entry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reverse_dns: Option<String>,
    /// Labels.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<String>,
}

impl IpCreateRequest {
    /// Create a request for the given family and location.
    #[must_use]
    pub fn new(family: IpFamily, location_uuid: LocationUuid) -> Self {
        Self {
            family,
            location_uuid,
            name: None,
            failover: false,
            reverse_dns: None,
            labels: Vec::new(),
        }
    }
}

/// Response of an IP creation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IpCreateResponse {
    /// Asynchronous request UUID.
    pub request_uuid: RequestUuid,
    /// UUID of the new IP.
    pub object_uuid: IpUuid,
    /// Address with prefix length.
    #[serde(default)]
    pub prefix: String,
    /// Allocated address.
    #[serde(default)]
    pub ip: String,
}

/// Request payload to update an IP.
///
/// `failover` is always sent, so an update resets it unless it is set.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct IpUpdateRequest {
    /// New name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Failover flag.
    #[serde(default)]
    pub failover: bool,
    /// New reverse DNS entry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reverse_dns: Option<String>,
    /// Replacement labels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct IpList {
    #[serde(default)]
    pub(crate) ips: Option<BTreeMap<String, Ip>>,
}

impl IpList {
    pub(crate) fn into_vec(self) -> Vec<Ip> {
        self.ips.unwrap_or_default().into_values().collect()
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct IpEnvelope {
    pub(crate) ip: Ip,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn family_uses_numeric_wire_format() {
        assert_eq!(serde_json::to_value(IpFamily::V6).unwrap(), json!(6));
        let family: IpFamily = serde_json::from_value(json!(4)).unwrap();
        assert_eq!(family, IpFamily::V4);
        assert!(serde_json::from_value::<IpFamily>(json!(5)).is_err());
    }

    #[test]
    fn create_request_omits_unset_fields() {
        let location = LocationUuid::new_v4();
        let request = IpCreateRequest::new(IpFamily::V4, location);
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"family": 4, "location_uuid": location})
        );
    }

    #[test]
    fn update_request_always_sends_failover() {
        let request = IpUpdateRequest {
            name: Some("web".into()),
            ..IpUpdateRequest::default()
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"name": "web", "failover": false})
        );
    }

    #[test]
    fn list_is_ordered_by_uuid() {
        let first = "0b7a4b7e-7d1d-4c5f-9d3e-111111111111";
        let second = "f3c9f2a4-2a4b-4cda-8a55-222222222222";
        let list: IpList = serde_json::from_value(json!({
            "ips": {
                second: {"object_uuid": second, "family": 6},
                first: {"object_uuid": first, "family": 4}
            }
        }))
        .unwrap();

        let ips = list.into_vec();
        assert_eq!(ips.len(), 2);
        assert_eq!(ips[0].object_uuid.to_string(), first);
        assert_eq!(ips[1].family, IpFamily::V6);
    }

    #[test]
    fn empty_list_yields_no_ips() {
        let list: IpList = serde_json::from_value(json!({"ips": null})).unwrap();
        assert!(list.into_vec().is_empty());
        let list: IpList = serde_json::from_value(json!({})).unwrap();
        assert!(list.into_vec().is_empty());
    }

    #[test]
    fn null_labels_and_relations_are_empty() {
        let ip: Ip = serde_json::from_value(json!({
            "object_uuid": "0d6b3c1f-2e01-4e29-9b8c-a7d2ef3a0a5b",
            "family": 4,
            "ip": "185.201.147.1",
            "labels": null,
            "relations": {
                "loadbalancers": null,
                "servers": null,
                "public_ips": null,
                "storages": null
            }
        }))
        .unwrap();

        assert!(ip.labels.is_empty());
        assert!(ip.relations.loadbalancers.is_empty());
        assert!(ip.relations.servers.is_empty());
        assert!(ip.relations.public_ips.is_empty());
        assert!(ip.relations.storages.is_empty());
    }
}
