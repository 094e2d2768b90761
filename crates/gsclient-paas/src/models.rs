//! PaaS service, metric, and template models.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use gsclient_core::types::deserialize_null_default;
use gsclient_core::uuid::{PaasServiceUuid, PaasTemplateUuid, RequestUuid, SecurityZoneUuid};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Ports a service listens on: host address to port name to port number.
pub type ListenPorts = BTreeMap<String, BTreeMap<String, u16>>;

/// Deserialize listen ports whose numbers may be sent as JSON numbers or numeric strings.
///
/// Entries that are neither are dropped.
pub fn deserialize_listen_ports<'de, D>(deserializer: D) -> Result<ListenPorts, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<BTreeMap<String, BTreeMap<String, Value>>> =
        Option::deserialize(deserializer)?;
    Ok(value
        .unwrap_or_default()
        .into_iter()
        .map(|(host, ports)| {
            let ports = ports
                .into_iter()
                .filter_map(|(name, port)| value_to_port(&port).map(|p| (name, p)))
                .collect();
            (host, ports)
        })
        .collect())
}

fn value_to_port(value: &Value) -> Option<u16> {
    match value {
        Value::Number(n) => n.as_u64().and_then(|p| u16::try_from(p).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Access credential of a PaaS service.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Credential {
    /// User name.
    #[serde(default)]
    pub username: String,
    /// Password.
    #[serde(default)]
    pub password: String,
    /// Credential kind.
    #[serde(rename = "type", default)]
    pub credential_type: String,
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("credential_type", &self.credential_type)
            .finish()
    }
}

/// Resource limit of a PaaS service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResourceLimit {
    /// Limited resource, e.g. `cpu`.
    pub resource: String,
    /// Limit value.
    pub limit: u64,
}

/// Managed service as returned by `/objects/paas/services`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PaasService {
    /// Service UUID.
    pub object_uuid: PaasServiceUuid,
    /// Service name.
    #[serde(default)]
    pub name: String,
    /// Object status.
    #[serde(default)]
    pub status: String,
    /// Template the service was created from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_template_uuid: Option<PaasTemplateUuid>,
    /// Security zone of the service.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub security_zone_uuid: Option<SecurityZoneUuid>,
    /// Access credentials.
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub credentials: Vec<Credential>,
    /// Listening addresses and ports.
    #[serde(default, deserialize_with = "deserialize_listen_ports")]
    pub listen_ports: ListenPorts,
    /// Resource limits.
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub resource_limits: Vec<ResourceLimit>,
    /// Template specific parameters.
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub parameters: BTreeMap<String, Value>,
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

/// Request payload to create a PaaS service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PaasServiceCreateRequest {
    /// Service name.
    pub name: String,
    /// Template to create the service from.
    pub paas_service_template_uuid: PaasTemplateUuid,
    /// Security zone; the default zone is used when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paas_security_zone_uuid: Option<SecurityZoneUuid>,
    /// Resource limits.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub resource_limits: Vec<ResourceLimit>,
    /// Template specific parameters.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub parameters: BTreeMap<String, Value>,
    /// Labels.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<String>,
}

/// Response of a PaaS service creation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PaasServiceCreateResponse {
    /// Asynchronous request UUID.
    pub request_uuid: RequestUuid,
    /// UUID of the new service.
    pub object_uuid: PaasServiceUuid,
    /// Service UUID, as echoed by the API.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paas_service_uuid: Option<PaasServiceUuid>,
    /// Access credentials.
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub credentials: Vec<Credential>,
    /// Listening addresses and ports.
    #[serde(default, deserialize_with = "deserialize_listen_ports")]
    pub listen_ports: ListenPorts,
    /// Resource limits.
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub resource_limits: Vec<ResourceLimit>,
    /// Effective parameters.
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub parameters: BTreeMap<String, Value>,
}

/// Request payload to update a PaaS service.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PaasServiceUpdateRequest {
    /// New name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Replacement labels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<String>>,
    /// Replacement parameters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<BTreeMap<String, Value>>,
    /// Replacement resource limits.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_limits: Option<Vec<ResourceLimit>>,
}

/// Measured value with unit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MetricValue {
    /// Value.
    pub value: f64,
    /// Unit of `value`.
    #[serde(default)]
    pub unit: String,
}

/// Usage metrics of a PaaS service over a time window.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PaasServiceMetric {
    /// Service the metric belongs to.
    pub paas_service_uuid: PaasServiceUuid,
    /// Start of the window.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub begin_time: Option<DateTime<Utc>>,
    /// End of the window.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,
    /// CPU usage.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub core_usage: Option<MetricValue>,
    /// Storage usage.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_size: Option<MetricValue>,
}

/// Template a PaaS service can be created from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PaasTemplate {
    /// Template UUID.
    pub object_uuid: PaasTemplateUuid,
    /// Template name.
    #[serde(default)]
    pub name: String,
    /// Category, e.g. `database`.
    #[serde(default)]
    pub category: String,
    /// Product number.
    #[serde(default)]
    pub product_no: u64,
    /// Object status.
    #[serde(default)]
    pub status: String,
    /// Resources offered by the template.
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub resources: Vec<PaasTemplateResource>,
    /// Labels.
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub labels: Vec<String>,
}

/// Resources offered by a PaaS template.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PaasTemplateResource {
    /// Memory in MB.
    #[serde(default)]
    pub memory: u64,
    /// Maximum connections.
    #[serde(default)]
    pub connections: u64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PaasServiceList {
    #[serde(default)]
    paas_services: Option<BTreeMap<String, PaasService>>,
}

impl PaasServiceList {
    pub(crate) fn into_vec(self) -> Vec<PaasService> {
        self.paas_services
            .unwrap_or_default()
            .into_values()
            .collect()
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct PaasServiceEnvelope {
    pub(crate) paas_service: PaasService,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PaasServiceMetricList {
    #[serde(default)]
    paas_service_metrics: Option<Vec<PaasServiceMetric>>,
}

impl PaasServiceMetricList {
    pub(crate) fn into_vec(self) -> Vec<PaasServiceMetric> {
        self.paas_service_metrics.unwrap_or_default()
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct PaasTemplateList {
    #[serde(default)]
    paas_service_templates: Option<BTreeMap<String, PaasTemplate>>,
}

impl PaasTemplateList {
    pub(crate) fn into_vec(self) -> Vec<PaasTemplate> {
        self.paas_service_templates
            .unwrap_or_default()
            .into_values()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Wrapper {
        #[serde(default, deserialize_with = "deserialize_listen_ports")]
        listen_ports: ListenPorts,
    }

    #[test]
    fn listen_ports_accept_numbers_and_strings() {
        let wrapper: Wrapper = serde_json::from_value(json!({
            "listen_ports": {
                "fcfc::1:aaaa:bbbb:cccc:dddd": {"mysql": "3306", "http": 80}
            }
        }))
        .unwrap();

        let ports = &wrapper.listen_ports["fcfc::1:aaaa:bbbb:cccc:dddd"];
        assert_eq!(ports["mysql"], 3306);
        assert_eq!(ports["http"], 80);
    }

    #[test]
    fn listen_ports_drop_invalid_entries() {
        let wrapper: Wrapper = serde_json::from_value(json!({
            "listen_ports": {
                "10.0.0.1": {"mysql": 3306, "broken": "abc", "huge": 70000, "nested": {}}
            }
        }))
        .unwrap();

        let ports = &wrapper.listen_ports["10.0.0.1"];
        assert_eq!(ports.len(), 1);
        assert_eq!(ports["mysql"], 3306);
    }

    #[test]
    fn listen_ports_null_or_missing_is_empty() {
        let wrapper: Wrapper = serde_json::from_value(json!({"listen_ports": null})).unwrap();
        assert!(wrapper.listen_ports.is_empty());
        let wrapper: Wrapper = serde_json::from_value(json!({})).unwrap();
        assert!(wrapper.listen_ports.is_empty());
    }

    #[test]
    fn credential_debug_redacts_password() {
        let credential = Credential {
            username: "admin".into(),
            password: "hunter2".into(),
            credential_type: "mysql".into(),
        };
        let debug = format!("{credential:?}");
        assert!(debug.contains("admin"));
        assert!(!debug.contains("hunter2"));
    }

    #[test]
    fn create_request_omits_empty_collections() {
        let template = PaasTemplateUuid::new_v4();
        let request = PaasServiceCreateRequest {
            name: "db".into(),
            paas_service_template_uuid: template,
            paas_security_zone_uuid: None,
            resource_limits: vec![ResourceLimit {
                resource: "cpu".into(),
                limit: 2,
            }],
            parameters: BTreeMap::new(),
            labels: Vec::new(),
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "name": "db",
                "paas_service_template_uuid": template,
                "resource_limits": [{"resource": "cpu", "limit": 2}]
            })
        );
    }
}
