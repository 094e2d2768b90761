//! Server to network relation models and firewall rules.

use chrono::{DateTime, Utc};
use gsclient_core::types::deserialize_null_default;
use gsclient_core::uuid::{FirewallTemplateUuid, NetworkUuid, ObjectUuid, ServerUuid};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// What a firewall rule does with matching packets.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FirewallAction {
    /// Let the packet through.
    Accept,
    /// Discard the packet.
    Drop,
}

/// Transport protocol matched by a firewall rule.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FirewallProtocol {
    /// TCP.
    Tcp,
    /// UDP.
    Udp,
}

/// Single firewall rule.
///
/// Ports are strings so that ranges such as `"1000:2000"` can be expressed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FirewallRule {
    /// Evaluation order; lower runs first.
    pub order: i32,
    /// Action for matching packets.
    pub action: FirewallAction,
    /// Protocol; any protocol when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protocol: Option<FirewallProtocol>,
    /// Source port or range.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src_port: Option<String>,
    /// Destination port or range.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dst_port: Option<String>,
    /// Source CIDR.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src_cidr: Option<String>,
    /// Destination CIDR.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dst_cidr: Option<String>,
    /// Free text comment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl FirewallRule {
    /// Create a rule matching every packet.
    #[must_use]
    pub fn new(order: i32, action: FirewallAction) -> Self {
        Self {
            order,
            action,
            protocol: None,
            src_port: None,
            dst_port: None,
            src_cidr: None,
            dst_cidr: None,
            comment: None,
        }
    }
}

/// Firewall rule sets of a server's network interface.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct FirewallRules {
    /// Incoming IPv4 rules.
    #[serde(
        rename = "rules-v4-in",
        default,
        deserialize_with = "deserialize_null_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub rules_v4_in: Vec<FirewallRule>,
    /// Outgoing IPv4 rules.
    #[serde(
        rename = "rules-v4-out",
        default,
        deserialize_with = "deserialize_null_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub rules_v4_out: Vec<FirewallRule>,
    /// Incoming IPv6 rules.
    #[serde(
        rename = "rules-v6-in",
        default,
        deserialize_with = "deserialize_null_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub rules_v6_in: Vec<FirewallRule>,
    /// Outgoing IPv6 rules.
    #[serde(
        rename = "rules-v6-out",
        default,
        deserialize_with = "deserialize_null_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub rules_v6_out: Vec<FirewallRule>,
}

impl FirewallRules {
    /// Whether no rule is set in any direction.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules_v4_in.is_empty()
            && self.rules_v4_out.is_empty()
            && self.rules_v6_in.is_empty()
            && self.rules_v6_out.is_empty()
    }
}

/// Link between a server and a network.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServerNetworkRelation {
    /// UUID of the linked network.
    pub object_uuid: NetworkUuid,
    /// Network name.
    #[serde(default)]
    pub object_name: String,
    /// Server UUID.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server_uuid: Option<ServerUuid>,
    /// Network UUID, as echoed by the API.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network_uuid: Option<NetworkUuid>,
    /// Network kind, e.g. `network` or `public`.
    #[serde(default)]
    pub network_type: String,
    /// MAC address of the interface.
    #[serde(default)]
    pub mac: String,
    /// Whether the server boots from this network.
    #[serde(default)]
    pub bootdevice: bool,
    /// Interface order on the server.
    #[serde(default)]
    pub ordering: i32,
    /// Whether this is the public network.
    #[serde(default)]
    pub public_net: bool,
    /// Whether MAC spoofing protection is active.
    #[serde(default)]
    pub l2security: bool,
    /// Allowed source addresses.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub l3security: Option<Vec<String>>,
    /// Firewall template applied to the interface.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub firewall_template_uuid: Option<FirewallTemplateUuid>,
    /// Firewall rules; the API sends an empty string when none are set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub firewall: Option<Value>,
    /// Partner UUID.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partner_uuid: Option<ObjectUuid>,
    /// Creation time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_time: Option<DateTime<Utc>>,
}

impl ServerNetworkRelation {
    /// Decode the firewall rules, if any are set.
    #[must_use]
    pub fn firewall_rules(&self) -> Option<FirewallRules> {
        match &self.firewall {
            Some(value @ Value::Object(_)) => serde_json::from_value(value.clone()).ok(),
            _ => None,
        }
    }
}

/// Request payload to link a network to a server.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServerNetworkCreateRequest {
    /// Network to link.
    pub object_uuid: NetworkUuid,
    /// Interface order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ordering: Option<i32>,
    /// Boot from this network.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bootdevice: Option<bool>,
    /// Allowed source addresses.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub l3security: Option<Vec<String>>,
    /// Firewall rules.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub firewall: Option<FirewallRules>,
    /// Firewall template.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub firewall_template_uuid: Option<FirewallTemplateUuid>,
}

impl ServerNetworkCreateRequest {
    /// Link `network` with API defaults for everything else.
    #[must_use]
    pub fn new(network: NetworkUuid) -> Self {
        Self {
            object_uuid: network,
            ordering: None,
            bootdevice: None,
            l3security: None,
            firewall: None,
            firewall_template_uuid: None,
        }
    }
}

/// Request payload to update a server to network link.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServerNetworkUpdateRequest {
    /// Interface order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ordering: Option<i32>,
    /// Boot from this network.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bootdevice: Option<bool>,
    /// Allowed source addresses.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub l3security: Option<Vec<String>>,
    /// Firewall rules.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub firewall: Option<FirewallRules>,
    /// Firewall template.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub firewall_template_uuid: Option<FirewallTemplateUuid>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct NetworkRelationList {
    #[serde(default)]
    network_relations: Option<Vec<ServerNetworkRelation>>,
}

impl NetworkRelationList {
    pub(crate) fn into_vec(self) -> Vec<ServerNetworkRelation> {
        self.network_relations.unwrap_or_default()
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct NetworkRelationEnvelope {
    pub(crate) network_relation: ServerNetworkRelation,
}
