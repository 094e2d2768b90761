//! SSH key models.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use gsclient_core::types::deserialize_null_default;
use gsclient_core::uuid::{SshkeyUuid, UserUuid};
use serde::{Deserialize, Serialize};

/// SSH public key stored in the account.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Sshkey {
    /// Key UUID.
    pub object_uuid: SshkeyUuid,
    /// Key name.
    #[serde(default)]
    pub name: String,
    /// Public key in OpenSSH format.
    #[serde(default)]
    pub sshkey: String,
    /// Object status.
    #[serde(default)]
    pub status: String,
    /// Owner of the key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_uuid: Option<UserUuid>,
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

/// Request payload to store an SSH key.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SshkeyCreateRequest {
    /// Key name.
    pub name: String,
    /// Public key in OpenSSH format.
    pub sshkey: String,
    /// Labels.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<String>,
}

/// Request payload to update an SSH key.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SshkeyUpdateRequest {
    /// New name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Replacement public key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sshkey: Option<String>,
    /// Replacement labels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SshkeyList {
    #[serde(default)]
    sshkeys: Option<BTreeMap<String, Sshkey>>,
}

impl SshkeyList {
    pub(crate) fn into_vec(self) -> Vec<Sshkey> {
        self.sshkeys.unwrap_or_default().into_values().collect()
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct SshkeyEnvelope {
    pub(crate) sshkey: Sshkey,
}
