//! Storage models.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use gsclient_core::types::deserialize_null_default;
use gsclient_core::uuid::{
    LocationUuid, ServerUuid, SnapshotScheduleUuid, SnapshotUuid, SshkeyUuid, StorageUuid,
    TemplateUuid,
};
use serde::{Deserialize, Serialize};

/// Performance class of a storage.
///
/// Classes introduced by the API after this client was written decode as
/// [`StorageType::Other`] instead of failing the whole document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum StorageType {
    /// Standard storage
    #[default]
    Storage,
    /// High performance storage
    StorageHigh,
    /// Highest performance storage
    StorageInsane,
    /// Any class this client does not know about
    Other(String),
}

impl StorageType {
    /// Returns the class as named by the API.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Storage => "storage",
            Self::StorageHigh => "storage_high",
            Self::StorageInsane => "storage_insane",
            Self::Other(value) => value,
        }
    }
}

impl From<String> for StorageType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "storage" => Self::Storage,
            "storage_high" => Self::StorageHigh,
            "storage_insane" => Self::StorageInsane,
            _ => Self::Other(value),
        }
    }
}

impl From<StorageType> for String {
    fn from(class: StorageType) -> Self {
        class.as_str().to_string()
    }
}

/// How a template password is encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PasswordType {
    /// Plain text
    Plain,
    /// crypt(3) hash
    Crypt,
}

/// Storage as returned by `/objects/storages`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Storage {
    /// Storage UUID.
    pub object_uuid: StorageUuid,
    /// Storage name.
    #[serde(default)]
    pub name: String,
    /// Capacity in GB.
    #[serde(default)]
    pub capacity: u64,
    /// Performance class.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_type: Option<StorageType>,
    /// Object status.
    #[serde(default)]
    pub status: String,
    /// Storage this one was cloned from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_uuid: Option<StorageUuid>,
    /// Template the storage was last created from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_used_template: Option<TemplateUuid>,
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
    /// Snapshots of the storage.
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub snapshots: Vec<StorageSnapshotRelation>,
    /// Related objects.
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub relations: StorageRelations,
    /// Labels.
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub labels: Vec<String>,
}

/// Snapshot belonging to a storage.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StorageSnapshotRelation {
    /// Snapshot UUID.
    pub object_uuid: SnapshotUuid,
    /// Snapshot name.
    #[serde(default)]
    pub object_name: String,
    /// Storage the snapshot belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_uuid: Option<StorageUuid>,
    /// Snapshot capacity in GB.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object_capacity: Option<u64>,
    /// Template the storage was last created from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_used_template: Option<TemplateUuid>,
    /// Schedule that created the snapshot.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedules_snapshot_uuid: Option<SnapshotScheduleUuid>,
    /// Name of the schedule that created the snapshot.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedules_snapshot_name: Option<String>,
    /// Creation time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_time: Option<DateTime<Utc>>,
}

/// Objects related to a storage.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct StorageRelations {
    /// Servers the storage is attached to.
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub servers: Vec<StorageServerRelation>,
    /// Snapshot schedules of the storage.
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub snapshot_schedules: Vec<StorageScheduleRelation>,
}

/// Server a storage is attached to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StorageServerRelation {
    /// Server UUID.
    pub object_uuid: ServerUuid,
    /// Server name.
    #[serde(default)]
    pub object_name: String,
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
    /// When the relation was created.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_time: Option<DateTime<Utc>>,
}

/// Snapshot schedule summary embedded in a storage.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StorageScheduleRelation {
    /// Schedule UUID.
    pub object_uuid: SnapshotScheduleUuid,
    /// Schedule name.
    #[serde(default)]
    pub name: String,
    /// Interval between runs in minutes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run_interval: Option<u64>,
    /// Number of snapshots to keep.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keep_snapshots: Option<u64>,
    /// Next run.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_runtime: Option<DateTime<Utc>>,
    /// Creation time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_time: Option<DateTime<Utc>>,
}

/// Template to install onto a new storage.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StorageTemplate {
    /// Template UUID.
    pub template_uuid: TemplateUuid,
    /// SSH keys to install.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sshkeys: Vec<SshkeyUuid>,
    /// Root password.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// Encoding of `password`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password_type: Option<PasswordType>,
    /// Hostname to configure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,
}

impl StorageTemplate {
    /// Install `template_uuid` without further settings.
    #[must_use]
    pub fn new(template_uuid: TemplateUuid) -> Self {
        Self {
            template_uuid,
            sshkeys: Vec::new(),
            password: None,
            password_type: None,
            hostname: None,
        }
    }
}

/// Request payload to create a storage.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StorageCreateRequest {
    /// Capacity in GB.
    pub capacity: u64,
    /// Location UUID.
    pub location_uuid: LocationUuid,
    /// Storage name.
    pub name: String,
    /// Performance class, defaults to the standard class.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_type: Option<StorageType>,
    /// Template to install.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<StorageTemplate>,
    /// Labels.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<String>,
}

/// Request payload to update a storage.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct StorageUpdateRequest {
    /// New name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Replacement labels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<String>>,
    /// New capacity in GB; storages can only grow.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct StorageList {
    #[serde(default)]
    storages: Option<BTreeMap<String, Storage>>,
}

impl StorageList {
    pub(crate) fn into_vec(self) -> Vec<Storage> {
        self.storages.unwrap_or_default().into_values().collect()
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct StorageEnvelope {
    pub(crate) storage: Storage,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn storage_type_wire_names() {
        assert_eq!(
            serde_json::to_value(StorageType::StorageInsane).unwrap(),
            json!("storage_insane")
        );
        assert_eq!(serde_json::to_value(PasswordType::Crypt).unwrap(), json!("crypt"));
    }

    #[test]
    fn unknown_storage_type_is_kept() {
        let class: StorageType = serde_json::from_value(json!("storage_archive")).unwrap();
        assert_eq!(class, StorageType::Other("storage_archive".to_string()));
        assert_eq!(class.as_str(), "storage_archive");
        assert_eq!(serde_json::to_value(&class).unwrap(), json!("storage_archive"));

        let class: StorageType = serde_json::from_value(json!("storage_high")).unwrap();
        assert_eq!(class, StorageType::StorageHigh);
    }

    #[test]
    fn create_request_with_template() {
        let location = LocationUuid::new_v4();
        let template = TemplateUuid::new_v4();
        let key = SshkeyUuid::new_v4();

        let request = StorageCreateRequest {
            capacity: 10,
            location_uuid: location,
            name: "root".into(),
            storage_type: Some(StorageType::StorageHigh),
            template: Some(StorageTemplate {
                sshkeys: vec![key],
                password: Some("secret".into()),
                password_type: Some(PasswordType::Plain),
                hostname: Some("web01".into()),
                ..StorageTemplate::new(template)
            }),
            labels: Vec::new(),
        };

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "capacity": 10,
                "location_uuid": location,
                "name": "root",
                "storage_type": "storage_high",
                "template": {
                    "template_uuid": template,
                    "sshkeys": [key],
                    "password": "secret",
                    "password_type": "plain",
                    "hostname": "web01"
                }
            })
        );
    }

    #[test]
    fn update_request_omits_unset_fields() {
        let request = StorageUpdateRequest {
            capacity: Some(20),
            ..StorageUpdateRequest::default()
        };
        assert_eq!(serde_json::to_value(&request).unwrap(), json!({"capacity": 20}));
    }
}
