//! Snapshot schedule models.
//!
//! A schedule takes a snapshot of its storage every `run_interval` minutes and
//! keeps the newest `keep_snapshots` of them.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use gsclient_core::types::deserialize_null_default;
use gsclient_core::uuid::{SnapshotScheduleUuid, SnapshotUuid, StorageUuid};
use serde::{Deserialize, Serialize};

/// Snapshot schedule of a storage.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StorageSnapshotSchedule {
    /// Schedule UUID.
    pub object_uuid: SnapshotScheduleUuid,
    /// Schedule name.
    #[serde(default)]
    pub name: String,
    /// Storage the schedule belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_uuid: Option<StorageUuid>,
    /// Object status.
    #[serde(default)]
    pub status: String,
    /// Interval between runs in minutes.
    #[serde(default)]
    pub run_interval: u64,
    /// Number of snapshots to keep.
    #[serde(default)]
    pub keep_snapshots: u64,
    /// Next run.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_runtime: Option<DateTime<Utc>>,
    /// Creation time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_time: Option<DateTime<Utc>>,
    /// Last change time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub change_time: Option<DateTime<Utc>>,
    /// Labels.
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub labels: Vec<String>,
    /// Snapshots taken by the schedule.
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub relations: SnapshotScheduleRelations,
}

/// Objects related to a snapshot schedule.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SnapshotScheduleRelations {
    /// Snapshots taken by the schedule.
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub snapshots: Vec<SnapshotScheduleSnapshot>,
}

/// Snapshot taken by a schedule.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SnapshotScheduleSnapshot {
    /// Snapshot UUID.
    pub object_uuid: SnapshotUuid,
    /// Snapshot name.
    #[serde(default)]
    pub name: String,
    /// Creation time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_time: Option<DateTime<Utc>>,
}

/// Request payload to create a snapshot schedule.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SnapshotScheduleCreateRequest {
    /// Schedule name.
    pub name: String,
    /// Interval between runs in minutes.
    pub run_interval: u64,
    /// Number of snapshots to keep.
    pub keep_snapshots: u64,
    /// First run; the API picks one when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_runtime: Option<DateTime<Utc>>,
    /// Labels.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<String>,
}

/// Request payload to update a snapshot schedule.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SnapshotScheduleUpdateRequest {
    /// New name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New interval in minutes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run_interval: Option<u64>,
    /// New retention.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keep_snapshots: Option<u64>,
    /// New next run.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_runtime: Option<DateTime<Utc>>,
    /// Replacement labels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SnapshotScheduleList {
    #[serde(default)]
    snapshot_schedules: Option<BTreeMap<String, StorageSnapshotSchedule>>,
}

impl SnapshotScheduleList {
    pub(crate) fn into_vec(self) -> Vec<StorageSnapshotSchedule> {
        self.snapshot_schedules
            .unwrap_or_default()
            .into_values()
            .collect()
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct SnapshotScheduleEnvelope {
    pub(crate) snapshot_schedule: StorageSnapshotSchedule,
}
