//! Storage client and data models for the gridscale API.
//!
//! Covers `/objects/storages` and the snapshot schedules nested below each
//! storage.

#![deny(missing_docs)]

pub mod client;
pub mod models;
pub mod snapshot_schedule;

pub use client::StorageClient;
pub use models::{
    PasswordType, Storage, StorageCreateRequest, StorageRelations, StorageScheduleRelation,
    StorageServerRelation, StorageSnapshotRelation, StorageTemplate, StorageType,
    StorageUpdateRequest,
};
pub use snapshot_schedule::{
    SnapshotScheduleCreateRequest, SnapshotScheduleRelations, SnapshotScheduleSnapshot,
    SnapshotScheduleUpdateRequest, StorageSnapshotSchedule,
};

/// Convenient result alias sharing the `gsclient-core` error type.
pub type Result<T> = gsclient_core::Result<T>;
