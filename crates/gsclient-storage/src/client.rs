//! Asynchronous storage client implementation.

use crate::models::{
    Storage, StorageCreateRequest, StorageEnvelope, StorageList, StorageUpdateRequest,
};
use crate::snapshot_schedule::{
    SnapshotScheduleCreateRequest, SnapshotScheduleEnvelope, SnapshotScheduleList,
    SnapshotScheduleUpdateRequest, StorageSnapshotSchedule,
};
use crate::Result;
use gsclient_core::types::{CreateResponse, Event, EventList};
use gsclient_core::uuid::{SnapshotScheduleUuid, StorageUuid};
use gsclient_core::{GridscaleClientConfig, ServiceClient};
use reqwest::Method;
use tracing::info;
use url::Url;

/// Base path of the storage endpoints.
pub const STORAGE_BASE: &str = "objects/storages";

fn schedules_path(storage: StorageUuid) -> String {
    format!("{STORAGE_BASE}/{storage}/snapshot_schedules")
}

/// Asynchronous client for `/objects/storages`.
#[derive(Debug, Clone)]
pub struct StorageClient {
    service: ServiceClient,
}

impl StorageClient {
    /// Wrap an existing service client.
    #[must_use]
    pub fn from_service_client(service: ServiceClient) -> Self {
        Self { service }
    }

    /// Construct from a configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be built.
    pub fn from_config(config: &GridscaleClientConfig) -> Result<Self> {
        ServiceClient::from_config(config).map(Self::from_service_client)
    }

    /// Access the base URL.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        self.service.base_url()
    }

    /// List all storages, ordered by UUID.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response cannot be decoded.
    pub async fn list_storages(&self) -> Result<Vec<Storage>> {
        let list: StorageList = self.service.get_json(STORAGE_BASE).await?;
        Ok(list.into_vec())
    }

    /// Fetch a storage by UUID.
    ///
    /// # Errors
    ///
    /// Returns an error if the object does not exist or the request fails.
    pub async fn get_storage(&self, uuid: StorageUuid) -> Result<Storage> {
        let path = format!("{STORAGE_BASE}/{uuid}");
        let envelope: StorageEnvelope = self.service.get_json(&path).await?;
        Ok(envelope.storage)
    }

    /// Create a storage and wait until it is provisioned.
    ///
    /// # Errors
    ///
    /// Returns an error if the API rejects the request. When the object was
    /// created but its request then fails or times out, the error is
    /// `ProvisioningIncomplete` and still carries the object UUID.
    pub async fn create_storage(&self, request: &StorageCreateRequest) -> Result<CreateResponse> {
        let response: CreateResponse = self
            .service
            .send_json(Method::POST, STORAGE_BASE, Some(request))
            .await?;
        self.service
            .wait_for_provisioning(&response.request_uuid, response.object_uuid)
            .await?;
        info!(storage = %response.object_uuid, capacity = request.capacity, "storage created");
        Ok(response)
    }

    /// Update a storage.
    ///
    /// # Errors
    ///
    /// Returns an error if the API rejects the request.
    pub async fn update_storage(
        &self,
        uuid: StorageUuid,
        request: &StorageUpdateRequest,
    ) -> Result<()> {
        let path = format!("{STORAGE_BASE}/{uuid}");
        self.service
            .send_empty(Method::PATCH, &path, Some(request))
            .await
    }

    /// Delete a storage.
    ///
    /// # Errors
    ///
    /// Returns an error if the API rejects the request.
    pub async fn delete_storage(&self, uuid: StorageUuid) -> Result<()> {
        let path = format!("{STORAGE_BASE}/{uuid}");
        self.service
            .send_empty::<()>(Method::DELETE, &path, None)
            .await
    }

    /// List the events of a storage.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response cannot be decoded.
    pub async fn list_storage_events(&self, uuid: StorageUuid) -> Result<Vec<Event>> {
        let path = format!("{STORAGE_BASE}/{uuid}/events");
        let events: EventList = self.service.get_json(&path).await?;
        Ok(events.into_events())
    }

    /// List the snapshot schedules of a storage, ordered by UUID.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response cannot be decoded.
    pub async fn list_snapshot_schedules(
        &self,
        storage: StorageUuid,
    ) -> Result<Vec<StorageSnapshotSchedule>> {
        let list: SnapshotScheduleList = self.service.get_json(&schedules_path(storage)).await?;
        Ok(list.into_vec())
    }

    /// Fetch a snapshot schedule.
    ///
    /// # Errors
    ///
    /// Returns an error if the object does not exist or the request fails.
    pub async fn get_snapshot_schedule(
        &self,
        storage: StorageUuid,
        schedule: SnapshotScheduleUuid,
    ) -> Result<StorageSnapshotSchedule> {
        let path = format!("{}/{schedule}", schedules_path(storage));
        let envelope: SnapshotScheduleEnvelope = self.service.get_json(&path).await?;
        Ok(envelope.snapshot_schedule)
    }

    /// Create a snapshot schedule and wait until it is active.
    ///
    /// # Errors
    ///
    /// Returns an error if the API rejects the request. When the object was
    /// created but its request then fails or times out, the error is
    /// `ProvisioningIncomplete` and still carries the object UUID.
    pub async fn create_snapshot_schedule(
        &self,
        storage: StorageUuid,
        request: &SnapshotScheduleCreateRequest,
    ) -> Result<CreateResponse> {
        let response: CreateResponse = self
            .service
            .send_json(Method::POST, &schedules_path(storage), Some(request))
            .await?;
        self.service
            .wait_for_provisioning(&response.request_uuid, response.object_uuid)
            .await?;
        info!(%storage, schedule = %response.object_uuid, "snapshot schedule created");
        Ok(response)
    }

    /// Update a snapshot schedule.
    ///
    /// # Errors
    ///
    /// Returns an error if the API rejects the request.
    pub async fn update_snapshot_schedule(
        &self,
        storage: StorageUuid,
        schedule: SnapshotScheduleUuid,
        request: &SnapshotScheduleUpdateRequest,
    ) -> Result<()> {
        let path = format!("{}/{schedule}", schedules_path(storage));
        self.service
            .send_empty(Method::PATCH, &path, Some(request))
            .await
    }

    /// Delete a snapshot schedule.
    ///
    /// # Errors
    ///
    /// Returns an error if the API rejects the request.
    pub async fn delete_snapshot_schedule(
        &self,
        storage: StorageUuid,
        schedule: SnapshotScheduleUuid,
    ) -> Result<()> {
        let path = format!("{}/{schedule}", schedules_path(storage));
        self.service
            .send_empty::<()>(Method::DELETE, &path, None)
            .await
    }
}
