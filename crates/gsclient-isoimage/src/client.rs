//! Asynchronous ISO image client implementation.

use crate::models::{
    IsoImage, IsoImageCreateRequest, IsoImageEnvelope, IsoImageList, IsoImageUpdateRequest,
};
use crate::Result;
use gsclient_core::types::{CreateResponse, Event, EventList};
use gsclient_core::uuid::IsoImageUuid;
use gsclient_core::{GridscaleClientConfig, ServiceClient};
use reqwest::Method;
use tracing::info;
use url::Url;

/// Base path of the ISO image endpoints.
pub const ISOIMAGE_BASE: &str = "objects/isoimages";

/// Asynchronous client for `/objects/isoimages`.
#[derive(Debug, Clone)]
pub struct IsoImageClient {
    service: ServiceClient,
}

impl IsoImageClient {
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

    /// List all ISO images, ordered by UUID.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response cannot be decoded.
    pub async fn list_isoimages(&self) -> Result<Vec<IsoImage>> {
        let list: IsoImageList = self.service.get_json(ISOIMAGE_BASE).await?;
        Ok(list.into_vec())
    }

    /// Fetch an ISO image by UUID.
    ///
    /// # Errors
    ///
    /// Returns an error if the object does not exist or the request fails.
    pub async fn get_isoimage(&self, uuid: IsoImageUuid) -> Result<IsoImage> {
        let path = format!("{ISOIMAGE_BASE}/{uuid}");
        let envelope: IsoImageEnvelope = self.service.get_json(&path).await?;
        Ok(envelope.isoimage)
    }

    /// Create an ISO image and wait until the download finished.
    ///
    /// # Errors
    ///
    /// Returns an error if the API rejects the request. When the object was
    /// created but its request then fails or times out, the error is
    /// `ProvisioningIncomplete` and still carries the object UUID.
    pub async fn create_isoimage(&self, request: &IsoImageCreateRequest) -> Result<CreateResponse> {
        let response: CreateResponse = self
            .service
            .send_json(Method::POST, ISOIMAGE_BASE, Some(request))
            .await?;
        self.service
            .wait_for_provisioning(&response.request_uuid, response.object_uuid)
            .await?;
        info!(isoimage = %response.object_uuid, source = %request.source_url, "ISO image created");
        Ok(response)
    }

    /// Update an ISO image.
    ///
    /// # Errors
    ///
    /// Returns an error if the API rejects the request.
    pub async fn update_isoimage(
        &self,
        uuid: IsoImageUuid,
        request: &IsoImageUpdateRequest,
    ) -> Result<()> {
        let path = format!("{ISOIMAGE_BASE}/{uuid}");
        self.service
            .send_empty(Method::PATCH, &path, Some(request))
            .await
    }

    /// Delete an ISO image.
    ///
    /// # Errors
    ///
    /// Returns an error if the API rejects the request.
    pub async fn delete_isoimage(&self, uuid: IsoImageUuid) -> Result<()> {
        let path = format!("{ISOIMAGE_BASE}/{uuid}");
        self.service
            .send_empty::<()>(Method::DELETE, &path, None)
            .await
    }

    /// List the events of an ISO image.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response cannot be decoded.
    pub async fn list_isoimage_events(&self, uuid: IsoImageUuid) -> Result<Vec<Event>> {
        let path = format!("{ISOIMAGE_BASE}/{uuid}/events");
        let events: EventList = self.service.get_json(&path).await?;
        Ok(events.into_events())
    }
}
