//! Asynchronous SSH key client implementation.

use crate::models::{Sshkey, SshkeyCreateRequest, SshkeyEnvelope, SshkeyList, SshkeyUpdateRequest};
use crate::Result;
use gsclient_core::types::{CreateResponse, Event, EventList};
use gsclient_core::uuid::SshkeyUuid;
use gsclient_core::{GridscaleClientConfig, ServiceClient};
use reqwest::Method;
use tracing::info;
use url::Url;

/// Base path of the SSH key endpoints.
pub const SSHKEY_BASE: &str = "objects/sshkeys";

/// Asynchronous client for `/objects/sshkeys`.
#[derive(Debug, Clone)]
pub struct SshkeyClient {
    service: ServiceClient,
}

impl SshkeyClient {
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

    /// List all SSH keys, ordered by UUID.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response cannot be decoded.
    pub async fn list_sshkeys(&self) -> Result<Vec<Sshkey>> {
        let list: SshkeyList = self.service.get_json(SSHKEY_BASE).await?;
        Ok(list.into_vec())
    }

    /// Fetch an SSH key by UUID.
    ///
    /// # Errors
    ///
    /// Returns an error if the object does not exist or the request fails.
    pub async fn get_sshkey(&self, uuid: SshkeyUuid) -> Result<Sshkey> {
        let path = format!("{SSHKEY_BASE}/{uuid}");
        let envelope: SshkeyEnvelope = self.service.get_json(&path).await?;
        Ok(envelope.sshkey)
    }

    /// Store an SSH key and wait until it is usable.
    ///
    /// # Errors
    ///
    /// Returns an error if the API rejects the request. When the object was
    /// created but its request then fails or times out, the error is
    /// `ProvisioningIncomplete` and still carries the object UUID.
    pub async fn create_sshkey(&self, request: &SshkeyCreateRequest) -> Result<CreateResponse> {
        let response: CreateResponse = self
            .service
            .send_json(Method::POST, SSHKEY_BASE, Some(request))
            .await?;
        self.service
            .wait_for_provisioning(&response.request_uuid, response.object_uuid)
            .await?;
        info!(sshkey = %response.object_uuid, name = %request.name, "SSH key created");
        Ok(response)
    }

    /// Update an SSH key.
    ///
    /// # Errors
    ///
    /// Returns an error if the API rejects the request.
    pub async fn update_sshkey(
        &self,
        uuid: SshkeyUuid,
        request: &SshkeyUpdateRequest,
    ) -> Result<()> {
        let path = format!("{SSHKEY_BASE}/{uuid}");
        self.service
            .send_empty(Method::PATCH, &path, Some(request))
            .await
    }

    /// Delete an SSH key.
    ///
    /// # Errors
    ///
    /// Returns an error if the API rejects the request.
    pub async fn delete_sshkey(&self, uuid: SshkeyUuid) -> Result<()> {
        let path = format!("{SSHKEY_BASE}/{uuid}");
        self.service
            .send_empty::<()>(Method::DELETE, &path, None)
            .await
    }

    /// List the events of an SSH key.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response cannot be decoded.
    pub async fn list_sshkey_events(&self, uuid: SshkeyUuid) -> Result<Vec<Event>> {
        let path = format!("{SSHKEY_BASE}/{uuid}/events");
        let events: EventList = self.service.get_json(&path).await?;
        Ok(events.into_events())
    }
}
