//! Asynchronous IP client implementation.

use crate::models::{
    Ip, IpCreateRequest, IpCreateResponse, IpEnvelope, IpFamily, IpList, IpUpdateRequest,
};
use crate::Result;
use gsclient_core::types::{Event, EventList};
use gsclient_core::uuid::IpUuid;
use gsclient_core::{GridscaleClientConfig, ServiceClient};
use reqwest::Method;
use tracing::info;
use url::Url;

/// Base path of the IP endpoints.
pub const IP_BASE: &str = "objects/ips";

/// Asynchronous client for `/objects/ips`.
#[derive(Debug, Clone)]
pub struct IpClient {
    service: ServiceClient,
}

impl IpClient {
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

    /// List all IPs, ordered by UUID.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response cannot be decoded.
    pub async fn list_ips(&self) -> Result<Vec<Ip>> {
        let list: IpList = self.service.get_json(IP_BASE).await?;
        Ok(list.into_vec())
    }

    /// Fetch an IP by UUID.
    ///
    /// # Errors
    ///
    /// Returns an error if the object does not exist or the request fails.
    pub async fn get_ip(&self, uuid: IpUuid) -> Result<Ip> {
        let path = format!("{IP_BASE}/{uuid}");
        let envelope: IpEnvelope = self.service.get_json(&path).await?;
        Ok(envelope.ip)
    }

    /// Allocate an IP and wait until it is provisioned.
    ///
    /// # Errors
    ///
    /// Returns an error if the API rejects the request. When the object was
    /// created but its request then fails or times out, the error is
    /// `ProvisioningIncomplete` and still carries the object UUID.
    pub async fn create_ip(&self, request: &IpCreateRequest) -> Result<IpCreateResponse> {
        let response: IpCreateResponse = self
            .service
            .send_json(Method::POST, IP_BASE, Some(request))
            .await?;
        self.service
            .wait_for_provisioning(&response.request_uuid, response.object_uuid)
            .await?;
        info!(ip = %response.object_uuid, address = %response.ip, "IP created");
        Ok(response)
    }

    /// Update an IP.
    ///
    /// # Errors
    ///
    /// Returns an error if the API rejects the request.
    pub async fn update_ip(&self, uuid: IpUuid, request: &IpUpdateRequest) -> Result<()> {
        let path = format!("{IP_BASE}/{uuid}");
        self.service
            .send_empty(Method::PATCH, &path, Some(request))
            .await
    }

    /// Delete an IP.
    ///
    /// # Errors
    ///
    /// Returns an error if the API rejects the request.
    pub async fn delete_ip(&self, uuid: IpUuid) -> Result<()> {
        let path = format!("{IP_BASE}/{uuid}");
        self.service
            .send_empty::<()>(Method::DELETE, &path, None)
            .await
    }

    /// List the events of an IP.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response cannot be decoded.
    pub async fn list_ip_events(&self, uuid: IpUuid) -> Result<Vec<Event>> {
        let path = format!("{IP_BASE}/{uuid}/events");
        let events: EventList = self.service.get_json(&path).await?;
        Ok(events.into_events())
    }

    /// Return the address family of an existing IP.
    ///
    /// # Errors
    ///
    /// Returns an error if the object does not exist or the request fails.
    pub async fn get_ip_version(&self, uuid: IpUuid) -> Result<IpFamily> {
        self.get_ip(uuid).await.map(|ip| ip.family)
    }
}
