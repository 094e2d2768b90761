//! Asynchronous server relation client implementation.

use crate::isoimage::{
    IsoImageRelationEnvelope, IsoImageRelationList, ServerIsoImageCreateRequest,
    ServerIsoImageRelation, ServerIsoImageUpdateRequest,
};
use crate::network::{
    FirewallRules, NetworkRelationEnvelope, NetworkRelationList, ServerNetworkCreateRequest,
    ServerNetworkRelation, ServerNetworkUpdateRequest,
};
use crate::Result;
use gsclient_core::uuid::{FirewallTemplateUuid, IsoImageUuid, NetworkUuid, ServerUuid};
use gsclient_core::{GridscaleClientConfig, ServiceClient};
use reqwest::Method;
use tracing::info;
use url::Url;

/// Base path of the server endpoints.
pub const SERVER_BASE: &str = "objects/servers";

/// Asynchronous client for the relations below `/objects/servers/{uuid}`.
#[derive(Debug, Clone)]
pub struct ServerClient {
    service: ServiceClient,
}

impl ServerClient {
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

    fn networks_path(server: ServerUuid) -> String {
        format!("{SERVER_BASE}/{server}/networks")
    }

    fn isoimages_path(server: ServerUuid) -> String {
        format!("{SERVER_BASE}/{server}/isoimages")
    }

    /// List the networks linked to a server, in API order.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response cannot be decoded.
    pub async fn list_server_networks(
        &self,
        server: ServerUuid,
    ) -> Result<Vec<ServerNetworkRelation>> {
        let list: NetworkRelationList = self
            .service
            .get_json(&Self::networks_path(server))
            .await?;
        Ok(list.into_vec())
    }

    /// Fetch a single server to network link.
    ///
    /// # Errors
    ///
    /// Returns an error if the object does not exist or the request fails.
    pub async fn get_server_network(
        &self,
        server: ServerUuid,
        network: NetworkUuid,
    ) -> Result<ServerNetworkRelation> {
        let path = format!("{}/{network}", Self::networks_path(server));
        let envelope: NetworkRelationEnvelope = self.service.get_json(&path).await?;
        Ok(envelope.network_relation)
    }

    /// Link a network to a server.
    ///
    /// # Errors
    ///
    /// Returns an error if the API rejects the link.
    pub async fn create_server_network(
        &self,
        server: ServerUuid,
        request: &ServerNetworkCreateRequest,
    ) -> Result<()> {
        self.service
            .send_empty(Method::POST, &Self::networks_path(server), Some(request))
            .await?;
        info!(server = %server, network = %request.object_uuid, "network linked");
        Ok(())
    }

    /// Update a server to network link.
    ///
    /// # Errors
    ///
    /// Returns an error if the API rejects the request.
    pub async fn update_server_network(
        &self,
        server: ServerUuid,
        network: NetworkUuid,
        request: &ServerNetworkUpdateRequest,
    ) -> Result<()> {
        let path = format!("{}/{network}", Self::networks_path(server));
        self.service
            .send_empty(Method::PATCH, &path, Some(request))
            .await
    }

    /// Remove a network from a server.
    ///
    /// # Errors
    ///
    /// Returns an error if the API rejects the request.
    pub async fn delete_server_network(
        &self,
        server: ServerUuid,
        network: NetworkUuid,
    ) -> Result<()> {
        let path = format!("{}/{network}", Self::networks_path(server));
        self.service
            .send_empty::<()>(Method::DELETE, &path, None)
            .await?;
        info!(server = %server, network = %network, "network unlinked");
        Ok(())
    }

    /// Link a network to a server with every link option spelled out.
    ///
    /// Empty `firewall` rules are not sent.
    ///
    /// # Errors
    ///
    /// Returns an error if the API rejects the link.
    #[allow(clippy::too_many_arguments)]
    pub async fn link_network(
        &self,
        server: ServerUuid,
        network: NetworkUuid,
        firewall_template: Option<FirewallTemplateUuid>,
        bootdevice: bool,
        ordering: i32,
        l3security: Option<Vec<String>>,
        firewall: FirewallRules,
    ) -> Result<()> {
        let request = ServerNetworkCreateRequest {
            object_uuid: network,
            ordering: Some(ordering),
            bootdevice: Some(bootdevice),
            l3security,
            firewall: (!firewall.is_empty()).then_some(firewall),
            firewall_template_uuid: firewall_template,
        };
        self.create_server_network(server, &request).await
    }

    /// Remove a network from a server.
    ///
    /// # Errors
    ///
    /// Returns an error if the API rejects the request.
    pub async fn unlink_network(&self, server: ServerUuid, network: NetworkUuid) -> Result<()> {
        self.delete_server_network(server, network).await
    }

    /// List the ISO images inserted into a server, in API order.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response cannot be decoded.
    pub async fn list_server_isoimages(
        &self,
        server: ServerUuid,
    ) -> Result<Vec<ServerIsoImageRelation>> {
        let list: IsoImageRelationList = self
            .service
            .get_json(&Self::isoimages_path(server))
            .await?;
        Ok(list.into_vec())
    }

    /// Fetch a single server to ISO image link.
    ///
    /// # Errors
    ///
    /// Returns an error if the object does not exist or the request fails.
    pub async fn get_server_isoimage(
        &self,
        server: ServerUuid,
        isoimage: IsoImageUuid,
    ) -> Result<ServerIsoImageRelation> {
        let path = format!("{}/{isoimage}", Self::isoimages_path(server));
        let envelope: IsoImageRelationEnvelope = self.service.get_json(&path).await?;
        Ok(envelope.isoimage_relation)
    }

    /// Insert an ISO image into a server.
    ///
    /// # Errors
    ///
    /// Returns an error if the API rejects the link.
    pub async fn create_server_isoimage(
        &self,
        server: ServerUuid,
        request: &ServerIsoImageCreateRequest,
    ) -> Result<()> {
        self.service
            .send_empty(Method::POST, &Self::isoimages_path(server), Some(request))
            .await?;
        info!(server = %server, isoimage = %request.object_uuid, "ISO image linked");
        Ok(())
    }

    /// Update a server to ISO image link.
    ///
    /// # Errors
    ///
    /// Returns an error if the API rejects the request.
    pub async fn update_server_isoimage(
        &self,
        server: ServerUuid,
        isoimage: IsoImageUuid,
        request: &ServerIsoImageUpdateRequest,
    ) -> Result<()> {
        let path = format!("{}/{isoimage}", Self::isoimages_path(server));
        self.service
            .send_empty(Method::PATCH, &path, Some(request))
            .await
    }

    /// Eject an ISO image from a server.
    ///
    /// # Errors
    ///
    /// Returns an error if the API rejects the request.
    pub async fn delete_server_isoimage(
        &self,
        server: ServerUuid,
        isoimage: IsoImageUuid,
    ) -> Result<()> {
        let path = format!("{}/{isoimage}", Self::isoimages_path(server));
        self.service
            .send_empty::<()>(Method::DELETE, &path, None)
            .await?;
        info!(server = %server, isoimage = %isoimage, "ISO image unlinked");
        Ok(())
    }

    /// Insert an ISO image into a server.
    ///
    /// # Errors
    ///
    /// Returns an error if the API rejects the link.
    pub async fn link_isoimage(&self, server: ServerUuid, isoimage: IsoImageUuid) -> Result<()> {
        let request = ServerIsoImageCreateRequest {
            object_uuid: isoimage,
        };
        self.create_server_isoimage(server, &request).await
    }

    /// Eject an ISO image from a server.
    ///
    /// # Errors
    ///
    /// Returns an error if the API rejects the request.
    pub async fn unlink_isoimage(&self, server: ServerUuid, isoimage: IsoImageUuid) -> Result<()> {
        self.delete_server_isoimage(server, isoimage).await
    }
}
