//! Asynchronous PaaS client implementation.

use crate::models::{
    PaasService, PaasServiceCreateRequest, PaasServiceCreateResponse, PaasServiceEnvelope,
    PaasServiceList, PaasServiceMetric, PaasServiceMetricList, PaasServiceUpdateRequest,
    PaasTemplate, PaasTemplateList,
};
use crate::security_zone::{
    PaasSecurityZone, SecurityZoneCreateRequest, SecurityZoneCreateResponse,
    SecurityZoneEnvelope, SecurityZoneList, SecurityZoneUpdateRequest,
};
use crate::Result;
use gsclient_core::uuid::{PaasServiceUuid, SecurityZoneUuid};
use gsclient_core::{GridscaleClientConfig, ServiceClient};
use reqwest::Method;
use tracing::info;
use url::Url;

/// Base path of the PaaS endpoints.
pub const PAAS_BASE: &str = "objects/paas";

fn services_path() -> String {
    format!("{PAAS_BASE}/services")
}

fn service_templates_path() -> String {
    format!("{PAAS_BASE}/service_templates")
}

fn security_zones_path() -> String {
    format!("{PAAS_BASE}/security_zones")
}

/// Asynchronous client for `/objects/paas`.
#[derive(Debug, Clone)]
pub struct PaasClient {
    service: ServiceClient,
}

impl PaasClient {
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

    /// List all PaaS services, ordered by UUID.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response cannot be decoded.
    pub async fn list_paas_services(&self) -> Result<Vec<PaasService>> {
        let list: PaasServiceList = self.service.get_json(&services_path()).await?;
        Ok(list.into_vec())
    }

    /// Fetch a PaaS service by UUID.
    ///
    /// # Errors
    ///
    /// Returns an error if the object does not exist or the request fails.
    pub async fn get_paas_service(&self, uuid: PaasServiceUuid) -> Result<PaasService> {
        let path = format!("{}/{uuid}", services_path());
        let envelope: PaasServiceEnvelope = self.service.get_json(&path).await?;
        Ok(envelope.paas_service)
    }

    /// Create a PaaS service and wait until it is running.
    ///
    /// # Errors
    ///
    /// Returns an error if the API rejects the request. When the object was
    /// created but its request then fails or times out, the error is
    /// `ProvisioningIncomplete` and still carries the object UUID.
    pub async fn create_paas_service(
        &self,
        request: &PaasServiceCreateRequest,
    ) -> Result<PaasServiceCreateResponse> {
        let response: PaasServiceCreateResponse = self
            .service
            .send_json(Method::POST, &services_path(), Some(request))
            .await?;
        self.service
            .wait_for_provisioning(&response.request_uuid, response.object_uuid)
            .await?;
        info!(
            paas_service = %response.object_uuid,
            template = %request.paas_service_template_uuid,
            "PaaS service created"
        );
        Ok(response)
    }

    /// Update a PaaS service.
    ///
    /// # Errors
    ///
    /// Returns an error if the API rejects the request.
    pub async fn update_paas_service(
        &self,
        uuid: PaasServiceUuid,
        request: &PaasServiceUpdateRequest,
    ) -> Result<()> {
        let path = format!("{}/{uuid}", services_path());
        self.service
            .send_empty(Method::PATCH, &path, Some(request))
            .await
    }

    /// Delete a PaaS service.
    ///
    /// # Errors
    ///
    /// Returns an error if the API rejects the request.
    pub async fn delete_paas_service(&self, uuid: PaasServiceUuid) -> Result<()> {
        let path = format!("{}/{uuid}", services_path());
        self.service
            .send_empty::<()>(Method::DELETE, &path, None)
            .await
    }

    /// Fetch the usage metrics of a PaaS service.
    ///
    /// # Errors
    ///
    /// Returns an error if the service does not exist or the request fails.
    pub async fn get_paas_service_metrics(
        &self,
        uuid: PaasServiceUuid,
    ) -> Result<Vec<PaasServiceMetric>> {
        let path = format!("{}/{uuid}/metrics", services_path());
        let list: PaasServiceMetricList = self.service.get_json(&path).await?;
        Ok(list.into_vec())
    }

    /// List the templates PaaS services can be created from.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response cannot be decoded.
    pub async fn list_paas_templates(&self) -> Result<Vec<PaasTemplate>> {
        let list: PaasTemplateList = self.service.get_json(&service_templates_path()).await?;
        Ok(list.into_vec())
    }

    /// List all security zones.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response cannot be decoded.
    pub async fn list_paas_security_zones(&self) -> Result<Vec<PaasSecurityZone>> {
        let list: SecurityZoneList = self.service.get_json(&security_zones_path()).await?;
        Ok(list.into_vec())
    }

    /// Fetch a security zone by UUID.
    ///
    /// # Errors
    ///
    /// Returns an error if the object does not exist or the request fails.
    pub async fn get_paas_security_zone(
        &self,
        uuid: SecurityZoneUuid,
    ) -> Result<PaasSecurityZone> {
        let path = format!("{}/{uuid}", security_zones_path());
        let envelope: SecurityZoneEnvelope = self.service.get_json(&path).await?;
        Ok(envelope.paas_security_zone)
    }

    /// Create a security zone and wait until it is active.
    ///
    /// # Errors
    ///
    /// Returns an error if the API rejects the request. When the object was
    /// created but its request then fails or times out, the error is
    /// `ProvisioningIncomplete` and still carries the object UUID.
    pub async fn create_paas_security_zone(
        &self,
        request: &SecurityZoneCreateRequest,
    ) -> Result<SecurityZoneCreateResponse> {
        let response: SecurityZoneCreateResponse = self
            .service
            .send_json(Method::POST, &security_zones_path(), Some(request))
            .await?;
        self.service
            .wait_for_provisioning(&response.request_uuid, response.object_uuid)
            .await?;
        info!(security_zone = %response.object_uuid, "PaaS security zone created");
        Ok(response)
    }

    /// Update a security zone.
    ///
    /// # Errors
    ///
    /// Returns an error if the API rejects the request.
    pub async fn update_paas_security_zone(
        &self,
        uuid: SecurityZoneUuid,
        request: &SecurityZoneUpdateRequest,
    ) -> Result<()> {
        let path = format!("{}/{uuid}", security_zones_path());
        self.service
            .send_empty(Method::PATCH, &path, Some(request))
            .await
    }

    /// Delete a security zone.
    ///
    /// # Errors
    ///
    /// Returns an error if the API rejects the request.
    pub async fn delete_paas_security_zone(&self, uuid: SecurityZoneUuid) -> Result<()> {
        let path = format!("{}/{uuid}", security_zones_path());
        self.service
            .send_empty::<()>(Method::DELETE, &path, None)
            .await
    }
}
