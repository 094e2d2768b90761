//! Asynchronous template client implementation.

use crate::models::{
    Template, TemplateCreateRequest, TemplateEnvelope, TemplateList, TemplateUpdateRequest,
};
use crate::Result;
use gsclient_core::types::{CreateResponse, Event, EventList};
use gsclient_core::uuid::TemplateUuid;
use gsclient_core::{Error, GridscaleClientConfig, ServiceClient};
use reqwest::Method;
use tracing::{debug, info};
use url::Url;

/// Base path of the template endpoints.
pub const TEMPLATE_BASE: &str = "objects/templates";

/// Asynchronous client for `/objects/templates`.
#[derive(Debug, Clone)]
pub struct TemplateClient {
    service: ServiceClient,
}

impl TemplateClient {
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

    /// List all templates visible to the account, ordered by UUID.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response cannot be decoded.
    pub async fn list_templates(&self) -> Result<Vec<Template>> {
        let list: TemplateList = self.service.get_json(TEMPLATE_BASE).await?;
        Ok(list.into_vec())
    }

    /// Fetch a template by UUID.
    ///
    /// # Errors
    ///
    /// Returns an error if the object does not exist or the request fails.
    pub async fn get_template(&self, uuid: TemplateUuid) -> Result<Template> {
        let path = format!("{TEMPLATE_BASE}/{uuid}");
        let envelope: TemplateEnvelope = self.service.get_json(&path).await?;
        Ok(envelope.template)
    }

    /// Fetch the first template whose name matches exactly.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] when no template carries that name, or any
    /// error raised while listing or fetching templates.
    pub async fn get_template_by_name(&self, name: &str) -> Result<Template> {
        let templates = self.list_templates().await?;
        let found = templates
            .into_iter()
            .find(|template| template.name == name)
            .ok_or_else(|| Error::NotFound(format!("template `{name}` not found")))?;

        debug!(name, template = %found.object_uuid, "resolved template by name");
        self.get_template(found.object_uuid).await
    }

    /// Create a template from a snapshot and wait until it is available.
    ///
    /// # Errors
    ///
    /// Returns an error if the API rejects the request. When the object was
    /// created but its request then fails or times out, the error is
    /// `ProvisioningIncomplete` and still carries the object UUID.
    pub async fn create_template(&self, request: &TemplateCreateRequest) -> Result<CreateResponse> {
        let response: CreateResponse = self
            .service
            .send_json(Method::POST, TEMPLATE_BASE, Some(request))
            .await?;
        self.service
            .wait_for_provisioning(&response.request_uuid, response.object_uuid)
            .await?;
        info!(
            template = %response.object_uuid,
            snapshot = %request.snapshot_uuid,
            "template created"
        );
        Ok(response)
    }

    /// Update a template.
    ///
    /// # Errors
    ///
    /// Returns an error if the API rejects the request.
    pub async fn update_template(
        &self,
        uuid: TemplateUuid,
        request: &TemplateUpdateRequest,
    ) -> Result<()> {
        let path = format!("{TEMPLATE_BASE}/{uuid}");
        self.service
            .send_empty(Method::PATCH, &path, Some(request))
            .await
    }

    /// Delete a template.
    ///
    /// # Errors
    ///
    /// Returns an error if the API rejects the request.
    pub async fn delete_template(&self, uuid: TemplateUuid) -> Result<()> {
        let path = format!("{TEMPLATE_BASE}/{uuid}");
        self.service
            .send_empty::<()>(Method::DELETE, &path, None)
            .await
    }

    /// List the events of a template.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response cannot be decoded.
    pub async fn list_template_events(&self, uuid: TemplateUuid) -> Result<Vec<Event>> {
        let path = format!("{TEMPLATE_BASE}/{uuid}/events");
        let events: EventList = self.service.get_json(&path).await?;
        Ok(events.into_events())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gsclient_core::client::PollPolicy;
    use gsclient_core::uuid::{ObjectUuid, RequestUuid, SnapshotUuid};
    use gsclient_core::ServiceClientBuilder;
    use serde_json::json;
    use std::time::Duration;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(server: &MockServer) -> TemplateClient {
        let service = ServiceClientBuilder::new(server.uri(), "user", "token")
            .unwrap()
            .with_poll_policy(
                PollPolicy::new()
                    .with_interval(Duration::from_millis(5))
                    .with_timeout(Duration::from_secs(2)),
            )
            .build()
            .unwrap();
        TemplateClient::from_service_client(service)
    }

    fn template_json(uuid: TemplateUuid, name: &str) -> serde_json::Value {
        json!({
            "object_uuid": uuid,
            "name": name,
            "status": "active",
            "ostype": "linux",
            "distro": "Ubuntu",
            "version": "18.04",
            "private": false,
            "capacity": 10,
            "labels": []
        })
    }

    async fn mount_template_list(server: &MockServer, templates: &[(TemplateUuid, &str)]) {
        let mut map = serde_json::Map::new();
        for (uuid, name) in templates {
            map.insert(uuid.to_string(), template_json(*uuid, name));
        }
        Mock::given(method("GET"))
            .and(path("/objects/templates"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"templates": map})))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn list_templates_success() {
        let server = MockServer::start().await;
        mount_template_list(
            &server,
            &[
                (TemplateUuid::new_v4(), "Ubuntu 18.04"),
                (TemplateUuid::new_v4(), "Debian 10"),
            ],
        )
        .await;

        let templates = client(&server).list_templates().await.unwrap();
        assert_eq!(templates.len(), 2);
    }

    #[tokio::test]
    async fn get_template_by_name_fetches_match() {
        let server = MockServer::start().await;
        let ubuntu = TemplateUuid::new_v4();
        mount_template_list(
            &server,
            &[(ubuntu, "Ubuntu 18.04"), (TemplateUuid::new_v4(), "Debian 10")],
        )
        .await;
        Mock::given(method("GET"))
            .and(path(format!("/objects/templates/{ubuntu}").as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "template": template_json(ubuntu, "Ubuntu 18.04")
            })))
            .expect(1)
            .mount(&server)
            .await;

        let template = client(&server)
            .get_template_by_name("Ubuntu 18.04")
            .await
            .unwrap();
        assert_eq!(template.object_uuid, ubuntu);
        assert_eq!(template.distro.as_deref(), Some("Ubuntu"));
    }

    #[tokio::test]
    async fn get_template_by_name_not_found() {
        let server = MockServer::start().await;
        mount_template_list(&server, &[(TemplateUuid::new_v4(), "Debian 10")]).await;

        let err = client(&server)
            .get_template_by_name("CentOS 7")
            .await
            .unwrap_err();
        match err {
            Error::NotFound(message) => assert!(message.contains("CentOS 7")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn create_template_waits_for_request() {
        let server = MockServer::start().await;
        let snapshot = SnapshotUuid::new_v4();
        let request_uuid = RequestUuid::new_v4();
        Mock::given(method("POST"))
            .and(path("/objects/templates"))
            .and(body_json(json!({"name": "golden", "snapshot_uuid": snapshot})))
            .respond_with(ResponseTemplate::new(202).set_body_json(json!({
                "request_uuid": request_uuid,
                "object_uuid": ObjectUuid::new_v4()
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path(format!("/requests/{request_uuid}").as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                request_uuid.to_string(): {"status": "done"}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let request = TemplateCreateRequest {
            name: "golden".into(),
            snapshot_uuid: snapshot,
            labels: Vec::new(),
        };
        let response = client(&server).create_template(&request).await.unwrap();
        assert_eq!(response.request_uuid, request_uuid);
    }

    #[tokio::test]
    async fn update_and_delete_template() {
        let server = MockServer::start().await;
        let uuid = TemplateUuid::new_v4();
        Mock::given(method("PATCH"))
            .and(path(format!("/objects/templates/{uuid}").as_str()))
            .and(body_json(json!({"name": "renamed", "labels": []})))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path(format!("/objects/templates/{uuid}").as_str()))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let client = client(&server);
        let request = TemplateUpdateRequest {
            name: Some("renamed".into()),
            labels: Some(Vec::new()),
        };
        client.update_template(uuid, &request).await.unwrap();
        client.delete_template(uuid).await.unwrap();
    }

    #[tokio::test]
    async fn list_template_events_success() {
        let server = MockServer::start().await;
        let uuid = TemplateUuid::new_v4();
        Mock::given(method("GET"))
            .and(path(format!("/objects/templates/{uuid}/events").as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"events": []})))
            .mount(&server)
            .await;

        let events = client(&server).list_template_events(uuid).await.unwrap();
        assert!(events.is_empty());
    }
}
