//! # gsclient
//!
//! Asynchronous client for the gridscale cloud API.
//!
//! [`GridscaleClient`] owns one HTTP connection pool and hands out typed
//! per-resource clients that share it:
//!
//! ```no_run
//! use gsclient::{GridscaleClient, GridscaleClientConfig};
//!
//! # async fn run() -> gsclient::Result<()> {
//! let config = GridscaleClientConfig::from_env()?;
//! let client = GridscaleClient::new(&config)?;
//! for ip in client.ips().list_ips().await? {
//!     println!("{} {}", ip.object_uuid, ip.ip);
//! }
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]

pub use gsclient_ip as ip;
pub use gsclient_isoimage as isoimage;
pub use gsclient_paas as paas;
pub use gsclient_server as server;
pub use gsclient_sshkey as sshkey;
pub use gsclient_storage as storage;
pub use gsclient_template as template;

pub use gsclient_core::client::PollPolicy;
pub use gsclient_core::request::{RequestState, RequestStatus};
pub use gsclient_core::uuid;
pub use gsclient_core::uuid::RequestUuid;
pub use gsclient_core::{Error, GridscaleClientConfig, Result, ServiceClient, ServiceClientBuilder};

use gsclient_ip::IpClient;
use gsclient_isoimage::IsoImageClient;
use gsclient_paas::PaasClient;
use gsclient_server::ServerClient;
use gsclient_sshkey::SshkeyClient;
use gsclient_storage::StorageClient;
use gsclient_template::TemplateClient;
use url::Url;

/// Entry point to every gridscale resource.
///
/// Cloning is cheap; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct GridscaleClient {
    service: ServiceClient,
}

impl GridscaleClient {
    /// Build a client from a configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be built.
    pub fn new(config: &GridscaleClientConfig) -> Result<Self> {
        ServiceClient::from_config(config).map(Self::from_service_client)
    }

    /// Wrap an already configured service client.
    #[must_use]
    pub fn from_service_client(service: ServiceClient) -> Self {
        Self { service }
    }

    /// Access the base URL.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        self.service.base_url()
    }

    /// Access the shared request executor.
    #[must_use]
    pub fn service(&self) -> &ServiceClient {
        &self.service
    }

    /// IP addresses.
    #[must_use]
    pub fn ips(&self) -> IpClient {
        IpClient::from_service_client(self.service.clone())
    }

    /// Storages and their snapshot schedules.
    #[must_use]
    pub fn storages(&self) -> StorageClient {
        StorageClient::from_service_client(self.service.clone())
    }

    /// Storage templates.
    #[must_use]
    pub fn templates(&self) -> TemplateClient {
        TemplateClient::from_service_client(self.service.clone())
    }

    /// SSH keys.
    #[must_use]
    pub fn sshkeys(&self) -> SshkeyClient {
        SshkeyClient::from_service_client(self.service.clone())
    }

    /// PaaS services, templates and security zones.
    #[must_use]
    pub fn paas(&self) -> PaasClient {
        PaasClient::from_service_client(self.service.clone())
    }

    /// ISO images.
    #[must_use]
    pub fn isoimages(&self) -> IsoImageClient {
        IsoImageClient::from_service_client(self.service.clone())
    }

    /// Server to network and server to ISO image relations.
    #[must_use]
    pub fn servers(&self) -> ServerClient {
        ServerClient::from_service_client(self.service.clone())
    }

    /// Fetch the current status of an asynchronous request.
    ///
    /// # Errors
    ///
    /// Returns an error if the status endpoint cannot be queried.
    pub async fn request_status(&self, request_uuid: &RequestUuid) -> Result<RequestStatus> {
        self.service.request_status(request_uuid).await
    }

    /// Block until an asynchronous request completes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RequestFailed`] if the API reports a failure and
    /// [`Error::Timeout`] if the configured check timeout elapses first.
    pub async fn wait_for_request_completion(&self, request_uuid: &RequestUuid) -> Result<()> {
        self.service.wait_for_request_completion(request_uuid).await
    }
}
