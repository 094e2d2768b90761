//! PaaS client and data models for the gridscale API.
//!
//! Covers managed services (`/objects/paas/services`), their metrics, the
//! service templates they are created from, and the security zones that
//! isolate them.

#![deny(missing_docs)]

pub mod client;
pub mod models;
pub mod security_zone;

pub use client::PaasClient;
pub use models::{
    Credential, ListenPorts, MetricValue, PaasService, PaasServiceCreateRequest,
    PaasServiceCreateResponse, PaasServiceMetric, PaasServiceUpdateRequest, PaasTemplate,
    PaasTemplateResource, ResourceLimit,
};
pub use security_zone::{
    PaasSecurityZone, SecurityZoneCreateRequest, SecurityZoneCreateResponse,
    SecurityZoneRelations, SecurityZoneService, SecurityZoneUpdateRequest,
};

/// Convenient result alias sharing the `gsclient-core` error type.
pub type Result<T> = gsclient_core::Result<T>;
