//! IP address client and data models for the gridscale API.
//!
//! Provides typed structures and an asynchronous client for `/objects/ips`.

#![deny(missing_docs)]

pub mod client;
pub mod models;

pub use client::IpClient;
pub use models::{
    Ip, IpCreateRequest, IpCreateResponse, IpFamily, IpLoadbalancer, IpPublicIpRelation,
    IpRelations, IpServer, IpStorageRelation, IpUpdateRequest,
};

/// Convenient result alias sharing the `gsclient-core` error type.
pub type Result<T> = gsclient_core::Result<T>;
