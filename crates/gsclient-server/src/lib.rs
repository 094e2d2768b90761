//! Server relation client and data models for the gridscale API.
//!
//! Servers are linked to networks and ISO images through relation objects
//! below `/objects/servers/{server_uuid}`. Unlike most objects, relations are
//! created synchronously.

#![deny(missing_docs)]

pub mod client;
pub mod isoimage;
pub mod network;

pub use client::ServerClient;
pub use isoimage::{
    ServerIsoImageCreateRequest, ServerIsoImageRelation, ServerIsoImageUpdateRequest,
};
pub use network::{
    FirewallAction, FirewallProtocol, FirewallRule, FirewallRules, ServerNetworkCreateRequest,
    ServerNetworkRelation, ServerNetworkUpdateRequest,
};

/// Convenient result alias sharing the `gsclient-core` error type.
pub type Result<T> = gsclient_core::Result<T>;
