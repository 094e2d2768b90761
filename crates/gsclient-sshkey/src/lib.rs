//! SSH key client and data models for the gridscale API.

#![deny(missing_docs)]

pub mod client;
pub mod models;

pub use client::SshkeyClient;
pub use models::{Sshkey, SshkeyCreateRequest, SshkeyUpdateRequest};

/// Convenient result alias sharing the `gsclient-core` error type.
pub type Result<T> = gsclient_core::Result<T>;
