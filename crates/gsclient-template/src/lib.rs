//! Template client and data models for the gridscale API.
//!
//! Templates are storage images that new storages can be created from, either
//! public OS images or private ones built from snapshots.

#![deny(missing_docs)]

pub mod client;
pub mod models;

pub use client::TemplateClient;
pub use models::{Template, TemplateCreateRequest, TemplateUpdateRequest};

/// Convenient result alias sharing the `gsclient-core` error type.
pub type Result<T> = gsclient_core::Result<T>;
