//! ISO image client and data models for the gridscale API.
//!
//! ISO images are downloaded by the API from a source URL and can then be
//! attached to servers as virtual CD-ROMs.

#![deny(missing_docs)]

pub mod client;
pub mod models;

pub use client::IsoImageClient;
pub use models::{
    IsoImage, IsoImageCreateRequest, IsoImageRelations, IsoImageServer, IsoImageUpdateRequest,
};

/// Convenient result alias sharing the `gsclient-core` error type.
pub type Result<T> = gsclient_core::Result<T>;
