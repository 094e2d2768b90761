//! # gsclient-core
//!
//! Core types and utilities for working with the gridscale API.
//!
//! This crate provides the error type, typed identifiers, configuration, and the
//! shared HTTP request helper that every resource crate builds on.
//!
//! ## Modules
//!
//! - [`error`] - Error types and HTTP status code mapping
//! - [`uuid`] - Strongly-typed UUID wrappers for gridscale objects
//! - [`types`] - Wire types shared by all resources (events, create responses)
//! - [`config`] - Client configuration and environment loading
//! - [`client`] - HTTP client configuration and the shared request executor
//! - [`request`] - Asynchronous request status and completion polling

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod config;
pub mod error;
pub mod request;
pub mod types;
pub mod uuid;

// Re-export commonly used types
pub use client::{ServiceClient, ServiceClientBuilder};
pub use config::GridscaleClientConfig;
pub use error::{Error, Result};
